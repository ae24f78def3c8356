//! Parsing script and markup files into `swc` programs.

use std::path::Path;
use std::sync::Arc;

use swc_common::{BytePos, FileName, SourceMap};
use swc_ecma_ast::{EsVersion, Program};
use swc_ecma_parser::{parse_file_as_program, EsSyntax, Syntax, TsSyntax};
use tracing::debug;

/// A parsed file ready for rule dispatch.
#[derive(Debug)]
pub struct ParsedSource {
    /// The syntax tree.
    pub program: Program,
    /// Source-map position of the file's first byte, used to rebase spans.
    pub file_start: BytePos,
}

/// A fatal parse error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SourceError {
    /// Parser message.
    pub message: String,
}

/// Chooses the parser syntax from the file extension.
///
/// TypeScript extensions get the TypeScript grammar (`.tsx` with JSX);
/// everything else is parsed as modern ECMAScript with JSX enabled.
#[must_use]
pub fn syntax_for(path: &Path) -> Syntax {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ts" | "mts" | "cts") => Syntax::Typescript(TsSyntax {
            tsx: false,
            decorators: true,
            ..Default::default()
        }),
        Some("tsx") => Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            decorators: true,
            ..Default::default()
        }),
    }
}

/// Parses `content` as a module or script, depending on its contents.
///
/// # Errors
///
/// Returns an error if the parser cannot recover a program.
pub fn parse_source(path: &Path, content: &str) -> Result<ParsedSource, SourceError> {
    let cm: Arc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        FileName::Custom(path.display().to_string()).into(),
        content.to_string(),
    );
    let file_start = fm.start_pos;

    let mut recovered = Vec::new();
    let program = parse_file_as_program(
        &fm,
        syntax_for(path),
        EsVersion::EsNext,
        None,
        &mut recovered,
    )
    .map_err(|e| SourceError {
        message: format!("{:?}", e.kind()),
    })?;

    if !recovered.is_empty() {
        debug!(
            "Recovered from {} syntax error(s) in {}",
            recovered.len(),
            path.display()
        );
    }

    Ok(ParsedSource {
        program,
        file_start,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_jsx_in_js_files() {
        let parsed = parse_source(
            Path::new("app.jsx"),
            "const el = <div style={{ color: 'red' }} />;",
        );
        assert!(parsed.is_ok());
    }

    #[test]
    fn parses_typescript() {
        let parsed = parse_source(
            Path::new("share.ts"),
            "const data: ShareData = { title: 't' }; navigator.share(data);",
        );
        assert!(parsed.is_ok());
    }

    #[test]
    fn parses_tsx() {
        let parsed = parse_source(
            Path::new("card.tsx"),
            "export const Card = (p: { n: number }) => <div style={{ aspectRatio: '1' }} />;",
        );
        assert!(parsed.is_ok());
    }

    #[test]
    fn reports_fatal_errors() {
        let parsed = parse_source(Path::new("broken.js"), "const = ;");
        assert!(parsed.is_err());
    }

    #[test]
    fn syntax_selection() {
        assert!(matches!(
            syntax_for(Path::new("a.tsx")),
            Syntax::Typescript(TsSyntax { tsx: true, .. })
        ));
        assert!(matches!(
            syntax_for(Path::new("a.mts")),
            Syntax::Typescript(TsSyntax { tsx: false, .. })
        ));
        assert!(matches!(
            syntax_for(Path::new("a.cjs")),
            Syntax::Es(EsSyntax { jsx: true, .. })
        ));
    }
}
