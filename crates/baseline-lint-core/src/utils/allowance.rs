//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // baseline-lint: allow(no-nonbaseline-api) reason="polyfilled in main.js"
//! /* baseline-lint: allow(all) */
//! ```
//!
//! A directive applies to its own line and to the line after it.

use std::collections::HashSet;

/// Comment prefix that introduces a directive.
pub const DIRECTIVE_PREFIX: &str = "baseline-lint:";

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
pub struct AllowDirective {
    /// Rule names that are allowed.
    pub rules: HashSet<String>,
    /// Optional reason for the allowance.
    pub reason: Option<String>,
}

/// Checks source code for an allowance comment covering `line`.
///
/// # Arguments
///
/// * `content` - Source code content
/// * `line` - Line number to check (1-indexed)
/// * `rule_name` - Name of the rule to check for
#[must_use]
pub fn check_allow_with_reason(content: &str, line: usize, rule_name: &str) -> AllowCheck {
    let lines: Vec<&str> = content.lines().collect();

    for check_line in [line.saturating_sub(1), line] {
        if check_line == 0 || check_line > lines.len() {
            continue;
        }

        if let Some(directive) = parse_allow_directive(lines[check_line - 1]) {
            if directive.rules.contains(rule_name) || directive.rules.contains("all") {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                };
            }
        }
    }

    AllowCheck::Denied
}

/// Parses an allowance directive from a line containing a comment.
///
/// The comment may trail code on the same line.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let comment_content = if let Some(start) = line.find("//") {
        line[start + 2..].trim()
    } else if let Some(start) = line.find("/*") {
        let body = &line[start + 2..];
        body.split("*/").next().unwrap_or(body).trim()
    } else {
        return None;
    };

    let directive = comment_content.strip_prefix(DIRECTIVE_PREFIX)?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest.strip_prefix("reason=").and_then(|reason_part| {
        let quoted = reason_part.trim().strip_prefix('"')?;
        let end = quoted.find('"')?;
        Some(quoted[..end].to_string())
    });

    Some(AllowDirective { rules, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allow_directive() {
        let directive =
            parse_allow_directive("// baseline-lint: allow(no-nonbaseline-api)").unwrap();
        assert!(directive.rules.contains("no-nonbaseline-api"));
        assert!(directive.reason.is_none());
    }

    #[test]
    fn test_parse_block_comment() {
        let directive =
            parse_allow_directive("  /* baseline-lint: allow(no-nonbaseline-css) */").unwrap();
        assert!(directive.rules.contains("no-nonbaseline-css"));
    }

    #[test]
    fn test_parse_trailing_comment_with_reason() {
        let directive = parse_allow_directive(
            "navigator.share(d); // baseline-lint: allow(no-nonbaseline-api) reason=\"guarded by feature check\"",
        )
        .unwrap();
        assert_eq!(directive.reason.as_deref(), Some("guarded by feature check"));
    }

    #[test]
    fn test_parse_multiple_rules() {
        let directive =
            parse_allow_directive("// baseline-lint: allow(no-nonbaseline-api, no-nonbaseline-css)")
                .unwrap();
        assert_eq!(directive.rules.len(), 2);
    }

    #[test]
    fn test_ignores_other_comments() {
        assert!(parse_allow_directive("// eslint-disable-next-line").is_none());
        assert!(parse_allow_directive("// baseline-lint: allow()").is_none());
        assert!(parse_allow_directive("navigator.share();").is_none());
    }

    #[test]
    fn test_check_previous_line() {
        let content = "if (ok) {\n  // baseline-lint: allow(no-nonbaseline-api)\n  navigator.share(d);\n}";

        assert!(check_allow_with_reason(content, 3, "no-nonbaseline-api").is_allowed());
        assert!(!check_allow_with_reason(content, 3, "no-nonbaseline-css").is_allowed());
        assert!(!check_allow_with_reason(content, 4, "no-nonbaseline-api").is_allowed());
    }

    #[test]
    fn test_all_matches_every_rule() {
        let content = "// baseline-lint: allow(all) reason=\"legacy page\"\nel.style.cssText = 'x';";
        let result = check_allow_with_reason(content, 2, "no-nonbaseline-css");
        assert_eq!(result.reason(), Some("legacy page"));
    }
}
