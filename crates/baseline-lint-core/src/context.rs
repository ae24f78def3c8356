//! Context types for rule execution.

use crate::oracle::FeatureOracle;
use crate::types::Location;

use std::path::{Path, PathBuf};
use swc_common::{BytePos, Span};

/// Context provided to per-file rules.
///
/// Carries the file being analyzed and the process-wide feature oracle.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
    /// Position of the first byte of this file in the parser's source map.
    pub file_start: BytePos,
    /// Shared Baseline classification oracle.
    pub oracle: &'a FeatureOracle,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(
        path: &'a Path,
        content: &'a str,
        root: &Path,
        file_start: BytePos,
        oracle: &'a FeatureOracle,
    ) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
            file_start,
            oracle,
        }
    }

    /// Converts a parser span into a [`Location`] within this file.
    #[must_use]
    pub fn location_for(&self, span: Span) -> Location {
        let offset = self.byte_offset(span.lo);
        let end = self.byte_offset(span.hi).max(offset);
        let (line, column) = self.line_col(offset);

        Location::new(self.relative_path.clone(), line, column).with_span(offset, end - offset)
    }

    /// Maps a source-map position to a byte offset clamped into the file.
    fn byte_offset(&self, pos: BytePos) -> usize {
        let relative = pos.0.saturating_sub(self.file_start.0) as usize;
        let mut offset = relative.min(self.content.len());
        while !self.content.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    /// Calculates the 1-indexed line and character column for a byte offset.
    fn line_col(&self, offset: usize) -> (usize, usize) {
        let before = &self.content[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}
