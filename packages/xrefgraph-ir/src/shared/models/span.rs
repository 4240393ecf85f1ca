//! Source location types
//!
//! Spans arrive from the resolved-AST provider 0-based with an exclusive end
//! column. The graph store wants 1-based lines and columns with an inclusive
//! end column; `to_range` performs that conversion.

use serde::{Deserialize, Serialize};
use xrefgraph_storage::{FileId, SourceRange};

/// Span in source code (0-based, end column exclusive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Store range: lines +1, start column +1, end column unchanged
    /// (exclusive 0-based == inclusive 1-based).
    pub fn to_range(&self, file_id: FileId) -> SourceRange {
        SourceRange::new(
            file_id,
            self.start_line.saturating_add(1),
            self.start_col.saturating_add(1),
            self.end_line.saturating_add(1),
            self.end_col,
        )
    }
}
