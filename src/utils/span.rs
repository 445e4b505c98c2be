//! Source location tracking

use serde::{Deserialize, Serialize};
use std::fmt;

/// A line/column position in the source text, as recorded by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line number
    pub line: u32,
    /// 1-based column number
    pub column: u32,
}

impl Position {
    /// Create a new position
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Create a dummy position (for testing and synthesized nodes)
    pub fn dummy() -> Self {
        Self { line: 0, column: 0 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::dummy()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
