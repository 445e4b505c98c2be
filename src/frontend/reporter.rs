//! Diagnostic sinks for the resolution pass
//!
//! Reporting never influences control flow: the pass keeps walking the tree
//! after every call.

use serde::{Deserialize, Serialize};

use crate::utils::Position;

/// Receives one diagnostic per offending node
pub trait ErrorReporter {
    fn report(&mut self, line: u32, column: u32, message: &str);
}

/// Writes `line:column ***ERROR*** message` lines to stderr
#[derive(Debug, Default)]
pub struct StderrReporter {
    count: usize,
}

impl StderrReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl ErrorReporter for StderrReporter {
    fn report(&mut self, line: u32, column: u32, message: &str) {
        self.count += 1;
        eprintln!("{}:{} ***ERROR*** {}", line, column, message);
    }
}

/// A collected diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub pos: Position,
    pub message: String,
}

/// Collects diagnostics in report order
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Messages only, for quick comparisons
    pub fn messages(&self) -> Vec<&str> {
        self.items.iter().map(|d| d.message.as_str()).collect()
    }
}

impl ErrorReporter for Diagnostics {
    fn report(&mut self, line: u32, column: u32, message: &str) {
        self.items.push(Diagnostic {
            pos: Position::new(line, column),
            message: message.to_string(),
        });
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
