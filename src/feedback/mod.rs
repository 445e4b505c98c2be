//! Structured Feedback Module
//!
//! Machine-readable output of a resolution run:
//! - JSON diagnostic reports with source locations
//! - Symbol and error counts

use serde::{Deserialize, Serialize};

use crate::frontend::reporter::Diagnostic;
use crate::frontend::resolver::Resolution;
use crate::utils::Error;

// ==================== Structured Error Report ====================

/// A single reported problem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error code, for symbol table contract violations
    pub code: Option<String>,

    /// Error severity
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// Location information
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// An error in the program being resolved
    Error,
    /// Misuse of the symbol table by the pass itself
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl ErrorReport {
    /// Create a report from a diagnostic sent to the reporter
    pub fn from_diagnostic(diagnostic: &Diagnostic, file_name: &str) -> Self {
        Self {
            code: None,
            severity: Severity::Error,
            message: diagnostic.message.clone(),
            location: Some(Location {
                file: file_name.to_string(),
                line: diagnostic.pos.line,
                column: diagnostic.pos.column,
            }),
        }
    }

    /// Create a report from a contract violation
    pub fn from_internal(error: &Error) -> Self {
        Self {
            code: error.code().map(str::to_string),
            severity: Severity::Internal,
            message: error.to_string(),
            location: None,
        }
    }
}

// ==================== Resolution Feedback ====================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolveStats {
    /// Symbols created, including fields and locals
    pub symbol_count: usize,

    /// Names bound in the global scope
    pub global_count: usize,

    pub error_count: usize,

    pub internal_error_count: usize,
}

/// Complete feedback for one resolved file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveFeedback {
    pub success: bool,

    pub source_file: String,

    /// All diagnostics, in report order, followed by internal errors
    pub diagnostics: Vec<ErrorReport>,

    pub stats: ResolveStats,
}

impl ResolveFeedback {
    pub fn new(source_file: &str, diagnostics: &[Diagnostic], resolution: &Resolution) -> Self {
        let mut reports: Vec<ErrorReport> = diagnostics
            .iter()
            .map(|d| ErrorReport::from_diagnostic(d, source_file))
            .collect();
        reports.extend(resolution.internal_errors.iter().map(ErrorReport::from_internal));

        let stats = ResolveStats {
            symbol_count: resolution.store.len(),
            global_count: resolution.globals.outermost().map_or(0, |scope| scope.len()),
            error_count: resolution.error_count,
            internal_error_count: resolution.internal_errors.len(),
        };

        Self {
            success: !resolution.has_errors(),
            source_file: source_file.to_string(),
            diagnostics: reports,
            stats,
        }
    }

    /// Output as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Output as compact JSON (for programmatic use)
    pub fn to_json_compact(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
