//! Translation diagnostics.
//!
//! The dispatcher's fallback path (an unclassifiable node) is the one
//! intentionally non-fatal condition: it substitutes an accept-anything
//! rule and reports here instead of failing. Diagnostics are collected
//! per translation call so embedding contexts can surface or suppress
//! them.

use serde::Serialize;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single diagnostic message from translation.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// JSON path to the node (e.g., "/properties/id").
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    /// Create a warning diagnostic at the given schema path.
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{}: {}: {}", severity, path, self.message)
    }
}
