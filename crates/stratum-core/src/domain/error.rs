// ============================================================================
// domain/error.rs - HIERARCHY DOMAIN ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports keep a copy of non-fatal failures)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid identifier '{input}': {reason}")]
    InvalidIdentifier { input: String, reason: String },

    #[error("Invalid naming scheme: {0}")]
    InvalidNamingScheme(String),

    // ========================================================================
    // Registry Errors (non-fatal during orchestration)
    // ========================================================================
    #[error("Marker line '{marker}' not found in {}", .path.display())]
    MarkerNotFound { path: PathBuf, marker: String },
}

impl DomainError {
    /// Shorthand used by the identifier parser and the normalizer.
    pub fn invalid_identifier(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidIdentifier { reason, .. } => vec![
                format!("Details: {}", reason),
                "Use the format <project>[.<app>[.<module>]]".into(),
                "Segments may only contain letters, digits and underscores".into(),
                "Example: stratum create blog.posts.comments".into(),
            ],
            Self::InvalidNamingScheme(msg) => vec![
                format!("Details: {}", msg),
                "Check the [naming] section of your configuration".into(),
            ],
            Self::MarkerNotFound { path, marker } => vec![
                format!("Add a line '{}' to {}", marker, path.display()),
                "The registry was left unchanged".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidIdentifier { .. } => ErrorCategory::Validation,
            Self::InvalidNamingScheme(_) => ErrorCategory::Configuration,
            Self::MarkerNotFound { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    NotFound,
}
