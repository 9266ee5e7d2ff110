//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the driven
//! ports, not hierarchy rules. Rule violations are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The external scaffold generator failed or could not be started.
    #[error("Scaffold generator failed: `{command}` {}", describe_status(.status))]
    ScaffoldGeneratorError {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", .path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// A registry file to patch does not exist.
    #[error("Registry file not found: {}", .path.display())]
    RegistryMissing { path: PathBuf },

    /// Deletion was requested below project granularity.
    #[error("Deletion is only supported for full projects (got '{identifier}')")]
    DeletionScope { identifier: String },

    /// Shared adapter state is unusable (lock poisoned).
    #[error("Adapter state lock poisoned")]
    AdapterLockError,
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exited with status {code}"),
        None => "could not be run to completion".into(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ScaffoldGeneratorError {
                command, stderr, ..
            } => {
                let mut suggestions = vec![
                    format!("Command: {}", command),
                    "Ensure Django is installed and `django-admin` is in your PATH".into(),
                    "Or use the built-in generator: STRATUM_GENERATOR__KIND=builtin".into(),
                ];
                if let Some(first) = stderr.lines().find(|l| !l.trim().is_empty()) {
                    suggestions.push(format!("Generator said: {}", first.trim()));
                }
                suggestions.push("Re-running the same command resumes where it stopped".into());
                suggestions
            }
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Re-running the same command resumes where it stopped".into(),
            ],
            Self::RegistryMissing { path } => vec![
                format!("Expected a generated file at {}", path.display()),
                "The registry was left unchanged".into(),
            ],
            Self::DeletionScope { .. } => vec![
                "Only whole projects can be deleted: stratum delete <project>".into(),
                "Remove app or module directories by hand if you really need to".into(),
            ],
            Self::AdapterLockError => vec!["This is likely a bug; please report it".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ScaffoldGeneratorError { .. } => ErrorCategory::Internal,
            Self::FilesystemError { .. } | Self::AdapterLockError => ErrorCategory::Internal,
            Self::RegistryMissing { .. } => ErrorCategory::NotFound,
            Self::DeletionScope { .. } => ErrorCategory::Validation,
        }
    }
}
