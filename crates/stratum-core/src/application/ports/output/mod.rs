//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stratum-adapters` crate provides implementations.

use std::path::Path;

use serde::Serialize;

use crate::error::StratumResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stratum_adapters::filesystem::LocalFilesystem` (production)
/// - `stratum_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Every call is a single, independent operation; callers sequence them
/// - `exists` never fails; unreadable paths count as absent
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StratumResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> StratumResult<()>;

    /// Read a whole file as UTF-8 text.
    fn read_file(&self, path: &Path) -> StratumResult<String>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> StratumResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> StratumResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> StratumResult<()>;
}

/// Port for the external project/app skeleton generator.
///
/// Implemented by:
/// - `stratum_adapters::generator::DjangoAdminGenerator` (runs `django-admin`)
/// - `stratum_adapters::generator::BuiltinGenerator` (writes the skeleton itself)
///
/// Both operations expect `target` to exist and must not return until the
/// skeleton is fully on disk.
#[cfg_attr(test, mockall::automock)]
pub trait ScaffoldGenerator: Send + Sync {
    /// Short name for logs (`django-admin`, `builtin`).
    fn name(&self) -> &'static str;

    /// Generate a project skeleton (`manage.py` + settings package) in `target`.
    fn start_project(&self, name: &str, target: &Path) -> StratumResult<()>;

    /// Generate an app skeleton (`apps.py`, `models.py`, ...) in `target`.
    fn start_app(&self, name: &str, target: &Path) -> StratumResult<()>;
}

/// What [`RegistryPatcher::ensure_line_registered`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchOutcome {
    Inserted,
    AlreadyPresent,
}

/// Port for registry updates.
///
/// The orchestrator only knows this contract, so a structured backend can
/// replace the text patcher without touching it.
///
/// Implemented by:
/// - `crate::application::services::TextRegistryPatcher` (line-oriented files)
pub trait RegistryPatcher: Send + Sync {
    /// Ensure `line` is registered under `marker` in `file`.
    ///
    /// Fails with `MarkerNotFound` or `RegistryMissing`, leaving the file
    /// untouched.
    fn ensure_line_registered(
        &self,
        file: &Path,
        marker: &str,
        line: &str,
    ) -> StratumResult<PatchOutcome>;

    /// What `ensure_line_registered` would do, without writing.
    ///
    /// `Inserted` means the line would be added.
    fn preview_line(&self, file: &Path, marker: &str, line: &str) -> StratumResult<PatchOutcome>;
}
