//! `django-admin` subprocess adapter.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, instrument, trace};
use walkdir::WalkDir;

use stratum_core::{
    application::{ApplicationError, ports::ScaffoldGenerator},
    domain::paths::{APPS_PY, MANAGE_PY},
    error::StratumResult,
};

pub const DEFAULT_PROGRAM: &str = "django-admin";

/// Runs `django-admin startproject|startapp <name> <target>`.
///
/// The call blocks until the child exits. A zero exit status is not taken
/// on trust: the entity's marker file must exist afterwards.
#[derive(Debug, Clone)]
pub struct DjangoAdminGenerator {
    program: String,
}

impl DjangoAdminGenerator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, subcommand: &str, name: &str, target: &Path, marker: &str) -> StratumResult<()> {
        let command_line = format!(
            "{} {} {} {}",
            self.program,
            subcommand,
            name,
            target.display()
        );
        debug!(command = %command_line, "Running generator");

        let output = Command::new(&self.program)
            .arg(subcommand)
            .arg(name)
            .arg(target)
            .output()
            .map_err(|e| ApplicationError::ScaffoldGeneratorError {
                command: command_line.clone(),
                status: None,
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ApplicationError::ScaffoldGeneratorError {
                command: command_line,
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }

        if !target.join(marker).exists() {
            return Err(ApplicationError::ScaffoldGeneratorError {
                command: command_line,
                status: output.status.code(),
                stderr: format!("{marker} was not created in {}", target.display()),
            }
            .into());
        }

        let files = generated_files(target);
        for file in &files {
            trace!(file = %file.display(), "Generated");
        }
        debug!(files = files.len(), "Generator finished");

        Ok(())
    }
}

/// Files under `target`, relative to it and sorted. Unreadable entries are
/// skipped.
fn generated_files(target: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(target)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(target)
                .ok()
                .map(Path::to_path_buf)
        })
        .collect();
    files.sort();
    files
}

impl Default for DjangoAdminGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl ScaffoldGenerator for DjangoAdminGenerator {
    fn name(&self) -> &'static str {
        "django-admin"
    }

    #[instrument(skip(self), fields(target = %target.display()))]
    fn start_project(&self, name: &str, target: &Path) -> StratumResult<()> {
        self.run("startproject", name, target, MANAGE_PY)
    }

    #[instrument(skip(self), fields(target = %target.display()))]
    fn start_app(&self, name: &str, target: &Path) -> StratumResult<()> {
        self.run("startapp", name, target, APPS_PY)
    }
}
