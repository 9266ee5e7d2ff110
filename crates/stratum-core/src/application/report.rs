//! Per-run record of what the orchestrator did.
//!
//! The core never prints. Each state transition becomes a [`StepRecord`]
//! and the CLI decides how to render it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::Granularity;

/// What a step acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepSubject {
    Project,
    App,
    Module,
    RouteFile,
    Registry,
}

impl StepSubject {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::App => "app",
            Self::Module => "module",
            Self::RouteFile => "route file",
            Self::Registry => "registry",
        }
    }
}

impl fmt::Display for StepSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Created,
    AlreadyExists,
    Registered,
    AlreadyRegistered,
    Deleted,
    /// Dry run: would be created or registered.
    Planned,
    /// Non-fatal failure; `detail` says why.
    Warning,
}

impl StepStatus {
    /// Whether the step changed the filesystem.
    pub const fn is_mutation(self) -> bool {
        matches!(self, Self::Created | Self::Registered | Self::Deleted)
    }
}

/// One state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub subject: StepSubject,
    pub name: String,
    pub path: PathBuf,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Everything one orchestration call did, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub identifier: String,
    pub granularity: Granularity,
    pub steps: Vec<StepRecord>,
}

impl ScaffoldReport {
    pub fn new(identifier: impl Into<String>, granularity: Granularity) -> Self {
        Self {
            identifier: identifier.into(),
            granularity,
            steps: Vec::new(),
        }
    }

    pub(crate) fn record(
        &mut self,
        subject: StepSubject,
        name: impl Into<String>,
        path: &Path,
        status: StepStatus,
    ) {
        self.steps.push(StepRecord {
            subject,
            name: name.into(),
            path: path.to_path_buf(),
            status,
            detail: None,
        });
    }

    pub(crate) fn warn(
        &mut self,
        subject: StepSubject,
        name: impl Into<String>,
        path: &Path,
        detail: impl Into<String>,
    ) {
        self.steps.push(StepRecord {
            subject,
            name: name.into(),
            path: path.to_path_buf(),
            status: StepStatus::Warning,
            detail: Some(detail.into()),
        });
    }

    /// `true` if no step touched the filesystem.
    pub fn is_noop(&self) -> bool {
        !self.steps.iter().any(|s| s.status.is_mutation())
    }

    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(|s| s.status == StepStatus::Warning)
    }
}
