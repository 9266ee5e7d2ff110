//! Hierarchy Orchestrator - the create/plan/delete use cases.
//!
//! A create call walks a small state machine, one stage per hierarchy
//! level, always starting at the project:
//!
//! ```text
//! Project ──► App ──► Module ──► Done
//!    │         │
//!    └─────────┴──► Done   (when the identifier stops there)
//! ```
//!
//! Every stage is idempotent: entities are created only when the
//! existence snapshot says they are missing, and registry lines are
//! delegated to the [`RegistryPatcher`], which is a no-op when the line is
//! already present. Running the same identifier twice therefore writes
//! nothing the second time.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, PatchOutcome, RegistryPatcher, ScaffoldGenerator},
        report::{ScaffoldReport, StepStatus, StepSubject},
        services::{ExistenceOracle, InvokerOptions, ScaffoldInvoker},
    },
    domain::{
        AppPaths, EntityIdentifier, Granularity, HierarchyState, ModuleDir, ModulePaths,
        NamingScheme, PathSet, RegistryEntry, imports_include,
    },
    error::{StratumError, StratumResult},
};

/// Aggregate route file written into every app.
pub const APP_ROUTES_TEMPLATE: &str = "from django.urls import include, path

urlpatterns = [
]
";

/// Content of a feature module's `urls_<stem>.py`.
pub const MODULE_ROUTES_TEMPLATE: &str = "from django.urls import path

urlpatterns = [
]
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Project,
    App,
    Module,
    Done,
}

impl Stage {
    fn next(self, target: Granularity) -> Self {
        let next = match self {
            Self::Project => Self::App,
            Self::App => Self::Module,
            Self::Module | Self::Done => Self::Done,
        };
        match next {
            Self::App if target < Granularity::App => Self::Done,
            Self::Module if target < Granularity::Module => Self::Done,
            other => other,
        }
    }
}

/// Whether a walk touches the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Apply,
    Preview,
}

/// Drives idempotent creation and deletion of a project hierarchy.
pub struct HierarchyOrchestrator {
    base_dir: PathBuf,
    scheme: NamingScheme,
    filesystem: Arc<dyn Filesystem>,
    oracle: ExistenceOracle,
    invoker: ScaffoldInvoker,
    registry: Box<dyn RegistryPatcher>,
}

impl HierarchyOrchestrator {
    pub fn new(
        base_dir: impl Into<PathBuf>,
        scheme: NamingScheme,
        filesystem: Arc<dyn Filesystem>,
        generator: Box<dyn ScaffoldGenerator>,
        registry: Box<dyn RegistryPatcher>,
        options: InvokerOptions,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            scheme,
            oracle: ExistenceOracle::new(filesystem.clone()),
            invoker: ScaffoldInvoker::new(generator, filesystem.clone(), options),
            filesystem,
            registry,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn generator_name(&self) -> &'static str {
        self.invoker.generator_name()
    }

    /// Resolve every path for `identifier` and snapshot what exists.
    pub fn inspect(&self, identifier: &EntityIdentifier) -> StratumResult<HierarchyState> {
        let paths = PathSet::resolve(&self.base_dir, &self.scheme, identifier)?;
        let exists = self.oracle.inspect(&paths);
        Ok(HierarchyState { paths, exists })
    }

    /// Ensure every entity `identifier` names exists and is registered.
    #[instrument(skip(self), fields(identifier = %identifier, base_dir = %self.base_dir.display()))]
    pub fn create(&self, identifier: &EntityIdentifier) -> StratumResult<ScaffoldReport> {
        let report = self.walk(identifier, Mode::Apply)?;
        info!(
            steps = report.steps.len(),
            changed = !report.is_noop(),
            "Scaffold complete"
        );
        Ok(report)
    }

    /// Same walk as [`create`](Self::create) without writing anything.
    #[instrument(skip(self), fields(identifier = %identifier))]
    pub fn plan(&self, identifier: &EntityIdentifier) -> StratumResult<ScaffoldReport> {
        self.walk(identifier, Mode::Preview)
    }

    /// Remove a whole project tree.
    ///
    /// Only project identifiers are accepted. A missing project is reported
    /// as a warning step rather than an error.
    #[instrument(skip(self), fields(identifier = %identifier))]
    pub fn delete(&self, identifier: &EntityIdentifier) -> StratumResult<ScaffoldReport> {
        if identifier.granularity() != Granularity::Project {
            return Err(ApplicationError::DeletionScope {
                identifier: identifier.to_string(),
            }
            .into());
        }

        let state = self.inspect(identifier)?;
        let project = &state.paths.project;
        let mut report = ScaffoldReport::new(identifier.to_string(), Granularity::Project);

        if state.exists.project_root {
            self.filesystem.remove_dir_all(&project.root)?;
            info!(root = %project.root.display(), "Project deleted");
            report.record(
                StepSubject::Project,
                project.name.as_str(),
                &project.root,
                StepStatus::Deleted,
            );
        } else {
            warn!(root = %project.root.display(), "Project does not exist, nothing to delete");
            report.warn(
                StepSubject::Project,
                project.name.as_str(),
                &project.root,
                format!("Project '{}' does not exist", project.name),
            );
        }

        Ok(report)
    }

    fn walk(&self, identifier: &EntityIdentifier, mode: Mode) -> StratumResult<ScaffoldReport> {
        let state = self.inspect(identifier)?;
        let target = state.paths.granularity();
        let mut report = ScaffoldReport::new(identifier.to_string(), target);

        if state.exists.is_complete(&state.paths) {
            debug!("All entities present, nothing will be created");
        }

        let mut stage = Stage::Project;
        while stage != Stage::Done {
            match stage {
                Stage::Project => self.ensure_project(mode, &state, &mut report)?,
                Stage::App => self.ensure_app(mode, &state, &mut report)?,
                Stage::Module => self.ensure_module(mode, &state, &mut report)?,
                Stage::Done => {}
            }
            stage = stage.next(target);
        }

        Ok(report)
    }

    fn ensure_project(
        &self,
        mode: Mode,
        state: &HierarchyState,
        report: &mut ScaffoldReport,
    ) -> StratumResult<()> {
        let project = &state.paths.project;
        self.ensure_entity(
            mode,
            state.exists.project,
            (StepSubject::Project, project.name.as_str(), &project.root),
            report,
            || {
                self.invoker
                    .create_project(project.name.as_str(), &project.root)
            },
        )
    }

    fn ensure_app(
        &self,
        mode: Mode,
        state: &HierarchyState,
        report: &mut ScaffoldReport,
    ) -> StratumResult<()> {
        let app = app_paths(state)?;
        let project = &state.paths.project;
        let exists = &state.exists;

        self.ensure_entity(
            mode,
            exists.app,
            (StepSubject::App, app.name.as_str(), &app.dir),
            report,
            || self.invoker.create_app(app.name.as_str(), &app.dir),
        )?;

        self.ensure_module_dir(mode, exists.default_module, &app.default_module, report)?;
        if app.own_module.dir != app.default_module.dir {
            self.ensure_module_dir(mode, exists.own_module, &app.own_module, report)?;
        }

        self.ensure_entity(
            mode,
            exists.app_routes,
            (StepSubject::RouteFile, app.name.as_str(), &app.urls),
            report,
            || self.filesystem.write_file(&app.urls, APP_ROUTES_TEMPLATE),
        )?;

        let project_pending = !exists.project;
        self.ensure_registered(
            mode,
            &RegistryEntry::installed_app(&app.name),
            &project.settings,
            project_pending,
            report,
        )?;
        self.ensure_include_import(mode, &project.urls, project_pending, report)?;
        self.ensure_registered(
            mode,
            &RegistryEntry::project_route(&app.name),
            &project.urls,
            project_pending,
            report,
        )
    }

    fn ensure_module(
        &self,
        mode: Mode,
        state: &HierarchyState,
        report: &mut ScaffoldReport,
    ) -> StratumResult<()> {
        let app = app_paths(state)?;
        let module = module_paths(state)?;
        let exists = &state.exists;

        // The app stage has just created the shared and own-named packages.
        let package_ready = exists.module_package
            || module.package.dir == app.default_module.dir
            || module.package.dir == app.own_module.dir;

        self.ensure_entity(
            mode,
            exists.target_module(),
            (
                StepSubject::Module,
                module.package.name.as_str(),
                &module.package.dir,
            ),
            report,
            || {
                self.filesystem.create_dir_all(&module.package.dir)?;
                self.filesystem.create_dir_all(&module.templates)?;
                self.write_placeholders(module, &exists.module_files)?;
                // Package marker last: an interrupted run leaves the module
                // looking absent and the next run completes it.
                if !package_ready {
                    self.filesystem.write_file(&module.package.init_py, "")?;
                }
                Ok(())
            },
        )?;

        self.ensure_registered(
            mode,
            &RegistryEntry::module_route(&app.name, &module.package.name),
            &app.urls,
            !exists.app_routes,
            report,
        )
    }

    fn write_placeholders(&self, module: &ModulePaths, present: &[bool]) -> StratumResult<()> {
        for (index, file) in module.placeholders.iter().enumerate() {
            if present.get(index).copied().unwrap_or(false) {
                continue;
            }
            let content = if *file == module.urls {
                MODULE_ROUTES_TEMPLATE
            } else {
                ""
            };
            self.filesystem.write_file(file, content)?;
        }
        Ok(())
    }

    fn ensure_module_dir(
        &self,
        mode: Mode,
        present: bool,
        module: &ModuleDir,
        report: &mut ScaffoldReport,
    ) -> StratumResult<()> {
        self.ensure_entity(
            mode,
            present,
            (StepSubject::Module, module.name.as_str(), &module.dir),
            report,
            || {
                self.filesystem.create_dir_all(&module.dir)?;
                self.filesystem.write_file(&module.init_py, "")
            },
        )
    }

    fn ensure_entity(
        &self,
        mode: Mode,
        present: bool,
        (subject, name, path): (StepSubject, &str, &Path),
        report: &mut ScaffoldReport,
        create: impl FnOnce() -> StratumResult<()>,
    ) -> StratumResult<()> {
        let status = match (present, mode) {
            (true, _) => {
                debug!(%subject, entity = name, "Already exists");
                StepStatus::AlreadyExists
            }
            (false, Mode::Preview) => StepStatus::Planned,
            (false, Mode::Apply) => {
                create()?;
                info!(%subject, entity = name, path = %path.display(), "Created");
                StepStatus::Created
            }
        };
        report.record(subject, name, path, status);
        Ok(())
    }

    /// The project routes need `include` once an app is mounted. Any
    /// existing import of it counts, not just the line this tool adds.
    fn ensure_include_import(
        &self,
        mode: Mode,
        file: &Path,
        pending: bool,
        report: &mut ScaffoldReport,
    ) -> StratumResult<()> {
        let entry = RegistryEntry::include_import();
        if !pending && self.filesystem.exists(file) {
            let content = self.filesystem.read_file(file)?;
            if imports_include(&content) {
                report.record(
                    StepSubject::Registry,
                    entry.line.trim(),
                    file,
                    StepStatus::AlreadyRegistered,
                );
                return Ok(());
            }
        }
        self.ensure_registered(mode, &entry, file, pending, report)
    }

    /// Register `entry` in `file`, downgrading patch failures to warnings.
    ///
    /// `pending` means the file itself is still to be created, which only
    /// matters for previews.
    fn ensure_registered(
        &self,
        mode: Mode,
        entry: &RegistryEntry,
        file: &Path,
        pending: bool,
        report: &mut ScaffoldReport,
    ) -> StratumResult<()> {
        let name = entry.line.trim();

        let outcome = match mode {
            Mode::Apply => self
                .registry
                .ensure_line_registered(file, &entry.marker, &entry.line),
            Mode::Preview if pending => Ok(PatchOutcome::Inserted),
            Mode::Preview => self.registry.preview_line(file, &entry.marker, &entry.line),
        };

        match outcome {
            Ok(PatchOutcome::Inserted) => {
                let status = match mode {
                    Mode::Apply => StepStatus::Registered,
                    Mode::Preview => StepStatus::Planned,
                };
                report.record(StepSubject::Registry, name, file, status);
            }
            Ok(PatchOutcome::AlreadyPresent) => {
                report.record(
                    StepSubject::Registry,
                    name,
                    file,
                    StepStatus::AlreadyRegistered,
                );
            }
            Err(e) if e.is_recoverable() => {
                warn!(file = %file.display(), line = name, error = %e, "Registry not updated");
                report.warn(StepSubject::Registry, name, file, e.to_string());
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

fn app_paths(state: &HierarchyState) -> StratumResult<&AppPaths> {
    state.paths.app.as_ref().ok_or_else(|| StratumError::Internal {
        message: "app stage reached without an app segment".into(),
    })
}

fn module_paths(state: &HierarchyState) -> StratumResult<&ModulePaths> {
    state
        .paths
        .module
        .as_ref()
        .ok_or_else(|| StratumError::Internal {
            message: "module stage reached without a module segment".into(),
        })
}
