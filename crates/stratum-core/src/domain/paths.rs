//! Absolute paths for every entity in a hierarchy.
//!
//! Resolution is a pure function of the base directory, the naming scheme
//! and the identifier. Nothing here touches the filesystem.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    identifier::{EntityIdentifier, Granularity},
    naming::{CanonicalName, EntityKind, NamingScheme},
};

pub const MANAGE_PY: &str = "manage.py";
pub const SETTINGS_PY: &str = "settings.py";
pub const URLS_PY: &str = "urls.py";
pub const APPS_PY: &str = "apps.py";
pub const INIT_PY: &str = "__init__.py";
pub const TEMPLATES_DIR: &str = "templates";

/// Placeholder files every feature module receives, as `<kind>_<stem>.py`.
pub const MODULE_FILE_KINDS: [&str; 4] = ["urls", "models", "views", "forms"];

/// Project-level names and paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPaths {
    pub name: CanonicalName,
    /// `base/<stem>`: holds `manage.py`, the settings package and the apps.
    pub root: PathBuf,
    /// `base/<stem>/<project name>`: the settings package.
    pub package: PathBuf,
    pub manage_py: PathBuf,
    pub settings: PathBuf,
    pub urls: PathBuf,
}

/// App-level names and paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppPaths {
    pub name: CanonicalName,
    pub dir: PathBuf,
    pub apps_py: PathBuf,
    /// Aggregate route file that mounts the app's modules.
    pub urls: PathBuf,
    pub default_module: ModuleDir,
    pub own_module: ModuleDir,
}

/// A module package directory and its `__init__.py` marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDir {
    pub name: CanonicalName,
    pub dir: PathBuf,
    pub init_py: PathBuf,
}

impl ModuleDir {
    fn new(parent: &Path, name: CanonicalName) -> Self {
        let dir = parent.join(name.as_str());
        Self {
            init_py: dir.join(INIT_PY),
            dir,
            name,
        }
    }
}

/// Paths for a feature module requested by the third identifier segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModulePaths {
    pub package: ModuleDir,
    /// `urls_<stem>.py`, mounted by the app's aggregate route file.
    pub urls: PathBuf,
    /// All placeholder files except `__init__.py`, in creation order.
    pub placeholders: Vec<PathBuf>,
    /// `<app>/templates/<app>/<module>`.
    pub templates: PathBuf,
}

/// Every path an orchestration call needs, resolved once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathSet {
    pub base_dir: PathBuf,
    pub project: ProjectPaths,
    pub app: Option<AppPaths>,
    pub module: Option<ModulePaths>,
}

impl PathSet {
    /// Resolve all names and paths for `identifier` under `base_dir`.
    ///
    /// Join order always mirrors the directory nesting:
    /// `base/<project>/[<app>/][<module>/]`.
    pub fn resolve(
        base_dir: impl Into<PathBuf>,
        scheme: &NamingScheme,
        identifier: &EntityIdentifier,
    ) -> Result<Self, DomainError> {
        let base_dir = base_dir.into();

        let project_name = scheme.normalize(EntityKind::Project, identifier.project())?;
        let root = base_dir.join(project_name.stem());
        let package = root.join(project_name.as_str());
        let project = ProjectPaths {
            manage_py: root.join(MANAGE_PY),
            settings: package.join(SETTINGS_PY),
            urls: package.join(URLS_PY),
            name: project_name,
            root,
            package,
        };

        let app = identifier
            .app()
            .map(|raw| -> Result<AppPaths, DomainError> {
                let name = scheme.normalize(EntityKind::App, raw)?;
                let dir = project.root.join(name.as_str());
                Ok(AppPaths {
                    apps_py: dir.join(APPS_PY),
                    urls: dir.join(URLS_PY),
                    default_module: ModuleDir::new(&dir, scheme.default_module()),
                    own_module: ModuleDir::new(&dir, scheme.own_module(&name)),
                    name,
                    dir,
                })
            })
            .transpose()?;

        let module = match (&app, identifier.module()) {
            (Some(app), Some(raw)) => {
                let name = scheme.normalize(EntityKind::Module, raw)?;
                let templates = app
                    .dir
                    .join(TEMPLATES_DIR)
                    .join(app.name.as_str())
                    .join(name.as_str());
                let package = ModuleDir::new(&app.dir, name);
                let placeholders: Vec<PathBuf> = MODULE_FILE_KINDS
                    .iter()
                    .map(|kind| {
                        package
                            .dir
                            .join(format!("{kind}_{}.py", package.name.stem()))
                    })
                    .collect();
                Some(ModulePaths {
                    urls: placeholders[0].clone(),
                    placeholders,
                    templates,
                    package,
                })
            }
            _ => None,
        };

        Ok(Self {
            base_dir,
            project,
            app,
            module,
        })
    }

    pub fn granularity(&self) -> Granularity {
        match (&self.app, &self.module) {
            (None, _) => Granularity::Project,
            (Some(_), None) => Granularity::App,
            (Some(_), Some(_)) => Granularity::Module,
        }
    }
}
