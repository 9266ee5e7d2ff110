//! Existence Oracle - the single place that asks "is it there yet?".

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{ExistenceSnapshot, PathSet},
};

/// Read-only existence checks over a resolved [`PathSet`].
///
/// Each entity is keyed on a marker file rather than its directory, so a
/// directory left behind by an interrupted run still counts as missing:
///
/// | Entity         | Marker                          |
/// |----------------|---------------------------------|
/// | project        | `manage.py`                     |
/// | app            | `apps.py`                       |
/// | app routes     | `<app>/urls.py`                 |
/// | module package | `__init__.py` (written last)    |
/// | feature module | package + every placeholder     |
pub struct ExistenceOracle {
    filesystem: Arc<dyn Filesystem>,
}

impl ExistenceOracle {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    #[instrument(skip_all, fields(project = %paths.project.name))]
    pub fn inspect(&self, paths: &PathSet) -> ExistenceSnapshot {
        let fs = &self.filesystem;

        let mut snapshot = ExistenceSnapshot {
            project_root: fs.exists(&paths.project.root),
            project: fs.exists(&paths.project.manage_py),
            ..ExistenceSnapshot::default()
        };

        if let Some(app) = &paths.app {
            snapshot.app = fs.exists(&app.apps_py);
            snapshot.app_routes = fs.exists(&app.urls);
            snapshot.default_module = fs.exists(&app.default_module.init_py);
            snapshot.own_module = fs.exists(&app.own_module.init_py);
        }

        if let Some(module) = &paths.module {
            snapshot.module_package = fs.exists(&module.package.init_py);
            snapshot.module_files = module
                .placeholders
                .iter()
                .map(|file| fs.exists(file))
                .collect();
        }

        debug!(?snapshot, "Existence snapshot taken");
        snapshot
    }
}
