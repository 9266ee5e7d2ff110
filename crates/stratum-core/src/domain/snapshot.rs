//! Per-call view of what already exists on disk.

use serde::Serialize;

use crate::domain::paths::PathSet;

/// Existence flags for every entity of a [`PathSet`].
///
/// Flags for levels the identifier does not reach are always `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExistenceSnapshot {
    /// The project root directory, marker or not. Used by deletion.
    pub project_root: bool,
    pub project: bool,
    pub app: bool,
    pub app_routes: bool,
    pub default_module: bool,
    pub own_module: bool,
    /// The target module's `__init__.py`.
    pub module_package: bool,
    /// One flag per `ModulePaths::placeholders` entry, same order.
    pub module_files: Vec<bool>,
}

impl ExistenceSnapshot {
    /// A feature module is complete once its package marker and every
    /// placeholder file exist.
    pub fn target_module(&self) -> bool {
        self.module_package
            && !self.module_files.is_empty()
            && self.module_files.iter().all(|f| *f)
    }

    /// `true` when every entity the identifier names is present.
    ///
    /// Registry lines are not covered; they are checked by the patcher.
    pub fn is_complete(&self, paths: &PathSet) -> bool {
        let app_done = paths.app.is_none()
            || (self.app && self.app_routes && self.default_module && self.own_module);
        let module_done = paths.module.is_none() || self.target_module();
        self.project && app_done && module_done
    }
}

/// The naming/state record: resolved paths plus their existence.
///
/// Built once per orchestration call and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyState {
    pub paths: PathSet,
    pub exists: ExistenceSnapshot,
}
