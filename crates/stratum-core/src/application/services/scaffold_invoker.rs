//! Scaffold Invoker - wraps the external skeleton generator.
//!
//! The generator only knows how to fill an existing directory. The invoker
//! creates that directory first and, for apps, removes the boilerplate
//! files the hierarchy layout replaces with per-module files.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{Filesystem, ScaffoldGenerator},
    error::StratumResult,
};

/// App files removed after `startapp` when stripping is enabled.
pub const DEFAULT_BOILERPLATE_FILES: [&str; 3] = ["models.py", "tests.py", "views.py"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokerOptions {
    pub strip_boilerplate: bool,
    pub boilerplate_files: Vec<String>,
}

impl Default for InvokerOptions {
    fn default() -> Self {
        Self {
            strip_boilerplate: true,
            boilerplate_files: DEFAULT_BOILERPLATE_FILES
                .iter()
                .map(|f| (*f).to_string())
                .collect(),
        }
    }
}

pub struct ScaffoldInvoker {
    generator: Box<dyn ScaffoldGenerator>,
    filesystem: Arc<dyn Filesystem>,
    options: InvokerOptions,
}

impl ScaffoldInvoker {
    pub fn new(
        generator: Box<dyn ScaffoldGenerator>,
        filesystem: Arc<dyn Filesystem>,
        options: InvokerOptions,
    ) -> Self {
        Self {
            generator,
            filesystem,
            options,
        }
    }

    pub fn generator_name(&self) -> &'static str {
        self.generator.name()
    }

    /// Create `target` and generate a project skeleton named `name` in it.
    ///
    /// Blocks until the generator has finished.
    #[instrument(skip(self), fields(generator = self.generator.name(), target = %target.display()))]
    pub fn create_project(&self, name: &str, target: &Path) -> StratumResult<()> {
        self.filesystem.create_dir_all(target)?;
        self.generator.start_project(name, target)?;
        info!("Project skeleton generated");
        Ok(())
    }

    /// Create `target` and generate an app skeleton named `name` in it.
    #[instrument(skip(self), fields(generator = self.generator.name(), target = %target.display()))]
    pub fn create_app(&self, name: &str, target: &Path) -> StratumResult<()> {
        self.filesystem.create_dir_all(target)?;
        self.generator.start_app(name, target)?;

        if self.options.strip_boilerplate {
            for file in &self.options.boilerplate_files {
                let path = target.join(file);
                if self.filesystem.exists(&path) {
                    self.filesystem.remove_file(&path)?;
                    debug!(file = %path.display(), "Removed boilerplate file");
                }
            }
        }

        info!("App skeleton generated");
        Ok(())
    }
}
