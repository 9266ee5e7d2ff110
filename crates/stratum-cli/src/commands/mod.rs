//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core calls and render the result.
//! Adapter wiring happens once, in [`build_orchestrator`].

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use stratum_adapters::{BuiltinGenerator, DjangoAdminGenerator, LocalFilesystem};
use stratum_core::application::{
    HierarchyOrchestrator, TextRegistryPatcher,
    ports::{Filesystem, ScaffoldGenerator},
};

use crate::{
    config::{AppConfig, GeneratorKind},
    error::{CliResult, IntoCli},
};

pub mod completions;
pub mod config;
pub mod create;
pub mod delete;
pub mod init;

/// Wire production adapters into an orchestrator rooted at `base_dir`.
pub fn build_orchestrator(config: &AppConfig, base_dir: &Path) -> CliResult<HierarchyOrchestrator> {
    let scheme = config
        .naming_scheme()
        .with_cli_context(|| "invalid naming configuration")?;

    let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let generator: Box<dyn ScaffoldGenerator> = match config.generator.kind {
        GeneratorKind::DjangoAdmin => {
            Box::new(DjangoAdminGenerator::new(config.generator.program.clone()))
        }
        GeneratorKind::Builtin => Box::new(BuiltinGenerator::new(filesystem.clone())),
    };
    debug!(
        generator = generator.name(),
        base_dir = %base_dir.display(),
        "Adapters wired"
    );

    Ok(HierarchyOrchestrator::new(
        base_dir,
        scheme,
        filesystem.clone(),
        generator,
        Box::new(TextRegistryPatcher::new(filesystem)),
        config.invoker_options(),
    ))
}
