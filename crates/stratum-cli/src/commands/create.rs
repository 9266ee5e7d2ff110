//! Implementation of the `stratum create` command.
//!
//! Responsibility: parse the identifier, call the orchestrator (or its
//! dry-run twin), and display the report. No business logic lives here.

use tracing::{info, instrument};

use stratum_core::{application::StepStatus, domain::EntityIdentifier};

use crate::{
    cli::{CreateArgs, GlobalArgs, OutputFormat},
    commands::build_orchestrator,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `stratum create` command.
///
/// Dispatch sequence:
/// 1. Parse the identifier (nothing is touched if it is invalid)
/// 2. Resolve the base directory (`--output-dir` or config)
/// 3. Plan (`--dry-run`) or create
/// 4. Print one line per step and a summary
#[instrument(skip_all, fields(identifier = %args.identifier))]
pub fn execute(
    args: CreateArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let identifier = EntityIdentifier::parse(&args.identifier)?;
    let base_dir = config.base_dir(args.output_dir.as_deref());
    let orchestrator = build_orchestrator(&config, &base_dir)?;

    if args.dry_run {
        let report = orchestrator.plan(&identifier)?;
        if output.format() != OutputFormat::Json {
            output.header(&format!(
                "Dry run: {} {} under {}",
                report.granularity,
                identifier,
                base_dir.display()
            ))?;
        }
        output.report(&report)?;
        return Ok(());
    }

    let spinner = output.spinner(format!(
        "Scaffolding {identifier} with {}...",
        orchestrator.generator_name()
    ));
    let result = orchestrator.create(&identifier);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = result?;

    output.report(&report)?;
    info!(
        created = report.count(StepStatus::Created),
        registered = report.count(StepStatus::Registered),
        "Create finished"
    );

    if output.format() != OutputFormat::Json {
        let warnings = report.warnings().count();
        if warnings > 0 {
            output.warning(&format!(
                "'{identifier}' finished with {warnings} warning(s); see above"
            ))?;
        } else if report.is_noop() {
            output.info(&format!("'{identifier}' is already up to date"))?;
        } else {
            output.success(&format!("'{identifier}' is ready"))?;
        }
    }

    Ok(())
}
