//! Implementation of the `stratum delete` command.

use std::io::IsTerminal as _;

use tracing::instrument;

use stratum_core::{
    application::ApplicationError,
    domain::{EntityIdentifier, Granularity},
    error::StratumError,
};

use crate::{
    cli::{DeleteArgs, GlobalArgs},
    commands::build_orchestrator,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `stratum delete` command.
///
/// Asks for confirmation when stdin is a terminal and `--yes` was not
/// given; scripted runs never block on a prompt. `--quiet` does not skip
/// the question.
#[instrument(skip_all, fields(identifier = %args.identifier))]
pub fn execute(
    args: DeleteArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let identifier = EntityIdentifier::parse(&args.identifier)?;

    // Scope is checked before prompting so a refused delete never asks.
    if identifier.granularity() != Granularity::Project {
        return Err(StratumError::from(ApplicationError::DeletionScope {
            identifier: identifier.to_string(),
        })
        .into());
    }

    let base_dir = config.base_dir(args.output_dir.as_deref());
    let orchestrator = build_orchestrator(&config, &base_dir)?;

    let state = orchestrator.inspect(&identifier)?;
    let interactive = std::io::stdin().is_terminal();
    if needs_confirmation(state.exists.project_root, &args, interactive)
        && !confirm(&format!(
            "Delete {} and everything in it?",
            state.paths.project.root.display()
        ))?
    {
        return Err(CliError::Cancelled);
    }

    let report = orchestrator.delete(&identifier)?;
    output.report(&report)?;
    Ok(())
}

/// Whether a delete must be confirmed before anything is removed.
fn needs_confirmation(project_exists: bool, args: &DeleteArgs, interactive: bool) -> bool {
    project_exists && !args.yes && interactive
}

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(prompt: &str) -> CliResult<bool> {
    use std::io::{self, Write};

    use crate::error::IntoCli;

    print!("{prompt} [y/N] ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input == "y" || input == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser as _;

    fn args(yes: bool) -> DeleteArgs {
        DeleteArgs {
            identifier: "blog".into(),
            output_dir: None,
            yes,
        }
    }

    #[test]
    fn terminal_without_yes_asks() {
        assert!(needs_confirmation(true, &args(false), true));
    }

    #[test]
    fn yes_skips_the_question() {
        assert!(!needs_confirmation(true, &args(true), true));
    }

    #[test]
    fn quiet_still_asks() {
        let cli = Cli::try_parse_from(["stratum", "-q", "delete", "blog"]).unwrap();
        let Commands::Delete(delete) = cli.command else {
            panic!("expected delete");
        };
        assert!(cli.global.quiet);
        assert!(needs_confirmation(true, &delete, true));
    }

    #[test]
    fn nothing_to_confirm() {
        assert!(!needs_confirmation(false, &args(false), true));
        assert!(!needs_confirmation(true, &args(false), false));
    }
}
