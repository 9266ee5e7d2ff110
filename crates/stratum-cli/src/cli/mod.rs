//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stratum",
    bin_name = "stratum",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Layered Django project/app/module scaffolding",
    long_about = "Stratum creates Django projects, apps and feature modules from a \
                  dotted identifier (project[.app[.module]]), creating any missing \
                  ancestors first and registering each level with its parent. \
                  Every command is safe to re-run.",
    after_help = "EXAMPLES:\n\
        \x20 stratum create blog\n\
        \x20 stratum create blog.posts\n\
        \x20 stratum create blog.posts.comments --dry-run\n\
        \x20 stratum delete blog --yes\n\
        \x20 stratum completions bash > /usr/share/bash-completion/completions/stratum",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a project, app or module and everything above it.
    #[command(
        visible_alias = "c",
        about = "Create a project, app or module",
        after_help = "EXAMPLES:\n\
            \x20 stratum create blog                 # project only\n\
            \x20 stratum create blog.posts           # project + app\n\
            \x20 stratum create blog.posts.comments  # project + app + module"
    )]
    Create(CreateArgs),

    /// Delete a whole project.
    #[command(
        visible_alias = "rm",
        about = "Delete a project",
        after_help = "EXAMPLES:\n\
            \x20 stratum delete blog\n\
            \x20 stratum delete blog --yes"
    )]
    Delete(DeleteArgs),

    /// Initialise a Stratum configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stratum init           # platform config directory\n\
            \x20 stratum init --local   # ./stratum.toml"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stratum completions bash > ~/.local/share/bash-completion/completions/stratum\n\
            \x20 stratum completions zsh  > ~/.zfunc/_stratum\n\
            \x20 stratum completions fish > ~/.config/fish/completions/stratum.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Stratum configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stratum config get generator.kind\n\
            \x20 stratum config list\n\
            \x20 stratum config path"
    )]
    Config(ConfigCommands),
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for `stratum create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Dotted identifier: `project`, `project.app` or `project.app.module`.
    #[arg(value_name = "IDENTIFIER", help = "project[.app[.module]]")]
    pub identifier: String,

    /// Base directory projects live under (overrides `paths.base_dir`).
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        help = "Base directory (default: paths.base_dir from config)"
    )]
    pub output_dir: Option<PathBuf>,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── delete ────────────────────────────────────────────────────────────────────

/// Arguments for `stratum delete`.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Project identifier (a single segment).
    #[arg(value_name = "PROJECT", help = "Project to delete")]
    pub identifier: String,

    /// Base directory projects live under (overrides `paths.base_dir`).
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        help = "Base directory (default: paths.base_dir from config)"
    )]
    pub output_dir: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Delete without asking")]
    pub yes: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stratum init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `stratum.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stratum completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stratum config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generator.kind`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_create_command() {
        let cli = Cli::parse_from(["stratum", "create", "blog.posts", "--dry-run"]);
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.identifier, "blog.posts");
                assert!(args.dry_run);
                assert!(args.output_dir.is_none());
            }
            other => panic!("expected Create, got {other:?}"),
        }
    }

    #[test]
    fn create_alias() {
        let cli = Cli::parse_from(["stratum", "c", "blog"]);
        assert!(matches!(cli.command, Commands::Create(_)));
    }

    #[test]
    fn parse_delete_with_output_dir() {
        let cli = Cli::parse_from(["stratum", "delete", "blog", "-o", "/tmp/env", "-y"]);
        match cli.command {
            Commands::Delete(args) => {
                assert_eq!(args.output_dir, Some(PathBuf::from("/tmp/env")));
                assert!(args.yes);
            }
            other => panic!("expected Delete, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["stratum", "create", "blog", "-vv", "--log-file", "s.log"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.log_file, Some(PathBuf::from("s.log")));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["stratum", "--quiet", "--verbose", "create", "blog"]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_identifier_is_rejected() {
        assert!(Cli::try_parse_from(["stratum", "create"]).is_err());
    }
}
