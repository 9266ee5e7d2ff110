//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only receives the values derived
//! from it ([`NamingScheme`], [`InvokerOptions`], a base directory).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (`--output-dir`, `--no-color`; handled at the call-site)
//! 2. Environment variables: `STRATUM_<SECTION>__<KEY>`,
//!    e.g. `STRATUM_GENERATOR__KIND=builtin`
//! 3. Config file: `--config FILE`, else the platform config file, else
//!    `./stratum.toml`
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use stratum_core::{
    application::InvokerOptions,
    domain::{NamingScheme, naming},
};

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_FILE: &str = "stratum.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "STRATUM";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub naming: NamingConfig,
    pub apps: AppsConfig,
    pub generator: GeneratorConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory projects are created under, relative to the CWD.
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamingConfig {
    pub project_prefix: String,
    pub app_prefix: String,
    pub module_prefix: String,
    /// Stem of the shared module every app receives.
    pub default_module: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppsConfig {
    pub strip_boilerplate: bool,
    pub boilerplate_files: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
    /// Shell out to `django-admin`.
    DjangoAdmin,
    /// Write the skeleton without Python.
    Builtin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub kind: GeneratorKind,
    /// Executable used when `kind = "django-admin"`.
    pub program: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let options = InvokerOptions::default();
        Self {
            paths: PathsConfig {
                base_dir: PathBuf::from("env").join("dev"),
            },
            naming: NamingConfig {
                project_prefix: naming::DEFAULT_PROJECT_PREFIX.into(),
                app_prefix: naming::DEFAULT_APP_PREFIX.into(),
                module_prefix: naming::DEFAULT_MODULE_PREFIX.into(),
                default_module: naming::DEFAULT_MODULE_STEM.into(),
            },
            apps: AppsConfig {
                strip_boilerplate: options.strip_boilerplate,
                boilerplate_files: options.boilerplate_files,
            },
            generator: GeneratorConfig {
                kind: GeneratorKind::DjangoAdmin,
                program: stratum_adapters::generator::DEFAULT_PROGRAM.into(),
            },
            output: OutputConfig { no_color: false },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then a config file, then environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = serde_json::to_string(&Self::default())
            .context("failed to serialise default configuration")?;
        let mut builder =
            Config::builder().add_source(File::from_str(&defaults, FileFormat::Json));

        match config_file {
            Some(path) => {
                if !path.is_file() {
                    anyhow::bail!("config file not found: {}", path.display());
                }
                debug!(path = %path.display(), "Loading config file");
                builder = builder.add_source(File::from(path.as_path()));
            }
            None => {
                if let Some(path) = Self::discover() {
                    debug!(path = %path.display(), "Loading config file");
                    builder = builder.add_source(File::from(path.as_path()).required(false));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("failed to build configuration")?;
        let app_config: Self = config
            .try_deserialize()
            .context("invalid configuration")?;

        // Reject bad prefixes here rather than half-way through a run.
        app_config.naming_scheme()?;
        Ok(app_config)
    }

    /// First existing implicit config file.
    fn discover() -> Option<PathBuf> {
        [Self::config_path(), PathBuf::from(LOCAL_CONFIG_FILE)]
            .into_iter()
            .find(|p| p.is_file())
    }

    /// Path to the platform configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `./stratum.toml`.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "stratum", "stratum")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Config file that `load(config_file)` reads, if any.
    pub fn active_path(config_file: Option<&PathBuf>) -> Option<PathBuf> {
        config_file.cloned().or_else(Self::discover)
    }

    pub fn naming_scheme(&self) -> anyhow::Result<NamingScheme> {
        let naming = &self.naming;
        NamingScheme::new(
            &naming.project_prefix,
            &naming.app_prefix,
            &naming.module_prefix,
            &naming.default_module,
        )
        .context("invalid [naming] section")
    }

    pub fn invoker_options(&self) -> InvokerOptions {
        InvokerOptions {
            strip_boilerplate: self.apps.strip_boilerplate,
            boilerplate_files: self.apps.boilerplate_files.clone(),
        }
    }

    /// `--output-dir` if given, else `paths.base_dir`.
    pub fn base_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.paths.base_dir.clone())
    }

    /// Look up a dotted key (`generator.kind`) as display text.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = serde_json::to_value(self).ok()?;
        let found = key
            .split('.')
            .try_fold(&value, |node, segment| node.get(segment))?;
        Some(match found {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
