//! Canonical, prefixed entity names.
//!
//! Every directory the tool creates carries a kind prefix (`project_`,
//! `app_`, `mod_`). Normalization applies that prefix exactly once, so
//! feeding a canonical name back in is a no-op.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, identifier::is_valid_token};

pub const DEFAULT_PROJECT_PREFIX: &str = "project_";
pub const DEFAULT_APP_PREFIX: &str = "app_";
pub const DEFAULT_MODULE_PREFIX: &str = "mod_";
pub const DEFAULT_MODULE_STEM: &str = "app";

/// The kind of entity a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Project,
    App,
    Module,
    /// The shared module every app receives.
    DefaultModule,
}

impl EntityKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::App => "app",
            Self::Module => "module",
            Self::DefaultModule => "default_module",
        }
    }

    /// Whether tokens of this kind are lower-cased before prefixing.
    pub const fn folds_case(self) -> bool {
        !matches!(self, Self::Project)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized name: `full` carries the prefix, `stem` is what follows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalName {
    full: String,
    stem: String,
}

impl CanonicalName {
    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// The name without its kind prefix (`app_posts` → `posts`).
    pub fn stem(&self) -> &str {
        &self.stem
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

impl AsRef<str> for CanonicalName {
    fn as_ref(&self) -> &str {
        &self.full
    }
}

/// Prefix configuration for all entity kinds.
///
/// Constructed once at process entry and passed by reference; there is no
/// global naming state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingScheme {
    project_prefix: String,
    app_prefix: String,
    module_prefix: String,
    default_module_stem: String,
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self {
            project_prefix: DEFAULT_PROJECT_PREFIX.into(),
            app_prefix: DEFAULT_APP_PREFIX.into(),
            module_prefix: DEFAULT_MODULE_PREFIX.into(),
            default_module_stem: DEFAULT_MODULE_STEM.into(),
        }
    }
}

impl NamingScheme {
    /// Build a scheme from configured prefixes.
    pub fn new(
        project_prefix: impl Into<String>,
        app_prefix: impl Into<String>,
        module_prefix: impl Into<String>,
        default_module_stem: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let scheme = Self {
            project_prefix: project_prefix.into(),
            app_prefix: app_prefix.into().to_ascii_lowercase(),
            module_prefix: module_prefix.into().to_ascii_lowercase(),
            default_module_stem: default_module_stem.into().to_ascii_lowercase(),
        };

        for (field, value) in [
            ("project_prefix", &scheme.project_prefix),
            ("app_prefix", &scheme.app_prefix),
            ("module_prefix", &scheme.module_prefix),
            ("default_module", &scheme.default_module_stem),
        ] {
            if !is_valid_token(value) {
                return Err(DomainError::InvalidNamingScheme(format!(
                    "{field} '{value}' must be non-empty and match [A-Za-z0-9_]+"
                )));
            }
        }

        Ok(scheme)
    }

    pub fn prefix(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Project => &self.project_prefix,
            EntityKind::App => &self.app_prefix,
            EntityKind::Module | EntityKind::DefaultModule => &self.module_prefix,
        }
    }

    /// Normalize a raw token into the canonical name for `kind`.
    ///
    /// `DefaultModule` validates the token but always yields
    /// [`Self::default_module`].
    pub fn normalize(&self, kind: EntityKind, raw: &str) -> Result<CanonicalName, DomainError> {
        if !is_valid_token(raw) {
            return Err(DomainError::invalid_identifier(
                raw,
                format!("{kind} name must be non-empty and match [A-Za-z0-9_]+"),
            ));
        }

        if kind == EntityKind::DefaultModule {
            return Ok(self.default_module());
        }

        let token = if kind.folds_case() {
            raw.to_ascii_lowercase()
        } else {
            raw.to_owned()
        };
        let prefix = self.prefix(kind);

        let stem = token.strip_prefix(prefix).unwrap_or(&token);
        if stem.is_empty() {
            return Err(DomainError::invalid_identifier(
                raw,
                format!("{kind} name cannot be just the prefix '{prefix}'"),
            ));
        }

        Ok(CanonicalName {
            full: format!("{prefix}{stem}"),
            stem: stem.to_owned(),
        })
    }

    /// The shared module created alongside every app (`mod_app`).
    pub fn default_module(&self) -> CanonicalName {
        CanonicalName {
            full: format!("{}{}", self.module_prefix, self.default_module_stem),
            stem: self.default_module_stem.clone(),
        }
    }

    /// The module named after its app (`app_posts` → `mod_posts`).
    pub fn own_module(&self, app: &CanonicalName) -> CanonicalName {
        CanonicalName {
            full: format!("{}{}", self.module_prefix, app.stem()),
            stem: app.stem().to_owned(),
        }
    }
}
