//! Line-oriented registry patching.
//!
//! Registries are generated Python files holding a list construct
//! (`INSTALLED_APPS = [`, `urlpatterns = [`). New entries go directly after
//! the line that opens the list; every other byte of the file is kept.

use serde::Serialize;

use crate::domain::naming::CanonicalName;

pub const INSTALLED_APPS_MARKER: &str = "INSTALLED_APPS = [";
pub const URLPATTERNS_MARKER: &str = "urlpatterns = [";
pub const PATH_IMPORT_MARKER: &str = "from django.urls import path";
pub const INCLUDE_IMPORT_LINE: &str = "from django.urls import include";

const INDENT: &str = "    ";

/// A line to register and the marker it belongs under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub marker: String,
    pub line: String,
}

impl RegistryEntry {
    pub fn new(marker: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            line: line.into(),
        }
    }

    /// `    'app_posts',` under `INSTALLED_APPS = [`.
    pub fn installed_app(app: &CanonicalName) -> Self {
        Self::new(INSTALLED_APPS_MARKER, format!("{INDENT}'{app}',"))
    }

    /// Mounts the app's aggregate route file in the project routes.
    pub fn project_route(app: &CanonicalName) -> Self {
        Self::new(
            URLPATTERNS_MARKER,
            format!("{INDENT}path('{}/', include('{app}.urls')),", app.stem()),
        )
    }

    /// `include` import the project routes need once an app is mounted.
    ///
    /// `django-admin startproject` only imports `path`.
    pub fn include_import() -> Self {
        Self::new(PATH_IMPORT_MARKER, INCLUDE_IMPORT_LINE)
    }

    /// Mounts a module's routes in its app's aggregate route file.
    pub fn module_route(app: &CanonicalName, module: &CanonicalName) -> Self {
        Self::new(
            URLPATTERNS_MARKER,
            format!(
                "{INDENT}path('{stem}/', include('{app}.{module}.urls_{stem}')),",
                stem = module.stem()
            ),
        )
    }
}

/// Whether some `from django.urls import ...` line already brings in
/// `include`, e.g. `from django.urls import path, include`.
///
/// Only single-line imports are recognised.
pub fn imports_include(content: &str) -> bool {
    content.lines().any(|line| {
        line.trim()
            .strip_prefix("from django.urls import ")
            .is_some_and(|names| {
                names
                    .split(',')
                    .map(|name| name.trim().trim_matches(['(', ')']).trim())
                    .any(|name| name == "include")
            })
    })
}

/// Result of [`insert_after_marker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinePatch {
    /// An equivalent line exists; the content must not be rewritten.
    AlreadyPresent,
    /// The full new content.
    Inserted(String),
    /// No line matches the marker.
    MarkerMissing,
}

/// Insert `new_line` directly after the first line equal to `marker`.
///
/// Lines are compared with surrounding whitespace stripped. If an equivalent
/// of `new_line` already exists anywhere, nothing changes. The inserted line
/// reuses the marker's terminator (`\n` or `\r\n`); all other lines keep
/// their bytes and order.
pub fn insert_after_marker(content: &str, marker: &str, new_line: &str) -> LinePatch {
    let new_line = new_line.trim_end_matches(['\r', '\n']);
    let wanted = new_line.trim();
    let marker = marker.trim();

    let lines: Vec<&str> = content.split_inclusive('\n').collect();

    if lines.iter().any(|line| line.trim() == wanted) {
        return LinePatch::AlreadyPresent;
    }

    let Some(index) = lines.iter().position(|line| line.trim() == marker) else {
        return LinePatch::MarkerMissing;
    };

    let marker_line = lines[index];
    let ending = if marker_line.ends_with("\r\n") { "\r\n" } else { "\n" };

    let mut patched = String::with_capacity(content.len() + new_line.len() + ending.len());
    for line in &lines[..=index] {
        patched.push_str(line);
    }
    if marker_line.ends_with('\n') {
        patched.push_str(new_line);
        patched.push_str(ending);
    } else {
        // Marker is the unterminated last line; keep the file unterminated.
        patched.push_str(ending);
        patched.push_str(new_line);
    }
    for line in &lines[index + 1..] {
        patched.push_str(line);
    }

    LinePatch::Inserted(patched)
}
