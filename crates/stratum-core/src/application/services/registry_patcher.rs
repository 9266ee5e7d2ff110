//! Line-oriented registry patcher.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, PatchOutcome, RegistryPatcher},
    },
    domain::{DomainError, LinePatch, insert_after_marker},
    error::StratumResult,
};

/// [`RegistryPatcher`] over plain text files (`settings.py`, `urls.py`).
///
/// Reads the whole file, inserts after the first marker line and writes it
/// back only when something changed.
pub struct TextRegistryPatcher {
    filesystem: Arc<dyn Filesystem>,
}

impl TextRegistryPatcher {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    fn patch(&self, file: &Path, marker: &str, line: &str) -> StratumResult<LinePatch> {
        if !self.filesystem.exists(file) {
            return Err(ApplicationError::RegistryMissing {
                path: file.to_path_buf(),
            }
            .into());
        }

        let content = self.filesystem.read_file(file)?;
        match insert_after_marker(&content, marker, line) {
            LinePatch::MarkerMissing => Err(DomainError::MarkerNotFound {
                path: file.to_path_buf(),
                marker: marker.to_string(),
            }
            .into()),
            patch => Ok(patch),
        }
    }
}

impl RegistryPatcher for TextRegistryPatcher {
    #[instrument(skip(self), fields(file = %file.display()))]
    fn ensure_line_registered(
        &self,
        file: &Path,
        marker: &str,
        line: &str,
    ) -> StratumResult<PatchOutcome> {
        match self.patch(file, marker, line)? {
            LinePatch::Inserted(updated) => {
                self.filesystem.write_file(file, &updated)?;
                debug!("Registry line inserted");
                Ok(PatchOutcome::Inserted)
            }
            _ => Ok(PatchOutcome::AlreadyPresent),
        }
    }

    fn preview_line(&self, file: &Path, marker: &str, line: &str) -> StratumResult<PatchOutcome> {
        Ok(match self.patch(file, marker, line)? {
            LinePatch::Inserted(_) => PatchOutcome::Inserted,
            _ => PatchOutcome::AlreadyPresent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::FakeFilesystem;
    use crate::error::StratumError;

    const SETTINGS: &str = "DEBUG = True\nINSTALLED_APPS = [\n    'django.contrib.admin',\n]\n";

    fn patcher(fs: &Arc<FakeFilesystem>) -> TextRegistryPatcher {
        TextRegistryPatcher::new(fs.clone())
    }

    #[test]
    fn inserts_once_then_reports_present() {
        let fs = Arc::new(FakeFilesystem::default());
        fs.seed("/p/settings.py", SETTINGS);
        let patcher = patcher(&fs);

        let first = patcher
            .ensure_line_registered(Path::new("/p/settings.py"), "INSTALLED_APPS = [", "    'app_posts',")
            .unwrap();
        let second = patcher
            .ensure_line_registered(Path::new("/p/settings.py"), "INSTALLED_APPS = [", "    'app_posts',")
            .unwrap();

        assert_eq!(first, PatchOutcome::Inserted);
        assert_eq!(second, PatchOutcome::AlreadyPresent);
        assert_eq!(fs.writes(), 1);
        assert_eq!(
            fs.content("/p/settings.py").unwrap(),
            "DEBUG = True\nINSTALLED_APPS = [\n    'app_posts',\n    'django.contrib.admin',\n]\n"
        );
    }

    #[test]
    fn missing_marker_leaves_file_untouched() {
        let fs = Arc::new(FakeFilesystem::default());
        fs.seed("/p/urls.py", "urlpatterns = []\n");

        let err = patcher(&fs)
            .ensure_line_registered(Path::new("/p/urls.py"), "urlpatterns = [", "    path('x/'),")
            .unwrap_err();

        assert!(matches!(
            err,
            StratumError::Domain(DomainError::MarkerNotFound { .. })
        ));
        assert!(err.is_recoverable());
        assert_eq!(fs.writes(), 0);
        assert_eq!(fs.content("/p/urls.py").unwrap(), "urlpatterns = []\n");
    }

    #[test]
    fn missing_file_is_registry_missing() {
        let fs = Arc::new(FakeFilesystem::default());
        let err = patcher(&fs)
            .ensure_line_registered(Path::new("/p/urls.py"), "urlpatterns = [", "x")
            .unwrap_err();
        assert!(matches!(
            err,
            StratumError::Application(ApplicationError::RegistryMissing { .. })
        ));
    }

    #[test]
    fn preview_never_writes() {
        let fs = Arc::new(FakeFilesystem::default());
        fs.seed("/p/settings.py", SETTINGS);

        let outcome = patcher(&fs)
            .preview_line(Path::new("/p/settings.py"), "INSTALLED_APPS = [", "    'app_posts',")
            .unwrap();

        assert_eq!(outcome, PatchOutcome::Inserted);
        assert_eq!(fs.writes(), 0);
    }
}
