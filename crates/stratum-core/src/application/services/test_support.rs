//! In-crate fake filesystem for service unit tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::{application::ports::Filesystem, error::StratumResult};

#[derive(Default)]
struct Inner {
    files: HashMap<PathBuf, String>,
    dirs: HashSet<PathBuf>,
    writes: usize,
}

#[derive(Default)]
pub struct FakeFilesystem {
    inner: Mutex<Inner>,
}

impl FakeFilesystem {
    pub fn seed(&self, path: impl Into<PathBuf>, content: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.files.insert(path.into(), content.to_string());
    }

    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        self.inner.lock().unwrap().files.get(path.as_ref()).cloned()
    }

    /// Number of mutating calls so far.
    pub fn writes(&self) -> usize {
        self.inner.lock().unwrap().writes
    }
}

impl Filesystem for FakeFilesystem {
    fn create_dir_all(&self, path: &Path) -> StratumResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.writes += 1;
        for ancestor in path.ancestors() {
            inner.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> StratumResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.writes += 1;
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> StratumResult<String> {
        Ok(self.content(path).unwrap_or_default())
    }

    fn set_permissions(&self, _path: &Path, _executable: bool) -> StratumResult<()> {
        self.inner.lock().unwrap().writes += 1;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.files.contains_key(path) || inner.dirs.contains(path)
    }

    fn remove_file(&self, path: &Path) -> StratumResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.writes += 1;
        inner.files.remove(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> StratumResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.writes += 1;
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.dirs.retain(|p| !p.starts_with(path));
        Ok(())
    }
}
