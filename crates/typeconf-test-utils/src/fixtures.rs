use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// URL stored under `db.url` in the sample documents.
pub const SAMPLE_URL: &str = "https://www.google.com/";

/// Temporary directory holding config files for a single test.
pub struct ConfigDir {
    dir: TempDir,
}

impl ConfigDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories if needed.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("dir");
        }
        fs::write(&path, contents).expect("write");
        path
    }
}

impl Default for ConfigDir {
    fn default() -> Self {
        Self::new()
    }
}
