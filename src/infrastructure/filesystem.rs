//! StdFileSystem - FileSystemPort over std::fs

use std::fs;
use std::path::{Path, PathBuf};

use crate::application::ports::{FileSystemPort, PlatformError};

/// Local filesystem; the home directory comes from `dirs` unless overridden
pub struct StdFileSystem {
    home: Option<PathBuf>,
}

impl StdFileSystem {
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    /// Builder: treat `home` as the user's home directory
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }
}

impl Default for StdFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemPort for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, PlatformError> {
        let entries = fs::read_dir(path)?;
        Ok(entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_dir_and_kinds() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("Cargo.toml"), "").unwrap();

        let fs_port = StdFileSystem::new().with_home(tmp.path());
        let mut entries = fs_port.list_dir(tmp.path()).unwrap();
        entries.sort();

        assert_eq!(entries, vec![tmp.path().join("Cargo.toml"), tmp.path().join("src")]);
        assert!(fs_port.is_dir(&tmp.path().join("src")));
        assert!(fs_port.is_file(&tmp.path().join("Cargo.toml")));
        assert!(!fs_port.exists(&tmp.path().join("missing")));
        assert_eq!(fs_port.home_dir(), Some(tmp.path().to_path_buf()));
    }

    #[test]
    fn test_list_missing_dir_is_io_error() {
        let err = StdFileSystem::new()
            .list_dir(Path::new("/definitely/not/here"))
            .unwrap_err();
        assert!(matches!(err, PlatformError::Io(_)));
    }
}
