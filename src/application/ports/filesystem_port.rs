//! FileSystemPort - interface for the file system queries context extraction needs
//!
//! Read-only: existence checks and directory listings used to validate
//! parsed paths and to locate project folders by name.

use std::path::{Path, PathBuf};

use super::PlatformError;

/// Port interface for file system operations
pub trait FileSystemPort: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// List directory contents (full paths)
    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, PlatformError>;

    /// Current user's home directory
    fn home_dir(&self) -> Option<PathBuf>;
}
