//! ProjectLocator - resolve a bare project name to a directory
//!
//! Window titles often carry only a folder name ("ctxswitch"). The locator
//! searches the places developers keep checkouts and accepts directories
//! that look like projects.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use regex::Regex;

use crate::application::ports::FileSystemPort;

/// Files or directories whose presence marks a project root
pub const PROJECT_MARKERS: &[&str] = &[
    ".git",
    "package.json",
    "setup.py",
    "pyproject.toml",
    "Cargo.toml",
    ".vscode",
    "pom.xml",
    "build.gradle",
];

/// Source extensions that also mark a project root
pub const SOURCE_EXTENSIONS: &[&str] = &["py", "js", "ts", "java", "cpp", "cs", "go", "rs"];

/// Folders under the home directory searched first
const HOME_DEV_FOLDERS: &[&str] = &[
    "Projects",
    "projects",
    "Code",
    "code",
    "Development",
    "dev",
    "workspace",
    "repos",
    "GitHub",
    "Documents",
];

/// Folders checked at the root of each local drive
const DRIVE_DEV_FOLDERS: &[&str] = &["Projects", "Code", "Development", "workspace", "repos"];

/// Path fragments of candidates ranked last
const SYSTEM_KEYWORDS: &[&str] = &[
    "appdata",
    "application data",
    "temp",
    "program files",
    "windows",
    "system32",
];

/// Upper bound on searched locations
pub const MAX_SEARCH_LOCATIONS: usize = 200;

pub struct ProjectLocator {
    fs: Arc<dyn FileSystemPort>,
    drive_roots: Vec<PathBuf>,
    remote_suffix: Option<Regex>,
}

impl ProjectLocator {
    pub fn new(fs: Arc<dyn FileSystemPort>) -> Self {
        let drive_roots = if cfg!(windows) {
            ('A'..='E').map(|d| PathBuf::from(format!("{}:\\", d))).collect()
        } else {
            Vec::new()
        };
        Self {
            fs,
            drive_roots,
            remote_suffix: Regex::new(r"\s*\[[^\]]+\]\s*$").ok(),
        }
    }

    /// Builder: replace the drive roots scanned after the home directory
    pub fn with_drive_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.drive_roots = roots;
        self
    }

    /// Known marker file, or a recognized source file at the top level
    pub fn looks_like_project(&self, dir: &Path) -> bool {
        if PROJECT_MARKERS
            .iter()
            .any(|marker| self.fs.exists(&dir.join(marker)))
        {
            return true;
        }
        self.fs
            .list_dir(dir)
            .map(|entries| {
                entries.iter().any(|entry| {
                    entry
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .map(|ext| SOURCE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                        .unwrap_or(false)
                })
            })
            .unwrap_or(false)
    }

    /// Directories to search, most likely first
    pub fn search_locations(&self) -> Vec<PathBuf> {
        let mut locations: Vec<PathBuf> = Vec::new();
        let mut push = |locations: &mut Vec<PathBuf>, path: PathBuf| {
            if locations.len() < MAX_SEARCH_LOCATIONS && !locations.contains(&path) {
                locations.push(path);
            }
        };

        if let Some(home) = self.fs.home_dir() {
            for folder in HOME_DEV_FOLDERS {
                let path = home.join(folder);
                if self.fs.is_dir(&path) {
                    push(&mut locations, path);
                }
            }
            push(&mut locations, home.clone());

            for child in self.visible_subdirs(&home) {
                for grandchild in self.visible_subdirs(&child) {
                    push(&mut locations, grandchild);
                }
                push(&mut locations, child);
            }
        }

        for root in &self.drive_roots {
            if !self.fs.is_dir(root) {
                continue;
            }
            for folder in DRIVE_DEV_FOLDERS {
                let path = root.join(folder);
                if self.fs.is_dir(&path) {
                    push(&mut locations, path);
                }
            }
            for child in self.visible_subdirs(root) {
                if self.looks_like_project(&child) {
                    push(&mut locations, child);
                }
            }
        }

        locations
    }

    /// Find the directory for a project `name`
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let locations = self.search_locations();

        let mut candidates: Vec<PathBuf> = Vec::new();
        for base in &locations {
            if base.file_name().and_then(|n| n.to_str()) == Some(name) && self.looks_like_project(base) {
                candidates.push(base.clone());
                continue;
            }
            let candidate = base.join(name);
            if self.fs.is_dir(&candidate) && self.looks_like_project(&candidate) {
                candidates.push(candidate);
            }
        }

        // Remote windows ("app [SSH: host]"): accept any existing folder
        if candidates.is_empty() {
            let folder = match &self.remote_suffix {
                Some(re) => re.replace(name, "").trim().to_string(),
                None => name.to_string(),
            };
            if !folder.is_empty() {
                candidates.extend(
                    locations
                        .iter()
                        .map(|base| base.join(&folder))
                        .filter(|path| self.fs.is_dir(path)),
                );
            }
        }

        let preferred = candidates.iter().position(|c| !is_system_path(c));
        match preferred {
            Some(idx) => Some(candidates.swap_remove(idx)),
            None => candidates.into_iter().next(),
        }
    }

    fn visible_subdirs(&self, dir: &Path) -> Vec<PathBuf> {
        let mut subdirs: Vec<PathBuf> = self
            .fs
            .list_dir(dir)
            .unwrap_or_default()
            .into_iter()
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| !n.starts_with('.'))
                    .unwrap_or(false)
            })
            .filter(|p| self.fs.is_dir(p))
            .collect();
        subdirs.sort();
        subdirs
    }
}

fn is_system_path(path: &Path) -> bool {
    let text = path.to_string_lossy().to_lowercase();
    SYSTEM_KEYWORDS.iter().any(|kw| text.contains(kw))
}
