//! AppContext entity - minimal per-application working state
//!
//! Enough to relaunch an equivalent window: a directory for terminals and
//! editors, a shell profile for terminals, a navigated folder for Explorer.

use crate::domain::value_objects::AppType;

/// Captured working context of one window
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppContext {
    /// Extractor that produced this context
    pub app_type: AppType,
    /// Working directory (terminal / vscode)
    pub working_directory: Option<String>,
    /// Display profile name (terminal)
    pub terminal_profile: Option<String>,
    /// Navigated folder (explorer)
    pub folder_path: Option<String>,
}

impl AppContext {
    /// Empty context tagged with an app type
    pub fn empty(app_type: AppType) -> Self {
        Self {
            app_type,
            ..Default::default()
        }
    }

    /// Builder: set working directory
    pub fn with_working_directory(mut self, dir: impl Into<String>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    /// Builder: set terminal profile
    pub fn with_terminal_profile(mut self, profile: impl Into<String>) -> Self {
        self.terminal_profile = Some(profile.into());
        self
    }

    /// Builder: set folder path
    pub fn with_folder_path(mut self, path: impl Into<String>) -> Self {
        self.folder_path = Some(path.into());
        self
    }

    /// True when nothing beyond the app type was captured
    pub fn is_empty(&self) -> bool {
        self.working_directory.is_none()
            && self.terminal_profile.is_none()
            && self.folder_path.is_none()
    }
}
