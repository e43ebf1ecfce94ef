//! Explorer extractor - folder windows of the Windows shell
//!
//! The navigated folder is read from the shell's open-window list, matched
//! by handle. Titles are not reliable: Explorer shows only the folder name.

use std::sync::Arc;

use super::paths::{file_url_to_path, paths_match};
use super::{ContextExtractor, ExtractorEnv, LaunchPlan};
use crate::application::ports::LaunchCommand;
use crate::domain::entities::{AppContext, WindowSnapshot};
use crate::domain::value_objects::app_type::EXPLORER_PROCESSES;
use crate::domain::value_objects::{AppType, WindowHandle};

/// Window class of Explorer folder windows (the desktop and taskbar use others)
pub const FOLDER_WINDOW_CLASS: &str = "CabinetWClass";

pub struct ExplorerExtractor {
    env: Arc<ExtractorEnv>,
}

impl ExplorerExtractor {
    pub fn new(env: Arc<ExtractorEnv>) -> Self {
        Self { env }
    }

    /// Filesystem path shown in a folder window, or the shell's display name
    /// for virtual locations
    pub fn folder_path_of(&self, handle: WindowHandle) -> Option<String> {
        let locations = match self.env.shell.open_folder_windows() {
            Ok(l) => l,
            Err(e) => {
                log!("Shell window query failed: {}", e);
                return None;
            }
        };
        let location = locations.into_iter().find(|l| l.handle == handle)?;
        file_url_to_path(&location.location_url)
            .or_else(|| Some(location.location_name).filter(|n| !n.is_empty()))
    }
}

impl ContextExtractor for ExplorerExtractor {
    fn app_type(&self) -> AppType {
        AppType::Explorer
    }

    fn process_names(&self) -> &'static [&'static str] {
        EXPLORER_PROCESSES
    }

    fn env(&self) -> &ExtractorEnv {
        &self.env
    }

    fn extract_context(&self, handle: WindowHandle, _title: &str) -> AppContext {
        let ctx = AppContext::empty(AppType::Explorer);
        match self.folder_path_of(handle) {
            Some(path) => ctx.with_folder_path(path),
            None => ctx,
        }
    }

    fn can_restore(&self, context: &AppContext) -> bool {
        context.folder_path.as_deref().is_some_and(|p| !p.is_empty())
    }

    fn launch_plan(&self, context: &AppContext) -> Option<LaunchPlan> {
        let folder = context.folder_path.as_deref().filter(|p| !p.is_empty())?;
        let plan = LaunchPlan::new(LaunchCommand::new("explorer.exe").arg(folder));
        Some(match std::env::var("SystemRoot") {
            Ok(root) => plan.or_else(LaunchCommand::new(format!("{}\\explorer.exe", root)).arg(folder)),
            Err(_) => plan,
        })
    }

    fn is_candidate(&self, window: &WindowSnapshot) -> bool {
        window.class_name == FOLDER_WINDOW_CLASS
            && EXPLORER_PROCESSES.contains(&window.process_name.to_lowercase().as_str())
    }

    fn match_score(&self, window: &WindowSnapshot, context: &AppContext) -> f64 {
        let Some(wanted) = context.folder_path.as_deref() else {
            return 0.0;
        };
        match self.folder_path_of(window.handle) {
            Some(actual) if paths_match(&actual, wanted) => 1.0,
            _ => 0.0,
        }
    }
}
