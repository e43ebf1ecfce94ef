//! WindowRestorer - relaunch a closed window from its saved context
//!
//! Spawns the application for a binding's context, waits for the new
//! window to appear and places it on the monitor the old one used. Every
//! failure collapses to "not restored".

use std::sync::Arc;

use crate::application::context::ExtractorRegistry;
use crate::application::services::WindowRegistry;
use crate::domain::entities::{AppContext, BoundWindow};
use crate::domain::value_objects::{AppType, Rect, WindowHandle};

pub struct WindowRestorer {
    extractors: Arc<ExtractorRegistry>,
    windows: Arc<WindowRegistry>,
}

impl WindowRestorer {
    pub fn new(extractors: Arc<ExtractorRegistry>, windows: Arc<WindowRegistry>) -> Self {
        Self {
            extractors,
            windows,
        }
    }

    /// Relaunch a window for `context`; its handle once rediscovered
    pub fn restore_window(
        &self,
        app_type: AppType,
        context: &AppContext,
        target_rect: Option<Rect>,
    ) -> Option<WindowHandle> {
        let restored = self.extractors.restore_window(app_type, context, target_rect);
        match restored {
            Some(handle) => log!("Restored {} window as {}", app_type, handle),
            None => log!("Could not restore {} window", app_type),
        }
        restored
    }

    /// Restore a dead binding and point it at the new window
    pub fn restore_binding(&self, binding: &mut BoundWindow) -> Option<WindowHandle> {
        log_fn!("restore_binding", "{} '{}'", binding.handle, binding.title);
        let context = binding.restore_context();
        let handle = self.restore_window(binding.app_type, &context, binding.rect)?;

        self.windows.invalidate_cache();
        match self.windows.get_info(handle) {
            Some(info) => binding.retarget(handle, &info.title, &info.process_name),
            None => {
                let (title, process) = (binding.title.clone(), binding.process_name.clone());
                binding.retarget(handle, &title, &process);
            }
        }
        Some(handle)
    }
}
