//! WindowSnapshot entity - one enumerated OS window
//!
//! Recreated on every enumeration and never persisted. The handle inside is
//! only trustworthy until the window is destroyed.

use crate::domain::value_objects::{Rect, WindowHandle};

/// Process name reported when the owning executable cannot be read
pub const UNKNOWN_PROCESS: &str = "Unknown";

/// Point-in-time description of a top-level window
#[derive(Clone, Debug, PartialEq)]
pub struct WindowSnapshot {
    /// OS handle
    pub handle: WindowHandle,
    /// Window title
    pub title: String,
    /// Window class name
    pub class_name: String,
    /// Owning process id
    pub process_id: u32,
    /// Owning executable name (e.g. "Code.exe"), "Unknown" when unreadable
    pub process_name: String,
    /// Visibility flag
    pub is_visible: bool,
    /// Enabled flag (disabled while a modal dialog is open)
    pub is_enabled: bool,
    /// Bounding rectangle
    pub rect: Rect,
    /// Position in the OS enumeration (0 = top of the z-order)
    pub z_order: usize,
}

impl WindowSnapshot {
    /// Minimal snapshot, mostly useful for tests and pickers
    pub fn new(
        handle: WindowHandle,
        title: impl Into<String>,
        process_name: impl Into<String>,
    ) -> Self {
        Self {
            handle,
            title: title.into(),
            class_name: String::new(),
            process_id: 0,
            process_name: process_name.into(),
            is_visible: true,
            is_enabled: true,
            rect: Rect::default(),
            z_order: 0,
        }
    }

    /// Builder: set class name
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Builder: set process id
    pub fn with_pid(mut self, process_id: u32) -> Self {
        self.process_id = process_id;
        self
    }

    /// Builder: set bounds
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Builder: set visibility
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.is_visible = visible;
        self
    }

    /// Case-insensitive process name comparison
    pub fn is_process(&self, process_name: &str) -> bool {
        self.process_name.eq_ignore_ascii_case(process_name)
    }
}
