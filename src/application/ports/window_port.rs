//! WindowPort - interface for top-level window queries and manipulation
//!
//! Every method takes a handle that may have died since it was obtained;
//! implementations report that as `PlatformError::WindowGone` or `false`.

use super::PlatformError;
use crate::domain::entities::WindowSnapshot;
use crate::domain::value_objects::{Rect, WindowHandle};

/// Port interface for the OS windowing API
pub trait WindowPort: Send + Sync {
    // Enumeration and lookup

    /// All top-level windows, topmost first
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>, PlatformError>;

    /// Describe one window. `z_order` is left at 0 for the caller to fill.
    fn describe(&self, handle: WindowHandle) -> Result<WindowSnapshot, PlatformError>;

    /// Whether the handle still names a window
    fn is_window(&self, handle: WindowHandle) -> bool;

    fn is_visible(&self, handle: WindowHandle) -> bool;

    /// Window currently receiving keyboard input
    fn foreground(&self) -> Option<WindowHandle>;

    // Activation primitives

    fn is_minimized(&self, handle: WindowHandle) -> bool;

    /// Restore from minimized/maximized
    fn restore(&self, handle: WindowHandle) -> Result<(), PlatformError>;

    fn show(&self, handle: WindowHandle) -> Result<(), PlatformError>;

    fn maximize(&self, handle: WindowHandle) -> Result<(), PlatformError>;

    /// Ask the OS to make the window foreground. `false` when refused.
    fn request_foreground(&self, handle: WindowHandle) -> bool;

    /// Move to the top of the z-order without changing position or size
    fn bring_to_top(&self, handle: WindowHandle) -> Result<(), PlatformError>;

    /// Set or clear always-on-top
    fn set_topmost(&self, handle: WindowHandle, topmost: bool) -> Result<(), PlatformError>;

    /// Press and release a modifier key to lift the foreground lock
    fn tap_modifier_key(&self) -> Result<(), PlatformError>;

    /// Input thread owning the window
    fn window_thread_id(&self, handle: WindowHandle) -> Option<u32>;

    /// Attach or detach two threads' input queues
    fn attach_thread_input(&self, from: u32, to: u32, attach: bool) -> bool;

    fn set_focus(&self, handle: WindowHandle) -> Result<(), PlatformError>;

    // Placement

    /// Work area of the monitor nearest to a point
    fn monitor_work_area(&self, x: i32, y: i32) -> Option<Rect>;

    /// Move and resize without touching the z-order
    fn move_window(&self, handle: WindowHandle, rect: Rect) -> Result<(), PlatformError>;
}

/// A window port with no windows, for platforms without a windowing backend
pub struct NullWindowPort;

impl WindowPort for NullWindowPort {
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>, PlatformError> {
        Err(PlatformError::Unsupported("window enumeration"))
    }

    fn describe(&self, handle: WindowHandle) -> Result<WindowSnapshot, PlatformError> {
        Err(PlatformError::WindowGone(handle))
    }

    fn is_window(&self, _handle: WindowHandle) -> bool {
        false
    }

    fn is_visible(&self, _handle: WindowHandle) -> bool {
        false
    }

    fn foreground(&self) -> Option<WindowHandle> {
        None
    }

    fn is_minimized(&self, _handle: WindowHandle) -> bool {
        false
    }

    fn restore(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        Err(PlatformError::WindowGone(handle))
    }

    fn show(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        Err(PlatformError::WindowGone(handle))
    }

    fn maximize(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        Err(PlatformError::WindowGone(handle))
    }

    fn request_foreground(&self, _handle: WindowHandle) -> bool {
        false
    }

    fn bring_to_top(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        Err(PlatformError::WindowGone(handle))
    }

    fn set_topmost(&self, handle: WindowHandle, _topmost: bool) -> Result<(), PlatformError> {
        Err(PlatformError::WindowGone(handle))
    }

    fn tap_modifier_key(&self) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported("synthetic input"))
    }

    fn window_thread_id(&self, _handle: WindowHandle) -> Option<u32> {
        None
    }

    fn attach_thread_input(&self, _from: u32, _to: u32, _attach: bool) -> bool {
        false
    }

    fn set_focus(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        Err(PlatformError::WindowGone(handle))
    }

    fn monitor_work_area(&self, _x: i32, _y: i32) -> Option<Rect> {
        None
    }

    fn move_window(&self, handle: WindowHandle, _rect: Rect) -> Result<(), PlatformError> {
        Err(PlatformError::WindowGone(handle))
    }
}
