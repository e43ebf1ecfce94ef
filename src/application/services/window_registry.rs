//! WindowRegistry - enumerates, caches and validates top-level windows
//!
//! Enumeration is cached for a short TTL so pickers and rebind scans do not
//! hammer the OS. Lookups by handle always go to the OS.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::application::ports::WindowPort;
use crate::domain::entities::{WindowSnapshot, UNKNOWN_PROCESS};
use crate::domain::value_objects::WindowHandle;

/// Shell and helper window classes that are never task windows
pub const FILTERED_CLASSES: &[&str] = &[
    "Shell_TrayWnd",
    "DV2ControlHost",
    "Windows.UI.Core.CoreWindow",
    "ApplicationFrameWindow",
    "WorkerW",
    "Progman",
    "Button",
    "Edit",
    "",
];

/// Titles of desktop pseudo-windows
pub const FILTERED_TITLES: &[&str] = &["", "Program Manager", "Desktop"];

struct Cache {
    taken_at: Instant,
    windows: Vec<WindowSnapshot>,
}

/// Registry state summary
#[derive(Clone, Debug, PartialEq)]
pub struct WindowSummary {
    pub total_windows: usize,
    pub cached_windows: usize,
    /// Age of the cached enumeration, if any
    pub cache_age: Option<Duration>,
    /// Up to five processes with the most windows
    pub top_processes: Vec<(String, usize)>,
}

/// Cached view of the desktop's top-level windows
pub struct WindowRegistry {
    port: Arc<dyn WindowPort>,
    cache_ttl: Duration,
    cache: Mutex<Option<Cache>>,
}

impl WindowRegistry {
    /// Create a registry with the default 2s cache
    pub fn new(port: Arc<dyn WindowPort>) -> Self {
        Self {
            port,
            cache_ttl: Duration::from_secs(2),
            cache: Mutex::new(None),
        }
    }

    /// Configure the cache lifetime
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Underlying window port
    pub fn port(&self) -> &Arc<dyn WindowPort> {
        &self.port
    }

    /// Visible, non-system windows sorted by (process, title), case-insensitive
    pub fn enumerate(&self, use_cache: bool) -> Vec<WindowSnapshot> {
        if use_cache {
            if let Some(cache) = self.cache.lock().as_ref() {
                if cache.taken_at.elapsed() < self.cache_ttl {
                    return cache.windows.clone();
                }
            }
        }

        let handles = match self.port.top_level_windows() {
            Ok(h) => h,
            Err(e) => {
                log!("Window enumeration failed: {}", e);
                return Vec::new();
            }
        };

        let mut windows = Vec::with_capacity(handles.len());
        for (z_order, handle) in handles.into_iter().enumerate() {
            if !self.port.is_visible(handle) {
                continue;
            }
            let mut snapshot = match self.port.describe(handle) {
                Ok(s) => s,
                Err(e) => {
                    log!("Skipping window {}: {}", handle, e);
                    continue;
                }
            };
            if is_filtered(&snapshot) {
                continue;
            }
            snapshot.is_visible = true;
            snapshot.z_order = z_order;
            windows.push(snapshot);
        }

        windows.sort_by_cached_key(|w| (w.process_name.to_lowercase(), w.title.to_lowercase()));

        *self.cache.lock() = Some(Cache {
            taken_at: Instant::now(),
            windows: windows.clone(),
        });
        windows
    }

    /// Fresh description of one window, None if it is gone
    pub fn get_info(&self, handle: WindowHandle) -> Option<WindowSnapshot> {
        if !self.is_valid(handle) {
            return None;
        }
        match self.port.describe(handle) {
            Ok(s) => Some(s),
            Err(e) => {
                log!("get_info {} failed: {}", handle, e);
                None
            }
        }
    }

    /// Whether the handle still names a window
    pub fn is_valid(&self, handle: WindowHandle) -> bool {
        !handle.is_null() && self.port.is_window(handle)
    }

    /// Drop the cached enumeration
    pub fn invalidate_cache(&self) {
        *self.cache.lock() = None;
    }

    /// Current foreground window, if it can be described
    pub fn foreground_window(&self) -> Option<WindowSnapshot> {
        self.port.foreground().and_then(|h| self.get_info(h))
    }

    /// Windows whose title equals `title`, or contains it case-insensitively
    pub fn find_windows_by_title(&self, title: &str, exact: bool) -> Vec<WindowSnapshot> {
        let needle = title.to_lowercase();
        self.enumerate(true)
            .into_iter()
            .filter(|w| {
                if exact {
                    w.title == title
                } else {
                    w.title.to_lowercase().contains(&needle)
                }
            })
            .collect()
    }

    /// Windows whose process name contains `process_name` case-insensitively
    pub fn find_windows_by_process(&self, process_name: &str) -> Vec<WindowSnapshot> {
        let needle = process_name.to_lowercase();
        self.enumerate(true)
            .into_iter()
            .filter(|w| w.process_name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Executable name owning a window, "Unknown" when unreadable
    pub fn get_window_process(&self, handle: WindowHandle) -> String {
        self.port
            .describe(handle)
            .map(|s| s.process_name)
            .unwrap_or_else(|_| UNKNOWN_PROCESS.to_string())
    }

    /// Counts for diagnostics
    pub fn window_summary(&self) -> WindowSummary {
        let windows = self.enumerate(true);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for w in &windows {
            *counts.entry(w.process_name.as_str()).or_default() += 1;
        }
        let mut top: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(p, n)| (p.to_string(), n))
            .collect();
        top.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top.truncate(5);

        let cache = self.cache.lock();
        WindowSummary {
            total_windows: windows.len(),
            cached_windows: cache.as_ref().map(|c| c.windows.len()).unwrap_or(0),
            cache_age: cache.as_ref().map(|c| c.taken_at.elapsed()),
            top_processes: top,
        }
    }
}

fn is_filtered(window: &WindowSnapshot) -> bool {
    FILTERED_TITLES.contains(&window.title.as_str())
        || FILTERED_CLASSES.contains(&window.class_name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::fakes::FakeWindowPort;

    fn win(h: isize, title: &str, process: &str) -> WindowSnapshot {
        WindowSnapshot::new(WindowHandle(h), title, process).with_class("AppWindow")
    }

    fn desktop() -> Arc<FakeWindowPort> {
        Arc::new(
            FakeWindowPort::new()
                .with_window(win(1, "Untitled - Notepad", "notepad.exe"))
                .with_window(win(2, "", "explorer.exe").with_class("Shell_TrayWnd"))
                .with_window(win(3, "Program Manager", "explorer.exe").with_class("Progman"))
                .with_window(win(4, "main.rs - ctxswitch - Visual Studio Code", "Code.exe"))
                .with_window(win(5, "Desktop", "explorer.exe"))
                .with_window(win(6, "hidden", "svc.exe").with_visible(false))
                .with_window(win(7, "Downloads", "explorer.exe").with_class("WorkerW"))
                .with_window(win(8, "alpha", "Code.exe")),
        )
    }

    #[test]
    fn test_enumerate_filters_and_sorts() {
        let port = desktop();
        let registry = WindowRegistry::new(port.clone());
        let windows = registry.enumerate(false);

        let handles: Vec<isize> = windows.iter().map(|w| w.handle.raw()).collect();
        assert_eq!(handles, vec![8, 4, 1]);
        for w in &windows {
            assert!(!FILTERED_CLASSES.contains(&w.class_name.as_str()));
            assert!(!FILTERED_TITLES.contains(&w.title.as_str()));
        }
        // z-order reflects enumeration order, not sort order
        assert_eq!(windows[0].z_order, 7);
        assert_eq!(windows[2].z_order, 0);
    }

    #[test]
    fn test_cache_within_ttl_and_invalidate() {
        let port = desktop();
        let registry = WindowRegistry::new(port.clone());

        let first = registry.enumerate(true);
        let second = registry.enumerate(true);
        assert_eq!(first, second);
        assert_eq!(port.enumerate_calls(), 1);

        registry.invalidate_cache();
        registry.enumerate(true);
        assert_eq!(port.enumerate_calls(), 2);

        registry.enumerate(false);
        assert_eq!(port.enumerate_calls(), 3);
    }

    #[test]
    fn test_expired_cache_refreshes() {
        let port = desktop();
        let registry = WindowRegistry::new(port.clone()).with_cache_ttl(Duration::ZERO);

        registry.enumerate(true);
        registry.enumerate(true);
        assert_eq!(port.enumerate_calls(), 2);
    }

    #[test]
    fn test_failing_window_is_skipped() {
        let port = desktop();
        port.state.lock().broken.insert(WindowHandle(4));
        let registry = WindowRegistry::new(port.clone());

        let handles: Vec<isize> = registry.enumerate(false).iter().map(|w| w.handle.raw()).collect();
        assert_eq!(handles, vec![8, 1]);
    }

    #[test]
    fn test_lookups() {
        let registry = WindowRegistry::new(desktop());

        assert!(registry.is_valid(WindowHandle(1)));
        assert!(!registry.is_valid(WindowHandle(99)));
        assert!(!registry.is_valid(WindowHandle(0)));
        assert_eq!(registry.get_info(WindowHandle(99)), None);
        assert_eq!(registry.get_info(WindowHandle(1)).unwrap().title, "Untitled - Notepad");

        assert_eq!(registry.find_windows_by_title("NOTEPAD", false).len(), 1);
        assert_eq!(registry.find_windows_by_title("notepad", true).len(), 0);
        assert_eq!(registry.find_windows_by_process("code").len(), 2);

        assert_eq!(registry.get_window_process(WindowHandle(4)), "Code.exe");
        assert_eq!(registry.get_window_process(WindowHandle(99)), UNKNOWN_PROCESS);
    }

    #[test]
    fn test_foreground_and_summary() {
        let port = desktop();
        port.set_foreground(Some(WindowHandle(4)));
        let registry = WindowRegistry::new(port);

        assert_eq!(registry.foreground_window().unwrap().handle, WindowHandle(4));

        let summary = registry.window_summary();
        assert_eq!(summary.total_windows, 3);
        assert_eq!(summary.cached_windows, 3);
        assert_eq!(summary.top_processes[0], ("Code.exe".to_string(), 2));
    }
}
