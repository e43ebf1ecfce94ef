//! BoundWindow entity - a window reference persisted with a task
//!
//! The handle goes stale when the window's process restarts; the remaining
//! fields exist so the window can be recognized or relaunched later.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{AppContext, WindowSnapshot};
use crate::domain::value_objects::{AppType, Rect, WindowHandle};

/// A window bound to a task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "BoundWindowRecord")]
pub struct BoundWindow {
    /// Last known OS handle
    #[serde(rename = "hwnd")]
    pub handle: WindowHandle,
    /// Title at binding time
    pub title: String,
    /// Owning executable name
    pub process_name: String,
    /// When the binding was made (or last replaced)
    pub binding_time: NaiveDateTime,
    /// Whether the handle was valid at the last check
    pub is_valid: bool,
    /// Extractor that owns this window
    pub app_type: AppType,
    pub working_directory: Option<String>,
    pub terminal_profile: Option<String>,
    pub folder_path: Option<String>,
    /// Placement at binding time
    #[serde(rename = "window_rect")]
    pub rect: Option<Rect>,
}

/// On-disk shape; older records lack every field after `is_valid`
#[derive(Deserialize)]
struct BoundWindowRecord {
    hwnd: WindowHandle,
    #[serde(default)]
    title: String,
    #[serde(default)]
    process_name: String,
    #[serde(default = "now")]
    binding_time: NaiveDateTime,
    #[serde(default = "default_valid")]
    is_valid: bool,
    /// Kept raw so unknown names fall back to inference
    #[serde(default)]
    app_type: Option<String>,
    #[serde(default)]
    working_directory: Option<String>,
    #[serde(default)]
    terminal_profile: Option<String>,
    #[serde(default)]
    folder_path: Option<String>,
    #[serde(default)]
    window_rect: Option<Rect>,
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn default_valid() -> bool {
    true
}

impl From<BoundWindowRecord> for BoundWindow {
    fn from(r: BoundWindowRecord) -> Self {
        let app_type = r
            .app_type
            .as_deref()
            .and_then(AppType::from_name)
            .unwrap_or_else(|| AppType::from_process_name(&r.process_name));
        Self {
            handle: r.hwnd,
            title: r.title,
            process_name: r.process_name,
            binding_time: r.binding_time,
            is_valid: r.is_valid,
            app_type,
            working_directory: r.working_directory,
            terminal_profile: r.terminal_profile,
            folder_path: r.folder_path,
            rect: r.window_rect,
        }
    }
}

impl BoundWindow {
    /// Bind a live window; app type is inferred from the process name
    pub fn new(
        handle: WindowHandle,
        title: impl Into<String>,
        process_name: impl Into<String>,
    ) -> Self {
        let process_name = process_name.into();
        Self {
            handle,
            title: title.into(),
            app_type: AppType::from_process_name(&process_name),
            process_name,
            binding_time: now(),
            is_valid: true,
            working_directory: None,
            terminal_profile: None,
            folder_path: None,
            rect: None,
        }
    }

    /// Bind from an enumerated snapshot, remembering its placement
    pub fn from_snapshot(snapshot: &WindowSnapshot) -> Self {
        let mut bound = Self::new(snapshot.handle, &snapshot.title, &snapshot.process_name);
        if !snapshot.rect.is_empty() {
            bound.rect = Some(snapshot.rect);
        }
        bound
    }

    /// Builder: attach a captured context (its app type wins)
    pub fn with_context(mut self, context: AppContext) -> Self {
        self.app_type = context.app_type;
        self.working_directory = context.working_directory;
        self.terminal_profile = context.terminal_profile;
        self.folder_path = context.folder_path;
        self
    }

    /// Context needed to relaunch an equivalent window
    pub fn restore_context(&self) -> AppContext {
        AppContext {
            app_type: self.app_type,
            working_directory: self.working_directory.clone(),
            terminal_profile: self.terminal_profile.clone(),
            folder_path: self.folder_path.clone(),
        }
    }

    /// Point the binding at a successor window. Context fields are kept.
    pub fn retarget(&mut self, handle: WindowHandle, title: &str, process_name: &str) {
        self.handle = handle;
        self.title = title.to_string();
        self.process_name = process_name.to_string();
        self.binding_time = now();
        self.is_valid = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_old_record_infers_app_type() {
        let json = r#"{
            "hwnd": 333,
            "title": "Documents",
            "process_name": "explorer.exe",
            "binding_time": "2024-01-01T00:00:00",
            "is_valid": true
        }"#;
        let bound: BoundWindow = serde_json::from_str(json).unwrap();

        assert_eq!(bound.handle, WindowHandle(333));
        assert_eq!(bound.app_type, AppType::Explorer);
        assert_eq!(bound.working_directory, None);
        assert_eq!(bound.terminal_profile, None);
        assert_eq!(bound.folder_path, None);
        assert_eq!(bound.rect, None);
    }

    #[test]
    fn test_explicit_app_type_wins() {
        let json = r#"{
            "hwnd": 111,
            "title": "C:\\Dev - PowerShell",
            "process_name": "WindowsTerminal.exe",
            "binding_time": "2024-01-01T10:00:00.123456",
            "app_type": "terminal",
            "working_directory": "C:\\Dev",
            "window_rect": [0, 0, 1920, 1080]
        }"#;
        let bound: BoundWindow = serde_json::from_str(json).unwrap();

        assert_eq!(bound.app_type, AppType::Terminal);
        assert!(bound.is_valid);
        assert_eq!(bound.rect, Some(Rect::new(0, 0, 1920, 1080)));

        let ctx = bound.restore_context();
        assert_eq!(ctx.working_directory.as_deref(), Some(r"C:\Dev"));
    }

    #[test]
    fn test_unknown_app_type_is_inferred() {
        let json = r#"{
            "hwnd": 5,
            "title": "main.rs - api - Visual Studio Code",
            "process_name": "Code.exe",
            "app_type": "browser"
        }"#;
        let bound: BoundWindow = serde_json::from_str(json).unwrap();
        assert_eq!(bound.app_type, AppType::VsCode);

        let json = r#"{"hwnd": 6, "process_name": "notepad.exe", "app_type": null}"#;
        let bound: BoundWindow = serde_json::from_str(json).unwrap();
        assert_eq!(bound.app_type, AppType::Generic);
    }

    #[test]
    fn test_serializes_with_legacy_field_names() {
        let bound = BoundWindow::new(WindowHandle(42), "Untitled - Notepad", "notepad.exe");
        let value = serde_json::to_value(&bound).unwrap();

        assert_eq!(value["hwnd"], 42);
        assert_eq!(value["app_type"], "generic");
        assert!(value.get("window_rect").is_some());

        let back: BoundWindow = serde_json::from_value(value).unwrap();
        assert_eq!(back, bound);
    }

    #[test]
    fn test_retarget_keeps_context() {
        let mut bound = BoundWindow::new(WindowHandle(1), "old", "Code.exe")
            .with_context(AppContext::empty(AppType::VsCode).with_working_directory(r"C:\p"));

        bound.is_valid = false;
        bound.retarget(WindowHandle(2), "new", "Code.exe");

        assert_eq!(bound.handle, WindowHandle(2));
        assert!(bound.is_valid);
        assert_eq!(bound.working_directory.as_deref(), Some(r"C:\p"));
    }
}
