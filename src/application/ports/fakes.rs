//! In-memory port implementations for tests

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::*;
use crate::domain::entities::WindowSnapshot;
use crate::domain::value_objects::{Rect, WindowHandle};

/// Scriptable desktop state behind `FakeWindowPort`
#[derive(Default)]
pub struct FakeDesktop {
    /// Topmost first
    pub windows: Vec<WindowSnapshot>,
    pub foreground: Option<WindowHandle>,
    /// Handles whose `describe` fails
    pub broken: HashSet<WindowHandle>,
    pub minimized: HashSet<WindowHandle>,
    /// Number of upcoming `request_foreground` calls to refuse
    pub refuse_foreground: usize,
    /// Operations that return an OS error: "show", "topmost", "modifier", "focus"
    pub failing: HashSet<&'static str>,
    pub enumerate_calls: usize,
    /// Ordered log of mutating calls, e.g. "foreground 0x10"
    pub calls: Vec<String>,
    pub attach_log: Vec<(u32, u32, bool)>,
    pub work_area: Option<Rect>,
    pub moved: Vec<(WindowHandle, Rect)>,
    pub maximized: Vec<WindowHandle>,
}

#[derive(Default)]
pub struct FakeWindowPort {
    pub state: Mutex<FakeDesktop>,
}

impl FakeWindowPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a window below the existing ones
    pub fn with_window(self, window: WindowSnapshot) -> Self {
        self.state.lock().windows.push(window);
        self
    }

    /// Add a window at the top of the z-order
    pub fn open_window(&self, window: WindowSnapshot) {
        self.state.lock().windows.insert(0, window);
    }

    pub fn close_window(&self, handle: WindowHandle) {
        let mut s = self.state.lock();
        s.windows.retain(|w| w.handle != handle);
        if s.foreground == Some(handle) {
            s.foreground = None;
        }
    }

    pub fn set_foreground(&self, handle: Option<WindowHandle>) {
        self.state.lock().foreground = handle;
    }

    pub fn enumerate_calls(&self) -> usize {
        self.state.lock().enumerate_calls
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    fn log(&self, call: String) {
        self.state.lock().calls.push(call);
    }

    /// Make every call of `operation` fail
    pub fn fail(&self, operation: &'static str) {
        self.state.lock().failing.insert(operation);
    }

    fn check(&self, operation: &'static str) -> Result<(), PlatformError> {
        if self.state.lock().failing.contains(operation) {
            Err(PlatformError::Os(format!("{} refused", operation)))
        } else {
            Ok(())
        }
    }

    fn find(&self, handle: WindowHandle) -> Option<WindowSnapshot> {
        self.state
            .lock()
            .windows
            .iter()
            .find(|w| w.handle == handle)
            .cloned()
    }
}

impl WindowPort for FakeWindowPort {
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>, PlatformError> {
        let mut s = self.state.lock();
        s.enumerate_calls += 1;
        Ok(s.windows.iter().map(|w| w.handle).collect())
    }

    fn describe(&self, handle: WindowHandle) -> Result<WindowSnapshot, PlatformError> {
        if self.state.lock().broken.contains(&handle) {
            return Err(PlatformError::AccessDenied(handle.to_string()));
        }
        self.find(handle).ok_or(PlatformError::WindowGone(handle))
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        self.find(handle).is_some()
    }

    fn is_visible(&self, handle: WindowHandle) -> bool {
        self.find(handle).map(|w| w.is_visible).unwrap_or(false)
    }

    fn foreground(&self) -> Option<WindowHandle> {
        self.state.lock().foreground
    }

    fn is_minimized(&self, handle: WindowHandle) -> bool {
        self.state.lock().minimized.contains(&handle)
    }

    fn restore(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        self.log(format!("restore {}", handle));
        self.state.lock().minimized.remove(&handle);
        Ok(())
    }

    fn show(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        self.log(format!("show {}", handle));
        self.check("show")
    }

    fn maximize(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        self.log(format!("maximize {}", handle));
        self.state.lock().maximized.push(handle);
        Ok(())
    }

    fn request_foreground(&self, handle: WindowHandle) -> bool {
        self.log(format!("foreground {}", handle));
        let exists = self.find(handle).is_some();
        let mut s = self.state.lock();
        if s.refuse_foreground > 0 {
            s.refuse_foreground -= 1;
            return false;
        }
        if exists {
            s.foreground = Some(handle);
        }
        exists
    }

    fn bring_to_top(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        self.log(format!("top {}", handle));
        Ok(())
    }

    fn set_topmost(&self, handle: WindowHandle, topmost: bool) -> Result<(), PlatformError> {
        self.log(format!("topmost {} {}", handle, topmost));
        self.check("topmost")
    }

    fn tap_modifier_key(&self) -> Result<(), PlatformError> {
        self.log("modifier".to_string());
        self.check("modifier")
    }

    fn window_thread_id(&self, handle: WindowHandle) -> Option<u32> {
        self.find(handle).map(|w| 1000 + w.process_id)
    }

    fn attach_thread_input(&self, from: u32, to: u32, attach: bool) -> bool {
        self.state.lock().attach_log.push((from, to, attach));
        true
    }

    fn set_focus(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        self.log(format!("focus {}", handle));
        self.check("focus")
    }

    fn monitor_work_area(&self, _x: i32, _y: i32) -> Option<Rect> {
        self.state.lock().work_area
    }

    fn move_window(&self, handle: WindowHandle, rect: Rect) -> Result<(), PlatformError> {
        self.state.lock().moved.push((handle, rect));
        Ok(())
    }
}

/// Fixed pid -> cwd table
#[derive(Default)]
pub struct FakeProcessPort {
    pub cwds: HashMap<u32, String>,
}

impl ProcessPort for FakeProcessPort {
    fn process_cwd(&self, pid: u32) -> Option<String> {
        self.cwds.get(&pid).cloned()
    }
}

#[derive(Default)]
pub struct FakeShellPort {
    pub locations: Mutex<Vec<ShellLocation>>,
}

impl FakeShellPort {
    pub fn add(&self, handle: WindowHandle, url: &str, name: &str) {
        self.locations.lock().push(ShellLocation {
            handle,
            location_url: url.to_string(),
            location_name: name.to_string(),
        });
    }
}

impl ShellPort for FakeShellPort {
    fn open_folder_windows(&self) -> Result<Vec<ShellLocation>, PlatformError> {
        Ok(self.locations.lock().clone())
    }
}

type SpawnEffect = Box<dyn FnOnce() + Send>;

/// Records launches; optionally fails chosen programs and runs effects on success
#[derive(Default)]
pub struct FakeLauncher {
    pub launched: Mutex<Vec<LaunchCommand>>,
    pub failing: Mutex<HashSet<String>>,
    effects: Mutex<VecDeque<SpawnEffect>>,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every launch of `program` fail
    pub fn fail(&self, program: &str) {
        self.failing.lock().insert(program.to_string());
    }

    /// Run `effect` on the next successful launch
    pub fn on_spawn(&self, effect: impl FnOnce() + Send + 'static) {
        self.effects.lock().push_back(Box::new(effect));
    }

    pub fn launched(&self) -> Vec<LaunchCommand> {
        self.launched.lock().clone()
    }
}

impl LauncherPort for FakeLauncher {
    fn spawn(&self, command: &LaunchCommand) -> Result<(), PlatformError> {
        self.launched.lock().push(command.clone());
        if self.failing.lock().contains(&command.program) {
            return Err(PlatformError::Spawn {
                program: command.program.clone(),
                reason: "not found".to_string(),
            });
        }
        let effect = self.effects.lock().pop_front();
        if let Some(effect) = effect {
            effect();
        }
        Ok(())
    }
}

/// Set of directories and files, compared by exact path
#[derive(Default)]
pub struct FakeFileSystem {
    pub dirs: HashSet<PathBuf>,
    pub files: HashSet<PathBuf>,
    pub home: Option<PathBuf>,
}

impl FakeFileSystem {
    pub fn with_dir(mut self, dir: &str) -> Self {
        self.dirs.insert(PathBuf::from(dir));
        self
    }
}

impl FileSystemPort for FakeFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.is_dir(path) || self.is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, PlatformError> {
        Ok(self
            .dirs
            .iter()
            .chain(self.files.iter())
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect())
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}

/// Activator that records every call and optionally takes time per window
pub struct RecordingActivator {
    pub activated: Mutex<Vec<WindowHandle>>,
    pub delay: Duration,
}

impl RecordingActivator {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            activated: Mutex::new(Vec::new()),
            delay,
        })
    }
}

impl crate::application::services::WindowActivator for RecordingActivator {
    fn activate(&self, handle: WindowHandle) -> bool {
        self.activated.lock().push(handle);
        std::thread::sleep(self.delay);
        true
    }
}
