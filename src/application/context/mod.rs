//! Context extractors - capture and restore per-application working context
//!
//! Each supported application kind (explorer, terminal, vscode, generic)
//! implements `ContextExtractor`. The `ExtractorRegistry` maps process names
//! to extractors.

pub mod explorer;
pub mod generic;
pub mod paths;
pub mod project_locator;
pub mod registry;
pub mod terminal;
pub mod vscode;

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::application::ports::{
    FileSystemPort, LaunchCommand, LauncherPort, ProcessPort, ShellPort,
};
use crate::application::services::{WindowActivator, WindowRegistry};
use crate::domain::entities::{AppContext, WindowSnapshot};
use crate::domain::value_objects::{AppType, Rect, WindowHandle};
use crate::shared::config::RestoreConfig;

pub use explorer::ExplorerExtractor;
pub use generic::GenericExtractor;
pub use project_locator::ProjectLocator;
pub use registry::ExtractorRegistry;
pub use terminal::TerminalExtractor;
pub use vscode::VsCodeExtractor;

/// Shared collaborators of every extractor
pub struct ExtractorEnv {
    pub registry: Arc<WindowRegistry>,
    pub activator: Arc<dyn WindowActivator>,
    pub fs: Arc<dyn FileSystemPort>,
    pub launcher: Arc<dyn LauncherPort>,
    pub shell: Arc<dyn ShellPort>,
    pub process: Arc<dyn ProcessPort>,
    pub restore: RestoreConfig,
}

/// Primary command plus the one tried when the primary cannot be spawned
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchPlan {
    pub primary: LaunchCommand,
    pub fallback: Option<LaunchCommand>,
}

impl LaunchPlan {
    pub fn new(primary: LaunchCommand) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    /// Builder: command to try if the primary fails to spawn
    pub fn or_else(mut self, fallback: LaunchCommand) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Spawn the primary, then the fallback. True if either started.
    pub fn launch(&self, launcher: &dyn LauncherPort) -> bool {
        match launcher.spawn(&self.primary) {
            Ok(()) => {
                log!("Launched: {}", self.primary);
                true
            }
            Err(e) => {
                log!("Launch failed: {} ({})", self.primary, e);
                let Some(fallback) = &self.fallback else {
                    return false;
                };
                match launcher.spawn(fallback) {
                    Ok(()) => {
                        log!("Launched fallback: {}", fallback);
                        true
                    }
                    Err(e) => {
                        log!("Fallback launch failed: {} ({})", fallback, e);
                        false
                    }
                }
            }
        }
    }
}

/// Capability surface shared by all application kinds
pub trait ContextExtractor: Send + Sync {
    fn app_type(&self) -> AppType;

    /// Lowercase executable names this extractor owns
    fn process_names(&self) -> &'static [&'static str];

    fn env(&self) -> &ExtractorEnv;

    /// Read the working context of a live window. Never fails; missing
    /// pieces stay `None`.
    fn extract_context(&self, handle: WindowHandle, title: &str) -> AppContext;

    /// Whether `context` carries enough to relaunch an equivalent window
    fn can_restore(&self, context: &AppContext) -> bool;

    /// Commands that recreate a window for `context`
    fn launch_plan(&self, context: &AppContext) -> Option<LaunchPlan>;

    /// How well a live window fits `context`, in [0, 1]
    fn match_score(&self, window: &WindowSnapshot, context: &AppContext) -> f64 {
        directory_match_score(&window.title, context.working_directory.as_deref())
            .unwrap_or(0.0)
    }

    /// Wait after spawning before polling for the new window
    fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.env().restore.settle_ms)
    }

    fn rediscovery_timeout(&self) -> Duration {
        Duration::from_millis(self.env().restore.rediscovery_timeout_ms)
    }

    /// Windows this extractor could own
    fn is_candidate(&self, window: &WindowSnapshot) -> bool {
        let process = window.process_name.to_lowercase();
        self.process_names().contains(&process.as_str())
    }

    /// Poll for a window matching `context` until `timeout`. Windows not in
    /// `preexisting` are checked first. When nothing matches, falls back to
    /// the most recent candidate that appeared after the launch, never to a
    /// window that was already open.
    fn find_matching_window(
        &self,
        context: &AppContext,
        timeout: Duration,
        preexisting: &HashSet<WindowHandle>,
    ) -> Option<WindowHandle> {
        let env = self.env();
        let threshold = env.restore.context_match_threshold;
        let poll = Duration::from_millis(env.restore.poll_interval_ms.max(1));
        let deadline = Instant::now() + timeout;

        loop {
            let (fresh, old): (Vec<_>, Vec<_>) = self
                .candidates()
                .into_iter()
                .partition(|w| !preexisting.contains(&w.handle));
            if let Some(found) = fresh
                .iter()
                .chain(old.iter())
                .find(|w| self.match_score(w, context) >= threshold)
            {
                log!("Matched {} window {} '{}'", self.app_type(), found.handle, found.title);
                return Some(found.handle);
            }

            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep(poll.min(deadline - now));
        }

        let fallback = self
            .candidates()
            .into_iter()
            .filter(|w| !preexisting.contains(&w.handle))
            .min_by_key(|w| w.z_order)
            .map(|w| w.handle);
        log!("No {} window matched; falling back to {:?}", self.app_type(), fallback);
        fallback
    }

    /// Launch, wait, rediscover, then place on the target's monitor
    fn restore_window(
        &self,
        context: &AppContext,
        target_rect: Option<Rect>,
    ) -> Option<WindowHandle> {
        log_fn!("restore_window", "{} {:?}", self.app_type(), context);
        let plan = self.launch_plan(context)?;
        let env = self.env();
        let preexisting: HashSet<WindowHandle> =
            self.candidates().into_iter().map(|w| w.handle).collect();
        if !plan.launch(env.launcher.as_ref()) {
            return None;
        }

        thread::sleep(self.settle_delay());
        let handle =
            self.find_matching_window(context, self.rediscovery_timeout(), &preexisting)?;
        if let Some(rect) = target_rect {
            position_window(env, handle, rect);
        }
        Some(handle)
    }

    fn candidates(&self) -> Vec<WindowSnapshot> {
        self.env()
            .registry
            .enumerate(false)
            .into_iter()
            .filter(|w| self.is_candidate(w))
            .collect()
    }
}

/// Move to the monitor that contains `target`, maximize, then activate
pub fn position_window(env: &ExtractorEnv, handle: WindowHandle, target: Rect) {
    let port = env.registry.port();
    let (x, y) = target.origin();
    if let Some(work_area) = port.monitor_work_area(x, y) {
        if let Err(e) = port.move_window(handle, work_area) {
            log!("Move of {} failed: {}", handle, e);
        }
    }
    if let Err(e) = port.maximize(handle) {
        log!("Maximize of {} failed: {}", handle, e);
    }
    if !env.activator.activate(handle) {
        log!("Restored window {} could not be activated", handle);
    }
}

/// 1.0 if the directory appears in the title, 0.7 if only its last
/// component does. None when there is no directory to compare.
pub fn directory_match_score(title: &str, directory: Option<&str>) -> Option<f64> {
    let directory = directory.filter(|d| !d.is_empty())?;
    let title = title.to_lowercase();
    if title.contains(&directory.to_lowercase()) {
        return Some(1.0);
    }
    let name = paths::basename(directory).to_lowercase();
    if !name.is_empty() && title.contains(&name) {
        Some(0.7)
    } else {
        Some(0.0)
    }
}

/// Average of the factors that apply, 0 when none do
pub fn average(factors: &[Option<f64>]) -> f64 {
    let present: Vec<f64> = factors.iter().flatten().copied().collect();
    if present.is_empty() {
        0.0
    } else {
        present.iter().sum::<f64>() / present.len() as f64
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Extractor environment over fake ports

    use super::*;
    use crate::application::ports::fakes::{
        FakeLauncher, FakeProcessPort, FakeShellPort, FakeWindowPort, RecordingActivator,
    };

    pub struct Harness {
        pub windows: Arc<FakeWindowPort>,
        pub launcher: Arc<FakeLauncher>,
        pub shell: Arc<FakeShellPort>,
        pub activator: Arc<RecordingActivator>,
        pub env: Arc<ExtractorEnv>,
    }

    pub fn harness(fs: impl FileSystemPort + 'static, process: FakeProcessPort) -> Harness {
        let windows = Arc::new(FakeWindowPort::new());
        let launcher = Arc::new(FakeLauncher::new());
        let shell = Arc::new(FakeShellPort::default());
        let activator = RecordingActivator::new(Duration::ZERO);
        let env = Arc::new(ExtractorEnv {
            registry: Arc::new(WindowRegistry::new(windows.clone())),
            activator: activator.clone(),
            fs: Arc::new(fs),
            launcher: launcher.clone(),
            shell: shell.clone(),
            process: Arc::new(process),
            restore: RestoreConfig {
                settle_ms: 0,
                editor_settle_ms: 0,
                rediscovery_timeout_ms: 50,
                editor_rediscovery_timeout_ms: 50,
                poll_interval_ms: 5,
                ..RestoreConfig::default()
            },
        });
        Harness {
            windows,
            launcher,
            shell,
            activator,
            env,
        }
    }
}
