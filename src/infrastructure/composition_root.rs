//! Composition Root - Dependency Injection Container
//!
//! Wires ports, services, extractors and use cases from one `CoreConfig`.
//! This is the only place that knows which adapters back the ports.

use std::sync::Arc;

use crate::application::context::{ExtractorEnv, ExtractorRegistry};
use crate::application::ports::{
    FileSystemPort, LauncherPort, NullProcessPort, NullShellPort, NullWindowPort, ProcessPort,
    ShellPort, WindowPort,
};
use crate::application::services::{
    ActivationEngine, RebindManager, SwitchCoordinator, WindowActivator, WindowRegistry,
};
use crate::application::use_cases::WindowRestorer;
use crate::domain::services::{PriorityScorer, SearchScorer};
use crate::infrastructure::filesystem::StdFileSystem;
use crate::infrastructure::launcher::StdLauncher;
use crate::shared::config::CoreConfig;

/// Adapters behind the application ports
#[derive(Clone)]
pub struct Ports {
    pub window: Arc<dyn WindowPort>,
    pub process: Arc<dyn ProcessPort>,
    pub shell: Arc<dyn ShellPort>,
    pub launcher: Arc<dyn LauncherPort>,
    pub fs: Arc<dyn FileSystemPort>,
}

impl Ports {
    /// No window system: enumeration is empty, activation always fails
    pub fn null() -> Self {
        Self {
            window: Arc::new(NullWindowPort),
            process: Arc::new(NullProcessPort),
            shell: Arc::new(NullShellPort),
            launcher: Arc::new(StdLauncher::new()),
            fs: Arc::new(StdFileSystem::new()),
        }
    }

    /// Win32-backed adapters
    #[cfg(windows)]
    pub fn native() -> Self {
        use crate::platform::win32::{Win32ProcessPort, Win32ShellPort, Win32WindowPort};

        Self {
            window: Arc::new(Win32WindowPort::new()),
            process: Arc::new(Win32ProcessPort::new()),
            shell: Arc::new(Win32ShellPort::new()),
            ..Self::null()
        }
    }

    /// Best adapters for the current platform
    pub fn detect() -> Self {
        #[cfg(windows)]
        {
            Self::native()
        }
        #[cfg(not(windows))]
        {
            Self::null()
        }
    }
}

/// Application composition root - owns all services
pub struct CompositionRoot {
    pub config: CoreConfig,

    // Application services
    pub registry: Arc<WindowRegistry>,
    pub activation: Arc<ActivationEngine>,
    pub switcher: SwitchCoordinator,
    pub rebind: RebindManager,

    // Context capture and restore
    pub extractors: Arc<ExtractorRegistry>,
    pub restorer: WindowRestorer,

    // Scorers
    pub search: SearchScorer,
    pub priority: PriorityScorer,
}

impl CompositionRoot {
    /// Load core.toml and use the platform's adapters
    pub fn new() -> Self {
        Self::with_config(CoreConfig::load(), Ports::detect())
    }

    /// Create with explicit configuration and adapters
    pub fn with_config(config: CoreConfig, ports: Ports) -> Self {
        let registry = Arc::new(
            WindowRegistry::new(ports.window.clone()).with_cache_ttl(config.registry.cache_ttl()),
        );
        let activation = Arc::new(ActivationEngine::new(
            ports.window.clone(),
            config.activation.clone(),
        ));
        let activator: Arc<dyn WindowActivator> = activation.clone();
        let switcher = SwitchCoordinator::new(activator.clone(), config.switching.clone());

        let env = Arc::new(ExtractorEnv {
            registry: registry.clone(),
            activator,
            fs: ports.fs,
            launcher: ports.launcher,
            shell: ports.shell,
            process: ports.process,
            restore: config.restore.clone(),
        });
        let extractors = Arc::new(ExtractorRegistry::new(env));
        let restorer = WindowRestorer::new(extractors.clone(), registry.clone());
        let rebind = RebindManager::new(registry.clone(), config.rebind.clone());

        log!(
            "Composition root ready (cache ttl {:?}, {} extractors)",
            config.registry.cache_ttl(),
            extractors.supported_app_types().len()
        );

        Self {
            config,
            registry,
            activation,
            switcher,
            rebind,
            extractors,
            restorer,
            search: SearchScorer::new(),
            priority: PriorityScorer::new(),
        }
    }
}

impl Default for CompositionRoot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::fakes::{FakeShellPort, FakeWindowPort};
    use crate::domain::entities::WindowSnapshot;
    use crate::domain::value_objects::{AppType, WindowHandle};

    fn fake_ports(window: Arc<FakeWindowPort>) -> Ports {
        Ports {
            window,
            shell: Arc::new(FakeShellPort::default()),
            ..Ports::null()
        }
    }

    #[test]
    fn test_wires_services_over_ports() {
        let port = Arc::new(
            FakeWindowPort::new().with_window(
                WindowSnapshot::new(WindowHandle(1), "main.rs - app - Visual Studio Code", "Code.exe")
                    .with_class("Chrome_WidgetWin_1"),
            ),
        );
        port.set_foreground(Some(WindowHandle(1)));
        let root = CompositionRoot::with_config(CoreConfig::default(), fake_ports(port));

        assert_eq!(root.registry.enumerate(true).len(), 1);
        assert!(root.activation.activate(WindowHandle(1)));
        assert_eq!(root.extractors.detect_app_type("code.exe"), AppType::VsCode);
        assert_eq!(root.rebind.history(None).len(), 0);
    }

    #[test]
    fn test_null_ports_degrade_quietly() {
        let root = CompositionRoot::with_config(CoreConfig::default(), Ports::null());

        assert!(root.registry.enumerate(false).is_empty());
        assert!(!root.registry.is_valid(WindowHandle(5)));
        assert!(!root.activation.activate(WindowHandle(5)));
    }
}
