//! ActivationEngine - brings one window to the foreground
//!
//! The OS refuses foreground changes from processes that do not own the
//! current input, so a chain of increasingly forceful strategies runs until
//! one is verified to have worked. The whole chain is retried with
//! exponential backoff.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::application::ports::{PlatformError, WindowPort};
use crate::domain::value_objects::WindowHandle;
use crate::shared::config::ActivationConfig;

/// Something that can activate a window; the switch coordinator's seam
pub trait WindowActivator: Send + Sync {
    /// Make `handle` the foreground window. `false` when every attempt failed.
    fn activate(&self, handle: WindowHandle) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Strategy {
    /// Modifier tap to lift the foreground lock, then request foreground
    ModifierTap,
    /// Restore/show, request foreground, raise in z-order
    Direct,
    /// Borrow the foreground thread's input queue
    AttachInput,
    /// Pulse always-on-top
    TopmostPulse,
}

impl Strategy {
    const CHAIN: [Strategy; 4] = [
        Strategy::ModifierTap,
        Strategy::Direct,
        Strategy::AttachInput,
        Strategy::TopmostPulse,
    ];

    fn name(self) -> &'static str {
        match self {
            Strategy::ModifierTap => "modifier-tap",
            Strategy::Direct => "direct",
            Strategy::AttachInput => "attach-input",
            Strategy::TopmostPulse => "topmost-pulse",
        }
    }
}

/// Foreground activation with fallbacks and retries
pub struct ActivationEngine {
    port: Arc<dyn WindowPort>,
    config: ActivationConfig,
}

impl ActivationEngine {
    pub fn new(port: Arc<dyn WindowPort>, config: ActivationConfig) -> Self {
        Self { port, config }
    }

    fn pause(&self, ms: u64) {
        if ms > 0 {
            thread::sleep(Duration::from_millis(ms));
        }
    }

    fn is_foreground(&self, handle: WindowHandle) -> bool {
        self.port.foreground() == Some(handle)
    }

    fn restore_if_minimized(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        if self.port.is_minimized(handle) {
            self.port.restore(handle)?;
            self.pause(self.config.restore_settle_ms);
        }
        Ok(())
    }

    fn run(&self, strategy: Strategy, handle: WindowHandle) -> Result<bool, PlatformError> {
        match strategy {
            Strategy::ModifierTap => {
                self.port.tap_modifier_key()?;
                self.pause(self.config.modifier_settle_ms);
                self.restore_if_minimized(handle)?;
                self.port.request_foreground(handle);
            }
            Strategy::Direct => {
                self.restore_if_minimized(handle)?;
                self.port.show(handle)?;
                self.port.request_foreground(handle);
                self.port.bring_to_top(handle)?;
            }
            Strategy::AttachInput => return self.attach_input(handle),
            Strategy::TopmostPulse => {
                self.port.set_topmost(handle, true)?;
                self.pause(self.config.topmost_pulse_ms);
                self.port.set_topmost(handle, false)?;
                self.port.request_foreground(handle);
            }
        }
        self.pause(self.config.verify_settle_ms);
        Ok(self.is_foreground(handle))
    }

    fn attach_input(&self, handle: WindowHandle) -> Result<bool, PlatformError> {
        let Some(current) = self.port.foreground() else {
            return Ok(false);
        };
        let (Some(fg_thread), Some(target_thread)) = (
            self.port.window_thread_id(current),
            self.port.window_thread_id(handle),
        ) else {
            return Ok(false);
        };
        if fg_thread == target_thread {
            return Ok(false);
        }
        if !self.port.attach_thread_input(fg_thread, target_thread, true) {
            return Ok(false);
        }

        let result = (|| -> Result<bool, PlatformError> {
            self.port.request_foreground(handle);
            self.port.set_focus(handle)?;
            self.pause(self.config.verify_settle_ms);
            Ok(self.is_foreground(handle))
        })();

        // Detach on every path, including errors above
        self.port.attach_thread_input(fg_thread, target_thread, false);
        result
    }

    fn run_chain(&self, handle: WindowHandle) -> bool {
        for strategy in Strategy::CHAIN {
            match self.run(strategy, handle) {
                Ok(true) => {
                    log!("Activated {} via {}", handle, strategy.name());
                    return true;
                }
                Ok(false) => {}
                Err(e) => log!("Strategy {} failed for {}: {}", strategy.name(), handle, e),
            }
        }
        false
    }
}

impl WindowActivator for ActivationEngine {
    fn activate(&self, handle: WindowHandle) -> bool {
        if !self.port.is_window(handle) {
            log!("Activate {}: window is gone", handle);
            return false;
        }
        if !self.port.is_visible(handle) {
            log!("Activate {}: window is not visible", handle);
            return false;
        }
        if self.is_foreground(handle) {
            return true;
        }

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                thread::sleep(self.config.backoff(attempt - 1));
            }
            if self.run_chain(handle) {
                return true;
            }
        }

        log!("Activate {}: all strategies failed", handle);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::fakes::FakeWindowPort;
    use crate::domain::entities::WindowSnapshot;

    fn instant_config() -> ActivationConfig {
        ActivationConfig {
            max_retries: 3,
            backoff_base_ms: 0,
            modifier_settle_ms: 0,
            restore_settle_ms: 0,
            verify_settle_ms: 0,
            topmost_pulse_ms: 0,
        }
    }

    fn setup() -> (Arc<FakeWindowPort>, ActivationEngine) {
        let port = Arc::new(
            FakeWindowPort::new()
                .with_window(WindowSnapshot::new(WindowHandle(1), "Target", "a.exe").with_pid(10))
                .with_window(WindowSnapshot::new(WindowHandle(2), "Other", "b.exe").with_pid(20))
                .with_window(
                    WindowSnapshot::new(WindowHandle(3), "Hidden", "c.exe").with_visible(false),
                ),
        );
        let engine = ActivationEngine::new(port.clone(), instant_config());
        (port, engine)
    }

    fn count(calls: &[String], prefix: &str) -> usize {
        calls.iter().filter(|c| c.starts_with(prefix)).count()
    }

    #[test]
    fn test_already_foreground_is_noop() {
        let (port, engine) = setup();
        port.set_foreground(Some(WindowHandle(1)));

        assert!(engine.activate(WindowHandle(1)));
        assert!(port.calls().is_empty());
    }

    #[test]
    fn test_invalid_or_hidden_fails_fast() {
        let (port, engine) = setup();

        assert!(!engine.activate(WindowHandle(99)));
        assert!(!engine.activate(WindowHandle(3)));
        assert!(port.calls().is_empty());
    }

    #[test]
    fn test_first_strategy_restores_minimized() {
        let (port, engine) = setup();
        port.state.lock().minimized.insert(WindowHandle(1));

        assert!(engine.activate(WindowHandle(1)));
        assert_eq!(
            port.calls(),
            vec!["modifier", "restore 0x1", "foreground 0x1"]
        );
    }

    #[test]
    fn test_falls_back_to_direct() {
        let (port, engine) = setup();
        port.state.lock().refuse_foreground = 1;

        assert!(engine.activate(WindowHandle(1)));
        let calls = port.calls();
        assert_eq!(count(&calls, "show"), 1);
        assert_eq!(count(&calls, "top "), 1);
    }

    #[test]
    fn test_attach_input_always_detaches() {
        let (port, engine) = setup();
        port.set_foreground(Some(WindowHandle(2)));
        port.state.lock().refuse_foreground = 2;

        assert!(engine.activate(WindowHandle(1)));
        let attach = port.state.lock().attach_log.clone();
        assert_eq!(attach, vec![(1020, 1010, true), (1020, 1010, false)]);
        assert_eq!(count(&port.calls(), "focus"), 1);
    }

    #[test]
    fn test_focus_error_still_detaches_and_continues() {
        let (port, engine) = setup();
        port.set_foreground(Some(WindowHandle(2)));
        port.state.lock().refuse_foreground = 3;
        port.fail("focus");

        assert!(engine.activate(WindowHandle(1)));
        let attach = port.state.lock().attach_log.clone();
        assert_eq!(attach, vec![(1020, 1010, true), (1020, 1010, false)]);
        let calls = port.calls();
        assert_eq!(count(&calls, "focus"), 1);
        assert!(calls.contains(&"topmost 0x1 true".to_string()));
        assert_eq!(port.foreground(), Some(WindowHandle(1)));
    }

    #[test]
    fn test_modifier_error_falls_through_to_direct() {
        let (port, engine) = setup();
        port.fail("modifier");

        assert!(engine.activate(WindowHandle(1)));
        assert_eq!(
            port.calls(),
            vec!["modifier", "show 0x1", "foreground 0x1", "top 0x1"]
        );
    }

    #[test]
    fn test_topmost_pulse_is_last_resort() {
        let (port, engine) = setup();
        port.state.lock().refuse_foreground = 2;

        // No foreground window, so attach-input is skipped
        assert!(engine.activate(WindowHandle(1)));
        let calls = port.calls();
        assert!(calls.contains(&"topmost 0x1 true".to_string()));
        assert!(calls.contains(&"topmost 0x1 false".to_string()));
    }

    #[test]
    fn test_gives_up_after_retries() {
        let (port, engine) = setup();
        port.set_foreground(Some(WindowHandle(2)));
        port.state.lock().refuse_foreground = usize::MAX;

        assert!(!engine.activate(WindowHandle(1)));
        // 4 passes x 4 strategies
        assert_eq!(count(&port.calls(), "foreground"), 16);
        let attach = port.state.lock().attach_log.clone();
        assert_eq!(attach.len(), 8);
        assert!(attach.chunks(2).all(|p| p[0].2 && !p[1].2));
    }
}
