//! SwitchCoordinator - sequential multi-window activation for one task switch
//!
//! A newer switch preempts an older one: the older loop notices between
//! windows (and during the inter-window delay) and marks its remaining
//! windows as failed. The (current id, abort flag) pair is only touched under
//! the lock; activations themselves run outside it.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::WindowActivator;
use crate::domain::value_objects::{SwitchId, WindowHandle};
use crate::shared::config::SwitchingConfig;

#[derive(Default)]
struct SwitchState {
    current: Option<SwitchId>,
    abort: bool,
}

/// Owns the single "current switch" slot
pub struct SwitchCoordinator {
    activator: Arc<dyn WindowActivator>,
    config: SwitchingConfig,
    state: Mutex<SwitchState>,
}

impl SwitchCoordinator {
    pub fn new(activator: Arc<dyn WindowActivator>, config: SwitchingConfig) -> Self {
        Self {
            activator,
            config,
            state: Mutex::new(SwitchState::default()),
        }
    }

    /// Configured pause between windows
    pub fn default_delay(&self) -> Duration {
        Duration::from_millis(self.config.inter_window_delay_ms)
    }

    /// Activate `handles` in order as switch `switch_id`.
    /// Handles not reached because of preemption report `false`.
    pub fn activate_many(
        &self,
        handles: &[WindowHandle],
        inter_window_delay: Duration,
        switch_id: &SwitchId,
    ) -> HashMap<WindowHandle, bool> {
        let mut results = HashMap::with_capacity(handles.len());
        if handles.is_empty() {
            return results;
        }

        {
            let mut state = self.state.lock();
            state.current = Some(switch_id.clone());
            state.abort = false;
        }
        log!("Switch {}: activating {} windows", switch_id, handles.len());

        for (i, &handle) in handles.iter().enumerate() {
            if self.should_abort(switch_id) {
                log!("Switch {} preempted before window {}/{}", switch_id, i + 1, handles.len());
                mark_failed(&mut results, &handles[i..]);
                break;
            }

            let ok = self.activator.activate(handle);
            results.insert(handle, ok);
            if !ok {
                log!("Switch {}: failed to activate {}", switch_id, handle);
            }

            let is_last = i + 1 == handles.len();
            if !is_last && !self.wait_unless_aborted(inter_window_delay, switch_id) {
                log!("Switch {} preempted during delay", switch_id);
                mark_failed(&mut results, &handles[i + 1..]);
                break;
            }
        }

        {
            let mut state = self.state.lock();
            if state.current.as_ref() == Some(switch_id) {
                state.current = None;
            }
        }

        let succeeded = results.values().filter(|ok| **ok).count();
        log!("Switch {}: {}/{} windows activated", switch_id, succeeded, handles.len());
        results
    }

    /// Request the in-flight switch to stop. Returns whether one was active.
    pub fn abort_current(&self, new_switch_id: Option<&SwitchId>) -> bool {
        let aborted = {
            let mut state = self.state.lock();
            match &state.current {
                Some(current) => {
                    log!(
                        "Aborting switch {} (new: {})",
                        current,
                        new_switch_id.map(|s| s.as_str()).unwrap_or("-")
                    );
                    state.abort = true;
                    true
                }
                None => false,
            }
        };

        if aborted && self.config.abort_yield_ms > 0 {
            thread::sleep(Duration::from_millis(self.config.abort_yield_ms));
        }
        aborted
    }

    /// Id of the switch currently running, if any
    pub fn current_switch_id(&self) -> Option<SwitchId> {
        self.state.lock().current.clone()
    }

    fn should_abort(&self, switch_id: &SwitchId) -> bool {
        let state = self.state.lock();
        match &state.current {
            Some(current) if current == switch_id => state.abort,
            _ => true,
        }
    }

    /// Sleep in slices; false if the switch was preempted meanwhile
    fn wait_unless_aborted(&self, delay: Duration, switch_id: &SwitchId) -> bool {
        let slice = Duration::from_millis(self.config.abort_poll_ms.max(1));
        let deadline = Instant::now() + delay;
        loop {
            if self.should_abort(switch_id) {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep(slice.min(deadline - now));
        }
    }
}

fn mark_failed(results: &mut HashMap<WindowHandle, bool>, handles: &[WindowHandle]) {
    for &h in handles {
        results.insert(h, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::fakes::RecordingActivator;

    fn config() -> SwitchingConfig {
        SwitchingConfig {
            inter_window_delay_ms: 100,
            abort_poll_ms: 10,
            abort_yield_ms: 20,
        }
    }

    fn handles(raw: &[isize]) -> Vec<WindowHandle> {
        raw.iter().map(|&h| WindowHandle(h)).collect()
    }

    #[test]
    fn test_activates_all_and_clears_current() {
        let activator = RecordingActivator::new(Duration::ZERO);
        let coordinator = SwitchCoordinator::new(activator.clone(), config());
        let id = SwitchId::new("a");

        let results = coordinator.activate_many(&handles(&[1, 2, 3]), Duration::ZERO, &id);

        assert_eq!(results.len(), 3);
        assert!(results.values().all(|ok| *ok));
        assert_eq!(*activator.activated.lock(), handles(&[1, 2, 3]));
        assert_eq!(coordinator.current_switch_id(), None);
    }

    #[test]
    fn test_abort_without_active_switch() {
        let coordinator = SwitchCoordinator::new(RecordingActivator::new(Duration::ZERO), config());
        assert!(!coordinator.abort_current(None));
        assert!(coordinator
            .activate_many(&[], Duration::ZERO, &SwitchId::new("x"))
            .is_empty());
    }

    #[test]
    fn test_newer_switch_preempts_older() {
        let activator = RecordingActivator::new(Duration::from_millis(100));
        let coordinator = Arc::new(SwitchCoordinator::new(activator.clone(), config()));

        let a_handles = handles(&[1, 2, 3, 4, 5]);
        let a = {
            let coordinator = coordinator.clone();
            let a_handles = a_handles.clone();
            thread::spawn(move || {
                coordinator.activate_many(&a_handles, Duration::from_millis(100), &SwitchId::new("a"))
            })
        };

        // Window 1 of A is done after ~100ms; A is now in its delay
        thread::sleep(Duration::from_millis(150));
        assert_eq!(coordinator.current_switch_id(), Some(SwitchId::new("a")));

        let b = SwitchId::new("b");
        assert!(coordinator.abort_current(Some(&b)));
        let b_results = coordinator.activate_many(&handles(&[10]), Duration::ZERO, &b);

        let a_results = a.join().unwrap();
        assert!(a_results[&WindowHandle(1)]);
        for h in &a_handles[1..] {
            assert!(!a_results[h]);
        }
        assert!(b_results[&WindowHandle(10)]);

        // Nothing from A ran after B took over
        assert_eq!(*activator.activated.lock(), handles(&[1, 10]));
        assert_eq!(coordinator.current_switch_id(), None);
    }

    #[test]
    fn test_replaced_current_id_aborts_without_flag() {
        let activator = RecordingActivator::new(Duration::from_millis(50));
        let coordinator = Arc::new(SwitchCoordinator::new(activator.clone(), config()));

        let a = {
            let coordinator = coordinator.clone();
            thread::spawn(move || {
                coordinator.activate_many(&handles(&[1, 2]), Duration::from_millis(200), &SwitchId::new("a"))
            })
        };
        thread::sleep(Duration::from_millis(100));

        // B starts without calling abort_current first
        coordinator.activate_many(&handles(&[7]), Duration::ZERO, &SwitchId::new("b"));

        let a_results = a.join().unwrap();
        assert!(!a_results[&WindowHandle(2)]);
        assert!(!activator.activated.lock().contains(&WindowHandle(2)));
    }
}
