//! RebindManager - recover task bindings whose windows are gone
//!
//! Dead bindings are compared against every live window with the rebind
//! scorer. Near-certain successors are applied automatically; plausible
//! ones are offered to the user. Applied rebinds go to a bounded history.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;

use super::WindowRegistry;
use crate::domain::entities::{
    BoundWindow, RebindHistoryEntry, RebindMethod, RebindState, RebindSuggestion, Task,
};
use crate::domain::errors::DomainError;
use crate::domain::services::RebindScorer;
use crate::domain::value_objects::WindowHandle;
use crate::shared::config::RebindConfig;

/// Result of the rebind flow for one binding
#[derive(Clone, Debug, PartialEq)]
pub struct RebindOutcome {
    /// Handle the binding had before the flow ran
    pub handle: WindowHandle,
    pub state: RebindState,
    /// Best candidate, when there was one
    pub suggestion: Option<RebindSuggestion>,
}

/// Snapshot of a task's bindings and their candidates
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    pub valid: bool,
    pub invalid_windows: Vec<BoundWindow>,
    /// Keyed by the dead binding's handle
    pub suggestions: HashMap<WindowHandle, Vec<RebindSuggestion>>,
    pub auto_rebind_available: bool,
}

pub struct RebindManager {
    registry: Arc<WindowRegistry>,
    scorer: RebindScorer,
    config: RebindConfig,
    history: Mutex<VecDeque<RebindHistoryEntry>>,
}

impl RebindManager {
    pub fn new(registry: Arc<WindowRegistry>, config: RebindConfig) -> Self {
        Self {
            registry,
            scorer: RebindScorer::new(),
            config,
            history: Mutex::new(VecDeque::new()),
        }
    }

    /// A binding is alive while its handle is a window of the same process.
    /// Handles get reused, so a valid handle owned by another process is dead.
    pub fn is_alive(&self, binding: &BoundWindow) -> bool {
        if !self.registry.is_valid(binding.handle) {
            return false;
        }
        match self.registry.get_info(binding.handle) {
            Some(info) => info.is_process(&binding.process_name),
            None => false,
        }
    }

    /// Bindings of `task` whose windows are gone
    pub fn detect_invalid(&self, task: &Task) -> Vec<BoundWindow> {
        task.bound_windows
            .iter()
            .filter(|b| !self.is_alive(b))
            .cloned()
            .collect()
    }

    /// Live windows that could replace `binding`, best first. Only scores at
    /// or above the suggest threshold are returned.
    pub fn suggest_replacements(&self, binding: &BoundWindow) -> Vec<RebindSuggestion> {
        let mut suggestions: Vec<RebindSuggestion> = self
            .registry
            .enumerate(false)
            .into_iter()
            .filter(|w| w.handle != binding.handle)
            .filter_map(|window| {
                let score = self.scorer.score(
                    &binding.title,
                    &binding.process_name,
                    &window.title,
                    &window.process_name,
                );
                (score.score >= self.config.suggest_threshold).then(|| RebindSuggestion {
                    window,
                    score: score.score,
                    reason: score.reason,
                })
            })
            .collect();

        suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
        suggestions
    }

    /// Apply every confident rebind in place; report what happened per binding
    pub fn auto_rebind(&self, task: &mut Task) -> Vec<RebindOutcome> {
        log_fn!("auto_rebind", "task {}", task.id);
        let task_id = task.id.clone();
        let alive: Vec<bool> = task.bound_windows.iter().map(|b| self.is_alive(b)).collect();
        // Live bindings keep their windows
        let mut taken: HashSet<WindowHandle> = task
            .bound_windows
            .iter()
            .zip(&alive)
            .filter(|(_, alive)| **alive)
            .map(|(b, _)| b.handle)
            .collect();
        let mut outcomes = Vec::with_capacity(task.bound_windows.len());

        for (binding, alive) in task.bound_windows.iter_mut().zip(alive) {
            let handle = binding.handle;
            if alive {
                outcomes.push(RebindOutcome {
                    handle,
                    state: RebindState::Valid,
                    suggestion: None,
                });
                continue;
            }

            binding.is_valid = false;
            let best = self
                .suggest_replacements(binding)
                .into_iter()
                .find(|s| !taken.contains(&s.window.handle));

            let state = match &best {
                Some(s) if s.score >= self.config.auto_threshold => {
                    let old_title = binding.title.clone();
                    binding.retarget(s.window.handle, &s.window.title, &s.window.process_name);
                    taken.insert(s.window.handle);
                    self.record(RebindHistoryEntry {
                        task_id: task_id.clone(),
                        old_title,
                        new_title: s.window.title.clone(),
                        new_handle: s.window.handle,
                        timestamp: chrono::Local::now().naive_local(),
                        method: RebindMethod::Auto,
                        score: s.score,
                    });
                    log!("Auto-rebound {} -> {} ({:.2})", handle, s.window.handle, s.score);
                    RebindState::AutoRebound
                }
                Some(_) => RebindState::Suggesting,
                None => RebindState::Unresolved,
            };
            outcomes.push(RebindOutcome {
                handle,
                state,
                suggestion: best,
            });
        }
        outcomes
    }

    /// Point the binding `old_handle` at `new_handle`, whatever its score
    pub fn manual_rebind(
        &self,
        task: &mut Task,
        old_handle: WindowHandle,
        new_handle: WindowHandle,
    ) -> Result<RebindOutcome, DomainError> {
        let info = self
            .registry
            .get_info(new_handle)
            .ok_or(DomainError::WindowNotFound(new_handle))?;
        let task_id = task.id.clone();
        let binding = task
            .binding_mut(old_handle)
            .ok_or(DomainError::BindingNotFound(old_handle))?;

        let old_title = binding.title.clone();
        binding.retarget(new_handle, &info.title, &info.process_name);
        self.record(RebindHistoryEntry {
            task_id,
            old_title,
            new_title: info.title.clone(),
            new_handle,
            timestamp: chrono::Local::now().naive_local(),
            method: RebindMethod::Manual,
            score: 1.0,
        });
        log!("Manually rebound {} -> {}", old_handle, new_handle);

        Ok(RebindOutcome {
            handle: old_handle,
            state: RebindState::ManuallyRebound,
            suggestion: Some(RebindSuggestion {
                window: info,
                score: 1.0,
                reason: "chosen by user".to_string(),
            }),
        })
    }

    /// Dead bindings of `task` with their candidates, without changing anything
    pub fn validate_and_suggest(&self, task: &Task) -> ValidationReport {
        let invalid_windows = self.detect_invalid(task);
        let mut report = ValidationReport {
            valid: invalid_windows.is_empty(),
            ..ValidationReport::default()
        };

        for binding in &invalid_windows {
            let suggestions = self.suggest_replacements(binding);
            if suggestions
                .first()
                .is_some_and(|s| s.score >= self.config.auto_threshold)
            {
                report.auto_rebind_available = true;
            }
            report.suggestions.insert(binding.handle, suggestions);
        }
        report.invalid_windows = invalid_windows;
        report
    }

    /// Applied rebinds, oldest first; optionally only those of one task
    pub fn history(&self, task_id: Option<&str>) -> Vec<RebindHistoryEntry> {
        self.history
            .lock()
            .iter()
            .filter(|e| task_id.map_or(true, |id| e.task_id == id))
            .cloned()
            .collect()
    }

    pub fn clear_history(&self) {
        self.history.lock().clear();
    }

    fn record(&self, entry: RebindHistoryEntry) {
        let mut history = self.history.lock();
        history.push_back(entry);
        while history.len() > self.config.history_capacity {
            history.pop_front();
        }
    }
}
