//! Rebind entities - suggestions, history entries and per-binding state

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{TaskId, WindowSnapshot};
use crate::domain::value_objects::WindowHandle;

/// A live window proposed as the successor of a dead binding
#[derive(Clone, Debug, PartialEq)]
pub struct RebindSuggestion {
    /// Candidate window
    pub window: WindowSnapshot,
    /// Similarity in [0, 1]
    pub score: f64,
    /// Human readable explanation
    pub reason: String,
}

/// How a rebind was applied
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebindMethod {
    Auto,
    Manual,
}

/// Immutable record of one applied rebind
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RebindHistoryEntry {
    pub task_id: TaskId,
    pub old_title: String,
    pub new_title: String,
    pub new_handle: WindowHandle,
    pub timestamp: NaiveDateTime,
    pub method: RebindMethod,
    pub score: f64,
}

/// Where a binding stands in the rebind flow
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RebindState {
    /// Handle still valid
    Valid,
    /// Invalid, candidates exist but none clears the auto threshold
    Suggesting,
    /// Replaced automatically
    AutoRebound,
    /// Replaced by the user
    ManuallyRebound,
    /// Invalid with no usable candidate
    Unresolved,
}
