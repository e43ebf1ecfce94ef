//! Task entity - a named group of bound windows
//!
//! Only the slice of a task this crate needs: identity and bindings.
//! Storage and the rest of the task record live with the caller.

use serde::{Deserialize, Serialize};

use super::BoundWindow;
use crate::domain::value_objects::WindowHandle;

/// Unique identifier for a task
pub type TaskId = String;

/// A task and the windows bound to it
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Bound windows, in switch order
    #[serde(default)]
    pub bound_windows: Vec<BoundWindow>,
}

impl Task {
    /// Create an empty task
    pub fn new(id: impl Into<TaskId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bound_windows: Vec::new(),
        }
    }

    /// Builder: add a binding
    pub fn with_window(mut self, window: BoundWindow) -> Self {
        self.bound_windows.push(window);
        self
    }

    /// Handles of every binding, in order
    pub fn handles(&self) -> Vec<WindowHandle> {
        self.bound_windows.iter().map(|w| w.handle).collect()
    }

    /// Binding by handle
    pub fn binding(&self, handle: WindowHandle) -> Option<&BoundWindow> {
        self.bound_windows.iter().find(|w| w.handle == handle)
    }

    /// Mutable binding by handle
    pub fn binding_mut(&mut self, handle: WindowHandle) -> Option<&mut BoundWindow> {
        self.bound_windows.iter_mut().find(|w| w.handle == handle)
    }
}
