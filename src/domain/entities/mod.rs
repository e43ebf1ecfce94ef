//! Domain Entities - Core business objects
//!
//! Entities are objects with a distinct identity that persists over time.

pub mod app_context;
pub mod bound_window;
pub mod rebind;
pub mod task;
pub mod window_snapshot;

pub use app_context::AppContext;
pub use bound_window::BoundWindow;
pub use rebind::{RebindHistoryEntry, RebindMethod, RebindState, RebindSuggestion};
pub use task::{Task, TaskId};
pub use window_snapshot::{WindowSnapshot, UNKNOWN_PROCESS};
