//! ctxswitch - bind windows to tasks and recall them
//!
//! Window enumeration, activation against focus-stealing prevention,
//! per-application context capture/restore and similarity-based rebinding.
//! Everything except `platform::win32` is OS-independent and tested
//! against in-memory ports.

// Include the log module first so the log! macro works everywhere
#[macro_use]
pub mod log;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Raw Win32 adapters behind the application ports
pub mod platform;

pub use infrastructure::{CompositionRoot, Ports};
pub use shared::config::CoreConfig;
