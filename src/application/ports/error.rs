//! PlatformError - failures reported by OS-facing ports
//!
//! Services catch these and degrade (skip, None, false); they are logged,
//! never surfaced to the layers above.

use thiserror::Error;

use crate::domain::value_objects::WindowHandle;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Window was destroyed (possibly mid-query)
    #[error("Window is gone: {0}")]
    WindowGone(WindowHandle),

    /// Access to a window or process was refused
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Any other OS call failure
    #[error("OS error: {0}")]
    Os(String),

    /// Capability not available on this platform or target
    #[error("Unsupported: {0}")]
    Unsupported(&'static str),

    /// Process could not be started
    #[error("Failed to spawn {program}: {reason}")]
    Spawn { program: String, reason: String },

    /// IO error (wrapped)
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for PlatformError {
    fn from(err: std::io::Error) -> Self {
        PlatformError::Io(err.to_string())
    }
}
