//! Domain layer error types
//!
//! All errors that can occur in domain layer operations.

use thiserror::Error;

use crate::domain::value_objects::WindowHandle;

/// Main domain error type
#[derive(Error, Debug)]
pub enum DomainError {
    /// Window no longer exists (or never did)
    #[error("Window not found: {0}")]
    WindowNotFound(WindowHandle),

    /// Binding not part of the task
    #[error("Binding not found: {0}")]
    BindingNotFound(WindowHandle),
}
