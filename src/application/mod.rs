//! Application Layer - workflows over the OS-facing ports
//!
//! It contains:
//! - **Ports**: Interfaces for OS capabilities (windows, processes, shell, launching, files)
//! - **Services**: Registry, activation, switch coordination, rebinding
//! - **Context**: Per-application context extractors
//! - **Use Cases**: Window restoration
//!
//! # Clean Architecture Rules
//! - Depends only on the domain layer
//! - Defines ports that infrastructure and platform adapters implement
//! - Contains no OS-specific code

pub mod context;
pub mod ports;
pub mod services;
pub mod use_cases;

// Re-export commonly used types
pub use context::{ContextExtractor, ExtractorEnv, ExtractorRegistry};
pub use ports::*;
pub use services::*;
pub use use_cases::*;
