//! Domain layer - entities, value objects, scoring and errors
//!
//! Free of OS calls so it builds and tests on any platform.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::DomainError;
