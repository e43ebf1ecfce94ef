//! Use cases - operations spanning several services

pub mod restore_window;

pub use restore_window::WindowRestorer;
