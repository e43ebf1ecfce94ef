//! Infrastructure Layer - std-backed adapters and the composition root

pub mod composition_root;
pub mod filesystem;
pub mod launcher;

pub use composition_root::{CompositionRoot, Ports};
pub use filesystem::StdFileSystem;
pub use launcher::StdLauncher;
