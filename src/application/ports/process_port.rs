//! ProcessPort - working directory of a foreign process
//!
//! Reading another process's current directory means walking its process
//! environment block. That stays behind this one narrow call so nothing else
//! depends on per-architecture struct layouts.

/// Port interface for foreign process introspection
pub trait ProcessPort: Send + Sync {
    /// Current working directory of `pid`, or None when unreadable or unsupported
    fn process_cwd(&self, pid: u32) -> Option<String>;
}

/// Always unsupported
pub struct NullProcessPort;

impl ProcessPort for NullProcessPort {
    fn process_cwd(&self, _pid: u32) -> Option<String> {
        None
    }
}
