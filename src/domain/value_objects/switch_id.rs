//! SwitchId value object - identifies one "switch to task" operation

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SWITCH: AtomicU64 = AtomicU64::new(1);

/// Identifier of an in-flight multi-window activation
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SwitchId(String);

impl SwitchId {
    /// Wrap a caller-chosen id (e.g. task id + timestamp)
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a process-unique id
    pub fn generate() -> Self {
        let seq = NEXT_SWITCH.fetch_add(1, Ordering::Relaxed);
        let millis = chrono::Local::now().timestamp_millis();
        Self(format!("switch_{}_{}", millis, seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = SwitchId::generate();
        let b = SwitchId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("switch_"));
    }
}
