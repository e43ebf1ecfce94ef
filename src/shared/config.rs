//! Core configuration (core.toml)
//!
//! Timing and threshold knobs for the registry, activation, switching,
//! restore and rebind services. Every key is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::services::{AUTO_REBIND_THRESHOLD, CONTEXT_MATCH_THRESHOLD, SUGGEST_THRESHOLD};

const CONFIG_FILE: &str = "core.toml";

/// Core configuration loaded from core.toml
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub registry: RegistryConfig,
    pub activation: ActivationConfig,
    pub switching: SwitchingConfig,
    pub restore: RestoreConfig,
    pub rebind: RebindConfig,
}

/// Window registry settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// How long an enumeration may be served from cache
    pub cache_ttl_ms: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { cache_ttl_ms: 2000 }
    }
}

impl RegistryConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }
}

/// Activation engine settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// Extra passes over the whole strategy chain
    pub max_retries: u32,
    /// First backoff; doubles per retry
    pub backoff_base_ms: u64,
    /// Pause after the synthetic modifier tap
    pub modifier_settle_ms: u64,
    /// Pause after restoring a minimized window
    pub restore_settle_ms: u64,
    /// Pause before checking whether a strategy worked
    pub verify_settle_ms: u64,
    /// How long the window stays always-on-top in the last strategy
    pub topmost_pulse_ms: u64,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base_ms: 100,
            modifier_settle_ms: 50,
            restore_settle_ms: 100,
            verify_settle_ms: 50,
            topmost_pulse_ms: 20,
        }
    }
}

impl ActivationConfig {
    /// Backoff before retry `attempt` (0-based): base * 2^attempt
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_base_ms.saturating_mul(1u64 << attempt.min(16)))
    }
}

/// Switch coordinator settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchingConfig {
    /// Pause between windows of one switch
    pub inter_window_delay_ms: u64,
    /// Slice length when waiting so an abort is noticed promptly
    pub abort_poll_ms: u64,
    /// Pause after raising the abort flag
    pub abort_yield_ms: u64,
}

impl Default for SwitchingConfig {
    fn default() -> Self {
        Self {
            inter_window_delay_ms: 100,
            abort_poll_ms: 100,
            abort_yield_ms: 50,
        }
    }
}

/// Window restorer settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestoreConfig {
    /// Wait after spawning before looking for the new window
    pub settle_ms: u64,
    /// Same, for editors (slower to create their window)
    pub editor_settle_ms: u64,
    pub rediscovery_timeout_ms: u64,
    pub editor_rediscovery_timeout_ms: u64,
    /// Enumeration interval while waiting for the new window
    pub poll_interval_ms: u64,
    /// Minimum context match score for a rediscovered window
    pub context_match_threshold: f64,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            settle_ms: 500,
            editor_settle_ms: 1000,
            rediscovery_timeout_ms: 2000,
            editor_rediscovery_timeout_ms: 3000,
            poll_interval_ms: 100,
            context_match_threshold: CONTEXT_MATCH_THRESHOLD,
        }
    }
}

/// Rebind manager settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebindConfig {
    pub auto_threshold: f64,
    pub suggest_threshold: f64,
    /// Maximum retained history entries
    pub history_capacity: usize,
}

impl Default for RebindConfig {
    fn default() -> Self {
        Self {
            auto_threshold: AUTO_REBIND_THRESHOLD,
            suggest_threshold: SUGGEST_THRESHOLD,
            history_capacity: 100,
        }
    }
}

impl CoreConfig {
    /// Find core.toml in standard locations
    pub fn find_config_path() -> Option<PathBuf> {
        // Check in order: %APPDATA%/ctxswitch, exe dir, cwd
        let candidates = [
            dirs::config_dir().map(|p| p.join("ctxswitch").join(CONFIG_FILE)),
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join(CONFIG_FILE))),
            Some(PathBuf::from(CONFIG_FILE)),
        ];

        candidates.into_iter().flatten().find(|c| c.exists())
    }

    /// Load configuration from file, returning defaults if not found or invalid
    pub fn load() -> Self {
        match Self::find_config_path() {
            Some(path) => Self::load_from_path(&path).unwrap_or_else(|e| {
                log!("Config {} ignored: {}", path.display(), e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
