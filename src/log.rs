//! Simple file-based logging for debugging
//!
//! OS-call noise (windows closing mid-query, failed activation strategies,
//! spawn errors) is written here and never surfaced to callers.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

/// Get the directory where the executable is located
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .unwrap_or_else(|_| PathBuf::from("ctxswitch.exe"))
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default log location: %LOCALAPPDATA%\ctxswitch\ctxswitch.log, or next to the executable
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("ctxswitch"))
        .unwrap_or_else(exe_dir)
        .join("ctxswitch.log")
}

/// Initialize logging to the default location
pub fn init() {
    init_at(&default_log_path());
}

/// Initialize logging to a specific file (truncated on open)
pub fn init_at(log_path: &Path) {
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    if let Ok(file) = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
    {
        if let Ok(mut guard) = LOG_FILE.lock() {
            *guard = Some(file);
        }
    }

    log("=== ctxswitch log started ===");
}

/// Log a message to the file. No-op until `init` was called.
pub fn log(msg: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            let ts = chrono::Local::now().format("%H:%M:%S%.3f");
            let _ = writeln!(file, "[{}] {}", ts, msg);
            let _ = file.flush();
        }
    }
}

/// Log a formatted message
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::log::log(&format!($($arg)*))
    };
}

/// Log with function context
#[macro_export]
macro_rules! log_fn {
    ($fn_name:expr) => {
        $crate::log::log(&format!("-> {}", $fn_name))
    };
    ($fn_name:expr, $($arg:tt)*) => {
        $crate::log::log(&format!("-> {}: {}", $fn_name, format!($($arg)*)))
    };
}
