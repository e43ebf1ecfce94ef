//! AppType value object - which context extractor owns a window

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of application kinds with dedicated context handling
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppType {
    Explorer,
    Terminal,
    #[serde(rename = "vscode")]
    VsCode,
    #[default]
    Generic,
}

/// Process names (lowercase) handled by the explorer extractor
pub const EXPLORER_PROCESSES: &[&str] = &["explorer.exe"];

/// Process names (lowercase) handled by the terminal extractor
pub const TERMINAL_PROCESSES: &[&str] = &[
    "windowsterminal.exe",
    "powershell.exe",
    "pwsh.exe",
    "cmd.exe",
    "bash.exe",
    "wsl.exe",
];

/// Process names (lowercase) handled by the VS Code extractor
pub const VSCODE_PROCESSES: &[&str] = &["code.exe"];

impl AppType {
    /// Infer the app type from an executable name (case-insensitive)
    pub fn from_process_name(process_name: &str) -> Self {
        let name = process_name.trim().to_lowercase();
        if EXPLORER_PROCESSES.contains(&name.as_str()) {
            AppType::Explorer
        } else if TERMINAL_PROCESSES.contains(&name.as_str()) {
            AppType::Terminal
        } else if VSCODE_PROCESSES.contains(&name.as_str()) {
            AppType::VsCode
        } else {
            AppType::Generic
        }
    }

    /// Parse a persisted identifier (case-insensitive); None for unknown names
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "explorer" => Some(AppType::Explorer),
            "terminal" => Some(AppType::Terminal),
            "vscode" => Some(AppType::VsCode),
            "generic" => Some(AppType::Generic),
            _ => None,
        }
    }

    /// Stable lowercase identifier, as persisted
    pub fn as_str(self) -> &'static str {
        match self {
            AppType::Explorer => "explorer",
            AppType::Terminal => "terminal",
            AppType::VsCode => "vscode",
            AppType::Generic => "generic",
        }
    }
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
