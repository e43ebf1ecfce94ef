//! LauncherPort - fire-and-forget process spawning

use std::fmt;

use super::PlatformError;

/// A process to start
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Suppress the console window of console-subsystem programs
    pub hide_console: bool,
}

impl LaunchCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            hide_console: false,
        }
    }

    /// Builder: append an argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Builder: hide the console window
    pub fn hidden(mut self) -> Self {
        self.hide_console = true;
        self
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Port interface for starting processes
pub trait LauncherPort: Send + Sync {
    /// Start the process without waiting for it
    fn spawn(&self, command: &LaunchCommand) -> Result<(), PlatformError>;
}
