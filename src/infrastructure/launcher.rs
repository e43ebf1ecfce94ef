//! StdLauncher - LauncherPort over std::process::Command
//!
//! Children are detached: stdio goes nowhere and nothing waits on them.
//! Console programs get their own console window unless hidden.

use std::process::{Command, Stdio};

use crate::application::ports::{LaunchCommand, LauncherPort, PlatformError};

#[derive(Default)]
pub struct StdLauncher;

impl StdLauncher {
    pub fn new() -> Self {
        Self
    }

    fn command(launch: &LaunchCommand) -> Command {
        let mut cmd = Command::new(&launch.program);
        cmd.args(&launch.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;

            const CREATE_NO_WINDOW: u32 = 0x08000000;
            const CREATE_NEW_CONSOLE: u32 = 0x00000010;

            cmd.creation_flags(if launch.hide_console {
                CREATE_NO_WINDOW
            } else {
                CREATE_NEW_CONSOLE
            });
        }

        cmd
    }
}

impl LauncherPort for StdLauncher {
    fn spawn(&self, launch: &LaunchCommand) -> Result<(), PlatformError> {
        let child = Self::command(launch)
            .spawn()
            .map_err(|e| PlatformError::Spawn {
                program: launch.program.clone(),
                reason: e.to_string(),
            })?;
        log!("Spawned {} (pid {})", launch, child.id());
        Ok(())
    }
}
