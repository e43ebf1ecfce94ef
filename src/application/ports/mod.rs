//! Ports - interfaces the application layer needs from the outside world
//!
//! Infrastructure and platform adapters implement these. The Null variants
//! stand in where a capability does not exist.

pub mod error;
pub mod filesystem_port;
pub mod launcher_port;
pub mod process_port;
pub mod shell_port;
pub mod window_port;

#[cfg(test)]
pub mod fakes;

pub use error::PlatformError;
pub use filesystem_port::FileSystemPort;
pub use launcher_port::{LaunchCommand, LauncherPort};
pub use process_port::{NullProcessPort, ProcessPort};
pub use shell_port::{NullShellPort, ShellLocation, ShellPort};
pub use window_port::{NullWindowPort, WindowPort};
