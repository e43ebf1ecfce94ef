//! Win32 platform implementation of the application ports

pub mod process;
pub mod shell;
pub mod window;

pub use process::{process_name, Win32ProcessPort};
pub use shell::Win32ShellPort;
pub use window::Win32WindowPort;
