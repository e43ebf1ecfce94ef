//! ShellPort - the shell's list of open file-browser windows

use super::PlatformError;
use crate::domain::value_objects::WindowHandle;

/// One open file-browser window as the shell reports it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShellLocation {
    pub handle: WindowHandle,
    /// Navigated location, e.g. `file:///C:/Projects/Foo`
    pub location_url: String,
    /// Display name of the location, e.g. `Foo` or `This PC`
    pub location_name: String,
}

/// Port interface for the shell automation surface
pub trait ShellPort: Send + Sync {
    fn open_folder_windows(&self) -> Result<Vec<ShellLocation>, PlatformError>;
}

/// Reports no folder windows
pub struct NullShellPort;

impl ShellPort for NullShellPort {
    fn open_folder_windows(&self) -> Result<Vec<ShellLocation>, PlatformError> {
        Err(PlatformError::Unsupported("shell windows"))
    }
}
