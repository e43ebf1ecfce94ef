//! Win32ShellPort - open Explorer windows via the ShellWindows collection

use windows::core::{Interface, VARIANT};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL, COINIT_APARTMENTTHREADED,
};
use windows::Win32::UI::Shell::{IShellWindows, IWebBrowser2, ShellWindows};

use crate::application::ports::{PlatformError, ShellLocation, ShellPort};
use crate::domain::value_objects::WindowHandle;

/// COM initialized for the current thread until dropped
struct ComApartment {
    owned: bool,
}

impl ComApartment {
    fn enter() -> Self {
        // S_FALSE (already initialized) still needs a matching uninit;
        // RPC_E_CHANGED_MODE means another model is active and must be left alone
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
        Self { owned: hr.is_ok() }
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        if self.owned {
            unsafe { CoUninitialize() };
        }
    }
}

fn com_error(e: windows::core::Error) -> PlatformError {
    PlatformError::Os(e.to_string())
}

#[derive(Default)]
pub struct Win32ShellPort;

impl Win32ShellPort {
    pub fn new() -> Self {
        Self
    }
}

impl ShellPort for Win32ShellPort {
    fn open_folder_windows(&self) -> Result<Vec<ShellLocation>, PlatformError> {
        let _com = ComApartment::enter();
        unsafe {
            let windows: IShellWindows =
                CoCreateInstance(&ShellWindows, None, CLSCTX_ALL).map_err(com_error)?;
            let count = windows.Count().map_err(com_error)?;

            let mut locations = Vec::with_capacity(count.max(0) as usize);
            for i in 0..count {
                // Items disappear while iterating; skip the ones that do
                let Ok(item) = windows.Item(&VARIANT::from(i)) else {
                    continue;
                };
                let Ok(browser) = item.cast::<IWebBrowser2>() else {
                    continue;
                };
                let Ok(hwnd) = browser.HWND() else {
                    continue;
                };
                locations.push(ShellLocation {
                    handle: WindowHandle::new(hwnd.0),
                    location_url: browser.LocationURL().map(|s| s.to_string()).unwrap_or_default(),
                    location_name: browser.LocationName().map(|s| s.to_string()).unwrap_or_default(),
                });
            }
            Ok(locations)
        }
    }
}
