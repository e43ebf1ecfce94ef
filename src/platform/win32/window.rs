//! Win32WindowPort - top-level window queries and activation primitives

use std::ffi::c_void;
use std::mem::size_of;

use windows::Win32::Foundation::{BOOL, HWND, LPARAM, POINT, RECT};
use windows::Win32::Graphics::Gdi::{GetMonitorInfoW, MonitorFromPoint, MONITORINFO, MONITOR_DEFAULTTONEAREST};
use windows::Win32::System::Threading::AttachThreadInput;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    keybd_event, IsWindowEnabled, SetFocus, KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP, VK_MENU,
};
use windows::Win32::UI::WindowsAndMessaging::{
    BringWindowToTop, EnumWindows, GetClassNameW, GetForegroundWindow, GetWindowRect,
    GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId, IsIconic, IsWindow,
    IsWindowVisible, SetForegroundWindow, SetWindowPos, ShowWindow, HWND_NOTOPMOST, HWND_TOPMOST,
    SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SW_MAXIMIZE, SW_RESTORE, SW_SHOW,
};

use super::process::process_name;
use crate::application::ports::{PlatformError, WindowPort};
use crate::domain::entities::WindowSnapshot;
use crate::domain::value_objects::{Rect, WindowHandle};

pub(crate) fn to_hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.raw() as *mut c_void)
}

pub(crate) fn to_handle(hwnd: HWND) -> WindowHandle {
    WindowHandle::new(hwnd.0 as isize)
}

fn os_error(e: windows::core::Error) -> PlatformError {
    PlatformError::Os(e.to_string())
}

unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let handles = &mut *(lparam.0 as *mut Vec<WindowHandle>);
    handles.push(to_handle(hwnd));
    BOOL::from(true)
}

#[derive(Default)]
pub struct Win32WindowPort;

impl Win32WindowPort {
    pub fn new() -> Self {
        Self
    }

    fn text(hwnd: HWND) -> String {
        unsafe {
            let len = GetWindowTextLengthW(hwnd);
            if len <= 0 {
                return String::new();
            }
            let mut buf = vec![0u16; len as usize + 1];
            let copied = GetWindowTextW(hwnd, &mut buf);
            String::from_utf16_lossy(&buf[..copied.max(0) as usize])
        }
    }

    fn class_name(hwnd: HWND) -> String {
        let mut buf = [0u16; 256];
        let copied = unsafe { GetClassNameW(hwnd, &mut buf) };
        String::from_utf16_lossy(&buf[..copied.max(0) as usize])
    }

    fn rect(hwnd: HWND) -> Rect {
        let mut r = RECT::default();
        match unsafe { GetWindowRect(hwnd, &mut r) } {
            Ok(()) => Rect::new(r.left, r.top, r.right, r.bottom),
            Err(_) => Rect::default(),
        }
    }
}

impl WindowPort for Win32WindowPort {
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>, PlatformError> {
        let mut handles: Vec<WindowHandle> = Vec::new();
        unsafe {
            EnumWindows(
                Some(collect_window),
                LPARAM(&mut handles as *mut Vec<WindowHandle> as isize),
            )
            .map_err(os_error)?;
        }
        Ok(handles)
    }

    fn describe(&self, handle: WindowHandle) -> Result<WindowSnapshot, PlatformError> {
        let hwnd = to_hwnd(handle);
        if !self.is_window(handle) {
            return Err(PlatformError::WindowGone(handle));
        }

        let mut pid = 0u32;
        unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
        let snapshot = WindowSnapshot::new(handle, Self::text(hwnd), process_name(pid))
            .with_class(Self::class_name(hwnd))
            .with_pid(pid)
            .with_rect(Self::rect(hwnd))
            .with_visible(unsafe { IsWindowVisible(hwnd).as_bool() });
        Ok(WindowSnapshot {
            is_enabled: unsafe { IsWindowEnabled(hwnd).as_bool() },
            ..snapshot
        })
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        !handle.is_null() && unsafe { IsWindow(to_hwnd(handle)).as_bool() }
    }

    fn is_visible(&self, handle: WindowHandle) -> bool {
        unsafe { IsWindowVisible(to_hwnd(handle)).as_bool() }
    }

    fn foreground(&self) -> Option<WindowHandle> {
        let hwnd = unsafe { GetForegroundWindow() };
        let handle = to_handle(hwnd);
        (!handle.is_null()).then_some(handle)
    }

    fn is_minimized(&self, handle: WindowHandle) -> bool {
        unsafe { IsIconic(to_hwnd(handle)).as_bool() }
    }

    fn restore(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        // ShowWindow reports the previous visibility, not success
        let _ = unsafe { ShowWindow(to_hwnd(handle), SW_RESTORE) };
        Ok(())
    }

    fn show(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        let _ = unsafe { ShowWindow(to_hwnd(handle), SW_SHOW) };
        Ok(())
    }

    fn maximize(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        let _ = unsafe { ShowWindow(to_hwnd(handle), SW_MAXIMIZE) };
        Ok(())
    }

    fn request_foreground(&self, handle: WindowHandle) -> bool {
        unsafe { SetForegroundWindow(to_hwnd(handle)).as_bool() }
    }

    fn bring_to_top(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        unsafe { BringWindowToTop(to_hwnd(handle)) }.map_err(os_error)
    }

    fn set_topmost(&self, handle: WindowHandle, topmost: bool) -> Result<(), PlatformError> {
        let after = if topmost { HWND_TOPMOST } else { HWND_NOTOPMOST };
        unsafe { SetWindowPos(to_hwnd(handle), after, 0, 0, 0, 0, SWP_NOMOVE | SWP_NOSIZE) }
            .map_err(os_error)
    }

    fn tap_modifier_key(&self) -> Result<(), PlatformError> {
        let vk = VK_MENU.0 as u8;
        unsafe {
            keybd_event(vk, 0, KEYBD_EVENT_FLAGS(0), 0);
            keybd_event(vk, 0, KEYEVENTF_KEYUP, 0);
        }
        Ok(())
    }

    fn window_thread_id(&self, handle: WindowHandle) -> Option<u32> {
        let tid = unsafe { GetWindowThreadProcessId(to_hwnd(handle), None) };
        (tid != 0).then_some(tid)
    }

    fn attach_thread_input(&self, from: u32, to: u32, attach: bool) -> bool {
        unsafe { AttachThreadInput(from, to, BOOL::from(attach)).as_bool() }
    }

    fn set_focus(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        // Fails harmlessly when our thread is not attached
        let _ = unsafe { SetFocus(to_hwnd(handle)) };
        Ok(())
    }

    fn monitor_work_area(&self, x: i32, y: i32) -> Option<Rect> {
        unsafe {
            let monitor = MonitorFromPoint(POINT { x, y }, MONITOR_DEFAULTTONEAREST);
            if monitor.is_invalid() {
                return None;
            }
            let mut info = MONITORINFO {
                cbSize: size_of::<MONITORINFO>() as u32,
                ..Default::default()
            };
            if !GetMonitorInfoW(monitor, &mut info).as_bool() {
                return None;
            }
            let r = info.rcWork;
            Some(Rect::new(r.left, r.top, r.right, r.bottom))
        }
    }

    fn move_window(&self, handle: WindowHandle, rect: Rect) -> Result<(), PlatformError> {
        let hwnd = to_hwnd(handle);
        unsafe {
            // Maximized windows ignore moves
            let _ = ShowWindow(hwnd, SW_RESTORE);
            SetWindowPos(
                hwnd,
                HWND(std::ptr::null_mut()),
                rect.left,
                rect.top,
                rect.width(),
                rect.height(),
                SWP_NOZORDER | SWP_NOACTIVATE,
            )
            .map_err(os_error)
        }
    }
}
