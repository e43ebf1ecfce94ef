//! Win32ProcessPort - process names and foreign working directories
//!
//! The working directory of another process lives in its
//! RTL_USER_PROCESS_PARAMETERS, reachable from the PEB. Both are read with
//! ReadProcessMemory; offsets depend on the target's bitness.

use std::ffi::c_void;
use std::mem::size_of;

use windows::core::PWSTR;
use windows::Win32::Foundation::{CloseHandle, BOOL, HANDLE};
use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;
use windows::Win32::System::Threading::{
    IsWow64Process, OpenProcess, QueryFullProcessImageNameW, PROCESS_ACCESS_RIGHTS,
    PROCESS_NAME_WIN32, PROCESS_QUERY_INFORMATION, PROCESS_QUERY_LIMITED_INFORMATION,
    PROCESS_VM_READ,
};

use crate::application::ports::ProcessPort;
use crate::domain::entities::UNKNOWN_PROCESS;

const PROCESS_BASIC_INFORMATION_CLASS: u32 = 0;
const PROCESS_WOW64_INFORMATION_CLASS: u32 = 26;

/// Longest working directory we accept (UNICODE_STRING length is u16 bytes)
const MAX_CWD_BYTES: usize = u16::MAX as usize;

#[repr(C)]
#[derive(Default)]
struct ProcessBasicInformation {
    exit_status: i32,
    peb_base_address: usize,
    affinity_mask: usize,
    base_priority: i32,
    unique_process_id: usize,
    inherited_from_unique_process_id: usize,
}

#[link(name = "ntdll")]
extern "system" {
    fn NtQueryInformationProcess(
        process: HANDLE,
        class: u32,
        info: *mut c_void,
        info_len: u32,
        return_len: *mut u32,
    ) -> i32;
}

/// Where CurrentDirectory.DosPath sits for one bitness
struct PebLayout {
    /// PEB -> ProcessParameters pointer
    parameters: usize,
    /// ProcessParameters -> CurrentDirectory UNICODE_STRING
    current_directory: usize,
    /// UNICODE_STRING -> Buffer pointer
    buffer: usize,
    pointer_size: usize,
}

const PEB_64: PebLayout = PebLayout {
    parameters: 0x20,
    current_directory: 0x38,
    buffer: 0x08,
    pointer_size: 8,
};

const PEB_32: PebLayout = PebLayout {
    parameters: 0x10,
    current_directory: 0x24,
    buffer: 0x04,
    pointer_size: 4,
};

#[cfg(target_pointer_width = "64")]
const NATIVE: &PebLayout = &PEB_64;
#[cfg(target_pointer_width = "32")]
const NATIVE: &PebLayout = &PEB_32;

/// Process handle closed on drop
struct ProcessHandle(HANDLE);

impl ProcessHandle {
    fn open(pid: u32, access: PROCESS_ACCESS_RIGHTS) -> Option<Self> {
        if pid == 0 {
            return None;
        }
        unsafe { OpenProcess(access, BOOL::from(false), pid) }.ok().map(Self)
    }

    fn read(&self, address: usize, buf: &mut [u8]) -> Option<()> {
        let mut read = 0usize;
        unsafe {
            ReadProcessMemory(
                self.0,
                address as *const c_void,
                buf.as_mut_ptr() as *mut c_void,
                buf.len(),
                Some(&mut read),
            )
        }
        .ok()?;
        (read == buf.len()).then_some(())
    }

    fn read_pointer(&self, address: usize, size: usize) -> Option<usize> {
        let mut buf = [0u8; 8];
        self.read(address, &mut buf[..size])?;
        let value = u64::from_le_bytes(buf) as usize;
        (value != 0).then_some(value)
    }

    fn read_u16(&self, address: usize) -> Option<u16> {
        let mut buf = [0u8; 2];
        self.read(address, &mut buf)?;
        Some(u16::from_le_bytes(buf))
    }

    fn is_wow64(&self) -> bool {
        let mut wow64 = BOOL::default();
        unsafe { IsWow64Process(self.0, &mut wow64) }.is_ok() && wow64.as_bool()
    }

    fn query(&self, class: u32, info: *mut c_void, len: usize) -> Option<()> {
        let status = unsafe {
            NtQueryInformationProcess(self.0, class, info, len as u32, std::ptr::null_mut())
        };
        (status >= 0).then_some(())
    }

    /// PEB address and the layout to read it with
    fn peb(&self) -> Option<(usize, &'static PebLayout)> {
        if cfg!(target_pointer_width = "64") && self.is_wow64() {
            let mut peb32 = 0usize;
            self.query(
                PROCESS_WOW64_INFORMATION_CLASS,
                &mut peb32 as *mut usize as *mut c_void,
                size_of::<usize>(),
            )?;
            return (peb32 != 0).then_some((peb32, &PEB_32));
        }

        let mut info = ProcessBasicInformation::default();
        self.query(
            PROCESS_BASIC_INFORMATION_CLASS,
            &mut info as *mut ProcessBasicInformation as *mut c_void,
            size_of::<ProcessBasicInformation>(),
        )?;
        (info.peb_base_address != 0).then_some((info.peb_base_address, NATIVE))
    }

    fn current_directory(&self) -> Option<String> {
        let (peb, layout) = self.peb()?;
        let params = self.read_pointer(peb + layout.parameters, layout.pointer_size)?;
        let unicode = params + layout.current_directory;

        let len = self.read_u16(unicode)? as usize;
        if len == 0 || len > MAX_CWD_BYTES || len % 2 != 0 {
            return None;
        }
        let buffer = self.read_pointer(unicode + layout.buffer, layout.pointer_size)?;

        let mut bytes = vec![0u8; len];
        self.read(buffer, &mut bytes)?;
        let wide: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        Some(String::from_utf16_lossy(&wide))
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        let _ = unsafe { CloseHandle(self.0) };
    }
}

/// Executable file name of `pid`, or "Unknown"
pub fn process_name(pid: u32) -> String {
    let Some(process) = ProcessHandle::open(pid, PROCESS_QUERY_LIMITED_INFORMATION) else {
        return UNKNOWN_PROCESS.to_string();
    };
    let mut buf = [0u16; 1024];
    let mut len = buf.len() as u32;
    let ok = unsafe {
        QueryFullProcessImageNameW(process.0, PROCESS_NAME_WIN32, PWSTR(buf.as_mut_ptr()), &mut len)
    }
    .is_ok();
    if !ok {
        return UNKNOWN_PROCESS.to_string();
    }
    let path = String::from_utf16_lossy(&buf[..len as usize]);
    path.rsplit('\\')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_PROCESS)
        .to_string()
}

#[derive(Default)]
pub struct Win32ProcessPort;

impl Win32ProcessPort {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessPort for Win32ProcessPort {
    fn process_cwd(&self, pid: u32) -> Option<String> {
        let process = ProcessHandle::open(pid, PROCESS_QUERY_INFORMATION | PROCESS_VM_READ)?;
        let cwd = process.current_directory();
        if cwd.is_none() {
            log!("Could not read working directory of pid {}", pid);
        }
        cwd
    }
}
