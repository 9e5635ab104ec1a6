use windows_sys::Win32::Foundation::{GetLastError, HINSTANCE};
use windows_sys::Win32::System::LibraryLoader::{FreeLibrary, GetProcAddress, LoadLibraryW};

use std::ffi::{c_void, CStr, OsStr};
use std::os::windows::ffi::OsStrExt;
use std::path::Path;

pub struct DynamicLibrary(HINSTANCE);

impl DynamicLibrary {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let os_path = <Path as AsRef<OsStr>>::as_ref(path);
        let wide_path = os_path
            .encode_wide()
            .chain(std::iter::once(0))
            .collect::<Vec<u16>>();

        // SAFETY: `wide_path` is valid null-terminated UTF-16
        let module = unsafe { LoadLibraryW(wide_path.as_ptr()) };

        if module != 0 {
            // SAFETY: Function succeeded
            Ok(Self(module))
        } else {
            // SAFETY: Reads the calling thread's last-error code
            let code = unsafe { GetLastError() };
            Err(format!("error code {code}"))
        }
    }

    pub fn get(&self, name: &CStr) -> *mut c_void {
        // SAFETY: `self.0` is a live module and `name` is null-terminated
        let proc = unsafe { GetProcAddress(self.0, name.as_ptr().cast()) };

        proc.map_or(std::ptr::null_mut(), |p| p as *mut c_void)
    }

    pub fn as_raw(&self) -> *mut c_void {
        self.0 as *mut c_void
    }
}

impl Drop for DynamicLibrary {
    fn drop(&mut self) {
        // SAFETY: Since self is alive and has valid HMODULE, we can safely free
        unsafe { FreeLibrary(self.0) };
    }
}
