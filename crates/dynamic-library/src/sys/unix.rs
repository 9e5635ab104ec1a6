use std::ffi::{c_void, CStr, CString};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr::NonNull;

pub struct DynamicLibrary(NonNull<c_void>);

// SAFETY: `dlsym` and `dlclose` may be called from any thread.
unsafe impl Send for DynamicLibrary {}
unsafe impl Sync for DynamicLibrary {}

impl DynamicLibrary {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = CString::new(path.as_ref().as_os_str().as_bytes())
            .map_err(|_| String::from("path contains a nul byte"))?;

        // SAFETY: `path` is a valid null-terminated C string
        let handle = unsafe { libc::dlopen(path.as_ptr(), libc::RTLD_LAZY | libc::RTLD_LOCAL) };

        NonNull::new(handle).map(Self).ok_or_else(last_error)
    }

    pub fn get(&self, name: &CStr) -> *mut c_void {
        // SAFETY: `self.0` was returned by `dlopen` and is not closed yet
        unsafe { libc::dlsym(self.0.as_ptr(), name.as_ptr()) }
    }

    pub fn as_raw(&self) -> *mut c_void {
        self.0.as_ptr()
    }
}

impl Drop for DynamicLibrary {
    fn drop(&mut self) {
        // SAFETY: Since self is alive and holds a handle from `dlopen`, we can safely close
        unsafe { libc::dlclose(self.0.as_ptr()) };
    }
}

fn last_error() -> String {
    // SAFETY: `dlerror` returns either null or a null-terminated string that
    // stays valid until the next `dl*` call on this thread.
    unsafe {
        let message = libc::dlerror();
        if message.is_null() {
            String::from("unknown dynamic loader error")
        } else {
            CStr::from_ptr(message).to_string_lossy().into_owned()
        }
    }
}
