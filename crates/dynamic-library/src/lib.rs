#![cfg_attr(feature = "vectorcall", feature(abi_vectorcall))]

mod convention;
mod error;
mod function;
mod symbol;
mod sys;

use crate::sys as lib_impl;

use std::ffi::{c_void, CString};
use std::path::Path;

pub use crate::convention::{Cdecl, Convention, Fastcall, Signature, Stdcall, Thiscall, Vectorcall};
pub use crate::error::{Error, Result};
pub use crate::function::Function;
pub use crate::symbol::Symbol;

#[derive(Default)]
pub struct DynamicLibrary(Option<lib_impl::DynamicLibrary>);

impl DynamicLibrary {
    pub const fn empty() -> Self {
        Self(None)
    }

    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_new(path) {
            Ok(lib) => lib,
            Err(err) => {
                log::debug!("{}", err);
                println!("library '{}' not found", path.display());
                Self::empty()
            }
        }
    }

    pub fn try_new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match lib_impl::DynamicLibrary::new(path) {
            Ok(lib) => {
                log::trace!("Library `{}` loaded.", path.display());
                Ok(Self(Some(lib)))
            }
            Err(reason) => Err(Error::Load {
                path: path.to_owned(),
                reason,
            }),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.0.is_some()
    }

    pub fn take(&mut self) -> Self {
        Self(self.0.take())
    }

    pub fn as_raw(&self) -> *mut c_void {
        self.0
            .as_ref()
            .map_or(std::ptr::null_mut(), |lib| lib.as_raw())
    }

    pub fn get<T: AsRef<str>>(&self, name: T) -> Symbol<'_> {
        let Some(lib) = &self.0 else {
            return Symbol::null();
        };
        let Ok(name) = CString::new(name.as_ref()) else {
            return Symbol::null();
        };

        // SAFETY: The address belongs to `lib`, which outlives the borrow of `self`.
        let symbol = unsafe { Symbol::from_raw(lib.get(&name)) };
        if !symbol.is_null() {
            log::trace!("Symbol `{}` resolved at {:p}.", name.to_string_lossy(), symbol.as_ptr());
        }

        symbol
    }

    pub fn get_any<T: AsRef<str>>(&self, names: &[T]) -> Symbol<'_> {
        for name in names {
            let symbol = self.get(name);
            if !symbol.is_null() {
                return symbol;
            }
            log::debug!("Symbol `{}` not exported.", name.as_ref());
        }

        Symbol::null()
    }
}

impl Drop for DynamicLibrary {
    fn drop(&mut self) {
        if self.0.take().is_some() {
            log::trace!("Library unloaded.");
        }
    }
}

impl std::fmt::Debug for DynamicLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DynamicLibrary").field(&self.as_raw()).finish()
    }
}
