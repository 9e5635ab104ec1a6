use crate::convention::{Cdecl, Convention, Signature};
use crate::error::{Error, Result};
use crate::symbol::Symbol;
use crate::DynamicLibrary;

use std::ffi::c_void;
use std::marker::PhantomData;

pub struct Function<'lib, S, C = Cdecl>
where
    S: Signature<C>,
    C: Convention,
{
    pointer: Option<S::Pointer>,
    _marker: PhantomData<(&'lib (), C)>,
}

impl<'lib, S, C> Function<'lib, S, C>
where
    S: Signature<C>,
    C: Convention,
{
    pub const fn unbound() -> Self {
        Self {
            pointer: None,
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// `address` must be null or the entry point of a function with signature
    /// `S` under convention `C`, and stay valid for `'lib`.
    pub unsafe fn from_raw(address: *mut c_void) -> Self {
        Self::from_symbol(Symbol::from_raw(address))
    }

    pub fn from_pointer(pointer: S::Pointer) -> Self {
        Self {
            pointer: Some(pointer),
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// Same as [`Function::from_raw`].
    pub unsafe fn from_symbol(symbol: Symbol<'lib>) -> Self {
        let pointer = match symbol.as_non_null() {
            Some(address) => Some(S::from_address(address)),
            None => None,
        };

        Self {
            pointer,
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// The export must have signature `S` under convention `C`.
    pub unsafe fn new<T: AsRef<str>>(library: &'lib DynamicLibrary, name: T) -> Self {
        let name = name.as_ref();
        let function = Self::from_symbol(library.get(name));
        if !function.is_bound() {
            println!("symbol '{}' not found", name);
        }

        function
    }

    /// # Safety
    ///
    /// Every candidate must have signature `S` under convention `C`.
    pub unsafe fn new_any<T: AsRef<str>>(library: &'lib DynamicLibrary, names: &[T]) -> Self {
        let function = Self::from_symbol(library.get_any(names));
        if !function.is_bound() {
            println!("symbol '{}' not found", first_name(names));
        }

        function
    }

    /// # Safety
    ///
    /// Same as [`Function::new`].
    pub unsafe fn try_new<T: AsRef<str>>(library: &'lib DynamicLibrary, name: T) -> Result<Self> {
        let name = name.as_ref();
        let symbol = library.get(name);
        if symbol.is_null() {
            return Err(Error::Resolve {
                name: name.to_owned(),
            });
        }

        Ok(Self::from_symbol(symbol))
    }

    /// # Safety
    ///
    /// Same as [`Function::new_any`].
    pub unsafe fn try_new_any<T: AsRef<str>>(
        library: &'lib DynamicLibrary,
        names: &[T],
    ) -> Result<Self> {
        let symbol = library.get_any(names);
        if symbol.is_null() {
            return Err(Error::Resolve {
                name: first_name(names).to_owned(),
            });
        }

        Ok(Self::from_symbol(symbol))
    }

    pub fn is_bound(&self) -> bool {
        self.pointer.is_some()
    }

    pub fn get(&self) -> Option<S::Pointer> {
        self.pointer
    }

    pub fn as_raw(&self) -> *mut c_void {
        self.pointer.map_or(std::ptr::null_mut(), S::to_address)
    }

    /// # Safety
    ///
    /// The function must really have signature `T` under convention `D`.
    pub unsafe fn cast<T, D>(self) -> Function<'lib, T, D>
    where
        T: Signature<D>,
        D: Convention,
    {
        Function::from_raw(self.as_raw())
    }

    /// # Safety
    ///
    /// Runs foreign code; the signature claimed at construction must hold and
    /// the library must still be loaded.
    pub unsafe fn call(&self, args: S::Args) -> S::Output {
        match self.pointer {
            Some(pointer) => S::invoke(pointer, args),
            None => panic!("called an unbound function"),
        }
    }
}

impl<S, C> Default for Function<'_, S, C>
where
    S: Signature<C>,
    C: Convention,
{
    fn default() -> Self {
        Self::unbound()
    }
}

impl<S, C> Clone for Function<'_, S, C>
where
    S: Signature<C>,
    C: Convention,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, C> Copy for Function<'_, S, C>
where
    S: Signature<C>,
    C: Convention,
{
}

impl<S, C> std::fmt::Debug for Function<'_, S, C>
where
    S: Signature<C>,
    C: Convention,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("address", &self.as_raw())
            .field("convention", &C::NAME)
            .finish()
    }
}

fn first_name<T: AsRef<str>>(names: &[T]) -> &str {
    names.first().map_or("", |name| name.as_ref())
}
