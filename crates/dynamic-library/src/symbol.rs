use std::ffi::c_void;
use std::marker::PhantomData;
use std::ptr::NonNull;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbol<'lib> {
    address: *mut c_void,
    _library: PhantomData<&'lib ()>,
}

impl<'lib> Symbol<'lib> {
    pub const fn null() -> Self {
        Self {
            address: std::ptr::null_mut(),
            _library: PhantomData,
        }
    }

    /// # Safety
    ///
    /// `address` must be null or stay valid for `'lib`.
    pub const unsafe fn from_raw(address: *mut c_void) -> Self {
        Self {
            address,
            _library: PhantomData,
        }
    }

    pub fn is_null(&self) -> bool {
        self.address.is_null()
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.address
    }

    pub fn as_non_null(&self) -> Option<NonNull<c_void>> {
        NonNull::new(self.address)
    }

    pub const fn cast<T>(self) -> *mut T {
        self.address.cast()
    }

    /// # Safety
    ///
    /// A non-null address must point to a readable, aligned pointer-sized value.
    pub unsafe fn deref_pointer(self) -> Symbol<'lib> {
        if self.address.is_null() {
            return Self::null();
        }

        Self::from_raw(*self.address.cast::<*mut c_void>())
    }
}

impl Default for Symbol<'_> {
    fn default() -> Self {
        Self::null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static VALUE: usize = 0x2a;

    #[test]
    fn null_symbol() {
        let symbol = Symbol::null();

        assert!(symbol.is_null());
        assert!(symbol.as_non_null().is_none());
        assert_eq!(symbol, Symbol::default());
    }

    #[test]
    fn deref_pointer_reads_the_stored_address() {
        let slot: *const usize = &VALUE;
        let symbol = unsafe { Symbol::from_raw(&slot as *const *const usize as *mut c_void) };
        let target = unsafe { symbol.deref_pointer() };

        assert_eq!(target.cast::<usize>() as *const usize, slot);
        assert_eq!(unsafe { *target.cast::<usize>() }, 0x2a);
    }

    #[test]
    fn deref_pointer_of_null_is_null() {
        let target = unsafe { Symbol::null().deref_pointer() };

        assert!(target.is_null());
    }
}
