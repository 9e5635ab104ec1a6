use std::ffi::c_void;
use std::ptr::NonNull;

mod sealed {
    pub trait Sealed {}
}

pub trait Convention: sealed::Sealed + Copy + Default + 'static {
    const NAME: &'static str;
}

macro_rules! conventions {
    ($($tag:ident => $name:literal,)*) => {
        $(
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
            pub struct $tag;

            impl sealed::Sealed for $tag {}

            impl Convention for $tag {
                const NAME: &'static str = $name;
            }
        )*
    };
}

conventions! {
    Cdecl => "cdecl",
    Fastcall => "fastcall",
    Stdcall => "stdcall",
    Thiscall => "thiscall",
    Vectorcall => "vectorcall",
}

pub trait Signature<C: Convention> {
    type Pointer: Copy;
    type Args;
    type Output;

    /// # Safety
    ///
    /// `address` must be the entry point of a function with this signature
    /// and convention.
    unsafe fn from_address(address: NonNull<c_void>) -> Self::Pointer;

    fn to_address(pointer: Self::Pointer) -> *mut c_void;

    /// # Safety
    ///
    /// Calls foreign code; the signature claimed at construction must hold.
    unsafe fn invoke(pointer: Self::Pointer, args: Self::Args) -> Self::Output;
}

macro_rules! signature {
    ($tag:ident, $abi:tt; $($arg:ident),*) => {
        impl<R, $($arg),*> Signature<$tag> for fn($($arg),*) -> R {
            type Pointer = unsafe extern $abi fn($($arg),*) -> R;
            type Args = ($($arg,)*);
            type Output = R;

            unsafe fn from_address(address: NonNull<c_void>) -> Self::Pointer {
                std::mem::transmute_copy::<NonNull<c_void>, Self::Pointer>(&address)
            }

            fn to_address(pointer: Self::Pointer) -> *mut c_void {
                pointer as *mut c_void
            }

            #[allow(non_snake_case)]
            unsafe fn invoke(pointer: Self::Pointer, ($($arg,)*): Self::Args) -> R {
                pointer($($arg),*)
            }
        }
    };
}

macro_rules! signatures {
    ($($arg:ident),*) => {
        signature!(Cdecl, "C"; $($arg),*);
        signature!(Stdcall, "system"; $($arg),*);

        #[cfg(target_arch = "x86")]
        signature!(Fastcall, "fastcall"; $($arg),*);
        #[cfg(not(target_arch = "x86"))]
        signature!(Fastcall, "C"; $($arg),*);

        #[cfg(target_arch = "x86")]
        signature!(Thiscall, "thiscall"; $($arg),*);
        #[cfg(not(target_arch = "x86"))]
        signature!(Thiscall, "C"; $($arg),*);

        #[cfg(all(
            feature = "vectorcall",
            windows,
            any(target_arch = "x86", target_arch = "x86_64")
        ))]
        signature!(Vectorcall, "vectorcall"; $($arg),*);
        #[cfg(not(all(windows, any(target_arch = "x86", target_arch = "x86_64"))))]
        signature!(Vectorcall, "C"; $($arg),*);
    };
}

signatures!();
signatures!(A);
signatures!(A, B);
signatures!(A, B, C);
signatures!(A, B, C, D);
signatures!(A, B, C, D, E);
signatures!(A, B, C, D, E, F);
signatures!(A, B, C, D, E, F, G);
signatures!(A, B, C, D, E, F, G, H);
signatures!(A, B, C, D, E, F, G, H, I);
signatures!(A, B, C, D, E, F, G, H, I, J);
signatures!(A, B, C, D, E, F, G, H, I, J, K);
signatures!(A, B, C, D, E, F, G, H, I, J, K, L);

#[cfg(test)]
mod tests {
    use super::*;

    type Add = fn(i32, i32) -> i32;
    type Negate = fn(i64) -> i64;

    extern "C" fn add(a: i32, b: i32) -> i32 {
        a + b
    }

    extern "system" fn negate(value: i64) -> i64 {
        -value
    }

    fn address_of<F: Copy>(f: F) -> NonNull<c_void> {
        let address = unsafe { std::mem::transmute_copy::<F, *mut c_void>(&f) };
        NonNull::new(address).unwrap()
    }

    #[test]
    fn cdecl_round_trips_an_address() {
        let address = address_of(add as extern "C" fn(i32, i32) -> i32);
        let pointer = unsafe { <Add as Signature<Cdecl>>::from_address(address) };

        assert_eq!(<Add as Signature<Cdecl>>::to_address(pointer), address.as_ptr());
        assert_eq!(unsafe { <Add as Signature<Cdecl>>::invoke(pointer, (40, 2)) }, 42);
    }

    #[test]
    fn stdcall_uses_the_system_abi() {
        let address = address_of(negate as extern "system" fn(i64) -> i64);
        let pointer = unsafe { <Negate as Signature<Stdcall>>::from_address(address) };

        assert_eq!(unsafe { <Negate as Signature<Stdcall>>::invoke(pointer, (-43,)) }, 43);
    }

    #[cfg(not(target_arch = "x86"))]
    #[test]
    fn register_conventions_collapse_to_c() {
        let address = address_of(add as extern "C" fn(i32, i32) -> i32);

        let fast = unsafe { <Add as Signature<Fastcall>>::from_address(address) };
        let this = unsafe { <Add as Signature<Thiscall>>::from_address(address) };

        assert_eq!(unsafe { <Add as Signature<Fastcall>>::invoke(fast, (1, 2)) }, 3);
        assert_eq!(unsafe { <Add as Signature<Thiscall>>::invoke(this, (3, 4)) }, 7);
    }

    #[test]
    fn tags_are_named() {
        assert_eq!(Cdecl::NAME, "cdecl");
        assert_eq!(Stdcall::NAME, "stdcall");
        assert_eq!(Vectorcall::NAME, "vectorcall");
    }
}
