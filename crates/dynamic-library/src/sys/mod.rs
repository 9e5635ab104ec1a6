cfg_if::cfg_if! {
    if #[cfg(unix)] {
        mod unix;
        pub use self::unix::DynamicLibrary;
    } else if #[cfg(windows)] {
        mod windows;
        pub use self::windows::DynamicLibrary;
    } else {
        compile_error!("Only Unix and Windows targets are supported");
    }
}
