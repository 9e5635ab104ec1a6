//! Fixture library for `dll-check`: one export per calling convention.

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::{Path, PathBuf};

#[no_mangle]
pub extern "C" fn fourty_two() -> i32 {
    42
}

/// `__stdcall` on 32-bit Windows, where toolchains may export it as
/// `fourty_three@0` or `_fourty_three@0`.
#[no_mangle]
pub extern "system" fn fourty_three() -> i32 {
    43
}

pub fn file_name() -> String {
    format!("{DLL_PREFIX}shared{DLL_SUFFIX}")
}

/// Finds the built library next to the running executable or one directory
/// up, which covers both `target/<profile>` and `target/<profile>/deps`.
pub fn locate() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let dir = exe.parent()?;

    let found = [Some(dir), dir.parent()].into_iter().flatten().find_map(find_in);
    found
}

fn find_in(dir: &Path) -> Option<PathBuf> {
    let exact = dir.join(file_name());
    if exact.is_file() {
        return Some(exact);
    }

    let prefix = format!("{DLL_PREFIX}shared-");
    let mut hashed = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&prefix) && name.ends_with(DLL_SUFFIX))
        })
        .collect::<Vec<_>>();
    hashed.sort();

    hashed.pop()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_return_their_names() {
        assert_eq!(fourty_two(), 42);
        assert_eq!(fourty_three(), 43);
    }

    #[test]
    fn file_name_uses_platform_affixes() {
        let name = file_name();

        assert!(name.starts_with(DLL_PREFIX));
        assert!(name.ends_with(DLL_SUFFIX));
        assert!(name.contains("shared"));
    }

    #[test]
    fn find_in_ignores_unrelated_files() {
        let dir = std::env::temp_dir().join(format!("shared-find-in-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{DLL_PREFIX}shared-0a1b.rlib")), b"").unwrap();
        std::fs::write(dir.join(format!("{DLL_PREFIX}shared_other{DLL_SUFFIX}")), b"").unwrap();
        assert_eq!(find_in(&dir), None);

        let hashed = dir.join(format!("{DLL_PREFIX}shared-0a1b{DLL_SUFFIX}"));
        std::fs::write(&hashed, b"").unwrap();
        assert_eq!(find_in(&dir), Some(hashed));

        let exact = dir.join(file_name());
        std::fs::write(&exact, b"").unwrap();
        assert_eq!(find_in(&dir), Some(exact));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
