use dynamic_library::{DynamicLibrary, Function, Stdcall};

use anyhow::ensure;
use clap::{ArgAction, Parser};
use env_logger::Env;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[cfg(windows)]
const DEFAULT_LIBRARY: &str = "shared.dll";
#[cfg(target_os = "macos")]
const DEFAULT_LIBRARY: &str = "libshared.dylib";
#[cfg(not(any(windows, target_os = "macos")))]
const DEFAULT_LIBRARY: &str = "libshared.so";

/// Loads the fixture library and checks its exports.
#[derive(Parser)]
#[command(name = "dll-check", version, about, long_about = None)]
struct Cli {
    /// Library exporting `fourty_two` and `fourty_three` (default: next to this executable)
    path: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let path = cli.path.unwrap_or_else(default_library);
    match check(&path) {
        Ok(()) => {
            println!("OK");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

// `dlopen` only searches the system paths for a bare file name.
fn default_library() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_LIBRARY)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBRARY))
}

fn check(path: &Path) -> anyhow::Result<()> {
    let shared = DynamicLibrary::new(path);
    ensure!(shared.is_loaded(), "could not load `{}`", path.display());

    let fourty_two = unsafe { Function::<fn() -> i32>::new(&shared, "fourty_two") };
    ensure!(fourty_two.is_bound(), "`fourty_two` is not exported");
    let value = unsafe { fourty_two.call(()) };
    ensure!(value == 42, "`fourty_two` returned {}", value);
    log::info!("fourty_two() = {}", value);

    let fourty_three = unsafe {
        Function::<fn() -> i32, Stdcall>::new_any(
            &shared,
            &[
                "fourty_three",
                // mingw stdcall dllexport
                "fourty_three@0",
                // msvc stdcall dllexport
                "_fourty_three@0",
            ],
        )
    };
    ensure!(fourty_three.is_bound(), "`fourty_three` is not exported");
    let value = unsafe { fourty_three.call(()) };
    ensure!(value == 43, "`fourty_three` returned {}", value);
    log::info!("fourty_three() = {}", value);

    Ok(())
}
