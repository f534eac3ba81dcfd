//! Shared helpers for CLI commands

use crate::cli::args::ColorChoice;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Exit code for a successful invocation
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for any top-level failure (missing file, discovery failure,
/// unsupported model)
pub const EXIT_ERROR: i32 = 2;

/// Default tools directory probed when none is given explicitly
pub const DEFAULT_TOOLS_DIR: &str = "tools";

/// Resolve the tools directory for discovery
///
/// An explicit directory is used as-is (discovery fails if it is missing). With no
/// explicit directory, `./tools` is used when it exists and discovery otherwise
/// falls back to the builtin checkers only.
pub fn resolve_tools_dir(explicit: Option<PathBuf>) -> Option<PathBuf> {
    match explicit {
        Some(dir) => Some(dir),
        None => {
            let default = Path::new(DEFAULT_TOOLS_DIR);
            default.is_dir().then(|| default.to_path_buf())
        }
    }
}

/// Map the CLI color flag onto termcolor's choice for stdout
pub fn color_choice(choice: ColorChoice) -> termcolor::ColorChoice {
    match choice {
        ColorChoice::Always => termcolor::ColorChoice::Always,
        ColorChoice::Never => termcolor::ColorChoice::Never,
        ColorChoice::Auto => {
            if std::io::stdout().is_terminal() {
                termcolor::ColorChoice::Auto
            } else {
                termcolor::ColorChoice::Never
            }
        }
    }
}
