//! PATH-based executable lookup.

use std::path::PathBuf;

/// Find an executable by name on the system PATH.
///
/// Only PATH is searched, via the `which` crate. Per-user install locations
/// such as `~/.bun/bin` count only when the user has put them on PATH.
///
/// # Arguments
///
/// * `name` - The executable name to search for (e.g., "pnpm", "node")
///
/// # Returns
///
/// `Some(PathBuf)` if the executable is found, `None` otherwise.
pub(crate) fn find_executable(name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    // which handles PATHEXT on Windows (npm.cmd, yarn.cmd)
    which::which(name).ok()
}
