//! Platform-specific helpers
//!
//! Home directory lookup, the platform's git executable name, and `~`/environment
//! variable expansion for paths that come from configuration files.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Returns `true` when running on Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Gets the home directory path for the current user.
///
/// # Errors
///
/// Returns an error (with a platform-specific hint) if the home directory cannot
/// be determined.
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        let platform_help = if is_windows() {
            "On Windows: Check that the USERPROFILE environment variable is set"
        } else {
            "On Unix/Linux: Check that the HOME environment variable is set"
        };
        anyhow::anyhow!("Could not determine home directory.\n\n{platform_help}")
    })
}

/// Returns the git executable name for the current platform.
///
/// - `"git.exe"` on Windows
/// - `"git"` on Unix-like systems
#[must_use]
pub const fn get_git_command() -> &'static str {
    if is_windows() {
        "git.exe"
    } else {
        "git"
    }
}

/// Expands `~` and `$VAR`/`${VAR}` references in a configured path.
///
/// # Examples
///
/// ```rust,no_run
/// use pipegen_cli::utils::platform::resolve_path;
///
/// # fn example() -> anyhow::Result<()> {
/// let kube = resolve_path("~/.kube/config")?;
/// # Ok(())
/// # }
/// ```
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded =
        shellexpand::full(path).with_context(|| format!("Failed to expand path: {path}"))?;
    Ok(PathBuf::from(expanded.into_owned()))
}
