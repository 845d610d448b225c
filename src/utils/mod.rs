//! Cross-platform utilities and helpers
//!
//! - [`fs`] - File system primitives used by the template engine (mkdir, copy, atomic write, chmod)
//! - [`platform`] - Platform-specific helpers and path expansion

pub mod fs;
pub mod platform;

pub use fs::{atomic_write, copy_file, ensure_dir, safe_write, set_executable};
pub use platform::{get_git_command, get_home_dir, is_windows, resolve_path};
