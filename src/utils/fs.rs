//! File system utilities for writing the rendered pipeline tree
//!
//! These are the filesystem primitives the template engine is built on: idempotent
//! directory creation, plain byte copies, atomic text writes and the executable bit
//! for rendered scripts. Every function attaches the path it was working on to the
//! error so a failed run points straight at the offending file.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pipegen_cli::utils::fs::{ensure_dir, safe_write, set_executable};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("ci/tasks"))?;
//! safe_write(Path::new("ci/tasks/build.sh"), "#!/bin/sh\necho build\n")?;
//! set_executable(Path::new("ci/tasks/build.sh"))?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Ensures a directory exists, creating it and all parent directories if necessary.
///
/// Calling this on an existing directory is a no-op.
///
/// # Errors
///
/// Returns an error if the path exists but is not a directory, or creation fails.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).with_context(|| {
            format!(
                "Failed to create directory: {}\n\nCheck directory permissions and path validity",
                path.display()
            )
        })?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Safely writes a string to a file using [`atomic_write`].
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// The content goes to a temporary file in the target's directory, is synced, and
/// is then persisted over the target path. Readers never observe a partial file.
/// Parent directories are created if they don't exist.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;
    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for: {}", path.display()))?;
    temp.as_file().sync_all().with_context(|| "Failed to sync file to disk")?;

    temp.persist(path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;
    Ok(())
}

/// Copies a single file byte-for-byte, overwriting the destination.
///
/// No metadata beyond what a plain copy implies is carried over.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}

/// Reads a text file with path context on failure.
pub fn read_text_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Writes a text file in place, overwriting any existing content.
///
/// Unlike [`safe_write`] the file keeps the default creation mode, which is what
/// generated pipeline files need; the atomic path creates owner-only files.
pub fn write_text_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Marks a file executable by owner, group and others (mode `0o755`).
///
/// On non-Unix platforms there is no execute bit to set and this does nothing.
pub fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to set permissions on: {}", path.display()))?;
    }
    #[cfg(not(unix))]
    {
        tracing::debug!("Skipping chmod on non-unix platform: {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a/b/c");

        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_dir_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let err = ensure_dir(&file).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_safe_write_creates_parents_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("ci/values.yml");

        safe_write(&target, "first").unwrap();
        safe_write(&target, "second").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
    }

    #[test]
    fn test_copy_file_is_byte_for_byte() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("logo.png");
        let dst = temp.path().join("out.png");
        let bytes = vec![0x89, 0x50, 0x4e, 0x47, 0x00, 0xff];
        fs::write(&src, &bytes).unwrap();

        copy_file(&src, &dst).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), bytes);
    }

    #[cfg(unix)]
    #[test]
    fn test_set_executable_sets_755() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let script = temp.path().join("run.sh");
        fs::write(&script, "#!/bin/sh\n").unwrap();

        set_executable(&script).unwrap();
        let mode = fs::metadata(&script).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
