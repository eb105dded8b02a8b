//! Atomic file writes for rendered artifacts.
//!
//! Every artifact is written with the same pattern:
//! 1. Write the content to a temporary file in the destination
//!    directory
//! 2. Sync the file to disk (fsync)
//! 3. Atomically rename over the destination
//!
//! A destination is therefore always either its prior state or the
//! complete new content, never a partial write. On POSIX, `rename()`
//! replaces an existing file atomically within one filesystem. On
//! Windows an existing destination is removed first; that leaves a
//! brief window with no destination file, but never one with partial
//! content.
//!
//! The destination's parent directory must already exist; this module
//! does not create directories. If the process dies between steps, a
//! stray `.{filename}.tmp` file may remain in the destination
//! directory.

use crate::error::{Result, StencilError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file.
///
/// # Arguments
///
/// * `path` - Destination path. Its parent directory must exist.
/// * `content` - Full content to write
///
/// # Returns
///
/// * `Ok(())` - The destination holds exactly `content`
/// * `Err(StencilError::Filesystem)` - The write failed; the
///   destination keeps whatever state it had before the call
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let temp_path = temp_path_for(path)?;

    write_and_sync(&temp_path, content)?;
    replace(&temp_path, path)
}

/// Atomically write a string to a file.
///
/// Convenience wrapper around [`atomic_write`] for text content.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Temporary file path next to the target: `.{filename}.tmp`.
fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        StencilError::Filesystem(format!(
            "invalid destination path '{}'",
            target.display()
        ))
    })?;
    Ok(parent.join(format!(".{}.tmp", filename)))
}

/// Write `content` to `path` and fsync it.
///
/// Cleans up the temporary file on failure.
fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        StencilError::Filesystem(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(path);
        StencilError::Filesystem(format!("failed to write temporary file: {}", e))
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        StencilError::Filesystem(format!("failed to sync temporary file to disk: {}", e))
    })?;

    Ok(())
}

#[cfg(unix)]
fn replace(source: &Path, target: &Path) -> Result<()> {
    // rename() replaces an existing destination atomically on POSIX.
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        StencilError::Filesystem(format!(
            "failed to replace '{}': {}",
            target.display(),
            e
        ))
    })?;

    // Sync the directory entry as well so the rename survives a crash.
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

#[cfg(windows)]
fn replace(source: &Path, target: &Path) -> Result<()> {
    // rename() fails on an existing destination, so remove it first.
    if target.exists() {
        fs::remove_file(target).map_err(|e| {
            let _ = fs::remove_file(source);
            StencilError::Filesystem(format!(
                "failed to remove old file '{}': {}",
                target.display(),
                e
            ))
        })?;
    }

    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        StencilError::Filesystem(format!(
            "failed to replace '{}': {}",
            target.display(),
            e
        ))
    })
}
