//! Version reading and configuration merging.

use super::model::ConfigMap;
use crate::error::{Result, StencilError};
use std::io::ErrorKind;
use std::path::Path;

/// Read the version string from the version file.
///
/// Surrounding whitespace is trimmed, so a trailing newline in the
/// file never leaks into rendered artifacts.
///
/// # Arguments
///
/// * `path` - Path of the version file
///
/// # Returns
///
/// * `Ok(String)` - The trimmed version string
/// * `Err(StencilError::MissingInput)` - The file does not exist
/// * `Err(StencilError::Filesystem)` - Any other read failure
pub fn read_version<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => StencilError::MissingInput(path.to_path_buf()),
        _ => StencilError::Filesystem(format!(
            "failed to read version file '{}': {}",
            path.display(),
            e
        )),
    })?;

    Ok(content.trim().to_string())
}

/// Shallow-merge `overrides` over `base` into a fresh map.
///
/// On a key collision the override value wins. Both inputs are left
/// untouched.
pub fn overlay(base: &ConfigMap, overrides: &ConfigMap) -> ConfigMap {
    let mut merged = base.clone();
    merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}
