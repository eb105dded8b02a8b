//! File-level rendering: template file in, artifact file out.
//!
//! [`render_file`] is the single write path for every artifact the
//! pipeline produces. It reads a template source, substitutes the
//! merged configuration strictly, and replaces the destination
//! atomically, so a failed render never leaves a partial artifact
//! behind.

use crate::config::ConfigMap;
use crate::error::{Result, StencilError};
use crate::fs::atomic_write_file;
use crate::template;
use std::io::ErrorKind;
use std::path::Path;

/// Render one template file to one destination file.
///
/// Reads `source`, substitutes every placeholder from `config`, and
/// atomically writes the result to `dest`, creating or replacing it.
/// The destination's parent directory must already exist; creating it
/// is the caller's job.
///
/// # Arguments
///
/// * `config` - The merged configuration map for this rendering pass
/// * `source` - Path of the template file to read
/// * `dest` - Path of the artifact to write
///
/// # Returns
///
/// * `Ok(())` - The artifact was written in full
/// * `Err(StencilError::MissingInput)` - `source` does not exist
/// * `Err(StencilError::Template)` - A placeholder failed to resolve
///   or was malformed
/// * `Err(StencilError::Filesystem)` - Any other read or write failure
///
/// On error the destination keeps whatever state it had before the
/// call.
pub fn render_file(config: &ConfigMap, source: &Path, dest: &Path) -> Result<()> {
    let text = std::fs::read_to_string(source).map_err(|e| match e.kind() {
        ErrorKind::NotFound => StencilError::MissingInput(source.to_path_buf()),
        _ => StencilError::Filesystem(format!(
            "failed to read template '{}': {}",
            source.display(),
            e
        )),
    })?;

    let rendered = template::substitute(&text, config).map_err(|e| StencilError::Template {
        path: source.to_path_buf(),
        source: e,
    })?;

    atomic_write_file(dest, &rendered)
}
