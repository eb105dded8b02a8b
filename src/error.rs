//! Error types for the stencil binary.
//!
//! Uses thiserror for derive macros. The three variants are the three
//! fatal failure classes of a rendering run; none is recoverable, and
//! the first one encountered aborts the whole run. Every variant maps
//! to a distinct process exit code via [`StencilError::exit_code`].

use crate::exit_codes;
use crate::template::TemplateError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for stencil operations.
#[derive(Error, Debug)]
pub enum StencilError {
    /// A required input file does not exist: the version file or one
    /// of the template sources.
    #[error("missing input file '{}'", .0.display())]
    MissingInput(PathBuf),

    /// A template failed to render against the merged configuration.
    #[error("template '{}': {}", .path.display(), .source)]
    Template {
        /// Path of the template source that failed to render.
        path: PathBuf,
        /// The underlying substitution failure.
        source: TemplateError,
    },

    /// An underlying filesystem operation failed.
    #[error("{0}")]
    Filesystem(String),
}

impl StencilError {
    /// Returns the process exit code for this error.
    ///
    /// See the `exit_codes` module for the full mapping.
    pub fn exit_code(&self) -> i32 {
        match self {
            StencilError::MissingInput(_) => exit_codes::MISSING_INPUT,
            StencilError::Template { .. } => exit_codes::TEMPLATE_FAILURE,
            StencilError::Filesystem(_) => exit_codes::FILESYSTEM_FAILURE,
        }
    }
}

/// Result type alias for stencil operations.
pub type Result<T> = std::result::Result<T, StencilError>;
