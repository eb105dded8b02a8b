//! Configuration model for stencil.
//!
//! There is no configuration file. The application metadata and the
//! package-manager target table are compiled into the binary; the only
//! external input is the version file at the project root. This module
//! assembles the string-keyed maps the template engine consumes.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::{base_configuration, ConfigMap, APP_DESCRIPTION, APP_NAME};
pub use operations::{overlay, read_version};
pub use types::{PackageManagerEntry, PACKAGE_MANAGERS};
