//! Exit code constants for the stencil binary.
//!
//! Every failure class maps to its own process exit code so that
//! callers (CI jobs, shell scripts) can tell failure modes apart
//! without parsing stderr:
//! - 0: Success
//! - 1: Missing input file
//! - 2: Template substitution failure
//! - 3: Filesystem failure

/// Successful execution. Every artifact was rendered and written.
pub const SUCCESS: i32 = 0;

/// A required input file does not exist: the version file or one of
/// the template sources under the template directory.
pub const MISSING_INPUT: i32 = 1;

/// A template could not be rendered: it referenced a placeholder the
/// merged configuration does not define, or contained a malformed
/// placeholder.
pub const TEMPLATE_FAILURE: i32 = 2;

/// An underlying filesystem operation failed (unreadable input,
/// directory creation, writing or replacing an artifact).
pub const FILESYSTEM_FAILURE: i32 = 3;
