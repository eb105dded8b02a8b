//! Filesystem utilities.
//!
//! Rendered artifacts are written through the `atomic` module, so an
//! interrupted run never leaves a partially written file behind.

pub mod atomic;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
