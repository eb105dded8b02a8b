//! stencil: renders per-package-manager build artifacts from
//! templates.
//!
//! The binary takes no arguments and reads no environment variables.
//! Run from the project root, it reads `VERSION` and the templates under
//! `packaging/`, and writes one artifact set per package-manager
//! target under `build/`. Errors go to stderr and map to the exit
//! codes documented in the `exit_codes` module.

pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod pipeline;
pub mod render;
pub mod template;

#[cfg(test)]
mod test_support;

use context::ProjectLayout;
use std::process::ExitCode;

fn main() -> ExitCode {
    let result = ProjectLayout::resolve().and_then(|layout| pipeline::run(&layout));

    match result {
        Ok(_) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
