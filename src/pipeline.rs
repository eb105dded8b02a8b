//! The rendering pipeline.
//!
//! One run, top to bottom: read the version file, assemble the base
//! configuration, then for each package-manager target merge the
//! target's overrides, create its build directory, and render the
//! three artifacts (VM provisioning file, package descriptor, setup
//! script).
//!
//! There is no per-target or per-file failure isolation. The first
//! failure aborts the whole run and becomes the process result; every
//! artifact already written stays in place. Rerunning with the same
//! inputs regenerates every artifact byte for byte.

use crate::config::{self, PackageManagerEntry};
use crate::context::ProjectLayout;
use crate::error::{Result, StencilError};
use crate::render::render_file;
use std::fs;
use std::path::PathBuf;

/// Outcome of one full run.
#[derive(Debug)]
pub struct RunSummary {
    /// The version string the artifacts were rendered with.
    pub version: String,
    /// Every artifact written, in render order.
    pub artifacts: Vec<PathBuf>,
}

/// Execute one full rendering run over every package-manager target.
///
/// # Arguments
///
/// * `layout` - Resolved project paths
///
/// # Returns
///
/// * `Ok(RunSummary)` - Every artifact of every target was written
/// * `Err(StencilError)` - The first failure encountered, any artifact
///   rendered before it left in place
pub fn run(layout: &ProjectLayout) -> Result<RunSummary> {
    let version = config::read_version(&layout.version_file)?;
    let base = config::base_configuration(&version);

    let mut artifacts = Vec::new();

    for entry in config::PACKAGE_MANAGERS {
        let merged = config::overlay(&base, &entry.overrides());

        let build_dir = layout.build_dir_for(entry.package_manager);
        fs::create_dir_all(&build_dir).map_err(|e| {
            StencilError::Filesystem(format!(
                "failed to create build directory '{}': {}",
                build_dir.display(),
                e
            ))
        })?;

        for (source, dest) in render_pairs(layout, entry) {
            render_file(&merged, &source, &dest)?;
            artifacts.push(dest);
        }
    }

    let summary = RunSummary { version, artifacts };
    print_summary(layout, &summary);
    Ok(summary)
}

/// The three source/destination pairs for one target, in render order.
fn render_pairs(layout: &ProjectLayout, entry: &PackageManagerEntry) -> [(PathBuf, PathBuf); 3] {
    let pm = entry.package_manager;
    [
        (layout.vm_template(), layout.vm_output(pm)),
        (layout.descriptor_template(), layout.descriptor_output(pm)),
        (layout.setup_template(pm), layout.setup_output(pm)),
    ]
}

/// Print the written artifacts, paths shown relative to the project
/// root.
fn print_summary(layout: &ProjectLayout, summary: &RunSummary) {
    println!(
        "Rendered packaging artifacts for version {}:",
        summary.version
    );
    for artifact in &summary.artifacts {
        let shown = artifact.strip_prefix(&layout.root).unwrap_or(artifact.as_path());
        println!("  {}", shown.display());
    }
    println!(
        "{} target(s), {} file(s) written.",
        config::PACKAGE_MANAGERS.len(),
        summary.artifacts.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes;
    use crate::test_support::write_project_fixture;
    use chrono::{Datelike, Utc};
    use serde_json::Value;
    use tempfile::TempDir;

    fn fixture_layout(version_file_content: &str) -> (TempDir, ProjectLayout) {
        let dir = TempDir::new().unwrap();
        write_project_fixture(dir.path(), version_file_content);
        let layout = ProjectLayout::resolve_from(dir.path());
        (dir, layout)
    }

    #[test]
    fn test_run_renders_every_artifact() {
        let (_dir, layout) = fixture_layout("1.2.3\n");

        let summary = run(&layout).unwrap();

        assert_eq!(summary.version, "1.2.3");
        assert_eq!(
            summary.artifacts,
            vec![
                layout.vm_output("deb"),
                layout.descriptor_output("deb"),
                layout.setup_output("deb"),
            ]
        );
        for artifact in &summary.artifacts {
            assert!(artifact.is_file(), "missing artifact: {}", artifact.display());
        }
    }

    #[test]
    fn test_run_substitutes_target_values() {
        let (_dir, layout) = fixture_layout("1.2.3\n");

        run(&layout).unwrap();

        let vagrantfile = fs::read_to_string(layout.vm_output("deb")).unwrap();
        assert!(vagrantfile.contains("config.vm.box = \"ubuntu/xenial64\""));
        assert!(vagrantfile.contains("config.vm.hostname = \"shylock-build\""));
        assert!(vagrantfile.contains("path: \"deb_setup.sh\""));
        assert!(!vagrantfile.contains('$'), "unexpanded placeholder left behind");
    }

    #[test]
    fn test_run_renders_the_descriptor_as_valid_json() {
        let (_dir, layout) = fixture_layout("1.2.3\n");

        run(&layout).unwrap();

        let raw = fs::read_to_string(layout.descriptor_output("deb")).unwrap();
        let descriptor: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(descriptor["name"], "shylock");
        assert_eq!(descriptor["version"], "1.2.3");
        assert_eq!(descriptor["package_manager"], "deb");
        assert_eq!(
            descriptor["copyright"],
            format!("{:04}", Utc::now().year())
        );
        assert_eq!(
            descriptor["description"],
            crate::config::APP_DESCRIPTION
        );
    }

    #[test]
    fn test_descriptor_scenario_with_minimal_template() {
        let (_dir, layout) = fixture_layout("1.2.3\n");
        fs::write(
            layout.descriptor_template(),
            "{\"name\": \"$app_name\", \"version\": \"$version\"}",
        )
        .unwrap();

        run(&layout).unwrap();

        let raw = fs::read_to_string(layout.descriptor_output("deb")).unwrap();
        let descriptor: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(descriptor["name"], "shylock");
        assert_eq!(descriptor["version"], "1.2.3");
    }

    #[test]
    fn test_run_preserves_dollar_escapes_in_scripts() {
        let (_dir, layout) = fixture_layout("1.2.3\n");

        run(&layout).unwrap();

        let script = fs::read_to_string(layout.setup_output("deb")).unwrap();
        assert!(script.contains("mkdir -p $OUT"), "got: {}", script);
        assert!(script.contains("building shylock 1.2.3 for deb"));
    }

    #[test]
    fn test_run_trims_the_version_file() {
        let (_dir, layout) = fixture_layout("  2.0.0\n\n");

        let summary = run(&layout).unwrap();

        assert_eq!(summary.version, "2.0.0");
        let script = fs::read_to_string(layout.setup_output("deb")).unwrap();
        assert!(script.contains("shylock 2.0.0"));
    }

    #[test]
    fn test_run_is_idempotent() {
        let (_dir, layout) = fixture_layout("1.2.3\n");

        let first = run(&layout).unwrap();
        let first_bytes: Vec<Vec<u8>> = first
            .artifacts
            .iter()
            .map(|p| fs::read(p).unwrap())
            .collect();

        let second = run(&layout).unwrap();
        let second_bytes: Vec<Vec<u8>> = second
            .artifacts
            .iter()
            .map(|p| fs::read(p).unwrap())
            .collect();

        assert_eq!(first.artifacts, second.artifacts);
        assert_eq!(first_bytes, second_bytes);
    }

    #[test]
    fn test_run_creates_build_directories_with_parents() {
        let (_dir, layout) = fixture_layout("1.2.3\n");
        assert!(!layout.build_dir.exists());

        run(&layout).unwrap();

        assert!(layout.build_dir_for("deb").is_dir());
    }

    #[test]
    fn test_missing_version_file_aborts_before_any_output() {
        let (dir, layout) = fixture_layout("1.2.3\n");
        fs::remove_file(&layout.version_file).unwrap();

        let err = run(&layout).unwrap_err();

        match &err {
            StencilError::MissingInput(p) => assert_eq!(p, &layout.version_file),
            other => panic!("expected MissingInput, got: {:?}", other),
        }
        assert_eq!(err.exit_code(), exit_codes::MISSING_INPUT);
        assert!(!dir.path().join("build").exists());
    }

    #[test]
    fn test_missing_template_aborts_the_run() {
        let (_dir, layout) = fixture_layout("1.2.3\n");
        fs::remove_file(layout.descriptor_template()).unwrap();

        let err = run(&layout).unwrap_err();

        match &err {
            StencilError::MissingInput(p) => assert_eq!(p, &layout.descriptor_template()),
            other => panic!("expected MissingInput, got: {:?}", other),
        }
        // The Vagrantfile renders before the descriptor and stays.
        assert!(layout.vm_output("deb").is_file());
        assert!(!layout.descriptor_output("deb").exists());
        assert!(!layout.setup_output("deb").exists());
    }

    #[test]
    fn test_unresolved_placeholder_aborts_with_template_error() {
        let (_dir, layout) = fixture_layout("1.2.3\n");
        fs::write(layout.descriptor_template(), "{\"field\": \"$not_a_key\"}\n").unwrap();

        let err = run(&layout).unwrap_err();

        assert_eq!(err.exit_code(), exit_codes::TEMPLATE_FAILURE);
        let msg = err.to_string();
        assert!(msg.contains("not_a_key"), "got: {}", msg);
        assert!(msg.contains("pm.json"), "got: {}", msg);
        assert!(!layout.descriptor_output("deb").exists());
    }

    #[test]
    fn test_failed_rerun_keeps_previous_artifacts() {
        let (_dir, layout) = fixture_layout("1.2.3\n");
        run(&layout).unwrap();
        let before = fs::read_to_string(layout.descriptor_output("deb")).unwrap();

        // Poison one template and rerun.
        fs::write(layout.descriptor_template(), "$broken").unwrap();
        run(&layout).unwrap_err();

        let after = fs::read_to_string(layout.descriptor_output("deb")).unwrap();
        assert_eq!(before, after, "failed render must not touch the artifact");
    }

    #[test]
    fn test_build_path_collision_is_a_filesystem_error() {
        let (dir, layout) = fixture_layout("1.2.3\n");
        // A plain file where the output tree should go.
        fs::write(dir.path().join("build"), "in the way").unwrap();

        let err = run(&layout).unwrap_err();

        assert!(matches!(err, StencilError::Filesystem(_)));
        assert_eq!(err.exit_code(), exit_codes::FILESYSTEM_FAILURE);
    }

    #[test]
    fn test_run_with_empty_version_renders_empty_string() {
        let (_dir, layout) = fixture_layout("\n");

        let summary = run(&layout).unwrap();

        assert_eq!(summary.version, "");
        let script = fs::read_to_string(layout.setup_output("deb")).unwrap();
        assert!(script.contains("building shylock  for deb"));
    }
}
