//! Project layout resolution.
//!
//! Every input and output lives at a fixed path relative to the
//! project root: the version file at the root, template sources under
//! `packaging/`, rendered artifacts under `build/<package_manager>/`.
//! The root is resolved once at startup (it is the current working
//! directory) and the rest of the code asks this module for absolute
//! paths instead of assembling them ad hoc.

use crate::error::{Result, StencilError};
use std::env;
use std::path::{Path, PathBuf};

/// Version file name at the project root.
pub const VERSION_FILE: &str = "VERSION";

/// Directory holding the template sources.
pub const TEMPLATE_DIR: &str = "packaging";

/// Root of the rendered output tree.
pub const BUILD_DIR: &str = "build";

/// File name of the VM provisioning template and its rendered
/// artifact.
pub const VM_FILE: &str = "Vagrantfile";

/// File name of the package descriptor template. The rendered artifact
/// is named after the package manager instead (`<pm>.json`).
pub const DESCRIPTOR_TEMPLATE: &str = "pm.json";

/// Resolved paths for one rendering run.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    /// Project root directory.
    pub root: PathBuf,
    /// Version file (`{root}/VERSION`).
    pub version_file: PathBuf,
    /// Template source directory (`{root}/packaging`).
    pub template_dir: PathBuf,
    /// Output root (`{root}/build`).
    pub build_dir: PathBuf,
}

impl ProjectLayout {
    /// Resolve the layout from the current working directory.
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            StencilError::Filesystem(format!(
                "failed to get current working directory: {}",
                e
            ))
        })?;
        Ok(Self::resolve_from(cwd))
    }

    /// Resolve the layout from a known project root.
    pub fn resolve_from<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let version_file = root.join(VERSION_FILE);
        let template_dir = root.join(TEMPLATE_DIR);
        let build_dir = root.join(BUILD_DIR);
        Self {
            root,
            version_file,
            template_dir,
            build_dir,
        }
    }

    /// Path of the VM provisioning template.
    pub fn vm_template(&self) -> PathBuf {
        self.template_dir.join(VM_FILE)
    }

    /// Path of the shared package descriptor template.
    pub fn descriptor_template(&self) -> PathBuf {
        self.template_dir.join(DESCRIPTOR_TEMPLATE)
    }

    /// Path of the setup-script template for one package manager.
    pub fn setup_template(&self, package_manager: &str) -> PathBuf {
        self.template_dir
            .join(format!("{}_setup.sh", package_manager))
    }

    /// Output directory for one package manager (`build/<pm>`).
    pub fn build_dir_for(&self, package_manager: &str) -> PathBuf {
        self.build_dir.join(package_manager)
    }

    /// Rendered VM provisioning file (`build/<pm>/Vagrantfile`).
    pub fn vm_output(&self, package_manager: &str) -> PathBuf {
        self.build_dir_for(package_manager).join(VM_FILE)
    }

    /// Rendered package descriptor (`build/<pm>/<pm>.json`).
    pub fn descriptor_output(&self, package_manager: &str) -> PathBuf {
        self.build_dir_for(package_manager)
            .join(format!("{}.json", package_manager))
    }

    /// Rendered setup script (`build/<pm>/<pm>_setup.sh`).
    pub fn setup_output(&self, package_manager: &str) -> PathBuf {
        self.build_dir_for(package_manager)
            .join(format!("{}_setup.sh", package_manager))
    }
}
