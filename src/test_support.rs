//! Shared helpers for tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Scoped change of the process working directory.
///
/// The working directory is process-global, so the guard also holds a
/// lock for its lifetime; tests touching the working directory must
/// additionally be marked `#[serial]`.
pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Template used as the VM provisioning fixture.
pub(crate) const FIXTURE_VM_TEMPLATE: &str = "\
Vagrant.configure(\"2\") do |config|
  config.vm.box = \"$distro_box\"
  config.vm.hostname = \"$app_name-build\"
  config.vm.provision \"shell\", path: \"${package_manager}_setup.sh\"
end
";

/// Template used as the package descriptor fixture.
pub(crate) const FIXTURE_DESCRIPTOR_TEMPLATE: &str = "\
{
  \"name\": \"$app_name\",
  \"version\": \"$version\",
  \"description\": \"$description\",
  \"copyright\": \"$year\",
  \"package_manager\": \"$package_manager\"
}
";

/// Template used as the deb setup-script fixture. Contains a `$$`
/// escape so end-to-end runs exercise it.
pub(crate) const FIXTURE_SETUP_TEMPLATE: &str = "\
#!/bin/sh
set -e
OUT=/vagrant/out
mkdir -p $$OUT
echo \"building $app_name $version for $package_manager\"
";

/// Lay out a complete project fixture under `root`: the version file
/// and the three template sources a run expects.
pub(crate) fn write_project_fixture(root: &Path, version_file_content: &str) {
    let packaging = root.join("packaging");
    fs::create_dir_all(&packaging).unwrap();

    fs::write(root.join("VERSION"), version_file_content).unwrap();
    fs::write(packaging.join("Vagrantfile"), FIXTURE_VM_TEMPLATE).unwrap();
    fs::write(packaging.join("pm.json"), FIXTURE_DESCRIPTOR_TEMPLATE).unwrap();
    fs::write(packaging.join("deb_setup.sh"), FIXTURE_SETUP_TEMPLATE).unwrap();
}
