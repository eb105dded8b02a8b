//! Package-manager target table.
//!
//! Targets are a fixed, ordered table compiled into the binary. Each
//! entry carries the values merged over the base configuration for
//! that target's rendering pass.

use super::model::ConfigMap;

/// One target packaging system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageManagerEntry {
    /// Package-manager key. Selects the setup-script template and
    /// names the output directory and artifacts
    /// (`build/<key>/<key>.json`, `build/<key>/<key>_setup.sh`).
    pub package_manager: &'static str,

    /// Vagrant box identifier of the distro this target builds on.
    pub distro_box: &'static str,
}

/// Package-manager targets, processed in table order.
pub const PACKAGE_MANAGERS: &[PackageManagerEntry] = &[PackageManagerEntry {
    package_manager: "deb",
    distro_box: "ubuntu/xenial64",
}];

impl PackageManagerEntry {
    /// The entry's override map, merged over the base configuration.
    ///
    /// On a key collision the override value wins.
    pub fn overrides(&self) -> ConfigMap {
        ConfigMap::from([
            (
                "package_manager".to_string(),
                self.package_manager.to_string(),
            ),
            ("distro_box".to_string(), self.distro_box.to_string()),
        ])
    }
}
