//! Base configuration assembly.

use chrono::{Datelike, Utc};
use std::collections::HashMap;

/// The string-keyed mapping consumed by the template engine.
pub type ConfigMap = HashMap<String, String>;

/// Application name substituted into every artifact.
pub const APP_NAME: &str = "shylock";

/// One-line application description substituted into package metadata.
pub const APP_DESCRIPTION: &str = "shylock is an attempt to bring sanity to distribute system API's that act just like a file system";

/// Build the base configuration map shared by every target.
///
/// Keys: `app_name`, `description`, `version`, `year`. Per-target
/// values are layered on top by [`super::overlay`].
///
/// The year is the current calendar year from the system clock,
/// formatted as four digits. The version is taken as given; reading
/// and trimming the version file is [`super::read_version`]'s job.
pub fn base_configuration(version: &str) -> ConfigMap {
    ConfigMap::from([
        ("app_name".to_string(), APP_NAME.to_string()),
        ("description".to_string(), APP_DESCRIPTION.to_string()),
        ("version".to_string(), version.to_string()),
        ("year".to_string(), current_year()),
    ])
}

/// Current calendar year as a four-digit string.
fn current_year() -> String {
    format!("{:04}", Utc::now().year())
}
