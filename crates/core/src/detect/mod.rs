//! Detection of installed piracy-related apps.
//!
//! Input is the set of package identifiers installed on a device, typically
//! captured with `adb shell pm list packages`.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::model::PirateApp;

/// Set of package identifiers installed on a device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledPackages {
    packages: BTreeSet<String>,
}

impl InstalledPackages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a package listing, one identifier per line.
    ///
    /// Accepts bare identifiers as well as `pm list packages` output
    /// (`package:com.foo`) and its `-f` variant
    /// (`package:/data/app/.../base.apk=com.foo`). Blank lines and `#`
    /// comments are skipped.
    pub fn parse(text: &str) -> Self {
        text.lines().filter_map(parse_line).collect()
    }

    pub fn insert(&mut self, package: impl Into<String>) -> bool {
        self.packages.insert(package.into())
    }

    pub fn contains(&self, package: &str) -> bool {
        self.packages.contains(package)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for InstalledPackages {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { packages: iter.into_iter().map(Into::into).collect() }
    }
}

fn parse_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("package:").unwrap_or(line);
    // `-f` output carries the apk path before the last '='.
    let id = match line.rfind('=') {
        Some(idx) => &line[idx + 1..],
        None => line,
    };
    let id = id.trim();
    (!id.is_empty()).then(|| id.to_string())
}

/// First app, in catalog order, whose package is installed.
pub fn find_pirate_app<'a>(
    installed: &InstalledPackages,
    apps: &'a [PirateApp],
) -> Option<&'a PirateApp> {
    let found = apps.iter().find(|app| installed.contains(&app.package_name()));
    match found {
        Some(app) => info!(name = app.name(), app_type = %app.app_type(), "pirate app detected"),
        None => debug!(checked = apps.len(), "no pirate app detected"),
    }
    found
}

/// Every app whose package is installed, in catalog order.
pub fn find_all_pirate_apps<'a>(
    installed: &InstalledPackages,
    apps: &'a [PirateApp],
) -> Vec<&'a PirateApp> {
    let found: Vec<&PirateApp> =
        apps.iter().filter(|app| installed.contains(&app.package_name())).collect();
    debug!(checked = apps.len(), found = found.len(), "scanned installed packages");
    found
}
