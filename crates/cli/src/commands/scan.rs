use anyhow::{bail, Context, Result};
use piracy_core::detect::{find_all_pirate_apps, find_pirate_app, InstalledPackages};
use serde::Serialize;
use tracing::info;

use crate::commands::{build_catalog, print_app_line, AppEntry, CatalogArgs};
use crate::read_package_list;

#[derive(Debug, Serialize)]
pub struct ScanReport {
    /// Number of installed packages read from the listing.
    pub installed: usize,
    /// Number of catalog entries checked.
    pub checked: usize,
    pub detected: Vec<AppEntry>,
}

/// Options for `scan`.
#[derive(Debug, Clone, Default)]
pub struct ScanArgs {
    pub packages: String,
    pub catalog: CatalogArgs,
    /// Report every match instead of stopping at the first.
    pub all: bool,
    pub json: bool,
    /// Exit with an error when anything is detected.
    pub fail_on_detect: bool,
}

/// Check a package listing against the catalog.
pub fn scan_command(args: &ScanArgs) -> Result<ScanReport> {
    let listing = read_package_list(&args.packages)?;
    let installed = InstalledPackages::parse(&listing);
    let apps = build_catalog(&args.catalog)?;

    let detected: Vec<AppEntry> = if args.all {
        find_all_pirate_apps(&installed, &apps).into_iter().map(AppEntry::from).collect()
    } else {
        find_pirate_app(&installed, &apps).into_iter().map(AppEntry::from).collect()
    };
    info!(installed = installed.len(), detected = detected.len(), "scan finished");

    let report = ScanReport { installed: installed.len(), checked: apps.len(), detected };

    if args.json {
        let serialized = serde_json::to_string_pretty(&report)
            .context("Failed to serialize scan report to JSON")?;
        println!("{}", serialized);
    } else {
        println!(
            "Scanned {} installed packages against {} known apps.",
            report.installed, report.checked
        );
        if report.detected.is_empty() {
            println!("No pirate apps detected.");
        } else {
            println!("Pirate apps detected ({}):", report.detected.len());
            for entry in &report.detected {
                print_app_line(entry);
            }
        }
    }

    if args.fail_on_detect && !report.detected.is_empty() {
        bail!("Pirate app detected: {}", report.detected[0].name);
    }

    Ok(report)
}
