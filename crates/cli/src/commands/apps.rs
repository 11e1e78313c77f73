use anyhow::{Context, Result};

use crate::commands::{build_catalog, print_app_line, AppEntry, CatalogArgs};

/// List the effective catalog of known apps.
pub fn apps_command(args: &CatalogArgs, json: bool) -> Result<()> {
    let apps = build_catalog(args)?;
    let entries: Vec<AppEntry> = apps.iter().map(AppEntry::from).collect();

    if json {
        let serialized =
            serde_json::to_string_pretty(&entries).context("Failed to serialize apps to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Known apps ({}):", entries.len());
    if entries.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for entry in &entries {
        print_app_line(entry);
    }

    Ok(())
}
