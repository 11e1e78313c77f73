use anyhow::{bail, Result};
use piracy_core::config::CheckerConfig;

use crate::absolutize;

/// Write a default config file.
pub fn init_config_command(path: &str, force: bool) -> Result<()> {
    let path = absolutize(path)?;
    if path.exists() && !force {
        bail!("Config already exists at {} (use --force to overwrite)", path.display());
    }

    let config = CheckerConfig::default();
    config.save(&path)?;

    println!("Wrote config:");
    println!("  Path: {}", path.display());
    println!("  Include stores: {}", config.include_stores);

    Ok(())
}
