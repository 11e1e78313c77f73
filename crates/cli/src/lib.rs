use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use piracy_core::config::DEFAULT_CONFIG_FILE;

pub mod commands;
pub mod logging;

/// Resolve a path argument against the current working directory.
pub fn absolutize(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir().context("Failed to get current directory")?;
    Ok(cwd.join(path))
}

/// Pick the config file to use: the explicit one, or `piracy-checker.json`
/// in the current directory when it exists.
pub fn resolve_config_path(explicit: Option<&str>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        return Ok(Some(absolutize(path)?));
    }
    let default = absolutize(DEFAULT_CONFIG_FILE)?;
    Ok(default.is_file().then_some(default))
}

/// Read a package listing from a file, or from stdin when `path` is `-`.
pub fn read_package_list(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("Failed to read package list from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read package list at {path}"))
}
