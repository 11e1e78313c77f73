use std::path::PathBuf;

use anyhow::{Context, Result};
use piracy_core::catalog::{apps_for, load_extra_apps, CatalogOptions};
use piracy_core::config::CheckerConfig;
use piracy_core::model::{AppType, PirateApp};
use serde::Serialize;
use tracing::debug;

use crate::{absolutize, resolve_config_path};

/// Catalog selection shared by `apps` and `scan`.
#[derive(Debug, Clone, Default)]
pub struct CatalogArgs {
    pub config: Option<String>,
    pub include_stores: bool,
    /// Exclude stores even when the config enables them.
    pub exclude_stores: bool,
    pub extra: Option<String>,
}

/// Serializable view of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub app_type: AppType,
    pub package_name: String,
}

impl From<&PirateApp> for AppEntry {
    fn from(app: &PirateApp) -> Self {
        Self {
            name: app.name().to_string(),
            app_type: app.app_type(),
            package_name: app.package_name(),
        }
    }
}

/// Load the config (if any) and build the effective catalog. Flags win over config.
pub fn build_catalog(args: &CatalogArgs) -> Result<Vec<PirateApp>> {
    let config_path = resolve_config_path(args.config.as_deref())?;
    let config = match &config_path {
        Some(path) => CheckerConfig::load(path)?,
        None => CheckerConfig::default(),
    };

    let extra_path: Option<PathBuf> = match &args.extra {
        Some(path) => Some(absolutize(path)?),
        None => config_path.as_deref().and_then(|p| config.resolved_extra_apps_path(p)),
    };

    let include_stores = if args.exclude_stores {
        false
    } else {
        args.include_stores || config.include_stores
    };
    let mut options = CatalogOptions::default().with_stores(include_stores);
    if let Some(path) = &extra_path {
        let extra = load_extra_apps(path)
            .with_context(|| format!("Failed to load extra apps from {}", path.display()))?;
        options = options.with_extra_apps(extra);
    }
    debug!(
        config = ?config_path,
        extra = ?extra_path,
        include_stores = options.include_stores,
        "resolved catalog options"
    );

    Ok(apps_for(&options))
}

/// Print one app as a human-readable line.
pub fn print_app_line(app: &AppEntry) {
    println!("  - {} [{}] {}", app.name, app.app_type, app.package_name);
}
