//! Catalog of known piracy-related applications.
//!
//! Package identifiers are stored as fragments so the complete strings never
//! show up verbatim in the compiled binary's string table.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::model::{AppType, PirateApp};

/// Errors raised while loading extra app definitions.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read app definitions at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON app definitions at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse YAML app definitions at {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Unsupported app definition format for {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),
}

/// Serializable definition of an app, as found in user-supplied files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PirateAppDef {
    pub name: String,
    pub fragments: Vec<String>,
    #[serde(default, rename = "type")]
    pub app_type: AppType,
}

impl From<&PirateAppDef> for PirateApp {
    fn from(def: &PirateAppDef) -> Self {
        PirateApp::with_type(def.name.clone(), def.fragments.as_slice(), def.app_type)
    }
}

impl From<PirateAppDef> for PirateApp {
    fn from(def: PirateAppDef) -> Self {
        PirateApp::from(&def)
    }
}

/// Options controlling which apps make up the effective catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    /// Include third-party stores ([`AppType::Store`]) from the built-in list.
    pub include_stores: bool,
    /// Additional apps, always included regardless of their type.
    pub extra_apps: Vec<PirateApp>,
}

impl CatalogOptions {
    pub fn with_stores(mut self, include_stores: bool) -> Self {
        self.include_stores = include_stores;
        self
    }

    pub fn with_extra_apps(mut self, apps: impl IntoIterator<Item = PirateApp>) -> Self {
        self.extra_apps.extend(apps);
        self
    }
}

/// Build the effective catalog: built-ins (stores filtered out unless
/// requested) followed by the extra apps.
pub fn apps_for(options: &CatalogOptions) -> Vec<PirateApp> {
    let mut apps: Vec<PirateApp> = builtin_apps()
        .into_iter()
        .filter(|app| options.include_stores || app.app_type() != AppType::Store)
        .collect();
    apps.extend(options.extra_apps.iter().cloned());
    debug!(
        total = apps.len(),
        extra = options.extra_apps.len(),
        include_stores = options.include_stores,
        "built app catalog"
    );
    apps
}

/// Load extra app definitions from a JSON or YAML file, picked by extension.
pub fn load_extra_apps(path: &Path) -> Result<Vec<PirateApp>, CatalogError> {
    let text = fs::read_to_string(path)
        .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
    let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase());
    let defs: Vec<PirateAppDef> = match ext.as_deref() {
        Some("json") => serde_json::from_str(&text)
            .map_err(|source| CatalogError::Json { path: path.to_path_buf(), source })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
            .map_err(|source| CatalogError::Yaml { path: path.to_path_buf(), source })?,
        _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
    };
    debug!(path = %path.display(), count = defs.len(), "loaded extra app definitions");
    Ok(defs.into_iter().map(PirateApp::from).collect())
}

/// Every app known out of the box, in detection order.
pub fn builtin_apps() -> Vec<PirateApp> {
    use AppType::{Pirate, Store};

    let entries: &[(&str, &[&str], AppType)] = &[
        ("LuckyPatcher", &["com.", "chel", "pus.", "lacky", "patch"], Pirate),
        ("LuckyPatcher", &["com.", "dimon", "video.", "lucky", "patcher"], Pirate),
        ("LuckyPatcher", &["com.", "for", "pda.", "lp"], Pirate),
        (
            "LuckyPatcher",
            &["com.", "android.", "vending.", "billing.", "InApp", "Billing", "Service.", "LUCK"],
            Pirate,
        ),
        (
            "LuckyPatcher",
            &["com.", "android.", "vending.", "billing.", "InApp", "Billing", "Service.", "LOCK"],
            Pirate,
        ),
        (
            "LuckyPatcher",
            &["com.", "android.", "vending.", "billing.", "InApp", "Billing", "Service.", "CLON"],
            Pirate,
        ),
        (
            "LuckyPatcher",
            &["com.", "android.", "vending.", "billing.", "InApp", "Billing", "Service.", "CRAC"],
            Pirate,
        ),
        ("LuckyPatcher", &["com.", "android.", "vend", "inc"], Pirate),
        ("UretPatcher", &["uret.", "jasi", "2169.", "patcher"], Pirate),
        ("UretPatcher", &["zone.", "jasi", "2169.", "uret", "patcher"], Pirate),
        ("ActionLauncherPatcher", &["p.", "jasi", "2169.", "al3"], Pirate),
        ("Freedom", &["cc.", "mad", "kite.", "freedom"], Pirate),
        ("Freedom", &["cc.", "cz.", "mad", "kite.", "freedom"], Pirate),
        ("CreeHack", &["org.", "cree", "plays.", "hack"], Pirate),
        ("HappyMod", &["com.", "happy", "mod.", "apk"], Pirate),
        ("Game Hacker", &["org.", "sb", "tools.", "game", "hack"], Pirate),
        ("Game Killer Cheats", &["com.", "zune.", "game", "killer"], Pirate),
        ("AGK - App Killer", &["com.", "aag.", "killer"], Pirate),
        ("Game Killer", &["com.", "killer", "app.", "game", "killer"], Pirate),
        ("Game Killer", &["cn.", "lm.", "sq"], Pirate),
        ("Game CheatIng Hacker", &["net.", "schwarzis.", "game_", "cih"], Pirate),
        ("Game Hacker", &["com.", "base", "app", "full.", "fwd"], Pirate),
        (
            "Content Guard Disabler",
            &["com.", "github.", "one", "minus", "one.", "disable", "content", "guard"],
            Pirate,
        ),
        (
            "Content Guard Disabler",
            &["com.", "one", "minus", "one.", "disable", "content", "guard"],
            Pirate,
        ),
        ("Aptoide", &["cm.", "aptoide.", "pt"], Store),
        ("BlackMart", &["org.", "black", "mart.", "market"], Store),
        ("BlackMart", &["com.", "black", "mart.", "market"], Store),
        ("Mobogenie", &["com.", "mobo", "genie"], Store),
        ("1Mobile", &["me.", "one", "mobile.", "android"], Store),
        ("GetApk", &["com.", "repo", "droid.", "app"], Store),
        ("GetJar", &["com.", "get", "jar.", "rewards"], Store),
        ("SlideMe", &["com.", "slide", "me.", "sam.", "manager"], Store),
        ("ACMarket", &["net.", "app", "cake"], Store),
        ("ACMarket", &["ac.", "market.", "store"], Store),
        ("AppCake", &["com.", "app", "cake"], Store),
        ("Z Market", &["com.", "zm", "app"], Store),
        ("Modded Play Store", &["com.", "dv.", "market", "mod.", "installer"], Store),
        ("Mobilism Market", &["org.", "mobilism.", "android"], Store),
        ("All-in-one Downloader", &["com.", "all", "in", "one.", "free"], Store),
    ];

    entries
        .iter()
        .map(|&(name, pack, app_type)| PirateApp::with_type(name, pack, app_type))
        .collect()
}
