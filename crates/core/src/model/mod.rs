//! Core data model for known piracy-related applications.
//!
//! A [`PirateApp`] is an immutable record: a display name, an [`AppType`]
//! category, and the package identifier split into fragments. The full
//! identifier is only ever assembled on demand via [`PirateApp::package_name`].

use serde::{Deserialize, Serialize};

/// Kind of piracy-related application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppType {
    /// Patchers, license crackers, in-app purchase emulators and cheat tools.
    Pirate,
    /// Third-party stores known to distribute cracked apps.
    Store,
    /// Anything else, including user-supplied entries.
    #[default]
    Other,
}

impl AppType {
    /// Stable lowercase label used by CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            AppType::Pirate => "pirate",
            AppType::Store => "store",
            AppType::Other => "other",
        }
    }
}

impl std::fmt::Display for AppType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A known piracy-related application.
///
/// The fragments passed to the constructor are copied, so the record never
/// aliases caller storage and cannot change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PirateApp {
    name: String,
    app_type: AppType,
    pack: Vec<String>,
}

impl PirateApp {
    /// Create a record with the default [`AppType::Other`] category.
    pub fn new<S: AsRef<str>>(name: impl Into<String>, pack: &[S]) -> Self {
        Self::with_type(name, pack, AppType::default())
    }

    /// Create a record with an explicit category.
    pub fn with_type<S: AsRef<str>>(
        name: impl Into<String>,
        pack: &[S],
        app_type: AppType,
    ) -> Self {
        let pack = pack.iter().map(|fragment| fragment.as_ref().to_owned()).collect();
        Self { name: name.into(), app_type, pack }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn app_type(&self) -> AppType {
        self.app_type
    }

    /// Full package identifier: every fragment concatenated in order.
    pub fn package_name(&self) -> String {
        self.pack.concat()
    }

    #[deprecated(note = "use `package_name` instead")]
    pub fn package(&self) -> String {
        self.package_name()
    }
}
