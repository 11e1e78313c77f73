//! piracy-core
//!
//! Core library for detecting known piracy-related applications and for
//! evaluating license-server responses.
//!
//! This crate defines the app model, the built-in catalog, package-list
//! detection, the license policies, and the preference storage they persist
//! to. Frontends (the CLI) stay thin so everything here is testable directly.

pub mod catalog;
pub mod config;
pub mod db;
pub mod detect;
pub mod licensing;
pub mod model;

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
