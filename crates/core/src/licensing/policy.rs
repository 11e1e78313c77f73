use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating license-server data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("query parameter invalid: {0}")]
    InvalidQueryParameter(String),

    #[error("unknown license response code {0:#06x}")]
    UnknownResponseCode(i32),

    #[error("unknown license response '{0}'. Allowed: licensed, not-licensed, retry")]
    UnknownResponse(String),
}

/// Outcome reported by the license server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LicenseResponse {
    /// The server returned a valid license response.
    Licensed,
    /// The server definitively reported the user as not licensed.
    NotLicensed,
    /// The response could not be determined, e.g. because of networking.
    Retry,
}

impl LicenseResponse {
    /// Wire code used by the license server.
    pub fn code(self) -> i32 {
        match self {
            LicenseResponse::Licensed => 0x0B8A,
            LicenseResponse::NotLicensed => 0x01B3,
            LicenseResponse::Retry => 0x0C48,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LicenseResponse::Licensed => "licensed",
            LicenseResponse::NotLicensed => "not-licensed",
            LicenseResponse::Retry => "retry",
        }
    }
}

impl TryFrom<i32> for LicenseResponse {
    type Error = ValidationError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0x0B8A => Ok(LicenseResponse::Licensed),
            0x01B3 => Ok(LicenseResponse::NotLicensed),
            0x0C48 => Ok(LicenseResponse::Retry),
            other => Err(ValidationError::UnknownResponseCode(other)),
        }
    }
}

impl FromStr for LicenseResponse {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "licensed" => Ok(LicenseResponse::Licensed),
            "not-licensed" => Ok(LicenseResponse::NotLicensed),
            "retry" => Ok(LicenseResponse::Retry),
            other => Err(ValidationError::UnknownResponse(other.to_string())),
        }
    }
}

impl fmt::Display for LicenseResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated server response payload.
///
/// Only `extra` is consumed by the policies here: a URL query string carrying
/// `VT` (validity timestamp), `GT` (retry-until timestamp) and `GR` (max retries).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseData {
    #[serde(default)]
    pub extra: String,
}

impl ResponseData {
    pub fn with_extra(extra: impl Into<String>) -> Self {
        Self { extra: extra.into() }
    }
}

/// Decides whether the user may access the application.
pub trait Policy {
    /// Feed the result of a server exchange. `data` may be `None` for `Retry`.
    fn process_server_response(&mut self, response: LicenseResponse, data: Option<&ResponseData>);

    fn allow_access(&self) -> bool;
}

/// Allows access if and only if the last response was `Licensed`.
///
/// Nothing is cached, so a fresh instance denies access until the server has
/// been contacted.
#[derive(Debug, Clone)]
pub struct StrictPolicy {
    last_response: LicenseResponse,
}

impl StrictPolicy {
    pub fn new() -> Self {
        Self { last_response: LicenseResponse::Retry }
    }

    pub fn last_response(&self) -> LicenseResponse {
        self.last_response
    }
}

impl Default for StrictPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for StrictPolicy {
    fn process_server_response(&mut self, response: LicenseResponse, _data: Option<&ResponseData>) {
        self.last_response = response;
    }

    fn allow_access(&self) -> bool {
        self.last_response == LicenseResponse::Licensed
    }
}
