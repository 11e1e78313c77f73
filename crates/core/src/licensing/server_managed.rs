use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use super::clock::{Clock, SystemClock, MILLIS_PER_MINUTE};
use super::policy::{LicenseResponse, Policy, ResponseData};
use super::query::decode_query;
use crate::db::{DbResult, PreferenceStore};

const PREF_LAST_RESPONSE: &str = "lastResponse";
const PREF_VALIDITY_TIMESTAMP: &str = "validityTimestamp";
const PREF_RETRY_UNTIL: &str = "retryUntil";
const PREF_MAX_RETRIES: &str = "maxRetries";
const PREF_RETRY_COUNT: &str = "retryCount";

/// Snapshot of a [`ServerManagedPolicy`], suitable for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerManagedState {
    pub last_response: LicenseResponse,
    pub validity_timestamp: i64,
    pub retry_until: i64,
    pub max_retries: i64,
    pub retry_count: i64,
    pub allow_access: bool,
}

/// Policy driven by the cache hints the license server sends in `extra`.
///
/// Access is allowed when either:
/// 1. a `Licensed` response was received and the validity timestamp (`VT`)
///    has not passed, or
/// 2. a `Retry` response was received in the last minute and we are still
///    before the retry-until timestamp (`GT`) or within the max retry count (`GR`).
///
/// State is loaded from and committed to the preference store so cached
/// licenses survive restarts. The time of the last response is not persisted.
pub struct ServerManagedPolicy<S: PreferenceStore, C: Clock = SystemClock> {
    prefs: S,
    clock: C,
    validity_timestamp: i64,
    retry_until: i64,
    max_retries: i64,
    retry_count: i64,
    last_response_time: i64,
    last_response: LicenseResponse,
}

impl<S: PreferenceStore> ServerManagedPolicy<S, SystemClock> {
    pub fn new(prefs: S) -> DbResult<Self> {
        Self::with_clock(prefs, SystemClock)
    }
}

impl<S: PreferenceStore, C: Clock> ServerManagedPolicy<S, C> {
    /// Load previously committed state from `prefs`.
    ///
    /// Missing or unparseable values fall back to `Retry` and zeros.
    pub fn with_clock(prefs: S, clock: C) -> DbResult<Self> {
        let last_response = prefs
            .get_string(PREF_LAST_RESPONSE)?
            .and_then(|raw| raw.parse::<i32>().ok())
            .and_then(|code| LicenseResponse::try_from(code).ok())
            .unwrap_or(LicenseResponse::Retry);
        let validity_timestamp = load_i64(&prefs, PREF_VALIDITY_TIMESTAMP)?;
        let retry_until = load_i64(&prefs, PREF_RETRY_UNTIL)?;
        let max_retries = load_i64(&prefs, PREF_MAX_RETRIES)?;
        let retry_count = load_i64(&prefs, PREF_RETRY_COUNT)?;

        Ok(Self {
            prefs,
            clock,
            validity_timestamp,
            retry_until,
            max_retries,
            retry_count,
            last_response_time: 0,
            last_response,
        })
    }

    /// Process a server response and commit the resulting state.
    ///
    /// Retry count is reset by any non-`Retry` response. `Licensed` applies
    /// the `VT`/`GT`/`GR` hints from `data.extra`; `NotLicensed` clears them.
    pub fn try_process_server_response(
        &mut self,
        response: LicenseResponse,
        data: Option<&ResponseData>,
    ) -> DbResult<()> {
        if response == LicenseResponse::Retry {
            self.set_retry_count(self.retry_count.saturating_add(1));
        } else {
            self.set_retry_count(0);
        }

        match response {
            LicenseResponse::Licensed => {
                let extras = decode_extras(data.map(|d| d.extra.as_str()).unwrap_or_default());
                self.set_validity_timestamp(extras.get("VT").map(String::as_str));
                self.set_retry_until(extras.get("GT").map(String::as_str));
                self.set_max_retries(extras.get("GR").map(String::as_str));
            }
            LicenseResponse::NotLicensed => {
                self.set_validity_timestamp(Some("0"));
                self.set_retry_until(Some("0"));
                self.set_max_retries(Some("0"));
            }
            LicenseResponse::Retry => {}
        }

        self.set_last_response(response);
        self.prefs.commit()?;
        debug!(%response, retry_count = self.retry_count, "processed license response");
        Ok(())
    }

    pub fn last_response(&self) -> LicenseResponse {
        self.last_response
    }

    pub fn retry_count(&self) -> i64 {
        self.retry_count
    }

    pub fn validity_timestamp(&self) -> i64 {
        self.validity_timestamp
    }

    pub fn retry_until(&self) -> i64 {
        self.retry_until
    }

    pub fn max_retries(&self) -> i64 {
        self.max_retries
    }

    pub fn state(&self) -> ServerManagedState {
        ServerManagedState {
            last_response: self.last_response,
            validity_timestamp: self.validity_timestamp,
            retry_until: self.retry_until,
            max_retries: self.max_retries,
            retry_count: self.retry_count,
            allow_access: self.allow_access(),
        }
    }

    /// Give back the underlying store.
    pub fn into_store(self) -> S {
        self.prefs
    }

    fn set_last_response(&mut self, response: LicenseResponse) {
        self.last_response_time = self.clock.now_millis();
        self.last_response = response;
        self.prefs.put_string(PREF_LAST_RESPONSE, &response.code().to_string());
    }

    fn set_retry_count(&mut self, count: i64) {
        self.retry_count = count;
        self.prefs.put_string(PREF_RETRY_COUNT, &count.to_string());
    }

    fn set_validity_timestamp(&mut self, raw: Option<&str>) {
        let value = match raw.and_then(|v| v.parse::<i64>().ok()) {
            Some(v) => v,
            None => {
                warn!("License validity timestamp (VT) missing, caching for a minute");
                self.clock.now_millis().saturating_add(MILLIS_PER_MINUTE)
            }
        };
        self.validity_timestamp = value;
        self.prefs.put_string(PREF_VALIDITY_TIMESTAMP, &value.to_string());
    }

    fn set_retry_until(&mut self, raw: Option<&str>) {
        let value = raw.and_then(|v| v.parse::<i64>().ok()).unwrap_or_else(|| {
            warn!("License retry timestamp (GT) missing, grace period disabled");
            0
        });
        self.retry_until = value;
        self.prefs.put_string(PREF_RETRY_UNTIL, &value.to_string());
    }

    fn set_max_retries(&mut self, raw: Option<&str>) {
        let value = raw.and_then(|v| v.parse::<i64>().ok()).unwrap_or_else(|| {
            warn!("License retry count (GR) missing, grace period disabled");
            0
        });
        self.max_retries = value;
        self.prefs.put_string(PREF_MAX_RETRIES, &value.to_string());
    }
}

impl<S: PreferenceStore, C: Clock> Policy for ServerManagedPolicy<S, C> {
    fn process_server_response(&mut self, response: LicenseResponse, data: Option<&ResponseData>) {
        if let Err(err) = self.try_process_server_response(response, data) {
            warn!(error = %err, "failed to commit license policy state");
        }
    }

    fn allow_access(&self) -> bool {
        let now = self.clock.now_millis();
        let retry_window_end = self.last_response_time.saturating_add(MILLIS_PER_MINUTE);
        match self.last_response {
            LicenseResponse::Licensed => now <= self.validity_timestamp,
            LicenseResponse::Retry if now < retry_window_end => {
                now <= self.retry_until || self.retry_count <= self.max_retries
            }
            _ => false,
        }
    }
}

fn load_i64<S: PreferenceStore>(prefs: &S, key: &str) -> DbResult<i64> {
    let raw = prefs.get_string(key)?;
    Ok(raw.and_then(|v| v.parse().ok()).unwrap_or(0))
}

fn decode_extras(extra: &str) -> HashMap<String, String> {
    decode_query(extra).unwrap_or_else(|err| {
        warn!(error = %err, "Invalid syntax while decoding extras data from server");
        HashMap::new()
    })
}
