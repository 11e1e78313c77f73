//! License-response policies.
//!
//! A license server answers with one of three [`LicenseResponse`] codes plus
//! an `extra` query string. Policies turn a history of those answers into an
//! allow/deny decision:
//! - [`StrictPolicy`] trusts only the most recent response.
//! - [`ServerManagedPolicy`] caches a `Licensed` answer until the server's
//!   validity timestamp and tolerates `Retry` answers within a grace window,
//!   persisting its state to a [`PreferenceStore`](crate::db::PreferenceStore).

mod clock;
mod policy;
mod query;
mod server_managed;

pub use clock::{Clock, FixedClock, SystemClock, MILLIS_PER_MINUTE};
pub use policy::{LicenseResponse, Policy, ResponseData, StrictPolicy, ValidationError};
pub use query::decode_query;
pub use server_managed::{ServerManagedPolicy, ServerManagedState};
