use anyhow::{Context, Result};
use piracy_core::db::PreferenceDb;
use piracy_core::licensing::{
    LicenseResponse, ResponseData, ServerManagedPolicy, ServerManagedState,
};

use crate::absolutize;

/// Open the preference DB and load the server-managed policy from it.
fn open_policy(db: &str) -> Result<ServerManagedPolicy<PreferenceDb>> {
    let db_path = absolutize(db)?;
    let prefs = PreferenceDb::open(&db_path).with_context(|| {
        format!("Failed to open preference database at {}", db_path.display())
    })?;
    ServerManagedPolicy::new(prefs).context("Failed to load license policy state")
}

/// Record a license-server response into the policy state.
pub fn license_record_command(
    db: &str,
    response: &str,
    extra: Option<&str>,
) -> Result<ServerManagedState> {
    let response: LicenseResponse = response.parse()?;
    let mut policy = open_policy(db)?;

    let data = extra.map(ResponseData::with_extra);
    policy
        .try_process_server_response(response, data.as_ref())
        .context("Failed to commit license policy state")?;

    let state = policy.state();
    println!("Recorded license response:");
    println!("  Response: {}", state.last_response);
    println!("  Retry count: {}", state.retry_count);
    println!("  Allow access: {}", state.allow_access);

    Ok(state)
}

/// Show the persisted policy state and the current access decision.
pub fn license_status_command(db: &str, json: bool) -> Result<ServerManagedState> {
    let policy = open_policy(db)?;
    let state = policy.state();

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(state);
    }

    println!("License policy state");
    println!("====================");
    println!("Last response: {}", state.last_response);
    println!("Validity timestamp (VT): {}", state.validity_timestamp);
    println!("Retry until (GT): {}", state.retry_until);
    println!("Max retries (GR): {}", state.max_retries);
    println!("Retry count: {}", state.retry_count);
    println!("Allow access: {}", if state.allow_access { "yes" } else { "no" });

    Ok(state)
}
