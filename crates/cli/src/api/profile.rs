//! `/profile`

use licport_core::Profile;
use serde_json::Value;

use super::ApiResult;
use crate::http::HttpClient;

/// The profile envelope. `status` falls back to the HTTP status and `data`
/// to the whole body.
pub fn get_profile(http: &HttpClient) -> ApiResult<Profile> {
    let resp = http.get("/profile", &[])?;
    let body = &resp.data;
    let status = body
        .get("status")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
        .unwrap_or(resp.status);
    let text = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
    let data = match body.get("data") {
        Some(d) if !d.is_null() => d.clone(),
        _ => body.clone(),
    };
    Ok(Profile {
        status,
        api_status: text("api_status"),
        message: text("message"),
        data,
    })
}
