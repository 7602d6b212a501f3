//! `/licenses/*`

use licport_core::envelope::{self, LICENSE_LIST, SINGLE_RECORD};
use licport_core::{LicensePage, PurchaseLicenseRequest, PurchaseLicenseResponse};

use super::ApiResult;
use crate::http::HttpClient;

pub fn list_licenses(http: &HttpClient, offset: usize, limit: usize) -> ApiResult<LicensePage> {
    let resp = http.get(
        "/licenses/list",
        &[("offset", offset.to_string()), ("limit", limit.to_string())],
    )?;
    let decoded = envelope::decode_list(&resp.data, LICENSE_LIST)?;
    tracing::debug!(
        count = decoded.items.len(),
        total = ?decoded.total_count,
        strategy = ?decoded.strategy,
        "licenses fetched"
    );
    Ok(LicensePage {
        items: decoded.items,
        total_count: decoded.total_count,
    })
}

/// Legacy purchase endpoint, superseded by `POST /orders/`.
pub fn purchase_licenses(
    http: &HttpClient,
    request: &PurchaseLicenseRequest,
) -> ApiResult<PurchaseLicenseResponse> {
    let resp = http.post("/licenses/purchase", request)?;
    Ok(envelope::decode_record(&resp.data, SINGLE_RECORD)?)
}
