//! JSON output formatting

use anyhow::Result;
use licport_core::{CreateOrderResponse, InvoiceDraft, LicensePage, OrderRecord};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct JsonLicenses<'a> {
    pub licenses: &'a LicensePage,
}

#[derive(Debug, Serialize)]
pub struct JsonPurchase<'a> {
    pub invoice: &'a InvoiceDraft,
    pub billing_period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<&'a CreateOrderResponse>,
    pub submitted: bool,
}

#[derive(Debug, Serialize)]
pub struct JsonHistory<'a> {
    pub orders: &'a [OrderRecord],
    pub has_more: bool,
}

#[derive(Debug, Serialize)]
pub struct JsonStatus<'a> {
    pub authenticated: bool,
    pub base_url: &'a str,
    pub session_dir: String,
    pub has_refresh_token: bool,
}

/// Writes `value` to stdout as pretty JSON.
pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
