//! `/orders/*`

use licport_core::envelope::{self, ORDER_LIST, SINGLE_RECORD};
use licport_core::{ActiveOrder, CreateOrderRequest, CreateOrderResponse, OrderRecord};
use serde_json::Value;

use super::{ApiFailure, ApiResult};
use crate::http::HttpClient;

/// The subscription in effect. Missing fields come back as zero or empty.
pub fn get_active_order(http: &HttpClient) -> ApiResult<ActiveOrder> {
    let resp = http.get("/orders/active", &[])?;
    Ok(envelope::decode_record(&resp.data, SINGLE_RECORD)?)
}

pub fn create_order(
    http: &HttpClient,
    request: &CreateOrderRequest,
) -> ApiResult<CreateOrderResponse> {
    tracing::info!(
        total_amount = request.total_amount,
        items = request.order_items.len(),
        "creating order"
    );
    let resp = http.post("/orders/", request)?;
    let order: CreateOrderResponse = envelope::decode_record(&resp.data, SINGLE_RECORD)?;
    tracing::info!(reference = ?order.reference(), "order created");
    Ok(order)
}

pub fn list_orders(http: &HttpClient, offset: usize, limit: usize) -> ApiResult<Vec<OrderRecord>> {
    let resp = http.get(
        "/orders/",
        &[("offset", offset.to_string()), ("limit", limit.to_string())],
    )?;
    Ok(envelope::decode_list(&resp.data, ORDER_LIST)?.items)
}

/// The invoice document for `order_id`, still base64-encoded.
pub fn download_order_invoice(http: &HttpClient, order_id: &str) -> ApiResult<String> {
    let resp = http.get("/orders/download", &[("id", order_id.to_string())])?;
    match resp.data.get("data") {
        Some(Value::String(encoded)) => Ok(encoded.clone()),
        _ => Err(ApiFailure::new("Invalid download response.")),
    }
}
