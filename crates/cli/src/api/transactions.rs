//! `/transactions`

use licport_core::envelope::{self, TRANSACTION_LIST};
use licport_core::Transaction;

use super::ApiResult;
use crate::http::HttpClient;

pub fn list_transactions(http: &HttpClient) -> ApiResult<Vec<Transaction>> {
    let resp = http.get("/transactions", &[])?;
    Ok(envelope::decode_list(&resp.data, TRANSACTION_LIST)?.items)
}
