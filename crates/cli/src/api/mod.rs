//! Typed access to the portal's resources
//!
//! Every accessor returns [`ApiResult`]: transport, HTTP and payload
//! problems all arrive as an [`ApiFailure`] carrying a display message and,
//! when the server answered, its status.

pub mod licenses;
pub mod orders;
pub mod profile;
pub mod transactions;

pub use licenses::{list_licenses, purchase_licenses};
pub use orders::{create_order, download_order_invoice, get_active_order, list_orders};
pub use profile::get_profile;
pub use transactions::list_transactions;

use licport_core::ParseError;
use serde::Serialize;

use crate::http::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiFailure {
    pub message: String,
    pub status: Option<u16>,
}

impl ApiFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }
}

impl From<ApiError> for ApiFailure {
    fn from(e: ApiError) -> Self {
        Self {
            status: e.status(),
            message: e.to_string(),
        }
    }
}

impl From<ParseError> for ApiFailure {
    fn from(e: ParseError) -> Self {
        tracing::warn!(error = %e, "response did not match the expected envelope");
        Self::new(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiFailure>;
