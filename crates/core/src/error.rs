//! Errors raised by the pure portal logic

use thiserror::Error;

/// A backend payload did not match any known envelope shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("expected a list under `{strategy}`, found {found}")]
    NotAList {
        strategy: &'static str,
        found: &'static str,
    },

    #[error("malformed record at index {index} under `{strategy}`: {reason}")]
    Record {
        strategy: &'static str,
        index: usize,
        reason: String,
    },

    #[error("malformed payload under `{strategy}`: {reason}")]
    Payload {
        strategy: &'static str,
        reason: String,
    },
}

/// Client-side checks that fail before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select at least one license.")]
    NothingSelected,

    #[error("Please select a license for all rows.")]
    RowWithoutLicense { row: usize },

    #[error("Quantity must be at least 1.")]
    ZeroQuantity { row: usize },

    #[error("Price cannot be negative.")]
    NegativePrice { row: usize },

    #[error("License {license_id} is already selected.")]
    DuplicateLicense { license_id: String },

    #[error("Unknown license: {0}")]
    UnknownLicense(String),

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Password cannot be empty.")]
    EmptyPassword,
}

/// Short name of a JSON value's type, for error messages.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
