//! Response envelope normalization
//!
//! The backend wraps the same logical payload in different envelopes
//! depending on endpoint and version (`data.rows`, `data`, a bare array, ...).
//! Each endpoint declares an ordered list of [`Strategy`] values; the first
//! one whose shape matches wins and its payload is decoded into typed
//! records. Anything past the first strategy is a fallback and is logged so
//! drift shows up in the logs.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{json_kind, ParseError};

/// A located payload plus the list total when the envelope carries one.
#[derive(Debug, Clone, Copy)]
pub struct Located<'a> {
    pub payload: &'a Value,
    pub total_count: Option<u64>,
}

/// A named way of finding the payload inside a response body.
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub locate: for<'a> fn(&'a Value) -> Option<Located<'a>>,
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name).finish()
    }
}

/// A decoded list and the strategy that produced it.
#[derive(Debug, Clone)]
pub struct Decoded<T> {
    pub items: Vec<T>,
    pub total_count: Option<u64>,
    pub strategy: Option<&'static str>,
}

// ── Locators ─────────────────────────────────────────────────────

fn located(payload: &Value) -> Located<'_> {
    Located {
        payload,
        total_count: None,
    }
}

fn non_null(v: Option<&Value>) -> Option<&Value> {
    v.filter(|v| !v.is_null())
}

fn data_rows(body: &Value) -> Option<Located<'_>> {
    let data = body.get("data")?;
    let rows = non_null(data.get("rows"))?;
    let total_count = data.get("totalCount").and_then(Value::as_u64);
    Some(Located {
        payload: rows,
        total_count,
    })
}

fn top_level_licenses(body: &Value) -> Option<Located<'_>> {
    non_null(body.get("licenses")).map(located)
}

fn data_array(body: &Value) -> Option<Located<'_>> {
    body.get("data").filter(|d| d.is_array()).map(located)
}

fn data_object(body: &Value) -> Option<Located<'_>> {
    body.get("data").filter(|d| d.is_object()).map(located)
}

fn bare_array(body: &Value) -> Option<Located<'_>> {
    body.is_array().then(|| located(body))
}

fn bare_object(body: &Value) -> Option<Located<'_>> {
    body.is_object().then(|| located(body))
}

pub const DATA_ROWS: Strategy = Strategy {
    name: "data.rows",
    locate: data_rows,
};
pub const LICENSES: Strategy = Strategy {
    name: "licenses",
    locate: top_level_licenses,
};
pub const DATA_ARRAY: Strategy = Strategy {
    name: "data[]",
    locate: data_array,
};
pub const DATA_OBJECT: Strategy = Strategy {
    name: "data{}",
    locate: data_object,
};
pub const BARE_ARRAY: Strategy = Strategy {
    name: "[]",
    locate: bare_array,
};
pub const BARE_OBJECT: Strategy = Strategy {
    name: "{}",
    locate: bare_object,
};

/// `/licenses/list`
pub const LICENSE_LIST: &[Strategy] = &[DATA_ROWS, LICENSES, DATA_ARRAY, BARE_ARRAY];
/// `/orders/`
pub const ORDER_LIST: &[Strategy] = &[DATA_ARRAY];
/// `/transactions`
pub const TRANSACTION_LIST: &[Strategy] = &[BARE_ARRAY, DATA_ARRAY];
/// `/orders/active`, `POST /orders/` and other single-record responses
pub const SINGLE_RECORD: &[Strategy] = &[DATA_OBJECT, BARE_OBJECT];

// ── Decoding ─────────────────────────────────────────────────────

fn locate<'a>(
    body: &'a Value,
    strategies: &[Strategy],
) -> Option<(usize, &'static str, Located<'a>)> {
    strategies
        .iter()
        .enumerate()
        .find_map(|(i, s)| (s.locate)(body).map(|loc| (i, s.name, loc)))
}

fn note_fallback(index: usize, name: &'static str, strategies: &[Strategy]) {
    if index > 0 {
        tracing::warn!(
            strategy = name,
            preferred = strategies[0].name,
            "response envelope matched a fallback shape"
        );
    }
}

/// Decodes a list payload.
///
/// A body that matches no strategy but is an object or null counts as an
/// absent payload and yields an empty list. A matched payload that is not an
/// array, or whose items do not decode, is a [`ParseError`].
pub fn decode_list<T: DeserializeOwned>(
    body: &Value,
    strategies: &[Strategy],
) -> Result<Decoded<T>, ParseError> {
    let Some((index, name, loc)) = locate(body, strategies) else {
        return match body {
            Value::Null | Value::Object(_) => Ok(Decoded {
                items: Vec::new(),
                total_count: None,
                strategy: None,
            }),
            other => Err(ParseError::UnexpectedShape(format!(
                "top-level {}",
                json_kind(other)
            ))),
        };
    };
    note_fallback(index, name, strategies);

    let rows = loc.payload.as_array().ok_or(ParseError::NotAList {
        strategy: name,
        found: json_kind(loc.payload),
    })?;

    let items = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            T::deserialize(row).map_err(|e| ParseError::Record {
                strategy: name,
                index: i,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<T>, _>>()?;

    Ok(Decoded {
        items,
        total_count: loc.total_count,
        strategy: Some(name),
    })
}

/// Decodes a single record, falling back to `T::default()` when the body
/// carries no record at all.
pub fn decode_record<T: DeserializeOwned + Default>(
    body: &Value,
    strategies: &[Strategy],
) -> Result<T, ParseError> {
    let Some((index, name, loc)) = locate(body, strategies) else {
        return match body {
            Value::Null => Ok(T::default()),
            other => Err(ParseError::UnexpectedShape(format!(
                "top-level {}",
                json_kind(other)
            ))),
        };
    };
    note_fallback(index, name, strategies);

    T::deserialize(loc.payload).map_err(|e| ParseError::Payload {
        strategy: name,
        reason: e.to_string(),
    })
}

/// The `message` field of an error body, when it is a non-empty string.
pub fn body_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: String,
    }

    #[test]
    fn first_matching_strategy_wins() {
        let body = json!({"data": {"rows": [{"id": "a"}], "totalCount": 9}, "licenses": []});
        let d: Decoded<Row> = decode_list(&body, LICENSE_LIST).unwrap();
        assert_eq!(d.items.len(), 1);
        assert_eq!(d.total_count, Some(9));
        assert_eq!(d.strategy, Some("data.rows"));
    }

    #[test]
    fn null_body_is_an_empty_list() {
        let d: Decoded<Row> = decode_list(&Value::Null, ORDER_LIST).unwrap();
        assert!(d.items.is_empty());
        assert!(d.strategy.is_none());
    }

    #[test]
    fn string_body_is_unexpected() {
        let err = decode_list::<Row>(&json!("nope"), TRANSACTION_LIST).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedShape(_)));
    }

    #[test]
    fn rows_that_are_not_a_list_fail() {
        let err = decode_list::<Row>(&json!({"data": {"rows": 3}}), LICENSE_LIST).unwrap_err();
        assert_eq!(
            err,
            ParseError::NotAList {
                strategy: "data.rows",
                found: "number"
            }
        );
    }

    #[test]
    fn record_errors_carry_index() {
        let body = json!([{"id": "ok"}, {"nope": 1}]);
        let err = decode_list::<Row>(&body, TRANSACTION_LIST).unwrap_err();
        assert!(matches!(err, ParseError::Record { index: 1, .. }));
    }

    #[test]
    fn body_message_ignores_blank() {
        assert_eq!(body_message(&json!({"message": "  "})), None);
        assert_eq!(
            body_message(&json!({"message": "Email taken"})),
            Some("Email taken".to_string())
        );
    }
}
