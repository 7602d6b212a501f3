//! Access-token resolution from login responses
//!
//! The login envelope is not fixed across backend versions. Named fields are
//! tried first (top level, then one level under `data`); as a last resort the
//! body is scanned for any string that looks like a dotted bearer token.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::model::Session;

const ACCESS_KEYS: &[&str] = &["access_token", "token", "accessToken"];
const REFRESH_KEYS: &[&str] = &["refresh_token", "refreshToken"];

/// Shortest string the heuristic scan will accept as a token.
const MIN_SCANNED_TOKEN_LEN: usize = 21;

/// Where the access token was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    TopLevel(&'static str),
    Nested(&'static str),
    Scanned,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::TopLevel(key) => write!(f, "{}", key),
            TokenSource::Nested(key) => write!(f, "data.{}", key),
            TokenSource::Scanned => write!(f, "heuristic scan"),
        }
    }
}

/// A session resolved from a login body, with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub session: Session,
    pub source: TokenSource,
}

fn dotted_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_\-+/=]+(?:\.[A-Za-z0-9_\-+/=]+)+$").unwrap())
}

/// Returns true for strings shaped like `xxx.yyy[.zzz]` of non-trivial length.
pub fn looks_like_token(s: &str) -> bool {
    s.len() >= MIN_SCANNED_TOKEN_LEN && dotted_token().is_match(s)
}

fn string_field(obj: &Value, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_field(obj: &Value, keys: &[&'static str]) -> Option<(&'static str, String)> {
    keys.iter()
        .find_map(|k| string_field(obj, k).map(|v| (*k, v)))
}

/// Depth-first scan of object values (arrays are not entered).
fn scan(obj: &Value) -> Option<String> {
    let map = obj.as_object()?;
    for v in map.values() {
        match v {
            Value::String(s) if looks_like_token(s.trim()) => return Some(s.trim().to_string()),
            Value::Object(_) => {
                if let Some(found) = scan(v) {
                    return Some(found);
                }
            }
            _ => {}
        }
    }
    None
}

fn resolve_access(body: &Value) -> Option<(String, TokenSource)> {
    if let Some((key, token)) = first_field(body, ACCESS_KEYS) {
        return Some((token, TokenSource::TopLevel(key)));
    }
    let nested = body.get("data").filter(|d| d.is_object());
    if let Some((key, token)) = nested.and_then(|d| first_field(d, ACCESS_KEYS)) {
        return Some((token, TokenSource::Nested(key)));
    }
    let scanned = scan(body)?;
    tracing::warn!("no named token field in login response; using heuristic scan");
    Some((scanned, TokenSource::Scanned))
}

fn resolve_refresh(body: &Value) -> Option<String> {
    first_field(body, REFRESH_KEYS)
        .or_else(|| {
            body.get("data")
                .filter(|d| d.is_object())
                .and_then(|d| first_field(d, REFRESH_KEYS))
        })
        .map(|(_, v)| v)
}

/// Resolves the session tokens from a login response body.
pub fn resolve(body: &Value) -> Option<Resolved> {
    let (access_token, source) = resolve_access(body)?;
    Some(Resolved {
        session: Session {
            access_token,
            refresh_token: resolve_refresh(body),
        },
        source,
    })
}

/// Top-level and `data` keys of a body, for diagnostics when no token is found.
pub fn describe_keys(body: &Value) -> String {
    let keys = |v: &Value| -> Vec<String> {
        v.as_object()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    };
    let top = keys(body);
    match body.get("data").filter(|d| d.is_object()) {
        Some(d) => format!("[{}] data: [{}]", top.join(", "), keys(d).join(", ")),
        None => format!("[{}]", top.join(", ")),
    }
}
