//! Records exchanged with the portal backend

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A purchasable license as listed by `/licenses/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Monthly price as sent by the backend (decimal text, e.g. "30.00")
    #[serde(default, deserialize_with = "de::text_or_number")]
    pub monthly_price: String,

    #[serde(default, deserialize_with = "de::opt_int")]
    pub status_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Older backends priced licenses per unit instead of per month
    #[serde(
        default,
        deserialize_with = "de::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_per_unit: Option<f64>,
}

impl License {
    /// Monthly price as a number. Unparseable text falls back to
    /// `amount_per_unit`, then to zero.
    pub fn price_per_month(&self) -> f64 {
        match self.monthly_price.trim().parse::<f64>() {
            Ok(p) if p.is_finite() => p,
            _ => self.amount_per_unit.unwrap_or(0.0),
        }
    }
}

/// One page of licenses plus the backend's total, when it reports one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LicensePage {
    pub items: Vec<License>,
    pub total_count: Option<u64>,
}

/// The subscription currently in effect; anchors proration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveOrder {
    #[serde(default, deserialize_with = "de::int_or_zero")]
    pub remaining_days: i64,

    /// ISO date of the last billed day, e.g. "2026-03-07"
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub expiry: String,

    #[serde(default, deserialize_with = "de::uint_or_zero")]
    pub total_records: u64,
}

impl ActiveOrder {
    pub fn is_active(&self) -> bool {
        self.remaining_days > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentStatus {
    #[serde(default, deserialize_with = "de::int_or_zero")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "de::opt_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub status_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemLicense {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "de::text_or_number")]
    pub monthly_price: String,
}

/// A line of a placed order as returned by `/orders/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemRecord {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub order_id: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub license_id: String,
    #[serde(default, deserialize_with = "de::count_or_zero")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "de::number_or_zero")]
    pub amount_per_qty: f64,
    #[serde(default, deserialize_with = "de::number_or_zero")]
    pub amount_total_qty: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<OrderItemLicense>,
}

impl OrderItemRecord {
    pub fn license_name(&self) -> &str {
        match &self.license {
            Some(l) if !l.name.is_empty() => &l.name,
            _ => &self.license_id,
        }
    }
}

/// A placed order, as shown in the transaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub user_id: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub invoice_no: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub invoice_date: String,
    #[serde(default, deserialize_with = "de::number_or_zero")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "de::int_or_zero")]
    pub payment_status_id: i64,
    #[serde(default, deserialize_with = "de::int_or_zero")]
    pub status_id: i64,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub created_at: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub updated_at: String,
    #[serde(default)]
    pub order_items: Vec<OrderItemRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

impl OrderRecord {
    pub fn payment_label(&self) -> String {
        match &self.payment_status {
            Some(p) => p.name.clone(),
            None => format!("status {}", self.payment_status_id),
        }
    }
}

/// An entry of `/transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(
        default,
        deserialize_with = "de::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The `/profile` envelope after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub status: u16,
    pub api_status: Option<String>,
    pub message: Option<String>,
    pub data: Value,
}

/// Tokens resolved from a login response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

// ── Requests ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email_id: &'a str,
    pub password: &'a str,
}

/// Body of `POST /orders/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub total_amount: f64,
    pub order_items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub license_id: String,
    pub quantity: u32,
    pub amount_per_unit: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl CreateOrderResponse {
    /// Order reference, whichever id field the backend filled in.
    pub fn reference(&self) -> Option<String> {
        let raw = self.order_id.as_ref().or(self.id.as_ref())?;
        match raw {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Body of the legacy `POST /licenses/purchase`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseLicenseRequest {
    pub licenses: Vec<PurchaseLine>,
}

/// `months` is passed through untouched; billing never reads it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLine {
    pub price_per_month: f64,
    pub months: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLicenseResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Lenient field decoders for a backend that is loose with JSON types.
mod de {
    use super::*;

    pub fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        match Value::deserialize(d)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(serde::de::Error::custom(format!(
                "expected string or number id, got {}",
                other
            ))),
        }
    }

    pub fn string_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        })
    }

    pub fn text_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        string_or_empty(d)
    }

    pub fn number_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        })
    }

    pub fn int_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        let n = number_or_zero(d)?;
        Ok(if n.is_finite() { n.floor() as i64 } else { 0 })
    }

    pub fn uint_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        Ok(int_or_zero(d)?.max(0) as u64)
    }

    pub fn count_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        Ok(int_or_zero(d)?.clamp(0, i64::from(u32::MAX)) as u32)
    }

    /// `null`, absent or unreadable values become `None`.
    pub fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let n = match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(n.filter(|n| n.is_finite()))
    }

    pub fn opt_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(opt_number(d)?.map(|n| n.floor() as i64))
    }
}
