//! Proration of license charges against an active order
//!
//! Without an active order (or with `remainingDays <= 0`) a line costs
//! `price_per_month * quantity`. With one, only the days from today through
//! the active order's expiry are billed:
//!
//! ```text
//! days_left    = (expiry - today) + 1, both UTC calendar days, 0 if expired
//! per_day_cost = price_per_month / remaining_days
//! line_total   = days_left * per_day_cost * quantity
//! ```
//!
//! A [`ProrationContext`] pins `today` and the active order once, so every
//! line of an order is priced against the same snapshot.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::model::ActiveOrder;

/// Whole calendar days from `today` through `expiry`, both inclusive.
/// Zero once the expiry date has passed.
pub fn days_left(expiry: NaiveDate, today: NaiveDate) -> i64 {
    let diff = expiry.signed_duration_since(today).num_days();
    if diff < 0 {
        0
    } else {
        diff + 1
    }
}

/// Parses an expiry as an ISO date, an RFC 3339 timestamp or a naive
/// timestamp. Timestamps are reduced to their UTC calendar day.
pub fn parse_expiry(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Rounds a currency amount to cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// How lines are billed under a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Basis {
    FullPrice,
    Prorated {
        remaining_days: i64,
        expiry: NaiveDate,
        days_left: i64,
    },
}

/// One priced line under a [`ProrationContext`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineCharge {
    pub price_per_month: f64,
    pub quantity: u32,
    /// Zero on the full-price path
    pub days_left: i64,
    /// Zero on the full-price path
    pub per_day_cost: f64,
    /// What one unit costs under this snapshot
    pub amount_per_unit: f64,
    pub total: f64,
}

/// A pricing snapshot: `today` plus the active order, captured once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProrationContext {
    pub today: NaiveDate,
    pub basis: Basis,
    /// The active order's expiry whenever it parses, prorating or not
    pub order_expiry: Option<NaiveDate>,
}

impl ProrationContext {
    /// Builds a snapshot for `today`. A missing order, `remaining_days <= 0`
    /// or an unreadable expiry all mean full-price billing.
    pub fn new(active: Option<&ActiveOrder>, today: NaiveDate) -> Self {
        let order_expiry = active.and_then(|order| parse_expiry(&order.expiry));
        let basis = match (active, order_expiry) {
            (Some(order), Some(expiry)) if order.remaining_days > 0 => Basis::Prorated {
                remaining_days: order.remaining_days,
                expiry,
                days_left: days_left(expiry, today),
            },
            (Some(order), None) if order.remaining_days > 0 => {
                tracing::warn!(
                    expiry = %order.expiry,
                    "active order expiry is not a date; billing at full price"
                );
                Basis::FullPrice
            }
            _ => Basis::FullPrice,
        };
        Self {
            today,
            basis,
            order_expiry,
        }
    }

    /// Snapshot taken at the current UTC date.
    pub fn now(active: Option<&ActiveOrder>) -> Self {
        Self::new(active, Utc::now().date_naive())
    }

    pub fn full_price(today: NaiveDate) -> Self {
        Self::new(None, today)
    }

    pub fn is_prorated(&self) -> bool {
        matches!(self.basis, Basis::Prorated { .. })
    }

    /// Expiry of the active order, if it had a readable one. Set even when
    /// billing falls back to full price.
    pub fn expiry(&self) -> Option<NaiveDate> {
        self.order_expiry
    }

    pub fn days_left(&self) -> i64 {
        match self.basis {
            Basis::Prorated { days_left, .. } => days_left,
            Basis::FullPrice => 0,
        }
    }

    /// Prices one line.
    pub fn charge(&self, price_per_month: f64, quantity: u32) -> LineCharge {
        let qty = quantity as f64;
        match self.basis {
            Basis::FullPrice => LineCharge {
                price_per_month,
                quantity,
                days_left: 0,
                per_day_cost: 0.0,
                amount_per_unit: price_per_month,
                total: price_per_month * qty,
            },
            Basis::Prorated {
                remaining_days,
                days_left,
                ..
            } => {
                let per_day_cost = price_per_month / remaining_days as f64;
                let amount_per_unit = days_left as f64 * per_day_cost;
                LineCharge {
                    price_per_month,
                    quantity,
                    days_left,
                    per_day_cost,
                    amount_per_unit,
                    total: amount_per_unit * qty,
                }
            }
        }
    }

    /// Sum of line totals for `(price_per_month, quantity)` pairs.
    pub fn total<I>(&self, lines: I) -> f64
    where
        I: IntoIterator<Item = (f64, u32)>,
    {
        lines
            .into_iter()
            .map(|(price, qty)| self.charge(price, qty).total)
            .sum()
    }
}
