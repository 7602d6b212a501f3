//! Invoice preview shown before an order is confirmed

use chrono::{Duration, Months, NaiveDate};
use serde::Serialize;

use crate::selection::{Quote, QuotedLine};

/// Invoice number for the next order given how many already exist.
pub fn next_invoice_no(total_records: u64) -> String {
    format!("INV-{}", total_records + 1)
}

/// `07-Mar-2026`
pub fn format_billing_date(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string()
}

/// End of a fresh billing period: one month from `start`, minus a day.
pub fn default_period_end(start: NaiveDate) -> NaiveDate {
    start
        .checked_add_months(Months::new(1))
        .map(|d| d - Duration::days(1))
        .unwrap_or(start)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDraft {
    pub invoice_no: String,
    pub purchase_date: NaiveDate,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub lines: Vec<QuotedLine>,
    pub total: f64,
}

impl InvoiceDraft {
    /// Drafts the invoice for `quote`. The period runs from the snapshot's
    /// day to the active order's expiry when it has one, even a lapsed
    /// one, or for a month otherwise.
    pub fn new(quote: &Quote, total_records: u64) -> Self {
        let today = quote.context.today;
        let period_end = quote
            .context
            .expiry()
            .unwrap_or_else(|| default_period_end(today));
        Self {
            invoice_no: next_invoice_no(total_records),
            purchase_date: today,
            period_start: today,
            period_end,
            lines: quote.billable_lines().cloned().collect(),
            total: quote.total,
        }
    }

    pub fn billing_period(&self) -> String {
        format!(
            "{} to {}",
            format_billing_date(self.period_start),
            format_billing_date(self.period_end)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActiveOrder, License};
    use crate::proration::ProrationContext;
    use crate::selection::Selection;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn selection() -> Selection {
        let mut s = Selection::new();
        let l = License {
            id: "l1".into(),
            name: "Seat".into(),
            monthly_price: "30".into(),
            status_id: None,
            created_at: None,
            updated_at: None,
            amount_per_unit: None,
        };
        s.push(&l, 2).unwrap();
        s
    }

    #[test]
    fn invoice_number_follows_record_count() {
        assert_eq!(next_invoice_no(0), "INV-1");
        assert_eq!(next_invoice_no(41), "INV-42");
    }

    #[test]
    fn default_period_is_one_month_less_a_day() {
        assert_eq!(default_period_end(day(2026, 3, 7)), day(2026, 4, 6));
        assert_eq!(default_period_end(day(2026, 1, 31)), day(2026, 2, 27));
    }

    #[test]
    fn billing_period_uses_active_expiry() {
        let active = ActiveOrder {
            remaining_days: 30,
            expiry: "2026-10-29".into(),
            total_records: 5,
        };
        let ctx = ProrationContext::new(Some(&active), day(2026, 10, 19));
        let draft = InvoiceDraft::new(&selection().quote(&ctx), active.total_records);
        assert_eq!(draft.invoice_no, "INV-6");
        assert_eq!(draft.billing_period(), "19-Oct-2026 to 29-Oct-2026");
        assert_eq!(draft.total, 22.0);
    }

    #[test]
    fn lapsed_order_still_ends_period_at_its_expiry() {
        let lapsed = ActiveOrder {
            remaining_days: 0,
            expiry: "2026-12-01".into(),
            total_records: 2,
        };
        let ctx = ProrationContext::new(Some(&lapsed), day(2026, 10, 19));
        assert!(!ctx.is_prorated());
        let draft = InvoiceDraft::new(&selection().quote(&ctx), lapsed.total_records);
        assert_eq!(draft.billing_period(), "19-Oct-2026 to 01-Dec-2026");
        assert_eq!(draft.total, 60.0);
    }

    #[test]
    fn unreadable_expiry_falls_back_to_a_month() {
        let odd = ActiveOrder {
            remaining_days: 12,
            expiry: "soon".into(),
            total_records: 0,
        };
        let ctx = ProrationContext::new(Some(&odd), day(2026, 10, 19));
        let draft = InvoiceDraft::new(&selection().quote(&ctx), 0);
        assert_eq!(draft.billing_period(), "19-Oct-2026 to 18-Nov-2026");
    }

    #[test]
    fn billing_period_without_active_order() {
        let ctx = ProrationContext::full_price(day(2026, 10, 19));
        let draft = InvoiceDraft::new(&selection().quote(&ctx), 0);
        assert_eq!(draft.billing_period(), "19-Oct-2026 to 18-Nov-2026");
        assert_eq!(draft.total, 60.0);
    }
}
