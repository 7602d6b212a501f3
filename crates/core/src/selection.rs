//! In-progress license selection and its conversion to an order

use serde::Serialize;

use crate::error::ValidationError;
use crate::model::{CreateOrderRequest, License, OrderItem, PurchaseLicenseRequest, PurchaseLine};
use crate::proration::{round_cents, LineCharge, ProrationContext};

/// One row of the purchase form: a license (once chosen), its price at the
/// time it was chosen, and a quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LicenseSelectionRow {
    pub license_id: Option<String>,
    pub license_name: Option<String>,
    pub price_per_month: f64,
    pub quantity: u32,
}

impl Default for LicenseSelectionRow {
    fn default() -> Self {
        Self {
            license_id: None,
            license_name: None,
            price_per_month: 0.0,
            quantity: 1,
        }
    }
}

impl LicenseSelectionRow {
    pub fn for_license(license: &License, quantity: u32) -> Self {
        Self {
            license_id: Some(license.id.clone()),
            license_name: Some(license.name.clone()),
            price_per_month: license.price_per_month(),
            quantity,
        }
    }

    /// Rows that will become order items.
    fn is_billable(&self) -> bool {
        self.license_id.is_some() && self.price_per_month > 0.0
    }
}

/// The rows of a purchase, at most one per license.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Selection {
    rows: Vec<LicenseSelectionRow>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[LicenseSelectionRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends an empty row.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(LicenseSelectionRow::default());
        self.rows.len() - 1
    }

    pub fn remove_row(&mut self, index: usize) -> Option<LicenseSelectionRow> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    /// Points row `index` at `license`, snapshotting its price.
    pub fn select(&mut self, index: usize, license: &License) -> Result<(), ValidationError> {
        let taken = self
            .rows
            .iter()
            .enumerate()
            .any(|(i, r)| i != index && r.license_id.as_deref() == Some(license.id.as_str()));
        if taken {
            return Err(ValidationError::DuplicateLicense {
                license_id: license.id.clone(),
            });
        }
        if let Some(row) = self.rows.get_mut(index) {
            row.license_id = Some(license.id.clone());
            row.license_name = Some(license.name.clone());
            row.price_per_month = license.price_per_month();
        }
        Ok(())
    }

    pub fn set_quantity(&mut self, index: usize, quantity: u32) {
        if let Some(row) = self.rows.get_mut(index) {
            row.quantity = quantity;
        }
    }

    /// Adds a row already pointed at `license`.
    pub fn push(&mut self, license: &License, quantity: u32) -> Result<usize, ValidationError> {
        let index = self.add_row();
        if let Err(e) = self.select(index, license) {
            self.rows.pop();
            return Err(e);
        }
        self.set_quantity(index, quantity);
        Ok(index)
    }

    /// Licenses still selectable for row `index`: everything not chosen by
    /// another row.
    pub fn available<'a>(&self, index: usize, licenses: &'a [License]) -> Vec<&'a License> {
        licenses
            .iter()
            .filter(|l| {
                !self
                    .rows
                    .iter()
                    .enumerate()
                    .any(|(i, r)| i != index && r.license_id.as_deref() == Some(l.id.as_str()))
            })
            .collect()
    }

    /// True once every known license has a row.
    pub fn all_licenses_used(&self, licenses: &[License]) -> bool {
        !licenses.is_empty() && self.available(usize::MAX, licenses).is_empty()
    }

    /// Checks the selection can be submitted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.rows.iter().any(LicenseSelectionRow::is_billable) {
            return Err(ValidationError::NothingSelected);
        }
        for (row, r) in self.rows.iter().enumerate() {
            if r.license_id.is_none() {
                return Err(ValidationError::RowWithoutLicense { row });
            }
            if r.quantity == 0 {
                return Err(ValidationError::ZeroQuantity { row });
            }
            if r.price_per_month < 0.0 || !r.price_per_month.is_finite() {
                return Err(ValidationError::NegativePrice { row });
            }
        }
        Ok(())
    }

    /// Prices every row under one snapshot.
    pub fn quote(&self, ctx: &ProrationContext) -> Quote {
        let lines: Vec<QuotedLine> = self
            .rows
            .iter()
            .map(|row| QuotedLine {
                row: row.clone(),
                charge: ctx.charge(row.price_per_month, row.quantity),
            })
            .collect();
        let total = lines.iter().map(|l| l.charge.total).sum();
        Quote {
            context: *ctx,
            lines,
            total,
        }
    }

    /// Body for the legacy `/licenses/purchase` endpoint.
    pub fn to_purchase_request(&self, months: u32) -> PurchaseLicenseRequest {
        PurchaseLicenseRequest {
            licenses: self
                .rows
                .iter()
                .filter(|r| r.is_billable())
                .map(|r| PurchaseLine {
                    price_per_month: r.price_per_month,
                    months,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotedLine {
    pub row: LicenseSelectionRow,
    pub charge: LineCharge,
}

/// A priced selection. `total` is the sum of the line totals and is never
/// recomputed from anything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub context: ProrationContext,
    pub lines: Vec<QuotedLine>,
    pub total: f64,
}

impl Quote {
    pub fn billable_lines(&self) -> impl Iterator<Item = &QuotedLine> {
        self.lines.iter().filter(|l| l.row.is_billable())
    }

    /// Body for `POST /orders/`. Amounts are rounded to cents here and only
    /// here.
    pub fn to_order_request(&self) -> CreateOrderRequest {
        let order_items = self
            .billable_lines()
            .filter_map(|l| {
                let license_id = l.row.license_id.clone()?;
                Some(OrderItem {
                    license_id,
                    quantity: l.row.quantity,
                    amount_per_unit: round_cents(l.charge.amount_per_unit),
                })
            })
            .collect();
        CreateOrderRequest {
            total_amount: round_cents(self.total),
            order_items,
        }
    }
}
