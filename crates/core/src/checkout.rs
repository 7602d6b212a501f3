//! Order submission guard
//!
//! A [`Checkout`] turns a validated selection into the order request and
//! refuses to do so again until the in-flight submission has finished.

use thiserror::Error;

use crate::error::ValidationError;
use crate::model::CreateOrderRequest;
use crate::selection::{Quote, Selection};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("An order is already being submitted.")]
    InProgress,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Default)]
pub struct Checkout {
    submitting: bool,
}

impl Checkout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validates `selection` and marks a submission as in flight.
    ///
    /// The guard is only raised when the request is actually handed out, so
    /// a validation failure leaves the checkout ready for another attempt.
    pub fn begin(
        &mut self,
        selection: &Selection,
        quote: &Quote,
    ) -> Result<CreateOrderRequest, CheckoutError> {
        if self.submitting {
            return Err(CheckoutError::InProgress);
        }
        selection.validate()?;
        self.submitting = true;
        Ok(quote.to_order_request())
    }

    /// The submission settled, successfully or not.
    pub fn finish(&mut self) {
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::License;
    use crate::proration::ProrationContext;
    use chrono::NaiveDate;

    fn license(id: &str, price: &str) -> License {
        License {
            id: id.into(),
            name: format!("License {id}"),
            monthly_price: price.into(),
            status_id: Some(1),
            created_at: None,
            updated_at: None,
            amount_per_unit: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let mut sel = Selection::new();
        sel.push(&license("1", "15"), 3).unwrap();
        let quote = sel.quote(&ProrationContext::full_price(today()));

        let mut checkout = Checkout::new();
        let req = checkout.begin(&sel, &quote).unwrap();
        assert_eq!(req.total_amount, 45.0);
        assert!(checkout.is_submitting());
        assert_eq!(
            checkout.begin(&sel, &quote).unwrap_err(),
            CheckoutError::InProgress
        );

        checkout.finish();
        assert!(checkout.begin(&sel, &quote).is_ok());
    }

    #[test]
    fn invalid_selection_does_not_raise_the_guard() {
        let sel = Selection::new();
        let quote = sel.quote(&ProrationContext::full_price(today()));
        let mut checkout = Checkout::new();
        assert_eq!(
            checkout.begin(&sel, &quote).unwrap_err(),
            CheckoutError::Invalid(ValidationError::NothingSelected)
        );
        assert!(!checkout.is_submitting());
    }
}
