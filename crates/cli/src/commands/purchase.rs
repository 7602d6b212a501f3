//! `licport purchase`
//!
//! Prices the requested licenses against the active subscription, shows the
//! invoice draft and, once confirmed, places the order. The whole flow runs
//! under a single [`ProrationContext`] so what is shown is what is charged.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use licport_core::{
    Checkout, InvoiceDraft, License, ProrationContext, Route, Selection, ValidationError,
};
use std::io::{BufRead, Write};
use std::str::FromStr;

use super::Portal;
use crate::api;
use crate::output::json::{self, JsonPurchase};
use crate::output::{money, terminal};

pub const ROUTE: Route = Route::Purchase;

/// Licenses loaded for the purchase form.
const CATALOG_LIMIT: usize = 100;

/// `<license-id>[:<quantity>]` from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicensePick {
    pub license_id: String,
    pub quantity: u32,
}

impl FromStr for LicensePick {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, qty) = match s.split_once(':') {
            Some((id, qty)) => {
                let qty = qty
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| format!("invalid quantity in `{}`", s))?;
                (id, qty)
            }
            None => (s, 1),
        };
        let id = id.trim();
        if id.is_empty() {
            return Err(format!("missing license id in `{}`", s));
        }
        Ok(Self {
            license_id: id.to_string(),
            quantity: qty,
        })
    }
}

pub struct PurchaseOptions {
    pub picks: Vec<LicensePick>,
    pub yes: bool,
    /// Use the legacy `/licenses/purchase` endpoint with this many months.
    pub legacy_months: Option<u32>,
}

/// Builds the selection from the picks, in order.
pub fn build_selection(picks: &[LicensePick], catalog: &[License]) -> Result<Selection> {
    let mut selection = Selection::new();
    for pick in picks {
        let license = catalog
            .iter()
            .find(|l| l.id == pick.license_id)
            .ok_or_else(|| ValidationError::UnknownLicense(pick.license_id.clone()))?;
        selection.push(license, pick.quantity)?;
    }
    selection.validate()?;
    Ok(selection)
}

pub fn run(portal: &Portal, opts: &PurchaseOptions) -> Result<()> {
    let step = portal.step("Fetching licenses");
    let catalog = match api::list_licenses(&portal.http, 0, CATALOG_LIMIT) {
        Ok(page) => page.items,
        Err(e) => {
            step.fail();
            return Err(e).context("Failed to load licenses");
        }
    };
    step.finish(&format!("{} available", catalog.len()));

    let selection = build_selection(&opts.picks, &catalog)?;

    let step = portal.step("Checking active subscription");
    let active = match api::get_active_order(&portal.http) {
        Ok(order) => {
            step.finish(if order.is_active() { "active" } else { "none" });
            Some(order)
        }
        Err(e) => {
            step.warn(format!("{}; billing at full price", e));
            step.finish("unavailable");
            None
        }
    };
    let ctx = ProrationContext::now(active.as_ref());
    let quote = selection.quote(&ctx);

    if let Some(months) = opts.legacy_months {
        return run_legacy(portal, &selection, months);
    }

    let total_records = match api::get_active_order(&portal.http) {
        Ok(order) => order.total_records,
        Err(e) => {
            tracing::warn!(error = %e, "could not refresh order count for invoice number");
            0
        }
    };
    let draft = InvoiceDraft::new(&quote, total_records);

    if !portal.is_json() {
        println!();
        terminal::print_basis(&ctx);
        terminal::print_invoice(&draft);
    }

    let confirmed = opts.yes || (!portal.is_json() && confirm("Confirm and pay?")?);
    if !confirmed {
        if portal.is_json() {
            return json::print(&JsonPurchase {
                invoice: &draft,
                billing_period: draft.billing_period(),
                order: None,
                submitted: false,
            });
        }
        eprintln!("  {}", "Purchase cancelled.".dimmed());
        return Ok(());
    }

    let mut checkout = Checkout::new();
    let request = checkout.begin(&selection, &quote)?;
    let step = portal.step("Placing order");
    let result = api::create_order(&portal.http, &request);
    checkout.finish();

    let order = match result {
        Ok(order) => order,
        Err(e) => {
            step.fail();
            return Err(e).context("Order was not placed");
        }
    };
    step.finish(&money(request.total_amount));
    portal.http.navigator().set_current(Route::Home);

    if portal.is_json() {
        return json::print(&JsonPurchase {
            invoice: &draft,
            billing_period: draft.billing_period(),
            order: Some(&order),
            submitted: true,
        });
    }
    eprintln!();
    eprintln!(
        "  {} {}",
        "\u{2713}".green(),
        "Purchase successful!".bold()
    );
    if let Some(reference) = order.reference() {
        eprintln!("  Order {}", reference.cyan());
    }
    eprintln!("  Run {} to see it.", "licport history".bold());
    Ok(())
}

fn run_legacy(portal: &Portal, selection: &Selection, months: u32) -> Result<()> {
    let request = selection.to_purchase_request(months);
    let step = portal.step("Purchasing (legacy endpoint)");
    let resp = match api::purchase_licenses(&portal.http, &request) {
        Ok(r) => r,
        Err(e) => {
            step.fail();
            return Err(e).context("Purchase failed");
        }
    };
    step.finish(
        &resp
            .total_amount
            .map(money)
            .unwrap_or_else(|| "accepted".into()),
    );
    if portal.is_json() {
        return json::print(&resp);
    }
    if let Some(id) = &resp.transaction_id {
        eprintln!("  Transaction {}", id.cyan());
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    eprint!("  {} [y/N] ", prompt);
    std::io::stderr().flush().ok();
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read confirmation")?;
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "" | "n" | "no" => Ok(false),
        other => bail!("Unrecognized answer `{}`", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_parsing() {
        assert_eq!(
            "lic-1:3".parse::<LicensePick>().unwrap(),
            LicensePick {
                license_id: "lic-1".into(),
                quantity: 3
            }
        );
        assert_eq!("7".parse::<LicensePick>().unwrap().quantity, 1);
        assert!("lic:x".parse::<LicensePick>().is_err());
        assert!(":2".parse::<LicensePick>().is_err());
    }
}
