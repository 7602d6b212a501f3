//! `licport transactions`

use anyhow::Result;
use licport_core::Route;

use super::Portal;
use crate::api;
use crate::output::{json, terminal};

pub const ROUTE: Route = Route::Transactions;

pub fn run(portal: &Portal) -> Result<()> {
    let step = portal.step("Fetching transactions");
    let transactions = match api::list_transactions(&portal.http) {
        Ok(t) => t,
        Err(e) => {
            step.fail();
            return Err(e.into());
        }
    };
    step.finish(&format!("{} transaction(s)", transactions.len()));

    if portal.is_json() {
        return json::print(&transactions);
    }
    println!();
    terminal::print_transactions(&transactions);
    Ok(())
}
