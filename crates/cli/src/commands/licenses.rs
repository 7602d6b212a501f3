//! `licport licenses`

use anyhow::Result;
use licport_core::Route;

use super::Portal;
use crate::api;
use crate::output::json::{self, JsonLicenses};
use crate::output::terminal;

pub const ROUTE: Route = Route::Purchase;

pub fn run(portal: &Portal, offset: usize, limit: usize) -> Result<()> {
    let step = portal.step("Fetching licenses");
    let page = match api::list_licenses(&portal.http, offset, limit) {
        Ok(page) => page,
        Err(e) => {
            step.fail();
            return Err(e.into());
        }
    };
    step.finish(&format!("{} license(s)", page.items.len()));

    if portal.is_json() {
        return json::print(&JsonLicenses { licenses: &page });
    }
    println!();
    terminal::print_licenses(&page.items, page.total_count);
    Ok(())
}
