//! `licport history`: placed orders, one page at a time

use anyhow::{anyhow, Result};
use colored::Colorize;
use licport_core::{OrderRecord, Pager, Route, ORDERS_PAGE_SIZE};

use super::Portal;
use crate::api;
use crate::http::HttpClient;
use crate::output::json::{self, JsonHistory};
use crate::output::terminal;

pub const ROUTE: Route = Route::Transactions;

/// Loads pages into `pager` until `pages` have been fetched (all of them
/// when `None`) or the history runs out.
pub fn load_pages(
    http: &HttpClient,
    pager: &mut Pager<OrderRecord>,
    pages: Option<usize>,
) -> usize {
    let mut fetched = 0;
    let mut next = pager.start();
    while let Some(req) = next {
        let result = api::list_orders(http, req.offset, req.limit).map_err(|e| e.message);
        pager.complete(result);
        fetched += 1;
        if pages.is_some_and(|max| fetched >= max) {
            break;
        }
        next = pager.on_intersect();
    }
    fetched
}

pub fn run(portal: &Portal, all: bool, pages: usize) -> Result<()> {
    let mut pager = Pager::new(ORDERS_PAGE_SIZE);
    let step = portal.step("Loading order history");
    let limit = if all { None } else { Some(pages.max(1)) };
    load_pages(&portal.http, &mut pager, limit);
    pager.dispose();

    if let Some(err) = pager.error() {
        step.fail();
        return Err(anyhow!("{}", err));
    }
    step.finish(&format!("{} order(s)", pager.items().len()));

    if portal.is_json() {
        return json::print(&JsonHistory {
            orders: pager.items(),
            has_more: pager.has_more(),
        });
    }

    println!();
    if pager.items().is_empty() {
        println!("  {}", "No orders yet.".dimmed());
        return Ok(());
    }
    terminal::print_orders(pager.items());
    if pager.has_more() {
        println!();
        println!(
            "  {}",
            "More orders available: pass --pages N or --all.".dimmed()
        );
    }
    Ok(())
}
