mod support;

use licport_cli::commands::history::load_pages;
use licport_core::{OrderRecord, PageRequest, Pager, Route, ORDERS_PAGE_SIZE};
use serde_json::{json, Value};
use support::signed_in;

fn orders(from: usize, count: usize) -> Value {
    let rows: Vec<Value> = (from..from + count)
        .map(|i| json!({"id": format!("o{i}"), "total_amount": 10}))
        .collect();
    json!({ "data": rows })
}

fn offsets(h: &support::Harness) -> Vec<String> {
    h.script
        .requests()
        .iter()
        .map(|r| r.query[0].1.clone())
        .collect()
}

#[test]
fn single_page_by_default() {
    let h = signed_in(Route::Transactions);
    h.script.reply(200, orders(0, 10));

    let mut pager: Pager<OrderRecord> = Pager::new(ORDERS_PAGE_SIZE);
    let fetched = load_pages(&h.http, &mut pager, Some(1));

    assert_eq!(fetched, 1);
    assert_eq!(pager.items().len(), 10);
    assert!(pager.has_more());
    assert!(!pager.is_loading());
    assert_eq!(offsets(&h), vec!["0"]);
}

#[test]
fn draining_stops_at_the_short_page() {
    let h = signed_in(Route::Transactions);
    h.script.reply(200, orders(0, 10));
    h.script.reply(200, orders(10, 10));
    h.script.reply(200, orders(20, 3));

    let mut pager: Pager<OrderRecord> = Pager::new(ORDERS_PAGE_SIZE);
    let fetched = load_pages(&h.http, &mut pager, None);

    assert_eq!(fetched, 3);
    assert_eq!(pager.items().len(), 23);
    assert_eq!(pager.items()[22].id, "o22");
    assert!(!pager.has_more());
    assert_eq!(offsets(&h), vec!["0", "10", "20"]);
}

#[test]
fn page_two_is_requested_once_per_burst() {
    let h = signed_in(Route::Transactions);
    h.script.reply(200, orders(0, 10));
    let mut pager: Pager<OrderRecord> = Pager::new(ORDERS_PAGE_SIZE);
    load_pages(&h.http, &mut pager, Some(1));

    let burst: Vec<Option<PageRequest>> = (0..5).map(|_| pager.on_intersect()).collect();

    assert_eq!(
        burst[0],
        Some(PageRequest {
            offset: 10,
            limit: 10
        })
    );
    assert!(burst[1..].iter().all(Option::is_none));
}

#[test]
fn first_page_failure_is_reported() {
    let h = signed_in(Route::Transactions);
    h.script.reply(500, json!({"message": "db down"}));

    let mut pager: Pager<OrderRecord> = Pager::new(ORDERS_PAGE_SIZE);
    load_pages(&h.http, &mut pager, None);

    assert_eq!(pager.error(), Some("db down"));
    assert!(pager.items().is_empty());
    assert_eq!(h.script.requests().len(), 1);
}

#[test]
fn later_page_failure_keeps_loaded_orders() {
    let h = signed_in(Route::Transactions);
    h.script.reply(200, orders(0, 10));
    h.script.fail("timeout");

    let mut pager: Pager<OrderRecord> = Pager::new(ORDERS_PAGE_SIZE);
    load_pages(&h.http, &mut pager, None);

    assert_eq!(pager.error(), None);
    assert_eq!(pager.items().len(), 10);
    assert!(!pager.has_more());
}
