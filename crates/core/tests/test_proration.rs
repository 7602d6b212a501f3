//! Billing properties of the proration calculator

use chrono::{Duration, NaiveDate};
use licport_core::model::CreateOrderRequest;
use licport_core::proration::{days_left, round_cents};
use licport_core::{ActiveOrder, License, ProrationContext, Quote, Selection};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn active(remaining_days: i64, expiry: NaiveDate) -> ActiveOrder {
    ActiveOrder {
        remaining_days,
        expiry: expiry.format("%Y-%m-%d").to_string(),
        total_records: 0,
    }
}

const PRICES: [f64; 6] = [0.0, 0.99, 9.5, 15.0, 30.0, 249.99];
const QUANTITIES: [u32; 4] = [1, 2, 7, 25];

#[test]
fn full_price_without_active_order() {
    let ctx = ProrationContext::new(None, today());
    for price in PRICES {
        for qty in QUANTITIES {
            assert_eq!(ctx.charge(price, qty).total, price * f64::from(qty));
        }
    }
}

#[test]
fn prorated_total_follows_days_left() {
    for (remaining, offset) in [(30, 10), (31, 0), (14, 20), (365, -3)] {
        let expiry = today() + Duration::days(offset);
        let ctx = ProrationContext::new(Some(&active(remaining, expiry)), today());
        let left = days_left(expiry, today());
        assert!(left >= 0);
        assert_eq!(ctx.days_left(), left);
        for price in PRICES {
            for qty in QUANTITIES {
                let line = ctx.charge(price, qty);
                let expected = left as f64 * (price / remaining as f64) * f64::from(qty);
                assert!((line.total - expected).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn zero_remaining_days_never_divides() {
    let expiry = today() + Duration::days(5);
    let zero = ProrationContext::new(Some(&active(0, expiry)), today());
    let none = ProrationContext::new(None, today());
    for price in PRICES {
        let line = zero.charge(price, 3);
        assert!(line.total.is_finite());
        assert_eq!(line, none.charge(price, 3));
    }
}

#[test]
fn aggregate_is_sum_of_lines_under_one_snapshot() {
    let ctx = ProrationContext::new(
        Some(&active(30, today() + Duration::days(12))),
        today(),
    );
    let lines: Vec<(f64, u32)> = PRICES
        .iter()
        .copied()
        .zip(QUANTITIES.iter().copied().cycle())
        .collect();
    let sum: f64 = lines.iter().map(|&(p, q)| ctx.charge(p, q).total).sum();
    assert_eq!(ctx.total(lines.iter().copied()), sum);
}

fn license(id: &str, price: f64) -> License {
    License {
        id: id.to_string(),
        name: id.to_uppercase(),
        monthly_price: format!("{:.2}", price),
        status_id: Some(1),
        created_at: None,
        updated_at: None,
        amount_per_unit: None,
    }
}

fn order_for(ctx: &ProrationContext, lines: &[(f64, u32)]) -> (Quote, CreateOrderRequest) {
    let mut selection = Selection::new();
    for (i, &(price, qty)) in lines.iter().enumerate() {
        selection
            .push(&license(&format!("lic-{}", i), price), qty)
            .unwrap();
    }
    let quote = selection.quote(ctx);
    let request = quote.to_order_request();
    (quote, request)
}

#[test]
fn submitted_total_matches_invoice_total_to_the_cent() {
    for (remaining, offset) in [(30, 6), (31, 17), (365, 200)] {
        let ctx = ProrationContext::new(
            Some(&active(remaining, today() + Duration::days(offset))),
            today(),
        );
        for qty in QUANTITIES {
            let lines: Vec<(f64, u32)> = PRICES.iter().skip(1).map(|&p| (p, qty)).collect();
            let (quote, request) = order_for(&ctx, &lines);
            assert_eq!(request.total_amount, round_cents(quote.total));
            assert!((request.total_amount - quote.total).abs() <= 0.005 + 1e-9);
        }
    }
}

#[test]
fn unit_amounts_drift_at_most_half_a_cent_per_unit() {
    let ctx = ProrationContext::new(
        Some(&active(30, today() + Duration::days(6))),
        today(),
    );
    let (quote, request) = order_for(&ctx, &[(10.0, 25), (9.5, 7), (249.99, 1)]);

    let units: u32 = request.order_items.iter().map(|i| i.quantity).sum();
    let items_sum: f64 = request
        .order_items
        .iter()
        .map(|i| i.amount_per_unit * f64::from(i.quantity))
        .sum();
    for (item, line) in request.order_items.iter().zip(quote.billable_lines()) {
        assert!((item.amount_per_unit - line.charge.amount_per_unit).abs() <= 0.005 + 1e-9);
    }
    let bound = 0.005 * f64::from(units) + 0.005;
    assert!((items_sum - request.total_amount).abs() <= bound + 1e-9);
}

#[test]
fn single_unit_lines_reproduce_total_within_a_cent() {
    let ctx = ProrationContext::new(
        Some(&active(30, today() + Duration::days(6))),
        today(),
    );
    let (_, request) = order_for(&ctx, &[(10.0, 1)]);
    let item = &request.order_items[0];
    assert!((item.amount_per_unit - request.total_amount).abs() <= 0.01);
}

#[test]
fn twenty_five_seats_keep_the_invoice_total() {
    // 7 days left of 30 at $10: 2.333... per seat
    let ctx = ProrationContext::new(
        Some(&active(30, today() + Duration::days(6))),
        today(),
    );
    let (_, request) = order_for(&ctx, &[(10.0, 25)]);
    assert_eq!(request.total_amount, 58.33);
    assert_eq!(request.order_items[0].amount_per_unit, 2.33);
    assert_eq!(request.order_items[0].quantity, 25);
}

#[test]
fn scenario_thirty_dollars_ten_days_out() {
    let ctx = ProrationContext::new(
        Some(&active(30, today() + Duration::days(10))),
        today(),
    );
    let line = ctx.charge(30.0, 2);
    assert_eq!(line.days_left, 11);
    assert_eq!(line.per_day_cost, 1.0);
    assert_eq!(round_cents(line.total), 22.0);
}

#[test]
fn scenario_fifteen_dollars_times_three() {
    let ctx = ProrationContext::new(None, today());
    assert_eq!(ctx.charge(15.0, 3).total, 45.0);
}
