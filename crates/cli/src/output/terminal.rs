//! Terminal output formatting

use colored::Colorize;
use licport_core::invoice::format_billing_date;
use licport_core::proration::Basis;
use licport_core::{InvoiceDraft, License, OrderRecord, Profile, ProrationContext, Transaction};

use super::{money, truncate};

pub fn print_licenses(licenses: &[License], total_count: Option<u64>) {
    if licenses.is_empty() {
        println!("  {}", "No licenses available.".dimmed());
        return;
    }
    println!(
        "  {:<10} {:<32} {:>12}",
        "ID".bold(),
        "NAME".bold(),
        "PER MONTH".bold()
    );
    for l in licenses {
        println!(
            "  {:<10} {:<32} {:>12}",
            truncate(&l.id, 10),
            truncate(&l.name, 32),
            money(l.price_per_month())
        );
    }
    if let Some(total) = total_count {
        println!();
        println!(
            "  {}",
            format!("Showing {} of {}", licenses.len(), total).dimmed()
        );
    }
}

pub fn print_basis(ctx: &ProrationContext) {
    match ctx.basis {
        Basis::FullPrice => {
            println!("  {}", "No active subscription: full monthly price.".dimmed());
        }
        Basis::Prorated {
            remaining_days,
            expiry,
            days_left,
        } => {
            println!(
                "  {} {} day(s) left until {} ({}-day term)",
                "Prorated:".cyan().bold(),
                days_left,
                format_billing_date(expiry),
                remaining_days
            );
        }
    }
}

pub fn print_invoice(draft: &InvoiceDraft) {
    println!();
    println!("  {} {}", "Invoice".bold(), draft.invoice_no.cyan());
    println!(
        "  {}: {}",
        "Purchase date".bold(),
        format_billing_date(draft.purchase_date)
    );
    println!("  {}: {}", "Billing period".bold(), draft.billing_period());
    println!();
    println!(
        "  {:<28} {:>5} {:>12} {:>12}",
        "LICENSE".bold(),
        "QTY".bold(),
        "PER UNIT".bold(),
        "AMOUNT".bold()
    );
    for line in &draft.lines {
        let name = line
            .row
            .license_name
            .as_deref()
            .or(line.row.license_id.as_deref())
            .unwrap_or("-");
        println!(
            "  {:<28} {:>5} {:>12} {:>12}",
            truncate(name, 28),
            line.row.quantity,
            money(line.charge.amount_per_unit),
            money(line.charge.total)
        );
    }
    println!("  {}", "─".repeat(60).dimmed());
    println!("  {:<47} {:>12}", "Total".bold(), money(draft.total).bold());
    println!();
}

pub fn print_orders(orders: &[OrderRecord]) {
    for order in orders {
        let invoice = if order.invoice_no.is_empty() {
            order.id.as_str()
        } else {
            order.invoice_no.as_str()
        };
        println!(
            "  {:<12} {:<12} {:>12}  {}",
            invoice.cyan(),
            date_part(&order.invoice_date),
            money(order.total_amount),
            order.payment_label().dimmed()
        );
        for item in &order.order_items {
            println!(
                "    {} {} x{} {}",
                "·".dimmed(),
                truncate(item.license_name(), 30),
                item.quantity,
                money(item.amount_total_qty).dimmed()
            );
        }
    }
}

pub fn print_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("  {}", "No transactions yet.".dimmed());
        return;
    }
    for t in transactions {
        println!(
            "  {:<12} {:<12} {:<10} {:>12}  {}",
            truncate(&t.id, 12),
            t.date.as_deref().map(date_part).unwrap_or("-"),
            t.kind.as_deref().unwrap_or("-"),
            t.amount.map(money).unwrap_or_else(|| "-".into()),
            t.description.as_deref().unwrap_or("").dimmed()
        );
    }
}

pub fn print_profile(profile: &Profile) {
    println!("  {}: {}", "Status".bold(), profile.status);
    if let Some(api_status) = &profile.api_status {
        println!("  {}: {}", "API status".bold(), api_status);
    }
    if let Some(message) = &profile.message {
        println!("  {}: {}", "Message".bold(), message);
    }
    let data = serde_json::to_string_pretty(&profile.data).unwrap_or_default();
    println!("  {}:", "Data".bold());
    for line in data.lines() {
        println!("    {}", line);
    }
}

/// `2025-03-10T08:00:00Z` → `2025-03-10`.
fn date_part(raw: &str) -> &str {
    raw.split('T').next().unwrap_or(raw)
}
