//! `licport invoice <order-id>`: download an order's invoice document

use anyhow::{Context, Result};
use base64::Engine;
use colored::Colorize;
use licport_core::Route;
use serde_json::json;
use std::path::{Path, PathBuf};

use super::Portal;
use crate::api;
use crate::output::json;

pub const ROUTE: Route = Route::Transactions;

/// `invoice-<order-id>.html`, with path separators in the id replaced.
pub fn default_file_name(order_id: &str) -> String {
    let safe: String = order_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("invoice-{}.html", safe)
}

/// Decodes the base64 document. Whitespace inside the payload is ignored.
pub fn decode_document(encoded: &str) -> Result<Vec<u8>> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(compact)
        .context("Invoice payload is not valid base64")
}

pub fn run(portal: &Portal, order_id: &str, out: Option<&Path>, open_after: bool) -> Result<()> {
    let step = portal.step("Downloading invoice");
    let encoded = match api::download_order_invoice(&portal.http, order_id) {
        Ok(e) => e,
        Err(e) => {
            step.fail();
            return Err(e.into());
        }
    };
    let bytes = decode_document(&encoded)?;

    let path = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default_file_name(order_id)));
    std::fs::write(&path, &bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    step.finish(&format!("{} bytes", bytes.len()));

    if portal.is_json() {
        json::print(&json!({
            "order_id": order_id,
            "path": path.display().to_string(),
            "bytes": bytes.len(),
        }))?;
    } else {
        eprintln!(
            "  {} Saved to {}",
            "\u{2713}".green(),
            path.display().to_string().bold()
        );
    }

    if open_after {
        if let Err(e) = open::that(&path) {
            eprintln!("  {} Could not open {}: {}", "warn:".yellow(), path.display(), e);
        }
    }
    Ok(())
}
