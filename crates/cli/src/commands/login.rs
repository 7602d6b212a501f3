//! `licport login`

use anyhow::{Context, Result};
use colored::Colorize;
use licport_core::Route;
use serde_json::json;

use super::Portal;
use crate::auth;
use crate::output::json;

pub const ROUTE: Route = Route::Login;

/// Password comes from `--password`, then `LICPORT_PASSWORD`, then a
/// line read from stdin.
pub fn run(portal: &Portal, email: &str, password: Option<&str>) -> Result<()> {
    let password = match password {
        Some(p) => p.to_string(),
        None => read_password()?,
    };

    let step = portal.step("Signing in");
    match auth::login(&portal.http, email, &password) {
        Ok(session) => {
            step.finish("session stored");
            if portal.is_json() {
                json::print(&json!({
                    "authenticated": true,
                    "has_refresh_token": session.refresh_token.is_some(),
                }))?;
            } else {
                eprintln!();
                eprintln!("  {} {}", "\u{2713}".green(), "Login Successful!".bold());
                eprintln!("  Run {} to see available licenses.", "licport licenses".bold());
            }
            portal.http.navigator().set_current(Route::Home);
            Ok(())
        }
        Err(e) => {
            step.fail();
            Err(e).context("Login failed")
        }
    }
}

fn read_password() -> Result<String> {
    if let Ok(p) = std::env::var("LICPORT_PASSWORD") {
        return Ok(p);
    }
    eprint!("  Password: ");
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}
