//! `licport status`: local session state, no network

use anyhow::Result;
use colored::Colorize;

use super::Portal;
use crate::auth;
use crate::output::json::{self, JsonStatus};

pub fn run(portal: &Portal) -> Result<()> {
    let session = portal.http.session();
    let authenticated = auth::current_token(&portal.http).is_some();

    if portal.is_json() {
        return json::print(&JsonStatus {
            authenticated,
            base_url: portal.http.base_url(),
            session_dir: session.dir().display().to_string(),
            has_refresh_token: session.refresh_token().is_some(),
        });
    }

    let state = if authenticated {
        "signed in".green()
    } else {
        "signed out".yellow()
    };
    eprintln!("  {}: {}", "Session".bold(), state);
    eprintln!("  {}: {}", "Backend".bold(), portal.http.base_url());
    eprintln!(
        "  {}: {}",
        "Stored in".bold(),
        session.dir().display().to_string().dimmed()
    );
    if !authenticated {
        eprintln!();
        eprintln!("  Run {} to sign in.", "licport login <email>".bold());
    }
    Ok(())
}
