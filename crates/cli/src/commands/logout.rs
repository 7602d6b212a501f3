//! `licport logout`

use anyhow::Result;
use colored::Colorize;

use super::Portal;
use crate::auth;

pub fn run(portal: &Portal) -> Result<()> {
    auth::logout(&portal.http)?;
    if !portal.is_json() {
        eprintln!("  {} Session removed.", "\u{2713}".green());
    }
    Ok(())
}
