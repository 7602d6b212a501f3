//! `licport profile`

use anyhow::Result;
use licport_core::Route;

use super::Portal;
use crate::api;
use crate::output::{json, terminal};

pub const ROUTE: Route = Route::Profile;

pub fn run(portal: &Portal) -> Result<()> {
    let step = portal.step("Loading profile");
    let profile = match api::get_profile(&portal.http) {
        Ok(p) => p,
        Err(e) => {
            step.fail();
            return Err(e.into());
        }
    };
    step.finish(profile.api_status.as_deref().unwrap_or("ok"));

    if portal.is_json() {
        return json::print(&profile);
    }
    println!();
    terminal::print_profile(&profile);
    Ok(())
}
