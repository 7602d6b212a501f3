//! Client-side locations and the authentication guard

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Login,
    LoginSuccess,
    Home,
    Purchase,
    Transactions,
    Profile,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Login,
        Route::LoginSuccess,
        Route::Home,
        Route::Purchase,
        Route::Transactions,
        Route::Profile,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::LoginSuccess => "/login-success",
            Route::Home => "/",
            Route::Purchase => "/purchase",
            Route::Transactions => "/transactions",
            Route::Profile => "/profile",
        }
    }

    /// Maps a path to its route; unknown paths land on `/`.
    pub fn parse(path: &str) -> Route {
        let trimmed = path.split(&['?', '#'][..]).next().unwrap_or("");
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Route::ALL
            .into_iter()
            .find(|r| r.path() == normalized)
            .unwrap_or(Route::Home)
    }

    pub fn requires_auth(self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Where navigation to `route` actually ends up.
pub fn guard(route: Route, authenticated: bool) -> Route {
    if route.requires_auth() && !authenticated {
        Route::Login
    } else {
        route
    }
}
