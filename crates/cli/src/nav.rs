//! Navigation hook
//!
//! The [`Navigator`] is the one place that knows the current location and
//! how to move away from it. `main` registers a redirect callback at start
//! and clears it at teardown; the HTTP client gets a handle by injection and
//! calls [`Navigator::redirect_to_login`] when the backend rejects the
//! session.

use licport_core::Route;
use std::sync::{Arc, Mutex, MutexGuard};

type Redirect = Arc<dyn Fn(Route) + Send + Sync>;

struct State {
    current: Route,
    redirect: Option<Redirect>,
}

#[derive(Clone)]
pub struct Navigator {
    state: Arc<Mutex<State>>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Navigator")
            .field("current", &state.current)
            .field("registered", &state.redirect.is_some())
            .finish()
    }
}

impl Navigator {
    pub fn new(current: Route) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                current,
                redirect: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Installs the callback invoked on every navigation.
    pub fn register<F>(&self, redirect: F)
    where
        F: Fn(Route) + Send + Sync + 'static,
    {
        self.lock().redirect = Some(Arc::new(redirect));
    }

    /// Drops the callback; later navigations only move the location.
    pub fn clear(&self) {
        self.lock().redirect = None;
    }

    pub fn is_registered(&self) -> bool {
        self.lock().redirect.is_some()
    }

    pub fn current(&self) -> Route {
        self.lock().current
    }

    pub fn set_current(&self, route: Route) {
        self.lock().current = route;
    }

    /// Moves to `route` and notifies the registered callback.
    pub fn navigate(&self, route: Route) {
        let redirect = {
            let mut state = self.lock();
            state.current = route;
            state.redirect.clone()
        };
        if let Some(redirect) = redirect {
            redirect(route);
        }
    }

    /// Sends the user to `/login` unless they are already there. Returns
    /// whether a navigation happened.
    pub fn redirect_to_login(&self) -> bool {
        if self.current() == Route::Login {
            return false;
        }
        self.navigate(Route::Login);
        true
    }
}
