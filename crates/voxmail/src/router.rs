use voxmail_core::{Navigator, Route};

use tracing::{debug, info};

/// Current screen plus the private-route guard.
#[derive(Debug)]
pub struct Router {
    current: Route,
    authenticated: bool,
}

impl Router {
    /// Start on the dashboard when signed in, else on login.
    pub fn new(authenticated: bool) -> Self {
        Self {
            current: if authenticated {
                Route::Dashboard
            } else {
                Route::Login
            },
            authenticated,
        }
    }

    /// Update the guard. Signing out while on a private route bounces to login.
    pub fn set_authenticated(&mut self, authenticated: bool) {
        self.authenticated = authenticated;
        if !authenticated && self.current.is_private() {
            debug!(from = %self.current, "Signed out on private route");
            self.current = Route::Login;
        }
    }
}

impl Navigator for Router {
    fn navigate(&mut self, route: Route) {
        let route = if route.is_private() && !self.authenticated {
            debug!(requested = %route, "Private route while signed out");
            Route::Login
        } else {
            route
        };

        if route != self.current {
            info!(from = %self.current, to = %route, "Navigate");
            self.current = route;
        }
    }

    fn current(&self) -> &Route {
        &self.current
    }
}
