use super::Route;

/// Where unauthenticated visitors are sent from protected pages.
pub const SIGN_IN_REDIRECT: Route = Route::SignIn;

/// Where authenticated users are sent from guest-only pages.
pub const AUTHENTICATED_REDIRECT: Route = Route::Home;

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDecision {
    Allow,
    RedirectTo(Route),
}

impl NavDecision {
    /// Redirect target path, if navigation was refused
    pub fn path(&self) -> Option<&'static str> {
        match self {
            NavDecision::Allow => None,
            NavDecision::RedirectTo(route) => Some(route.path()),
        }
    }
}

/// Access rule attached to a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Open,
    RequireAuth,
    RequireGuest,
}

impl Guard {
    /// Decide whether navigation from `from` to `to` may proceed.
    ///
    /// Only the session state drives the decision; the routes are passed for
    /// parity with framework guards and for logging by callers.
    pub fn evaluate(&self, _to: Route, _from: Option<Route>, authenticated: bool) -> NavDecision {
        match self {
            Guard::Open => NavDecision::Allow,
            Guard::RequireAuth => require_auth(authenticated),
            Guard::RequireGuest => require_guest(authenticated),
        }
    }
}

/// Only signed-in users may pass.
pub fn require_auth(authenticated: bool) -> NavDecision {
    if authenticated {
        NavDecision::Allow
    } else {
        NavDecision::RedirectTo(SIGN_IN_REDIRECT)
    }
}

/// Only signed-out visitors may pass.
pub fn require_guest(authenticated: bool) -> NavDecision {
    if authenticated {
        NavDecision::RedirectTo(AUTHENTICATED_REDIRECT)
    } else {
        NavDecision::Allow
    }
}
