//! Client-side routing with session-based guards.
//!
//! This module provides:
//! - `Route`: The four pages and their paths
//! - `Guard` / `NavDecision`: Per-route access rules and their outcome
//! - `Router`: Resolves a requested path to the page that should be shown,
//!   following guard redirects
//!
//! Routing policy:
//!
//! | Path       | Guard        | Redirect when refused |
//! |------------|--------------|-----------------------|
//! | `/`        | open         | -                     |
//! | `/sign-in` | guest only   | `/home`               |
//! | `/sign-up` | guest only   | `/home`               |
//! | `/home`    | signed in    | `/sign-in`            |

pub mod guard;
pub mod route;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::auth::is_authenticated_at;
use crate::storage::KeyValueStore;

pub use guard::{require_auth, require_guest, Guard, NavDecision};
pub use route::Route;

/// Maximum number of guard redirects followed for a single navigation
const MAX_REDIRECTS: usize = 3;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouterError {
    #[error("No route matches path: {0}")]
    NotFound(String),

    #[error("Too many redirects navigating to {0}")]
    TooManyRedirects(String),
}

/// Result of a resolved navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    /// Page to display
    pub route: Route,
    /// Originally requested page, when a guard redirected away from it
    pub redirected_from: Option<Route>,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    guards: HashMap<Route, Guard>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Router with the standard route table
    pub fn new() -> Self {
        let guards = HashMap::from([
            (Route::Landing, Guard::Open),
            (Route::SignIn, Guard::RequireGuest),
            (Route::SignUp, Guard::RequireGuest),
            (Route::Home, Guard::RequireAuth),
        ]);
        Self { guards }
    }

    /// Replace the guard attached to `route`
    pub fn with_guard(mut self, route: Route, guard: Guard) -> Self {
        self.guards.insert(route, guard);
        self
    }

    pub fn guard_for(&self, route: Route) -> Guard {
        self.guards.get(&route).copied().unwrap_or(Guard::Open)
    }

    /// Resolve navigation to `to_path` against the current session
    pub fn resolve<S: KeyValueStore + ?Sized>(
        &self,
        to_path: &str,
        from: Option<Route>,
        store: &mut S,
    ) -> Result<Navigation, RouterError> {
        self.resolve_at(to_path, from, store, Utc::now())
    }

    /// Resolve navigation with an explicit clock.
    ///
    /// The session is re-checked at every hop, so an invalid token is purged
    /// from `store` as a side effect.
    pub fn resolve_at<S: KeyValueStore + ?Sized>(
        &self,
        to_path: &str,
        from: Option<Route>,
        store: &mut S,
        now: DateTime<Utc>,
    ) -> Result<Navigation, RouterError> {
        let requested =
            Route::from_path(to_path).ok_or_else(|| RouterError::NotFound(to_path.to_string()))?;

        let mut target = requested;
        for _ in 0..=MAX_REDIRECTS {
            let guard = self.guard_for(target);
            let decision = match guard {
                Guard::Open => NavDecision::Allow,
                _ => guard.evaluate(target, from, is_authenticated_at(&mut *store, now)),
            };

            match decision {
                NavDecision::Allow => {
                    let redirected_from = (target != requested).then_some(requested);
                    debug!(
                        page = target.name(),
                        to = target.path(),
                        ?redirected_from,
                        "Navigation allowed"
                    );
                    return Ok(Navigation {
                        route: target,
                        redirected_from,
                    });
                }
                NavDecision::RedirectTo(next) => {
                    debug!(
                        page = target.name(),
                        from = target.path(),
                        to = next.path(),
                        "Guard redirect"
                    );
                    target = next;
                }
            }
        }

        Err(RouterError::TooManyRedirects(requested.path().to_string()))
    }
}
