/// Navigable pages of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum Route {
    Landing,
    SignIn,
    SignUp,
    Home,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Landing, Route::SignIn, Route::SignUp, Route::Home];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::SignIn => "/sign-in",
            Route::SignUp => "/sign-up",
            Route::Home => "/home",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Landing => "landing-page",
            Route::SignIn => "login-page",
            Route::SignUp => "register-page",
            Route::Home => "home-page",
        }
    }

    /// Get the display title for this page.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Landing => "Welcome",
            Route::SignIn => "Sign in",
            Route::SignUp => "Sign up",
            Route::Home => "Home",
        }
    }

    /// Match a path, ignoring any query string, fragment or trailing slash.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }
}
