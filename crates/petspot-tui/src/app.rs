//! Application state management for Petspot.
//!
//! This module contains the core `App` struct that owns the services
//! (config, storage, API client, router), the current page and the state of
//! the sign-in and sign-up forms.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info, warn};

use petspot_core::auth::{self, SessionInfo};
use petspot_core::models::{LoginPayload, RegisterPayload};
use petspot_core::{ApiClient, Config, FileStore, KeyValueStore, Route, Router};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for email input.
const MAX_EMAIL_LENGTH: usize = 100;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for the owner name.
const MAX_NAME_LENGTH: usize = 80;

/// Maximum length for phone input.
const MAX_PHONE_LENGTH: usize = 20;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ConfirmingQuit,
    Quitting,
}

/// Sign-in form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInFocus {
    Email,
    Password,
    Button,
}

impl SignInFocus {
    pub fn next(&self) -> Self {
        match self {
            SignInFocus::Email => SignInFocus::Password,
            SignInFocus::Password => SignInFocus::Button,
            SignInFocus::Button => SignInFocus::Email,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            SignInFocus::Email => SignInFocus::Button,
            SignInFocus::Password => SignInFocus::Email,
            SignInFocus::Button => SignInFocus::Password,
        }
    }
}

/// Sign-up form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpFocus {
    Name,
    Email,
    Password,
    Phone,
    Button,
}

impl SignUpFocus {
    pub fn next(&self) -> Self {
        match self {
            SignUpFocus::Name => SignUpFocus::Email,
            SignUpFocus::Email => SignUpFocus::Password,
            SignUpFocus::Password => SignUpFocus::Phone,
            SignUpFocus::Phone => SignUpFocus::Button,
            SignUpFocus::Button => SignUpFocus::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            SignUpFocus::Name => SignUpFocus::Button,
            SignUpFocus::Email => SignUpFocus::Name,
            SignUpFocus::Password => SignUpFocus::Email,
            SignUpFocus::Phone => SignUpFocus::Password,
            SignUpFocus::Button => SignUpFocus::Phone,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
    pub focus: SignInFocus,
    pub error: Option<String>,
}

impl SignInForm {
    fn new(email: String) -> Self {
        let focus = if email.is_empty() {
            SignInFocus::Email
        } else {
            SignInFocus::Password
        };
        Self {
            email,
            password: String::new(),
            focus,
            error: None,
        }
    }

    /// Field under the cursor, if it accepts text
    pub fn focused_field(&mut self) -> Option<(&mut String, usize)> {
        match self.focus {
            SignInFocus::Email => Some((&mut self.email, MAX_EMAIL_LENGTH)),
            SignInFocus::Password => Some((&mut self.password, MAX_PASSWORD_LENGTH)),
            SignInFocus::Button => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub focus: SignUpFocus,
    pub error: Option<String>,
}

impl Default for SignUpForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            phone: String::new(),
            focus: SignUpFocus::Name,
            error: None,
        }
    }
}

impl SignUpForm {
    pub fn focused_field(&mut self) -> Option<(&mut String, usize)> {
        match self.focus {
            SignUpFocus::Name => Some((&mut self.name, MAX_NAME_LENGTH)),
            SignUpFocus::Email => Some((&mut self.email, MAX_EMAIL_LENGTH)),
            SignUpFocus::Password => Some((&mut self.password, MAX_PASSWORD_LENGTH)),
            SignUpFocus::Phone => Some((&mut self.phone, MAX_PHONE_LENGTH)),
            SignUpFocus::Button => None,
        }
    }

    fn payload(&self) -> RegisterPayload {
        RegisterPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            phone: self.phone.trim().to_string(),
        }
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    /// Where the config is saved; the user config dir when unset
    pub config_path: Option<PathBuf>,
    pub store: Box<dyn KeyValueStore>,
    pub api: ApiClient,
    pub router: Router,

    // UI State
    pub state: AppState,
    pub route: Route,
    pub sign_in: SignInForm,
    pub sign_up: SignUpForm,
    pub status_message: Option<String>,

    /// Session as of the last revalidation, for display
    pub session: Option<SessionInfo>,
}

impl App {
    /// Create a new application instance backed by the on-disk store
    pub fn new() -> Result<Self> {
        debug!("App::new() starting");
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let storage_file = config.storage_file()?;
        debug!(?storage_file, "Storage file configured");
        let store = FileStore::open(storage_file);

        let base_url = config.api_base_url();
        if base_url.is_none() {
            warn!("API base URL is not configured; sign in and sign up will fail");
        }
        let api = ApiClient::new(base_url)?;

        Ok(Self::with_parts(config, Box::new(store), api))
    }

    /// Assemble an app from already-built services
    pub fn with_parts(config: Config, store: Box<dyn KeyValueStore>, api: ApiClient) -> Self {
        let last_email = config.last_email.clone().unwrap_or_default();
        Self {
            config,
            config_path: None,
            store,
            api,
            router: Router::new(),
            state: AppState::Normal,
            route: Route::Landing,
            sign_in: SignInForm::new(last_email),
            sign_up: SignUpForm::default(),
            status_message: None,
            session: None,
        }
    }

    /// Save the config somewhere other than the user config dir
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    fn save_config(&self) -> Result<()> {
        match self.config_path {
            Some(ref path) => self.config.save_to(path),
            None => self.config.save(),
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate to `path`, honoring route guards.
    /// Returns false if the path does not resolve to any page.
    pub fn navigate(&mut self, path: &str) -> bool {
        match self.router.resolve(path, Some(self.route), &mut *self.store) {
            Ok(nav) => {
                if nav.route != self.route {
                    self.enter(nav.route);
                }
                self.status_message = nav
                    .redirected_from
                    .map(|from| format!("{} is not available, showing {}", from.title(), nav.route.title()));
                true
            }
            Err(e) => {
                warn!(error = %e, "Navigation failed");
                self.status_message = Some(e.to_string());
                false
            }
        }
    }

    /// Re-run the current page's guard, e.g. after the session expired
    pub fn revalidate_route(&mut self) {
        self.refresh_session();
        if let Ok(nav) = self.router.resolve(self.route.path(), None, &mut *self.store) {
            if nav.route != self.route {
                info!(from = self.route.path(), to = nav.route.path(), "Session changed, leaving page");
                self.enter(nav.route);
                self.status_message = Some("Your session has ended. Please sign in again.".to_string());
            }
        }
    }

    fn enter(&mut self, route: Route) {
        self.route = route;
        self.refresh_session();
        match route {
            Route::SignIn => {
                self.sign_in.error = None;
                self.sign_in.password.clear();
                self.sign_in.focus = if self.sign_in.email.is_empty() {
                    SignInFocus::Email
                } else {
                    SignInFocus::Password
                };
            }
            Route::SignUp => {
                self.sign_up.error = None;
            }
            Route::Landing | Route::Home => {}
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub fn is_authenticated(&mut self) -> bool {
        auth::is_authenticated(&mut *self.store)
    }

    /// Re-read the stored session, dropping it if no longer valid
    pub fn refresh_session(&mut self) -> Option<SessionInfo> {
        self.session = auth::check_session(&mut *self.store, Utc::now()).ok();
        self.session
    }

    /// Submit the sign-in form
    pub async fn attempt_sign_in(&mut self) -> bool {
        let email = self.sign_in.email.trim().to_string();
        if email.is_empty() || self.sign_in.password.is_empty() {
            self.sign_in.error = Some("Email and password required".to_string());
            return false;
        }
        self.sign_in.error = None;

        let payload = LoginPayload::new(email.clone(), self.sign_in.password.clone());
        if !auth::login(&self.api, &mut *self.store, &payload).await {
            self.sign_in.password.clear();
            self.sign_in.error = Some("Sign in failed. Check your email and password.".to_string());
            return false;
        }

        self.sign_in.password.clear();
        self.config.last_email = Some(email);
        if let Err(e) = self.save_config() {
            warn!(error = %e, "Failed to save config");
        }

        self.navigate(Route::Home.path())
    }

    /// Submit the sign-up form
    pub async fn attempt_sign_up(&mut self) -> bool {
        let payload = self.sign_up.payload();
        if let Some(field) = payload.first_missing_field() {
            self.sign_up.error = Some(format!("Please fill in the {} field", field));
            return false;
        }
        self.sign_up.error = None;

        if !auth::register_user(&self.api, &payload).await {
            self.sign_up.error = Some("Registration failed. Please try again.".to_string());
            return false;
        }

        self.sign_in.email = payload.email;
        self.sign_up = SignUpForm::default();
        self.navigate(Route::SignIn.path());
        self.status_message = Some("Account created. Please sign in.".to_string());
        true
    }

    pub fn sign_out(&mut self) {
        if let Err(e) = auth::logout(&mut *self.store) {
            warn!(error = %e, "Failed to clear session");
        }
        info!("Signed out");
        self.navigate(Route::Landing.path());
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a character may be appended to a field holding `current_len` chars
pub fn can_add_char(current_len: usize, max_len: usize, c: char) -> bool {
    current_len < max_len && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================
