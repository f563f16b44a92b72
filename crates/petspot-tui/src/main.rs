//! Petspot TUI - a terminal front end for the Petspot pet-adoption service.
//!
//! The interface has four pages (landing, sign in, sign up, home). Every
//! navigation goes through the route guards in `petspot-core`, so the home
//! page is only reachable with a valid, unexpired session token.

mod app;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use petspot_core::auth::{self, SessionError};
use petspot_core::models::LoginPayload;
use petspot_core::{ApiClient, Config, FileStore, Route};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// How often the current page's guard is re-checked while idle
const REVALIDATE_INTERVAL: Duration = Duration::from_secs(1);

/// Log file name in the cache directory
const LOG_FILE: &str = "petspot.log";

fn env_filter() -> EnvFilter {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr; used by the non-interactive commands
fn init_tracing_stderr() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

/// Log to a file so output does not corrupt the terminal UI
fn init_tracing_file(config: &Config) -> Result<WorkerGuard> {
    let log_dir = config.cache_dir()?;
    std::fs::create_dir_all(&log_dir)?;

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(env_filter())
        .init();
    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("--status") => {
            init_tracing_stderr();
            return print_status();
        }
        Some("--logout") => {
            init_tracing_stderr();
            return logout_command();
        }
        Some("--login") => {
            init_tracing_stderr();
            let email = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("Usage: petspot --login <email>"))?;
            return login_command(email).await;
        }
        Some(other) => {
            eprintln!("Unknown argument: {}", other);
            eprintln!("Usage: petspot [--status | --logout | --login <email>]");
            std::process::exit(2);
        }
        None => {}
    }

    let config = Config::load().unwrap_or_default();
    let _log_guard = init_tracing_file(&config)?;
    info!("Petspot TUI starting");

    // Create app before touching the terminal so setup errors print normally
    let mut app = App::new()?;

    // Start at home; the guard sends guests to sign in
    app.navigate(Route::Home.path());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Petspot TUI shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut last_revalidate = Instant::now();

    loop {
        // Leave guarded pages as soon as the session lapses
        if last_revalidate.elapsed() >= REVALIDATE_INTERVAL {
            app.revalidate_route();
            last_revalidate = Instant::now();
        }

        terminal.draw(|f| render(f, app))?;

        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}

fn open_store(config: &Config) -> Result<FileStore> {
    Ok(FileStore::open(config.storage_file()?))
}

/// Print whether a valid session is stored
fn print_status() -> Result<()> {
    let config = Config::load()?;
    let mut store = open_store(&config)?;

    match auth::check_session(&mut store, Utc::now()) {
        Ok(session) => {
            println!(
                "Signed in (expires {}, {} min left)",
                session.expires_at().format("%Y-%m-%d %H:%M:%S UTC"),
                session.minutes_until_expiry(Utc::now())
            );
        }
        Err(SessionError::Missing) => println!("Not signed in"),
        Err(e) => println!("Not signed in: {} (stored token cleared)", e),
    }
    Ok(())
}

fn logout_command() -> Result<()> {
    let config = Config::load()?;
    let mut store = open_store(&config)?;
    auth::logout(&mut store)?;
    println!("Signed out");
    Ok(())
}

/// Interactive login without the TUI
async fn login_command(email: &str) -> Result<()> {
    let mut config = Config::load()?;
    let mut store = open_store(&config)?;
    let api = ApiClient::new(config.api_base_url())?;

    let password = rpassword::prompt_password("Password: ")?;
    eprintln!("Authenticating...");

    auth::try_login(&api, &mut store, &LoginPayload::new(email, password)).await?;

    config.last_email = Some(email.to_string());
    config.save()?;

    println!("Login successful!");
    Ok(())
}
