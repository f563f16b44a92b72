//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes and navigation requests.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use petspot_core::Route;

use crate::app::{can_add_char, App, AppState, SignInFocus, SignUpFocus};

/// Handle a key press. Returns true when the application should exit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    match app.route {
        Route::Landing => handle_landing_input(app, key),
        Route::Home => handle_home_input(app, key),
        Route::SignIn => handle_sign_in_input(app, key).await,
        Route::SignUp => handle_sign_up_input(app, key).await,
    }
    Ok(false)
}

fn handle_landing_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('s') => {
            app.navigate(Route::SignIn.path());
        }
        KeyCode::Char('r') => {
            app.navigate(Route::SignUp.path());
        }
        KeyCode::Char('h') => {
            app.navigate(Route::Home.path());
        }
        _ => {}
    }
}

fn handle_home_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('l') => app.sign_out(),
        KeyCode::Esc => {
            app.navigate(Route::Landing.path());
        }
        _ => {}
    }
}

/// Edit the focused text field. Returns true if the key was consumed.
fn edit_field(field: Option<(&mut String, usize)>, key: KeyEvent) -> bool {
    let Some((value, max_len)) = field else {
        return false;
    };
    match key.code {
        KeyCode::Backspace => {
            value.pop();
            true
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if can_add_char(value.chars().count(), max_len, c) {
                value.push(c);
            }
            true
        }
        _ => false,
    }
}

async fn handle_sign_in_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
        app.navigate(Route::SignUp.path());
        return;
    }
    if edit_field(app.sign_in.focused_field(), key) {
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.navigate(Route::Landing.path());
        }
        KeyCode::Down | KeyCode::Tab => app.sign_in.focus = app.sign_in.focus.next(),
        KeyCode::Up | KeyCode::BackTab => app.sign_in.focus = app.sign_in.focus.prev(),
        KeyCode::Enter => match app.sign_in.focus {
            SignInFocus::Email | SignInFocus::Password => {
                app.sign_in.focus = app.sign_in.focus.next();
            }
            SignInFocus::Button => {
                app.status_message = Some("Signing in...".to_string());
                if !app.attempt_sign_in().await {
                    app.status_message = None;
                }
            }
        },
        _ => {}
    }
}

async fn handle_sign_up_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
        app.navigate(Route::SignIn.path());
        return;
    }
    if edit_field(app.sign_up.focused_field(), key) {
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.navigate(Route::Landing.path());
        }
        KeyCode::Down | KeyCode::Tab => app.sign_up.focus = app.sign_up.focus.next(),
        KeyCode::Up | KeyCode::BackTab => app.sign_up.focus = app.sign_up.focus.prev(),
        KeyCode::Enter => match app.sign_up.focus {
            SignUpFocus::Button => {
                app.attempt_sign_up().await;
            }
            _ => app.sign_up.focus = app.sign_up.focus.next(),
        },
        _ => {}
    }
}
