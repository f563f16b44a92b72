use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use petspot_core::Route;

use crate::app::{App, AppState};

use super::pages::{home, landing, sign_in, sign_up};
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Page content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_page(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Petspot";
    let page = format!("{}  ", app.route.title());

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.len() + page.len()),
        )),
        Span::styled(page, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_page(frame: &mut Frame, app: &App, area: Rect) {
    match app.route {
        Route::Landing => landing::render(frame, app, area),
        Route::SignIn => sign_in::render(frame, app, area),
        Route::SignUp => sign_up::render(frame, app, area),
        Route::Home => home::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.route {
        Route::Landing | Route::Home => "[q]uit",
        Route::SignIn | Route::SignUp => "[Tab] next field | [Esc] back",
    };

    let left_text = match app.status_message {
        Some(ref msg) => format!(" {} ", msg),
        None => format!(" {} ", app.route.path()),
    };
    let right_text = format!(" {} ", shortcuts);

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::highlight_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);

    frame.render_widget(Paragraph::new(status_line).style(styles::status_bar_style()), area);
}

/// Create a centered rectangle with fixed dimensions
pub(crate) fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
