use chrono::Utc;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let owner = app.config.last_email.as_deref().unwrap_or("owner");

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  Welcome back, {}", owner), styles::title_style())),
        Line::from(""),
    ];

    match app.session {
        Some(session) => {
            let minutes = session.minutes_until_expiry(Utc::now());
            let expires = session.expires_at().format("%Y-%m-%d %H:%M UTC");
            lines.push(Line::from(vec![
                Span::styled("  Session: ", styles::muted_style()),
                Span::styled("active", styles::success_style()),
                Span::styled(
                    format!(" ({} min left, expires {})", minutes, expires),
                    styles::muted_style(),
                ),
            ]));
        }
        None => {
            lines.push(Line::from(Span::styled("  Session: inactive", styles::error_style())));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  [l]", styles::key_style()),
        Span::styled(" Sign out", styles::text_style()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
