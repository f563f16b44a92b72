use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{button_line, error_line, field_line};
use crate::app::{App, SignInFocus};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.sign_in;
    let height = if form.error.is_some() { 12 } else { 10 };
    let area = centered_rect_fixed(50, height, area);
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled("  Sign in to Petspot", styles::title_style())),
        Line::from(""),
        field_line("Email", &form.email, form.focus == SignInFocus::Email, false),
        field_line("Password", &form.password, form.focus == SignInFocus::Password, true),
        Line::from(""),
        button_line("Sign in", form.focus == SignInFocus::Button),
        Line::from(""),
        Line::from(vec![
            Span::styled("  No account? ", styles::muted_style()),
            Span::styled("[Ctrl+R]", styles::key_style()),
            Span::styled(" Sign up", styles::muted_style()),
        ]),
    ];

    if let Some(line) = error_line(&form.error) {
        lines.push(Line::from(""));
        lines.push(line);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
