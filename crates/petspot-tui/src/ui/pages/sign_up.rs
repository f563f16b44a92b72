use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{button_line, error_line, field_line};
use crate::app::{App, SignUpFocus};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.sign_up;
    let height = if form.error.is_some() { 14 } else { 12 };
    let area = centered_rect_fixed(50, height, area);
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled("  Create your owner account", styles::title_style())),
        Line::from(""),
        field_line("Name", &form.name, form.focus == SignUpFocus::Name, false),
        field_line("Email", &form.email, form.focus == SignUpFocus::Email, false),
        field_line("Password", &form.password, form.focus == SignUpFocus::Password, true),
        field_line("Phone", &form.phone, form.focus == SignUpFocus::Phone, false),
        Line::from(""),
        button_line("Sign up", form.focus == SignUpFocus::Button),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Have an account? ", styles::muted_style()),
            Span::styled("[Ctrl+S]", styles::key_style()),
            Span::styled(" Sign in", styles::muted_style()),
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
