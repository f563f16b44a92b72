use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Find your next best friend.", styles::title_style())),
        Line::from(""),
        Line::from(Span::styled(
            "  Petspot connects pets waiting for a home with the people ready to adopt them.",
            styles::text_style(),
        )),
        Line::from(""),
    ];

    if app.session.is_some() {
        lines.push(Line::from(vec![
            Span::styled("  [h]", styles::key_style()),
            Span::styled(" Go to your home page", styles::text_style()),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::styled("  [s]", styles::key_style()),
            Span::styled(" Sign in    ", styles::text_style()),
            Span::styled("[r]", styles::key_style()),
            Span::styled(" Create an account", styles::text_style()),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
