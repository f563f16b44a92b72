//! Page content rendering, one module per route.

pub mod home;
pub mod landing;
pub mod sign_in;
pub mod sign_up;

use ratatui::text::{Line, Span};

use super::styles;

/// Visible width of a form input
const FIELD_WIDTH: usize = 28;

/// Labeled single-line input. Masked fields show `*` per character.
pub(crate) fn field_line<'a>(label: &'a str, value: &str, focused: bool, masked: bool) -> Line<'a> {
    let shown: String = if masked {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    // Keep the tail visible when the value is longer than the box
    let skip = shown.chars().count().saturating_sub(FIELD_WIDTH - 1);
    let visible: String = shown.chars().skip(skip).collect();
    let cursor = if focused { "▌" } else { "" };
    let style = if focused {
        styles::selected_style()
    } else {
        styles::text_style()
    };

    Line::from(vec![
        Span::styled(format!("  {:>10}: [", label), styles::muted_style()),
        Span::styled(format!("{:<width$}", format!("{}{}", visible, cursor), width = FIELD_WIDTH), style),
        Span::styled("]", styles::muted_style()),
    ])
}

pub(crate) fn button_line(label: &str, focused: bool) -> Line<'static> {
    if focused {
        Line::from(vec![
            Span::raw("               ["),
            Span::styled(format!(" ▶ {} ◀ ", label), styles::selected_style()),
            Span::raw("]"),
        ])
    } else {
        Line::from(vec![
            Span::raw("               ["),
            Span::styled(format!("   {}   ", label), styles::text_style()),
            Span::raw("]"),
        ])
    }
}

pub(crate) fn error_line(error: &Option<String>) -> Option<Line<'static>> {
    error
        .as_ref()
        .map(|e| Line::from(Span::styled(format!("  {}", e), styles::error_style())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_field_line_masks_password() {
        let line = field_line("Password", "hunter2", false, true);
        let rendered = text(&line);
        assert!(rendered.contains("*******"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_field_line_shows_tail_of_long_value() {
        let value = "a".repeat(40) + "end";
        let rendered = text(&field_line("Email", &value, true, false));
        assert!(rendered.contains("end▌"));
    }
}
