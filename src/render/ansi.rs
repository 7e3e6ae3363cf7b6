// Converts ratatui styles into ANSI escape sequences for line-oriented output

use crossterm::style::{Attribute, Color as AnsiColor, ContentStyle};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

fn ansi_color(color: Color) -> AnsiColor {
    match color {
        Color::Reset => AnsiColor::Reset,
        Color::Black => AnsiColor::Black,
        Color::Red => AnsiColor::DarkRed,
        Color::Green => AnsiColor::DarkGreen,
        Color::Yellow => AnsiColor::DarkYellow,
        Color::Blue => AnsiColor::DarkBlue,
        Color::Magenta => AnsiColor::DarkMagenta,
        Color::Cyan => AnsiColor::DarkCyan,
        Color::Gray => AnsiColor::Grey,
        Color::DarkGray => AnsiColor::DarkGrey,
        Color::LightRed => AnsiColor::Red,
        Color::LightGreen => AnsiColor::Green,
        Color::LightYellow => AnsiColor::Yellow,
        Color::LightBlue => AnsiColor::Blue,
        Color::LightMagenta => AnsiColor::Magenta,
        Color::LightCyan => AnsiColor::Cyan,
        Color::White => AnsiColor::White,
        Color::Rgb(r, g, b) => AnsiColor::Rgb { r, g, b },
        Color::Indexed(i) => AnsiColor::AnsiValue(i),
    }
}

const ATTRIBUTES: [(Modifier, Attribute); 6] = [
    (Modifier::BOLD, Attribute::Bold),
    (Modifier::DIM, Attribute::Dim),
    (Modifier::ITALIC, Attribute::Italic),
    (Modifier::UNDERLINED, Attribute::Underlined),
    (Modifier::REVERSED, Attribute::Reverse),
    (Modifier::CROSSED_OUT, Attribute::CrossedOut),
];

fn content_style(style: Style) -> ContentStyle {
    let mut content = ContentStyle::new();
    content.foreground_color = style.fg.map(ansi_color);
    content.background_color = style.bg.map(ansi_color);
    for (modifier, attribute) in ATTRIBUTES {
        if style.add_modifier.contains(modifier) {
            content.attributes.set(attribute);
        }
    }
    content
}

/// Render text in a single style
pub(super) fn paint(text: &str, style: Style) -> String {
    if style == Style::default() || text.is_empty() {
        return text.to_string();
    }
    content_style(style).apply(text).to_string()
}

/// Render a highlighted line
pub(super) fn paint_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| paint(&span.content, span.style))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unstyled_text_passes_through() {
        assert_eq!(paint("plain", Style::default()), "plain");
        assert_eq!(paint_spans(&[Span::raw("a"), Span::raw("b")]), "ab");
    }

    #[test]
    fn test_styled_text_is_wrapped_in_escapes() {
        let painted = paint("hot", Style::default().fg(Color::Red));
        assert!(painted.contains("hot"));
        assert!(painted.starts_with('\u{1b}'));
        assert_ne!(painted, "hot");
    }

    #[test]
    fn test_modifiers_become_attributes() {
        let style = content_style(Style::default().add_modifier(Modifier::BOLD));
        assert!(style.attributes.has(Attribute::Bold));
        assert!(!style.attributes.has(Attribute::Italic));
    }
}
