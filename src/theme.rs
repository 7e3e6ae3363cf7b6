//! Centralized theme configuration for console output.
//!
//! All colors and styles are defined here. When adding or modifying output:
//! - Add new colors to the appropriate module
//! - Use `theme::module::CONSTANT` in render files
//! - Do NOT hardcode `Color::*` values directly in render files
//!
//! Theme: Galaxy - Purple/pink accents, readable on dark terminals

use ratatui::style::{Color, Modifier, Style};

/// Core color palette - shared base colors.
pub mod palette {
    use super::*;

    pub const TEXT: Color = Color::Rgb(236, 236, 244);
    pub const TEXT_DIM: Color = Color::Rgb(90, 92, 119);
    pub const TEXT_MUTED: Color = Color::Rgb(130, 133, 158);

    pub const CYAN: Color = Color::Rgb(0, 217, 255);
    pub const YELLOW: Color = Color::Rgb(255, 217, 61);
    pub const GREEN: Color = Color::Rgb(107, 203, 119);
    pub const MAGENTA: Color = Color::Rgb(198, 120, 221);
    pub const PINK: Color = Color::Rgb(255, 107, 157);
    pub const RED: Color = Color::Rgb(224, 108, 117);
    pub const ORANGE: Color = Color::Rgb(255, 184, 108);
    pub const PURPLE: Color = Color::Rgb(189, 147, 249);
    pub const BLUE: Color = Color::Rgb(97, 175, 239);
}

/// Heading styles, one per level
pub mod heading {
    use super::*;

    pub const LEVEL_1: Style = Style::new()
        .fg(palette::PURPLE)
        .add_modifier(Modifier::BOLD);
    pub const LEVEL_1_RULE: Style = Style::new().fg(palette::TEXT_DIM);
    pub const LEVEL_2: Style = Style::new()
        .fg(palette::CYAN)
        .add_modifier(Modifier::BOLD)
        .add_modifier(Modifier::UNDERLINED);
    pub const LEVEL_3: Style = Style::new()
        .fg(palette::YELLOW)
        .add_modifier(Modifier::BOLD);
}

/// Code block styles
pub mod code {
    use super::*;

    pub const LINE_NUMBER: Style = Style::new().fg(palette::TEXT_DIM);
    pub const KEYWORD: Color = palette::MAGENTA;
    pub const STRING: Color = palette::GREEN;
    pub const NUMBER: Color = palette::ORANGE;
    pub const LITERAL: Color = palette::PURPLE;
    pub const COMMENT: Style = Style::new()
        .fg(palette::TEXT_MUTED)
        .add_modifier(Modifier::ITALIC);
    pub const JSON_KEY: Color = palette::CYAN;
    pub const INLINE_CODE: Color = palette::YELLOW;
}

/// Unified diff styles
pub mod diff {
    use super::*;

    pub const ADDED: Color = palette::GREEN;
    pub const REMOVED: Color = palette::RED;
    pub const HUNK: Color = palette::CYAN;
    pub const HEADER: Style = Style::new().add_modifier(Modifier::BOLD);
}

/// Text chart styles
pub mod chart {
    use super::*;

    pub const BAR: Color = palette::BLUE;
    pub const MEDIAN_VALUE: Style = Style::new().fg(palette::TEXT);
    pub const LABEL: Style = Style::new().fg(palette::TEXT_MUTED);

    /// Per-group colors when multiple colors are requested
    pub const SERIES: [Color; 8] = [
        palette::CYAN,
        palette::PINK,
        palette::GREEN,
        palette::ORANGE,
        palette::PURPLE,
        palette::YELLOW,
        palette::RED,
        palette::BLUE,
    ];
}
