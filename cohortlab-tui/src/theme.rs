//! Colour tokens and style helpers for the dashboard.
//!
//! Chrome uses a dark neon palette; the cohort colours match the static
//! figure so a card reads the same as its exported panel.

use ratatui::style::{Color, Modifier, Style};

use cohortlab_core::domain::Cohort;

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;

/// Box fill colour for a cohort.
pub fn cohort_color(cohort: Cohort) -> Color {
    let c = cohort.color();
    Color::Rgb(c.0, c.1, c.2)
}

/// Points and brackets; the static figure draws these in black.
pub fn point_color() -> Color {
    TEXT
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cohort_colors_match_figure_palette() {
        assert_eq!(cohort_color(Cohort::CmvNegative), Color::Rgb(0xE0, 0xE0, 0xE0));
        assert_eq!(cohort_color(Cohort::CmvPositive), Color::Rgb(0x90, 0xCA, 0xF9));
        assert_eq!(cohort_color(Cohort::Case), Color::Rgb(0x0D, 0x47, 0xA1));
    }

    #[test]
    fn active_border_is_accent() {
        assert_eq!(panel_border(true).fg, Some(ACCENT));
        assert_eq!(panel_border(false).fg, Some(MUTED));
    }
}
