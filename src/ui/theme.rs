//! Colour palette and text styles used across the demo.

use ratatui::style::{Color, Modifier, Style};

use crate::widget::tint::TintList;

/// Central theme; change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── widgets ────────────────────────────────────────────────

    /// Highlight colour used when a tint list has no activated colour.
    pub const ACCENT: Color = Color::Yellow;

    /// Stateless, so the fill layer falls back to [`Theme::ACCENT`].
    pub fn star_tint() -> TintList {
        TintList::uniform(Color::DarkGray)
    }

    pub fn statistics_star_color() -> Color {
        Color::Yellow
    }

    pub fn bar_color() -> Color {
        Color::Yellow
    }

    pub fn bar_track_color() -> Color {
        Color::DarkGray
    }

    pub fn label_color() -> Color {
        Color::Gray
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn focused_border_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
