//! Demo widgets built from the style sheet.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use ratatui::style::Color;

use starbar::config::{Section, StyleSheet, STATISTICS_VIEW};
use starbar::core::geometry::{Point, RectF};
use starbar::core::rating::RatingBarConfig;
use starbar::core::star_path::PaintStyle;
use starbar::core::statistics::StatisticsStyle;
use starbar::ui::surface::CellMetrics;
use starbar::ui::theme::Theme;
use starbar::widget::canvas::Canvas;
use starbar::widget::drawable::{Drawable, StarVisual};
use starbar::widget::tint::TintList;
use starbar::widget::{RatingBar, StatisticsView};

/// Data fed by the `f` key.
pub const FEED_DATA: [f32; 5] = [1.0, 0.9, 0.3, 0.2, 0.005];

/// A user-supplied star: a rhombus touching the middle of each edge.
#[derive(Debug, Clone, Copy)]
pub struct Diamond {
    style: PaintStyle,
}

impl Diamond {
    pub fn filled() -> Self {
        Self {
            style: PaintStyle::Fill,
        }
    }

    pub fn outlined() -> Self {
        Self {
            style: PaintStyle::Stroke { width: 1.0 },
        }
    }
}

impl Drawable for Diamond {
    fn draw(&self, canvas: &mut dyn Canvas, bounds: RectF, color: Color) {
        let (w, h) = (bounds.width(), bounds.height());
        let outline = [
            Point::new(w / 2.0, 0.0),
            Point::new(w, h / 2.0),
            Point::new(w / 2.0, h),
            Point::new(0.0, h / 2.0),
        ];
        canvas.draw_path(&outline, self.style, Point::new(bounds.left, bounds.top), color);
    }
}

/// Resolve the `star` attribute of a section.
fn star_visual(section: &Section) -> Result<StarVisual> {
    let appearance = section.star_appearance()?;
    Ok(match section.star_drawable() {
        None | Some("generated") => StarVisual::Generated(appearance),
        Some("diamond") => StarVisual::External(Arc::new(Diamond::filled())),
        Some("diamond_layered") => StarVisual::Layered {
            track: Arc::new(Diamond::outlined()),
            fill: Arc::new(Diamond::filled()),
        },
        Some(other) => bail!("[{}] star: unknown drawable {other:?}", section.name()),
    })
}

/// `star_tint` replaces the default colour; `star_tint_pressed` and
/// `star_tint_focused` add state colours, which also colour the fill layer.
fn tint(section: &Section, fallback: TintList) -> Result<TintList> {
    let mut tint = section
        .get_color("star_tint")?
        .map(TintList::uniform)
        .unwrap_or(fallback);
    if let Some(color) = section.get_color("star_tint_pressed")? {
        tint = tint.with_pressed(color);
    }
    if let Some(color) = section.get_color("star_tint_focused")? {
        tint = tint.with_focused(color);
    }
    Ok(tint)
}

// ───────────────────────────────────────── rating bars ───────

/// A titled rating bar of the demo.
#[derive(Debug)]
pub struct RatingSample {
    pub title: String,
    pub bar: RatingBar,
}

pub fn rating_samples(sheet: &StyleSheet) -> Result<Vec<RatingSample>> {
    sheet
        .rating_bars()
        .enumerate()
        .map(|(i, section)| {
            rating_sample(section).with_context(|| format!("rating bar #{}", i + 1))
        })
        .collect()
}

fn rating_sample(section: &Section) -> Result<RatingSample> {
    let config = RatingBarConfig::from_style(section)?;
    let mut bar = RatingBar::new(config, star_visual(section)?)
        .with_tint(tint(section, Theme::star_tint())?, Theme::ACCENT)
        .with_rating(section.rating_star_count()?);
    if let Some(slop) = section.drag_slop()? {
        bar.set_drag_slop(slop);
    }
    let title = section
        .title()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} stars", config.star_count));
    Ok(RatingSample { title, bar })
}

// ───────────────────────────────────────── statistics ────────

pub fn statistics_view(sheet: &StyleSheet) -> Result<StatisticsView> {
    let fallback = Section::new(STATISTICS_VIEW);
    let section = sheet.statistics_view().unwrap_or(&fallback);

    let style = StatisticsStyle::from_style(section)?;
    let mut view = StatisticsView::from_style_data(
        style,
        section.statistics_data(),
        star_visual(section)?,
        Box::new(CellMetrics),
    )
    .context("statistics view")?;

    view.set_star_tint(tint(section, TintList::uniform(Theme::statistics_star_color()))?);
    view.set_bar_color(
        section
            .get_color("percentage_bar_color")?
            .unwrap_or_else(Theme::bar_color),
    );
    view.set_bar_track_color(
        section
            .get_color("percentage_bar_track_color")?
            .unwrap_or_else(Theme::bar_track_color),
    );
    view.set_label_color(
        section
            .get_color("label_color")?
            .unwrap_or_else(Theme::label_color),
    );
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use starbar::core::rating::RatingMode;
    use starbar::widget::canvas::DotCanvas;

    #[test]
    fn builtin_sheet_builds_every_sample() {
        let sheet = StyleSheet::builtin();
        let samples = rating_samples(&sheet).unwrap();
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0].bar.rating(), 2.5);
        assert_eq!(samples[3].bar.mode(), RatingMode::Indicative);
        assert!(!samples[4].bar.star_visual().is_generated());

        let stats = statistics_view(&sheet).unwrap();
        assert_eq!(stats.rows()[0].label, "62.0%");
    }

    #[test]
    fn default_fill_uses_the_accent() {
        let samples = rating_samples(&StyleSheet::builtin()).unwrap();
        assert_eq!(samples[0].bar.star_tint().activated_color(), None);
    }

    #[test]
    fn state_tints_come_from_the_section() {
        let sheet = StyleSheet::parse(
            "[rating_bar]\nstar_tint = gray\nstar_tint_pressed = light_yellow\nstar_tint_focused = white\n",
        );
        let tint = *rating_samples(&sheet).unwrap()[0].bar.star_tint();
        assert_eq!(tint.default, Color::Gray);
        assert_eq!(tint.pressed, Some(Color::LightYellow));
        assert_eq!(tint.focused, Some(Color::White));
        assert_eq!(tint.activated_color(), Some(Color::LightYellow));
    }

    #[test]
    fn unknown_drawable_names_the_bar() {
        let sheet = StyleSheet::parse("[rating_bar]\nstar = hexagon\n");
        let err = rating_samples(&sheet).unwrap_err();
        assert!(format!("{err:#}").contains("rating bar #1"));
    }

    #[test]
    fn malformed_statistics_data_is_fatal() {
        let sheet = StyleSheet::parse("[statistics_view]\nstatistics_data = \"a, b\"\n");
        assert!(statistics_view(&sheet).is_err());
    }

    #[test]
    fn diamond_fills_its_centre_not_its_corners() {
        let mut canvas = DotCanvas::new(8, 8);
        Diamond::filled().draw(&mut canvas, RectF::new(0.0, 0.0, 8.0, 8.0), Color::Cyan);
        assert_eq!(canvas.pixel(4, 4), Some(Color::Cyan));
        assert_eq!(canvas.pixel(0, 0), None);
        assert_eq!(canvas.pixel(7, 7), None);
    }
}
