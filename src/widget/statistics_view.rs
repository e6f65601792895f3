//! Rating distribution view: a column of star rows, a percentage bar per
//! row and an optional column of percentage labels.

use std::fmt;
use std::sync::Arc;

use ratatui::style::Color;

use super::canvas::{Canvas, TextAlign};
use super::drawable::{Drawable, StarVisual};
use super::saved_state::StatisticsState;
use super::tint::{TintList, ViewState};
use super::view::{resolve_size, Invalidation, MeasureSpec, View};
use crate::core::geometry::{Insets, LayoutDirection};
use crate::core::rating::TouchEvent;
use crate::core::statistics::{
    self, parse_statistics_data, ColumnGeometry, StatisticsRow, StatisticsStyle, TextMetrics,
};
use crate::error::Result;

pub struct StatisticsView {
    style: StatisticsStyle,
    visual: StarVisual,
    layers: Vec<Arc<dyn Drawable>>,
    star_tint: TintList,
    bar_color: Color,
    bar_track_color: Color,
    label_color: Color,
    rows: Vec<StatisticsRow>,
    /// Labels stay hidden until the first feed.
    fed: bool,
    padding: Insets,
    direction: LayoutDirection,
    geometry: Option<ColumnGeometry>,
    metrics: Box<dyn TextMetrics>,
    invalidation: Invalidation,
}

impl fmt::Debug for StatisticsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatisticsView")
            .field("style", &self.style)
            .field("visual", &self.visual)
            .field("rows", &self.rows)
            .field("fed", &self.fed)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

impl StatisticsView {
    pub fn new(style: StatisticsStyle, visual: StarVisual, metrics: Box<dyn TextMetrics>) -> Self {
        let layers = visual.stacked(style.star_size);
        let rows = statistics::feed(style.row_count, &[]);
        let mut view = Self {
            style,
            visual,
            layers,
            star_tint: TintList::uniform(Color::Yellow),
            bar_color: Color::Yellow,
            bar_track_color: Color::DarkGray,
            label_color: Color::Gray,
            rows,
            fed: false,
            padding: Insets::ZERO,
            direction: LayoutDirection::Ltr,
            geometry: None,
            metrics,
            invalidation: Invalidation::default(),
        };
        view.invalidation.request_layout();
        view
    }

    /// Build a view from a style and its literal data string.  A malformed
    /// string fails before any view exists.
    pub fn from_style_data(
        style: StatisticsStyle,
        data: Option<&str>,
        visual: StarVisual,
        metrics: Box<dyn TextMetrics>,
    ) -> Result<Self> {
        let data = data.map(parse_statistics_data).transpose()?;
        let mut view = Self::new(style, visual, metrics);
        if let Some(data) = data {
            view.feed(&data);
        }
        Ok(view)
    }

    pub fn style(&self) -> &StatisticsStyle {
        &self.style
    }

    /// Replace the displayed fractions.  Exactly `row_count` values are kept:
    /// extras are dropped and missing rows read `0.0%`.
    pub fn feed(&mut self, data: &[f32]) {
        tracing::debug!(values = data.len(), row_count = self.style.row_count, "statistics fed");
        self.rows = statistics::feed(self.style.row_count, data);
        self.fed = true;
        self.invalidation.request_layout();
    }

    pub fn rows(&self) -> &[StatisticsRow] {
        &self.rows
    }

    pub fn data(&self) -> Vec<f32> {
        self.rows.iter().map(|row| row.fraction).collect()
    }

    /// Rows whose labels take part in measuring and drawing.
    fn label_rows(&self) -> &[StatisticsRow] {
        if self.fed {
            &self.rows
        } else {
            &[]
        }
    }

    // ── stars ───────────────────────────────────────────────────

    pub fn star_visual(&self) -> &StarVisual {
        &self.visual
    }

    pub fn set_star_visual(&mut self, visual: StarVisual) {
        self.visual = visual;
        self.rebuild_layers();
    }

    fn rebuild_layers(&mut self) {
        self.layers = self.visual.stacked(self.style.star_size);
        self.invalidation.invalidate();
    }

    pub fn star_size(&self) -> f32 {
        self.style.star_size
    }

    pub fn set_star_size(&mut self, star_size: f32) {
        self.style.star_size = star_size.max(0.0);
        self.rebuild_layers();
        self.invalidation.request_layout();
    }

    pub fn star_margin(&self) -> f32 {
        self.style.star_margin
    }

    pub fn set_star_margin(&mut self, star_margin: f32) {
        self.style.star_margin = star_margin.max(0.0);
        self.invalidation.request_layout();
    }

    pub fn star_tint(&self) -> &TintList {
        &self.star_tint
    }

    pub fn set_star_tint(&mut self, tint: TintList) {
        self.star_tint = tint;
        self.invalidation.invalidate();
    }

    // ── rows and columns ────────────────────────────────────────

    pub fn row_count(&self) -> usize {
        self.style.row_count
    }

    /// Changing the row count re-feeds the current fractions.
    pub fn set_row_count(&mut self, row_count: usize) {
        let data = self.data();
        self.style.row_count = row_count;
        self.rows = statistics::feed(row_count, &data);
        self.invalidation.request_layout();
    }

    pub fn row_margin(&self) -> f32 {
        self.style.row_margin
    }

    pub fn set_row_margin(&mut self, row_margin: f32) {
        self.style.row_margin = row_margin.max(0.0);
        self.invalidation.request_layout();
    }

    pub fn column_margin(&self) -> f32 {
        self.style.column_margin
    }

    pub fn set_column_margin(&mut self, column_margin: f32) {
        self.style.column_margin = column_margin.max(0.0);
        self.invalidation.request_layout();
    }

    pub fn labels_enabled(&self) -> bool {
        self.style.labels_enabled
    }

    pub fn set_labels_enabled(&mut self, enabled: bool) {
        self.style.labels_enabled = enabled;
        self.invalidation.request_layout();
    }

    pub fn label_color(&self) -> Color {
        self.label_color
    }

    pub fn set_label_color(&mut self, color: Color) {
        self.label_color = color;
        self.invalidation.invalidate();
    }

    // ── bars ────────────────────────────────────────────────────

    pub fn bar_color(&self) -> Color {
        self.bar_color
    }

    pub fn set_bar_color(&mut self, color: Color) {
        self.bar_color = color;
        self.invalidation.invalidate();
    }

    pub fn bar_track_color(&self) -> Color {
        self.bar_track_color
    }

    pub fn set_bar_track_color(&mut self, color: Color) {
        self.bar_track_color = color;
        self.invalidation.invalidate();
    }

    pub fn bar_width(&self) -> f32 {
        self.style.resolved_bar_width()
    }

    pub fn set_bar_width(&mut self, width: f32) {
        self.style.bar_width = Some(width.max(0.0));
        self.invalidation.request_layout();
    }

    pub fn bar_height(&self) -> f32 {
        self.style.resolved_bar_height()
    }

    /// Clamped to the star size when resolved.
    pub fn set_bar_height(&mut self, height: f32) {
        self.style.bar_height = Some(height.max(0.0));
        self.invalidation.request_layout();
    }

    pub fn bar_corner_rounded(&self) -> bool {
        self.style.bar_corner_rounded
    }

    pub fn set_bar_corner_rounded(&mut self, rounded: bool) {
        self.style.bar_corner_rounded = rounded;
        self.invalidation.request_layout();
    }

    pub fn bar_corner_radius(&self) -> f32 {
        self.style.resolved_corner_radius()
    }

    pub fn set_bar_corner_radius(&mut self, radius: f32) {
        self.style.bar_corner_radius = Some(radius.max(0.0));
        self.invalidation.request_layout();
    }

    // ── host ────────────────────────────────────────────────────

    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
        self.invalidation.request_layout();
    }

    pub fn layout_direction(&self) -> LayoutDirection {
        self.direction
    }

    pub fn set_layout_direction(&mut self, direction: LayoutDirection) {
        self.direction = direction;
        self.invalidation.request_layout();
    }

    pub fn geometry(&self) -> Option<&ColumnGeometry> {
        self.geometry.as_ref()
    }

    pub fn save_state(&self) -> StatisticsState {
        StatisticsState {
            row_count: self.style.row_count,
            data: self.data(),
            ..Default::default()
        }
    }

    pub fn restore_state(&mut self, state: &StatisticsState) {
        tracing::info!(row_count = state.row_count, "restoring statistics view");
        self.style.row_count = state.row_count;
        self.feed(&state.data);
    }
}

impl View for StatisticsView {
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> (f32, f32) {
        let (content_w, content_h) = self.style.measure(self.label_rows(), self.metrics.as_ref());
        (
            resolve_size(content_w + self.padding.horizontal(), width),
            resolve_size(content_h + self.padding.vertical(), height),
        )
    }

    fn layout(&mut self, width: f32, height: f32) {
        self.geometry = Some(statistics::layout(
            &self.style,
            self.label_rows(),
            self.metrics.as_ref(),
            width,
            height,
            self.padding,
            self.direction,
        ));
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let Some(geometry) = &self.geometry else {
            return;
        };

        let star_color = self.star_tint.color_for(ViewState::default());
        for row in 0..geometry.row_count {
            for index in 0..geometry.stars_in_row(row) {
                let bounds = geometry.star_bounds(row, index);
                for layer in &self.layers {
                    layer.draw(canvas, bounds, star_color);
                }
            }
        }

        let radius = geometry.corner_radius;
        for (row, data) in self.rows.iter().enumerate() {
            let track = geometry.bar_track(row);
            canvas.fill_round_rect(track, radius, self.bar_track_color);

            canvas.save();
            canvas.clip_rect(geometry.bar_fill(row, data.fraction));
            canvas.fill_round_rect(track, radius, self.bar_color);
            canvas.restore();
        }

        let align = match self.direction {
            LayoutDirection::Ltr => TextAlign::Left,
            LayoutDirection::Rtl => TextAlign::Right,
        };
        for (row, data) in self.label_rows().iter().enumerate() {
            if let Some(anchor) = geometry.label_anchor(row) {
                canvas.draw_text(&data.label, anchor, align, self.label_color);
            }
        }
    }

    fn handle_event(&mut self, _event: &TouchEvent) -> bool {
        false
    }

    fn invalidation(&mut self) -> &mut Invalidation {
        &mut self.invalidation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;
    use crate::widget::canvas::DotCanvas;

    struct FixedMetrics;

    impl TextMetrics for FixedMetrics {
        fn text_size(&self, text: &str) -> (f32, f32) {
            (text.chars().count() as f32 * 2.0, 4.0)
        }
    }

    /// Two rows of 6px stars: star column 14px, bar column 10px.
    fn style() -> StatisticsStyle {
        StatisticsStyle {
            row_count: 2,
            star_size: 6.0,
            star_margin: 2.0,
            row_margin: 2.0,
            column_margin: 2.0,
            labels_enabled: true,
            bar_width: Some(10.0),
            bar_height: Some(2.0),
            bar_corner_rounded: false,
            bar_corner_radius: None,
        }
    }

    fn view(direction: LayoutDirection) -> StatisticsView {
        let mut view = StatisticsView::new(style(), StarVisual::default(), Box::new(FixedMetrics));
        view.set_star_tint(TintList::uniform(Color::White));
        view.set_layout_direction(direction);
        view.feed(&[0.5, 1.0]);
        let (w, h) = view.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        view.layout(w, h);
        view
    }

    fn render(view: &StatisticsView) -> DotCanvas {
        let mut canvas = DotCanvas::new(40, 14);
        view.draw(&mut canvas);
        canvas
    }

    #[test]
    fn labels_widen_the_view_after_the_first_feed() {
        let mut view = StatisticsView::new(style(), StarVisual::default(), Box::new(FixedMetrics));
        assert_eq!(view.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified), (28.0, 14.0));
        view.feed(&[0.5, 1.0]);
        assert!(view.invalidation().take_layout());
        assert_eq!(view.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified), (40.0, 14.0));
    }

    #[test]
    fn unfed_view_draws_no_labels() {
        let mut view = StatisticsView::new(style(), StarVisual::default(), Box::new(FixedMetrics));
        view.layout(28.0, 14.0);
        let mut canvas = DotCanvas::new(28, 14);
        view.draw(&mut canvas);
        assert!(canvas.texts().is_empty());
        assert_eq!(canvas.pixel(17, 2), Some(Color::DarkGray));
    }

    #[test]
    fn ltr_bars_fill_from_the_left() {
        let canvas = render(&view(LayoutDirection::Ltr));
        assert_eq!(canvas.pixel(17, 2), Some(Color::Yellow));
        assert_eq!(canvas.pixel(24, 2), Some(Color::DarkGray));
        assert_eq!(canvas.pixel(25, 10), Some(Color::Yellow));
    }

    #[test]
    fn ltr_short_rows_hug_the_bar() {
        let canvas = render(&view(LayoutDirection::Ltr));
        assert_eq!(canvas.pixel(2, 2), Some(Color::White));
        assert_eq!(canvas.pixel(10, 2), Some(Color::White));
        assert_eq!(canvas.pixel(2, 10), None);
        assert_eq!(canvas.pixel(10, 10), Some(Color::White));
    }

    #[test]
    fn ltr_labels_start_after_the_bar() {
        let canvas = render(&view(LayoutDirection::Ltr));
        let runs: Vec<_> = canvas
            .texts()
            .iter()
            .map(|run| (run.text.as_str(), run.anchor, run.align))
            .collect();
        assert_eq!(
            runs,
            [
                ("50.0%", Point::new(28.0, 3.0), TextAlign::Left),
                ("100.0%", Point::new(28.0, 11.0), TextAlign::Left),
            ]
        );
    }

    #[test]
    fn rtl_mirrors_bars_and_labels() {
        let view = view(LayoutDirection::Rtl);
        let canvas = render(&view);
        assert_eq!(canvas.pixel(23, 2), Some(Color::Yellow));
        assert_eq!(canvas.pixel(15, 2), Some(Color::DarkGray));
        assert!(canvas
            .texts()
            .iter()
            .all(|run| run.align == TextAlign::Right && run.anchor.x == 12.0));
    }

    #[test]
    fn malformed_data_fails_before_construction() {
        let result = StatisticsView::from_style_data(
            style(),
            Some("0.1; 0.2"),
            StarVisual::default(),
            Box::new(FixedMetrics),
        );
        assert!(matches!(
            result,
            Err(crate::error::Error::InvalidStatisticsData { .. })
        ));
    }

    #[test]
    fn style_data_is_fed_on_construction() {
        let view = StatisticsView::from_style_data(
            style(),
            Some("0.25, 0.75"),
            StarVisual::default(),
            Box::new(FixedMetrics),
        )
        .unwrap();
        assert_eq!(view.rows()[1].label, "75.0%");
    }

    #[test]
    fn row_count_change_refeeds_current_data() {
        let mut view = view(LayoutDirection::Ltr);
        view.set_row_count(3);
        assert_eq!(view.data(), [0.5, 1.0, 0.0]);
        view.set_row_count(1);
        assert_eq!(view.rows().len(), 1);
        assert_eq!(view.rows()[0].label, "50.0%");
    }

    #[test]
    fn state_restores_rows_and_data() {
        let mut original = view(LayoutDirection::Ltr);
        original.set_row_count(3);
        let saved = original.save_state();

        let mut restored = StatisticsView::new(style(), StarVisual::default(), Box::new(FixedMetrics));
        restored.restore_state(&saved);
        assert_eq!(restored.row_count(), 3);
        assert_eq!(restored.data(), [0.5, 1.0, 0.0]);
    }

    #[test]
    fn bar_height_is_clamped_to_the_star_size() {
        let mut view = view(LayoutDirection::Ltr);
        view.set_bar_height(20.0);
        assert_eq!(view.bar_height(), 6.0);
        view.set_bar_corner_rounded(true);
        assert_eq!(view.bar_corner_radius(), 3.0);
    }
}
