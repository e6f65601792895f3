//! Rating statistics: data rows and the three-column layout.
//!
//! Row `i` of an `n`-row view shows `n - i` stars, then a percentage bar
//! filled to `fraction[i]`, then (optionally) the fraction as a label such
//! as `"90.0%"`.  Layout is computed once per size/data change into a
//! [`ColumnGeometry`] that the draw pass reads from.

use std::sync::LazyLock;

use regex::Regex;

use super::geometry::{Insets, LayoutDirection, Point, RectF};
use crate::error::{Error, Result};

/// One or more non-negative decimals separated by commas and/or whitespace.
/// Either side of the point may be empty (`1.`, `.5`), not both.
static DATA_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d+\.?\d*|\.\d+)(?:(?:\s*,\s*|\s+)(?:\d+\.?\d*|\.\d+))*\s*,?\s*$")
        .expect("statistics data pattern is valid")
});

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,]+").expect("separator pattern is valid"));

/// Default bar width as a multiple of the star column width.
const DEFAULT_BAR_WIDTH_FACTOR: f32 = 2.3;
/// Default bar height as a fraction of the star size.
const DEFAULT_BAR_HEIGHT_FACTOR: f32 = 0.6;

// ───────────────────────────────────────── rows ──────────────

/// One statistics row: the bar fill fraction and its rendered label.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsRow {
    pub fraction: f32,
    pub label: String,
}

/// Format a fraction as a one-decimal percentage (`0.9` → `"90.0%"`).
pub fn format_percentage(fraction: f32) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Build exactly `row_count` rows from `data`: extra values are dropped,
/// missing ones become `0.0`.
pub fn feed(row_count: usize, data: &[f32]) -> Vec<StatisticsRow> {
    if data.len() != row_count {
        tracing::debug!(row_count, supplied = data.len(), "statistics data resized to row count");
    }
    (0..row_count)
        .map(|i| {
            let fraction = data.get(i).copied().unwrap_or(0.0);
            StatisticsRow {
                fraction,
                label: format_percentage(fraction),
            }
        })
        .collect()
}

/// Parse a literal data string such as `"0.1, 0.2, 0.3"`.  Anything else is
/// rejected as a whole.
pub fn parse_statistics_data(text: &str) -> Result<Vec<f32>> {
    let invalid = || Error::InvalidStatisticsData {
        text: text.to_string(),
    };
    if !DATA_PATTERN.is_match(text) {
        return Err(invalid());
    }
    SEPARATOR
        .split(text)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f32>().map_err(|_| invalid()))
        .collect()
}

// ───────────────────────────────────────── style ─────────────

/// Measures rendered label text, in pixels.
pub trait TextMetrics {
    /// `(width, height)` of `text` as it will be drawn.
    fn text_size(&self, text: &str) -> (f32, f32);
}

/// Sizes and spacing of a statistics view.  `None` fields are derived from
/// the star size when the layout is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsStyle {
    pub row_count: usize,
    pub star_size: f32,
    pub star_margin: f32,
    pub row_margin: f32,
    pub column_margin: f32,
    pub labels_enabled: bool,
    pub bar_width: Option<f32>,
    pub bar_height: Option<f32>,
    pub bar_corner_rounded: bool,
    pub bar_corner_radius: Option<f32>,
}

impl Default for StatisticsStyle {
    fn default() -> Self {
        Self {
            row_count: 5,
            star_size: 4.0,
            star_margin: 2.0,
            row_margin: 4.0,
            column_margin: 4.0,
            labels_enabled: true,
            bar_width: None,
            bar_height: None,
            bar_corner_rounded: true,
            bar_corner_radius: None,
        }
    }
}

impl StatisticsStyle {
    fn rows(&self) -> f32 {
        self.row_count as f32
    }

    /// Total of `n - 1` gaps of `gap`, zero for an empty view.
    fn gaps(&self, gap: f32) -> f32 {
        gap * (self.rows() - 1.0).max(0.0)
    }

    pub fn star_column_width(&self) -> f32 {
        if self.row_count == 0 {
            return 0.0;
        }
        self.star_size * self.rows() + self.gaps(self.star_margin)
    }

    pub fn star_column_height(&self) -> f32 {
        if self.row_count == 0 {
            return 0.0;
        }
        self.star_size * self.rows() + self.gaps(self.row_margin)
    }

    pub fn resolved_bar_width(&self) -> f32 {
        self.bar_width
            .unwrap_or_else(|| self.star_column_width() * DEFAULT_BAR_WIDTH_FACTOR)
            .max(0.0)
    }

    /// Bar thickness; never taller than a star.
    pub fn resolved_bar_height(&self) -> f32 {
        let height = self
            .bar_height
            .unwrap_or_else(|| (self.star_size * DEFAULT_BAR_HEIGHT_FACTOR).round());
        height.min(self.star_size).max(0.0)
    }

    pub fn resolved_corner_radius(&self) -> f32 {
        if !self.bar_corner_rounded {
            return 0.0;
        }
        self.bar_corner_radius
            .unwrap_or_else(|| self.resolved_bar_height() / 2.0)
            .max(0.0)
    }

    pub fn bar_column_height(&self) -> f32 {
        if self.row_count == 0 {
            return 0.0;
        }
        self.resolved_bar_height() * self.rows() + self.gaps(self.row_margin)
    }

    /// `(width, height)` of the label column.
    fn label_column_size(&self, rows: &[StatisticsRow], metrics: &dyn TextMetrics) -> (f32, f32) {
        if !self.labels_enabled {
            return (0.0, 0.0);
        }
        let (mut max_width, mut total_height) = (0.0f32, 0.0f32);
        for row in rows {
            let (w, h) = metrics.text_size(&row.label);
            max_width = max_width.max(w);
            total_height += h;
        }
        if rows.is_empty() {
            return (0.0, 0.0);
        }
        (max_width, total_height + self.gaps(self.row_margin))
    }

    /// Content size before padding.
    pub fn measure(&self, rows: &[StatisticsRow], metrics: &dyn TextMetrics) -> (f32, f32) {
        let star_w = self.star_column_width();
        let bar_w = self.resolved_bar_width();
        let column_h = self.star_column_height().max(self.bar_column_height());

        if self.labels_enabled {
            let (label_w, label_h) = self.label_column_size(rows, metrics);
            let width = star_w + bar_w + self.column_margin * 2.0 + label_w;
            (width.round(), column_h.max(label_h).round())
        } else {
            let width = star_w + bar_w + self.column_margin;
            (width.round(), column_h.round())
        }
    }
}

// ───────────────────────────────────────── geometry ──────────

/// Cached column rectangles for one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGeometry {
    pub direction: LayoutDirection,
    pub row_count: usize,
    pub star_size: f32,
    pub star_margin: f32,
    pub row_margin: f32,
    pub bar_height: f32,
    pub corner_radius: f32,
    pub star_column: RectF,
    pub bar_column: RectF,
    pub label_column: Option<RectF>,
}

/// Place the three columns inside a view of `width × height` pixels.
pub fn layout(
    style: &StatisticsStyle,
    rows: &[StatisticsRow],
    metrics: &dyn TextMetrics,
    width: f32,
    height: f32,
    padding: Insets,
    direction: LayoutDirection,
) -> ColumnGeometry {
    let star_w = style.star_column_width();
    let star_h = style.star_column_height();
    let bar_w = style.resolved_bar_width();
    let bar_h = style.resolved_bar_height();
    let (label_w, _) = style.label_column_size(rows, metrics);
    let margin = style.column_margin;

    let available_h = height - padding.vertical();
    let top = padding.top + ((available_h - star_h) / 2.0).max(0.0);
    let bottom = top + star_h;

    let (star_column, bar_column, label_column) = if direction.is_rtl() {
        let star_right = width - padding.right;
        let bar_right = star_right - star_w - margin;
        let label_right = bar_right - bar_w - margin;
        (
            RectF::new(star_right - star_w, top, star_right, bottom),
            RectF::new(bar_right - bar_w, top, bar_right, bottom),
            RectF::new(label_right - label_w, top, label_right, bottom),
        )
    } else {
        let star_left = padding.left;
        let bar_left = star_left + star_w + margin;
        let label_left = bar_left + bar_w + margin;
        (
            RectF::new(star_left, top, star_left + star_w, bottom),
            RectF::new(bar_left, top, bar_left + bar_w, bottom),
            RectF::new(label_left, top, label_left + label_w, bottom),
        )
    };

    ColumnGeometry {
        direction,
        row_count: style.row_count,
        star_size: style.star_size,
        star_margin: style.star_margin,
        row_margin: style.row_margin,
        bar_height: bar_h,
        corner_radius: style.resolved_corner_radius(),
        star_column,
        bar_column,
        label_column: style.labels_enabled.then_some(label_column),
    }
}

impl ColumnGeometry {
    /// Number of stars shown on `row`.
    pub fn stars_in_row(&self, row: usize) -> usize {
        self.row_count.saturating_sub(row)
    }

    fn row_top(&self, row: usize) -> f32 {
        self.star_column.top + (self.star_size + self.row_margin) * row as f32
    }

    pub fn row_center_y(&self, row: usize) -> f32 {
        self.row_top(row) + self.star_size / 2.0
    }

    /// Bounds of star `index` on `row`.  Stars hug the bar column, so shorter
    /// rows are indented from the outer edge.
    pub fn star_bounds(&self, row: usize, index: usize) -> RectF {
        let advance = self.star_size + self.star_margin;
        let slot = match self.direction {
            LayoutDirection::Ltr => row + index,
            LayoutDirection::Rtl => index,
        };
        let left = self.star_column.left + advance * slot as f32;
        let top = self.row_top(row);
        RectF::new(left, top, left + self.star_size, top + self.star_size)
    }

    /// Full-width rounded track of the bar on `row`.
    pub fn bar_track(&self, row: usize) -> RectF {
        let center = self.row_center_y(row);
        let half = self.bar_height / 2.0;
        RectF::new(
            self.bar_column.left,
            center - half,
            self.bar_column.right,
            center + half,
        )
    }

    /// Filled part of the bar on `row`, grown from the bar's start edge and
    /// clipped to the track.
    pub fn bar_fill(&self, row: usize, fraction: f32) -> RectF {
        let track = self.bar_track(row);
        let length = self.bar_column.width() * fraction;
        let fill = match self.direction {
            LayoutDirection::Ltr => {
                RectF::new(track.left, track.top, track.left + length, track.bottom)
            }
            LayoutDirection::Rtl => {
                RectF::new(track.right - length, track.top, track.right, track.bottom)
            }
        };
        fill.sorted().intersect(&track)
    }

    /// Start-edge anchor of the label on `row`, vertically centred.
    pub fn label_anchor(&self, row: usize) -> Option<Point> {
        let column = self.label_column?;
        let x = match self.direction {
            LayoutDirection::Ltr => column.left,
            LayoutDirection::Rtl => column.right,
        };
        Some(Point::new(x, self.row_center_y(row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Two pixels per character, four per line: the terminal cell metrics.
    struct FixedMetrics;

    impl TextMetrics for FixedMetrics {
        fn text_size(&self, text: &str) -> (f32, f32) {
            (text.chars().count() as f32 * 2.0, 4.0)
        }
    }

    fn style() -> StatisticsStyle {
        StatisticsStyle {
            row_count: 5,
            star_size: 10.0,
            star_margin: 2.0,
            row_margin: 4.0,
            column_margin: 6.0,
            labels_enabled: true,
            bar_width: Some(100.0),
            bar_height: Some(6.0),
            bar_corner_rounded: true,
            bar_corner_radius: None,
        }
    }

    #[test]
    fn feed_formats_one_decimal_percentages() {
        let rows = feed(5, &[1.0, 0.9, 0.3, 0.2, 0.005]);
        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["100.0%", "90.0%", "30.0%", "20.0%", "0.5%"]);
    }

    #[test]
    fn feed_pads_missing_rows_with_zero() {
        let rows = feed(3, &[0.5, 0.5]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].fraction, 0.0);
        assert_eq!(rows[2].label, "0.0%");
    }

    #[test]
    fn feed_drops_extra_values() {
        let rows = feed(2, &[0.1, 0.2, 0.3]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].label, "20.0%");
    }

    #[rstest]
    #[case("0.1,0.2,0.3", vec![0.1, 0.2, 0.3])]
    #[case("0.1, 0.2, 0.3", vec![0.1, 0.2, 0.3])]
    #[case(" 1 0.5\t0 ", vec![1.0, 0.5, 0.0])]
    #[case("0.25,", vec![0.25])]
    #[case("1., 2", vec![1.0, 2.0])]
    #[case(".5", vec![0.5])]
    #[case("0.5 , .25", vec![0.5, 0.25])]
    fn valid_data_strings_parse(#[case] text: &str, #[case] expected: Vec<f32>) {
        assert_eq!(parse_statistics_data(text).unwrap(), expected);
    }

    #[rstest]
    #[case("abc, 0.2")]
    #[case("")]
    #[case("-0.1, 0.2")]
    #[case(",,")]
    #[case(".")]
    fn malformed_data_strings_are_rejected(#[case] text: &str) {
        let err = parse_statistics_data(text).unwrap_err();
        assert!(matches!(err, Error::InvalidStatisticsData { .. }));
    }

    #[test]
    fn parsed_data_feeds_percentages() {
        let data = parse_statistics_data("0.1,0.2,0.3").unwrap();
        let labels: Vec<_> = feed(3, &data).into_iter().map(|r| r.label).collect();
        assert_eq!(labels, ["10.0%", "20.0%", "30.0%"]);
    }

    #[test]
    fn column_sizes() {
        let s = style();
        assert_eq!(s.star_column_width(), 58.0);
        assert_eq!(s.star_column_height(), 66.0);
        assert_eq!(s.bar_column_height(), 46.0);
        assert_eq!(s.resolved_corner_radius(), 3.0);
    }

    #[rstest]
    #[case(Some(30.0), 10.0)]
    #[case(Some(4.0), 4.0)]
    #[case(None, 6.0)]
    fn bar_height_never_exceeds_star_size(#[case] requested: Option<f32>, #[case] expected: f32) {
        let s = StatisticsStyle {
            bar_height: requested,
            ..style()
        };
        assert_eq!(s.resolved_bar_height(), expected);
        assert!(s.bar_column_height() <= s.star_column_height());
    }

    #[test]
    fn default_bar_width_scales_with_star_column() {
        let s = StatisticsStyle {
            bar_width: None,
            ..style()
        };
        assert!((s.resolved_bar_width() - 58.0 * 2.3).abs() < 1e-4);
    }

    #[test]
    fn corner_radius_is_zero_when_rounding_disabled() {
        let s = StatisticsStyle {
            bar_corner_rounded: false,
            bar_corner_radius: Some(5.0),
            ..style()
        };
        assert_eq!(s.resolved_corner_radius(), 0.0);
    }

    #[test]
    fn measure_adds_two_column_margins_with_labels() {
        let rows = feed(5, &[1.0, 0.9, 0.3, 0.2, 0.005]);
        // Widest label "100.0%" is 12px.
        assert_eq!(style().measure(&rows, &FixedMetrics), (58.0 + 100.0 + 12.0 + 12.0, 66.0));
        let no_labels = StatisticsStyle {
            labels_enabled: false,
            ..style()
        };
        assert_eq!(no_labels.measure(&rows, &FixedMetrics), (58.0 + 100.0 + 6.0, 66.0));
    }

    #[test]
    fn empty_view_measures_only_margins() {
        let s = StatisticsStyle {
            row_count: 0,
            ..style()
        };
        assert_eq!(s.star_column_width(), 0.0);
        assert_eq!(s.bar_column_height(), 0.0);
        assert_eq!(s.measure(&[], &FixedMetrics), (112.0, 0.0));
    }

    #[test]
    fn ltr_layout_places_columns_left_to_right() {
        let rows = feed(5, &[1.0, 0.5]);
        let g = layout(&style(), &rows, &FixedMetrics, 200.0, 66.0, Insets::ZERO, LayoutDirection::Ltr);
        assert_eq!(g.star_column, RectF::new(0.0, 0.0, 58.0, 66.0));
        assert_eq!(g.bar_column.left, 64.0);
        assert_eq!(g.bar_column.right, 164.0);
        assert_eq!(g.label_column.map(|c| c.left), Some(170.0));

        // Row 0 has five stars starting at the left edge, row 4 one star
        // right next to the bar column.
        assert_eq!(g.stars_in_row(0), 5);
        assert_eq!(g.star_bounds(0, 0).left, 0.0);
        assert_eq!(g.stars_in_row(4), 1);
        assert_eq!(g.star_bounds(4, 0), RectF::new(48.0, 56.0, 58.0, 66.0));

        assert_eq!(g.bar_fill(1, 0.5), RectF::new(64.0, 16.0, 114.0, 22.0));
        assert_eq!(g.label_anchor(1), Some(Point::new(170.0, 19.0)));
    }

    #[test]
    fn rtl_layout_mirrors_columns() {
        let rows = feed(5, &[1.0, 0.5]);
        let g = layout(&style(), &rows, &FixedMetrics, 200.0, 66.0, Insets::ZERO, LayoutDirection::Rtl);
        assert_eq!(g.star_column, RectF::new(142.0, 0.0, 200.0, 66.0));
        assert_eq!(g.bar_column, RectF::new(36.0, 0.0, 136.0, 66.0));
        assert_eq!(g.star_bounds(4, 0).left, 142.0);
        assert_eq!(g.bar_fill(1, 0.5), RectF::new(86.0, 16.0, 136.0, 22.0));
        assert_eq!(g.label_anchor(0).map(|p| p.x), Some(30.0));
    }

    #[test]
    fn overfull_fractions_stay_inside_the_track() {
        let rows = feed(5, &[]);
        let g = layout(&style(), &rows, &FixedMetrics, 200.0, 66.0, Insets::ZERO, LayoutDirection::Ltr);
        assert_eq!(g.bar_fill(0, 2.0), g.bar_track(0));
        assert!(g.bar_fill(0, -1.0).is_empty());
    }

    #[test]
    fn composition_is_vertically_centred() {
        let rows = feed(5, &[]);
        let padding = Insets::uniform(1.0);
        let g = layout(&style(), &rows, &FixedMetrics, 200.0, 100.0, padding, LayoutDirection::Ltr);
        // (98 - 66) / 2 = 16 below the top padding.
        assert_eq!(g.star_column.top, 17.0);
        assert_eq!(g.row_center_y(0), 22.0);
    }
}
