//! Terminal surface for the widget layer.
//!
//! One widget pixel is one braille dot, so a cell holds a 2×4 block of
//! pixels.  A [`View`] is drawn into a [`DotCanvas`] sized to the target
//! area, the dots are handed to Ratatui's braille canvas, and text runs are
//! written straight into the cells they start in.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas as BrailleCanvas, Painter, Shape},
        Block, Widget,
    },
};

use crate::core::statistics::TextMetrics;
use crate::widget::canvas::{DotCanvas, TextAlign, TextRun};
use crate::widget::view::View;

/// Horizontal widget pixels per terminal cell.
pub const DOTS_PER_COLUMN: u16 = 2;
/// Vertical widget pixels per terminal cell.
pub const DOTS_PER_ROW: u16 = 4;

/// Pixel size of a cell area.
pub fn area_to_px(area: Rect) -> (f32, f32) {
    (
        (area.width * DOTS_PER_COLUMN) as f32,
        (area.height * DOTS_PER_ROW) as f32,
    )
}

/// Number of cells needed to show `px` pixels along one axis.
pub fn px_to_cells(px: f32, dots_per_cell: u16) -> u16 {
    (px.max(0.0) / dots_per_cell as f32).ceil() as u16
}

/// Horizontal pixel at the centre of terminal `column`, relative to `area`.
/// Columns left of the area map to negative pixels.
pub fn column_to_px(area: Rect, column: u16) -> f32 {
    let cell = column as f32 - area.x as f32;
    cell * DOTS_PER_COLUMN as f32 + DOTS_PER_COLUMN as f32 / 2.0
}

/// Lay `view` out at the pixel size of `area`, unless it was already laid
/// out at `previous` and has no pending relayout request.  Returns whether
/// layout ran.
pub fn fit_view(view: &mut dyn View, area: Rect, previous: Option<Rect>) -> bool {
    let stale = view.invalidation().take_layout();
    if !stale && previous == Some(area) {
        return false;
    }
    let (width, height) = area_to_px(area);
    view.layout(width, height);
    true
}

/// Text measured in cells, converted to pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMetrics;

impl TextMetrics for CellMetrics {
    fn text_size(&self, text: &str) -> (f32, f32) {
        let columns = Span::raw(text).width() as f32;
        (columns * DOTS_PER_COLUMN as f32, DOTS_PER_ROW as f32)
    }
}

// ───────────────────────────────────────── dots ──────────────

/// Painted pixels of a [`DotCanvas`] as a braille canvas shape.
struct DotLayer<'a>(&'a DotCanvas);

impl Shape for DotLayer<'_> {
    fn draw(&self, painter: &mut Painter) {
        for (x, y, color) in self.0.painted() {
            painter.paint(x, y, color);
        }
    }
}

fn render_dots(dots: &DotCanvas, area: Rect, buf: &mut Buffer) {
    let (width, height) = area_to_px(area);
    BrailleCanvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, (width - 1.0).max(1.0) as f64])
        .y_bounds([0.0, (height - 1.0).max(1.0) as f64])
        .paint(|ctx| ctx.draw(&DotLayer(dots)))
        .render(area, buf);
}

fn render_text(run: &TextRun, area: Rect, buf: &mut Buffer) {
    let width = Span::raw(run.text.as_str()).width() as u16;
    let column = (run.anchor.x / DOTS_PER_COLUMN as f32).max(0.0);
    let start = match run.align {
        TextAlign::Left => column.floor() as u16,
        TextAlign::Right => (column.ceil() as u16).saturating_sub(width),
    };
    let row = (run.anchor.y / DOTS_PER_ROW as f32).max(0.0).floor() as u16;
    if start >= area.width || row >= area.height {
        return;
    }
    let room = (area.width - start) as usize;
    buf.set_stringn(
        area.x + start,
        area.y + row,
        &run.text,
        room,
        Style::default().fg(run.color),
    );
}

// ───────────────────────────────────────── widget ────────────

/// Renders a laid-out [`View`] into a terminal area.
pub struct ViewSurface<'a> {
    view: &'a dyn View,
    block: Option<Block<'a>>,
}

impl<'a> ViewSurface<'a> {
    pub fn new(view: &'a dyn View) -> Self {
        Self { view, block: None }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for ViewSurface<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.is_empty() {
            return;
        }

        let (width, height) = area_to_px(inner);
        let mut dots = DotCanvas::new(width as usize, height as usize);
        self.view.draw(&mut dots);

        render_dots(&dots, inner, buf);
        for run in dots.texts() {
            render_text(run, inner, buf);
        }
    }
}
