//! Drawing primitives consumed by the widgets, and a pixel-grid
//! implementation of them.
//!
//! [`DotCanvas`] rasterizes by sampling every pixel centre: a pixel is
//! painted when its centre is covered by the shape and lies inside the
//! current clip.  The grid is later turned into braille cells by
//! [`crate::ui::surface`].

use ratatui::style::Color;

use crate::core::geometry::{Point, RectF};
use crate::core::star_path::{covers_polygon, PaintStyle};

/// Horizontal anchoring of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// The anchor is the left edge of the text.
    Left,
    /// The anchor is the right edge of the text.
    Right,
}

/// The host drawing surface.
pub trait Canvas {
    /// Push the current clip.
    fn save(&mut self);
    /// Pop back to the last saved clip.
    fn restore(&mut self);
    /// Intersect the current clip with `rect`.
    fn clip_rect(&mut self, rect: RectF);
    /// Paint a closed polygon whose local coordinates start at `origin`.
    fn draw_path(&mut self, outline: &[Point], style: PaintStyle, origin: Point, color: Color);
    fn fill_round_rect(&mut self, rect: RectF, radius: f32, color: Color);
    /// Draw `text` vertically centred on `anchor.y`.
    fn draw_text(&mut self, text: &str, anchor: Point, align: TextAlign, color: Color);
}

/// A text run recorded by [`DotCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub anchor: Point,
    pub align: TextAlign,
    pub color: Color,
}

/// Pixel-grid canvas.
#[derive(Debug, Clone)]
pub struct DotCanvas {
    width: usize,
    height: usize,
    pixels: Vec<Option<Color>>,
    clip: RectF,
    saved: Vec<RectF>,
    texts: Vec<TextRun>,
}

impl DotCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width * height],
            clip: RectF::new(0.0, 0.0, width as f32, height as f32),
            saved: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[y * self.width + x]
    }

    /// Painted pixels as `(x, y, color)`.
    pub fn painted(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.map(|c| (i % self.width, i / self.width, c)))
    }

    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    /// Visit every pixel centre inside `bounds ∩ clip`.
    fn fill_where(&mut self, bounds: RectF, color: Color, covered: impl Fn(Point) -> bool) {
        let area = bounds.intersect(&self.clip);
        if area.is_empty() {
            return;
        }
        let x0 = area.left.floor().max(0.0) as usize;
        let y0 = area.top.floor().max(0.0) as usize;
        let x1 = (area.right.ceil().max(0.0) as usize).min(self.width);
        let y1 = (area.bottom.ceil().max(0.0) as usize).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                if area.contains(center) && covered(center) {
                    self.pixels[y * self.width + x] = Some(color);
                }
            }
        }
    }
}

impl Canvas for DotCanvas {
    fn save(&mut self) {
        self.saved.push(self.clip);
    }

    fn restore(&mut self) {
        if let Some(clip) = self.saved.pop() {
            self.clip = clip;
        }
    }

    fn clip_rect(&mut self, rect: RectF) {
        self.clip = self.clip.intersect(&rect.sorted());
    }

    fn draw_path(&mut self, outline: &[Point], style: PaintStyle, origin: Point, color: Color) {
        if outline.is_empty() {
            return;
        }
        let pad = match style {
            PaintStyle::Fill => 0.0,
            PaintStyle::Stroke { width } => width.max(1.0) / 2.0,
        };
        let (mut bounds, rest) = (
            RectF::new(outline[0].x, outline[0].y, outline[0].x, outline[0].y),
            &outline[1..],
        );
        for p in rest {
            bounds.left = bounds.left.min(p.x);
            bounds.top = bounds.top.min(p.y);
            bounds.right = bounds.right.max(p.x);
            bounds.bottom = bounds.bottom.max(p.y);
        }
        let bounds = RectF::new(
            bounds.left + origin.x - pad,
            bounds.top + origin.y - pad,
            bounds.right + origin.x + pad,
            bounds.bottom + origin.y + pad,
        );
        self.fill_where(bounds, color, |p| {
            covers_polygon(outline, style, p.translate(-origin.x, -origin.y))
        });
    }

    fn fill_round_rect(&mut self, rect: RectF, radius: f32, color: Color) {
        let rect = rect.sorted();
        let radius = radius.clamp(0.0, rect.width().min(rect.height()) / 2.0);
        self.fill_where(rect, color, |p| in_round_rect(&rect, radius, p));
    }

    fn draw_text(&mut self, text: &str, anchor: Point, align: TextAlign, color: Color) {
        // Probe the first pixel the text would cover.
        let probe = match align {
            TextAlign::Left => anchor,
            TextAlign::Right => anchor.translate(-0.5, 0.0),
        };
        if !self.clip.contains(probe) {
            return;
        }
        self.texts.push(TextRun {
            text: text.to_string(),
            anchor,
            align,
            color,
        });
    }
}

fn in_round_rect(rect: &RectF, radius: f32, p: Point) -> bool {
    if radius <= 0.0 {
        return rect.contains(p);
    }
    // Nearest point of the inner (radius-shrunk) rect.
    let cx = p.x.clamp(rect.left + radius, rect.right - radius);
    let cy = p.y.clamp(rect.top + radius, rect.bottom - radius);
    p.distance(Point::new(cx, cy)) <= radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_limits_painting() {
        let mut canvas = DotCanvas::new(10, 4);
        canvas.save();
        canvas.clip_rect(RectF::new(0.0, 0.0, 5.0, 4.0));
        canvas.fill_round_rect(RectF::new(0.0, 0.0, 10.0, 4.0), 0.0, Color::Red);
        canvas.restore();
        assert_eq!(canvas.pixel(4, 0), Some(Color::Red));
        assert_eq!(canvas.pixel(5, 0), None);
        assert_eq!(canvas.painted().count(), 20);
    }

    #[test]
    fn round_rect_cuts_corners() {
        let mut canvas = DotCanvas::new(10, 10);
        canvas.fill_round_rect(RectF::new(0.0, 0.0, 10.0, 10.0), 5.0, Color::Green);
        assert_eq!(canvas.pixel(0, 0), None);
        assert_eq!(canvas.pixel(5, 5), Some(Color::Green));
        assert_eq!(canvas.pixel(0, 5), Some(Color::Green));
    }

    #[test]
    fn path_is_drawn_at_its_origin() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ];
        let mut canvas = DotCanvas::new(8, 8);
        canvas.draw_path(&square, PaintStyle::Fill, Point::new(4.0, 4.0), Color::Blue);
        let painted: Vec<_> = canvas.painted().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(painted, [(4, 4), (5, 4), (4, 5), (5, 5)]);
    }

    #[test]
    fn text_outside_the_clip_is_dropped() {
        let mut canvas = DotCanvas::new(8, 8);
        canvas.clip_rect(RectF::new(0.0, 0.0, 4.0, 8.0));
        canvas.draw_text("in", Point::new(1.0, 2.0), TextAlign::Left, Color::White);
        canvas.draw_text("out", Point::new(6.0, 2.0), TextAlign::Left, Color::White);
        assert_eq!(canvas.texts().len(), 1);
        assert_eq!(canvas.texts()[0].text, "in");
    }
}
