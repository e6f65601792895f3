//! Five-pointed star outline generation.
//!
//! A star is ten alternating vertices around the centre of a `size × size`
//! box: five outer points on radius `R = size / 2` and five inner points on a
//! radius chosen by the [`Somatotype`].  The first outer point sits 18° above
//! the horizontal, which gives the classic upright star.

use super::geometry::Point;

/// Number of line segments used to flatten one rounded corner.
const CURVE_SEGMENTS: usize = 6;

// ───────────────────────────────────────── appearance ────────

/// Body proportion preset of a star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Somatotype {
    /// Slender points: inner radius is 0.4 of the outer radius.
    #[default]
    Thin,
    /// Wide points: inner radius is 0.5 of the outer radius.
    Fat,
}

impl Somatotype {
    /// Ratio of inner-vertex radius to outer-vertex radius.
    pub fn inner_ratio(self) -> f32 {
        match self {
            Somatotype::Thin => 0.4,
            Somatotype::Fat => 0.5,
        }
    }

    /// Parse the style-file spelling (`thin` / `fat`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "thin" => Some(Somatotype::Thin),
            "fat" => Some(Somatotype::Fat),
            _ => None,
        }
    }
}

/// How a generated star looks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StarAppearance {
    pub somatotype: Somatotype,
    /// Outline only instead of a solid fill.
    pub hollowed: bool,
    /// Stroke thickness used when `hollowed`.
    pub outline_width: f32,
    /// Smooth every join of the outline.
    pub corner_rounded: bool,
    pub corner_radius: f32,
}

impl StarAppearance {
    /// Appearance of the foreground star layered over this one: identical
    /// shape and corners, but always solid.
    pub fn as_overlay(&self) -> StarAppearance {
        StarAppearance {
            hollowed: false,
            ..*self
        }
    }

    pub fn paint_style(&self) -> PaintStyle {
        if self.hollowed {
            PaintStyle::Stroke {
                width: self.outline_width.max(0.0),
            }
        } else {
            PaintStyle::Fill
        }
    }
}

/// Rendering style derived from a [`StarAppearance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintStyle {
    Fill,
    Stroke { width: f32 },
}

// ───────────────────────────────────────── path ──────────────

/// A closed star polygon in the local coordinates of its `size × size` box.
#[derive(Debug, Clone, PartialEq)]
pub struct StarPath {
    size: f32,
    outer_radius: f32,
    inner_radius: f32,
    vertices: [Point; 10],
    style: PaintStyle,
    corner_radius: Option<f32>,
}

/// Build the star outline for a box of `size` pixels.
pub fn build_star(size: f32, appearance: &StarAppearance) -> StarPath {
    let size = size.max(0.0);
    let outer = size / 2.0;
    let inner = outer * appearance.somatotype.inner_ratio();

    let mut vertices = [Point::default(); 10];
    for k in 0..5 {
        let outer_angle = (18.0 + 72.0 * k as f32).to_radians();
        let inner_angle = (54.0 + 72.0 * k as f32).to_radians();
        vertices[2 * k] = polar(outer, outer_angle, outer);
        vertices[2 * k + 1] = polar(outer, inner_angle, inner);
    }

    let corner_radius = (appearance.corner_rounded && appearance.corner_radius > 0.0)
        .then_some(appearance.corner_radius);

    StarPath {
        size,
        outer_radius: outer,
        inner_radius: inner,
        vertices,
        style: appearance.paint_style(),
        corner_radius,
    }
}

/// Point at `angle` (counter-clockwise, y down) on `radius` around the box centre.
fn polar(center: f32, angle: f32, radius: f32) -> Point {
    Point::new(center + angle.cos() * radius, center - angle.sin() * radius)
}

impl StarPath {
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    /// The ten raw vertices, outer first, alternating.
    pub fn vertices(&self) -> &[Point; 10] {
        &self.vertices
    }

    pub fn style(&self) -> PaintStyle {
        self.style
    }

    pub fn corner_radius(&self) -> Option<f32> {
        self.corner_radius
    }

    /// Closed outline ready for rasterization.  Rounded corners are
    /// flattened into short line segments.
    pub fn outline(&self) -> Vec<Point> {
        match self.corner_radius {
            Some(radius) => round_corners(&self.vertices, radius),
            None => self.vertices.to_vec(),
        }
    }

    /// Whether a local point is painted by this star in its own style.
    pub fn covers(&self, p: Point) -> bool {
        covers_polygon(&self.outline(), self.style, p)
    }
}

/// Whether `p` is painted by `polygon` drawn in `style`.
pub fn covers_polygon(polygon: &[Point], style: PaintStyle, p: Point) -> bool {
    match style {
        PaintStyle::Fill => contains_even_odd(polygon, p),
        // A zero-width stroke is a one-pixel hairline.
        PaintStyle::Stroke { width } => distance_to_outline(polygon, p) <= width.max(1.0) / 2.0,
    }
}

/// Replace every join with a quadratic curve whose end points are cut back
/// `radius` along each edge (never past the edge midpoint).
fn round_corners(vertices: &[Point], radius: f32) -> Vec<Point> {
    let n = vertices.len();
    let mut out = Vec::with_capacity(n * (CURVE_SEGMENTS + 1));
    for i in 0..n {
        let prev = vertices[(i + n - 1) % n];
        let corner = vertices[i];
        let next = vertices[(i + 1) % n];

        let start = cut_towards(corner, prev, radius);
        let end = cut_towards(corner, next, radius);
        for s in 0..=CURVE_SEGMENTS {
            let t = s as f32 / CURVE_SEGMENTS as f32;
            out.push(start.lerp(corner, t).lerp(corner.lerp(end, t), t));
        }
    }
    out
}

fn cut_towards(from: Point, to: Point, radius: f32) -> Point {
    let len = from.distance(to);
    if len <= f32::EPSILON {
        return from;
    }
    from.lerp(to, (radius / len).min(0.5))
}

/// Even-odd ray casting.
fn contains_even_odd(polygon: &[Point], p: Point) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > p.y) != (b.y > p.y) {
            let cross_x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn distance_to_outline(polygon: &[Point], p: Point) -> f32 {
    let n = polygon.len();
    (0..n)
        .map(|i| distance_to_segment(p, polygon[i], polygon[(i + 1) % n]))
        .fold(f32::INFINITY, f32::min)
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(a.lerp(b, t))
}
