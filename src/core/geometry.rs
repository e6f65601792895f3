//! Plain 2-D geometry shared by the star, rating and statistics algorithms.
//!
//! All coordinates are in *pixels* with the origin at the top-left corner of
//! the owning view and `y` growing downwards.  On the terminal a pixel is one
//! braille dot (see [`crate::ui::surface`]).

// ───────────────────────────────────────── point ─────────────

/// A point in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation towards `other` (`t = 0` → `self`, `t = 1` → `other`).
    pub fn lerp(self, other: Point, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

// ───────────────────────────────────────── rect ──────────────

/// Axis-aligned rectangle stored as edges (`left <= right`, `top <= bottom`
/// is expected but not enforced; an inverted rect is simply empty).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Half-open containment: left/top edges inclusive, right/bottom exclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }

    /// Intersection of two rects; empty (zero-area) when they do not overlap.
    pub fn intersect(&self, other: &RectF) -> RectF {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right).max(left);
        let bottom = self.bottom.min(other.bottom).max(top);
        RectF::new(left, top, right, bottom)
    }

    /// Normalise a rect whose edges may be given in either order
    /// (right-to-left clip spans are built "backwards").
    pub fn sorted(&self) -> RectF {
        RectF::new(
            self.left.min(self.right),
            self.top.min(self.bottom),
            self.left.max(self.right),
            self.top.max(self.bottom),
        )
    }
}

// ───────────────────────────────────────── insets ────────────

/// View padding in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Insets {
    pub const ZERO: Insets = Insets::uniform(0.0);

    pub const fn uniform(v: f32) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

// ───────────────────────────────────────── direction ─────────

/// Horizontal layout direction of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

impl LayoutDirection {
    pub fn is_rtl(self) -> bool {
        self == LayoutDirection::Rtl
    }

    pub fn toggled(self) -> Self {
        match self {
            LayoutDirection::Ltr => LayoutDirection::Rtl,
            LayoutDirection::Rtl => LayoutDirection::Ltr,
        }
    }
}
