//! Drag-to-rating quantization for a row of stars.
//!
//! The engine owns the only mutable runtime state of a rating bar: the
//! current rating and the normalized overlay offset used to clip the filled
//! star layer.  It knows nothing about drawing; callers feed it touch
//! positions (in view pixels) and read back the rating and clip rectangle.

use super::geometry::{Insets, LayoutDirection, RectF};

/// Step size used when the configured one is not a usable fraction.
pub const DEFAULT_STEP_SIZE: f32 = 0.5;

// ───────────────────────────────────────── config ────────────

/// Whether the bar reacts to touch input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingMode {
    #[default]
    Interactive,
    /// Display only; touches are ignored but the rating can still be set.
    Indicative,
}

impl RatingMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "interactive" => Some(RatingMode::Interactive),
            "indicative" => Some(RatingMode::Indicative),
            _ => None,
        }
    }
}

/// Geometry and granularity of a rating bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingBarConfig {
    pub mode: RatingMode,
    pub star_count: u32,
    pub star_size: f32,
    pub star_margin: f32,
    /// Fraction of one star per rating step, in `(0, 1]`.
    pub step_size: f32,
}

impl Default for RatingBarConfig {
    fn default() -> Self {
        Self {
            mode: RatingMode::Interactive,
            star_count: 5,
            star_size: 8.0,
            star_margin: 2.0,
            step_size: DEFAULT_STEP_SIZE,
        }
    }
}

/// Clamp a step size into `(0, 1]`; non-positive or non-finite values fall
/// back to [`DEFAULT_STEP_SIZE`].
pub fn sanitize_step_size(step_size: f32) -> f32 {
    if !step_size.is_finite() || step_size <= 0.0 {
        tracing::debug!(step_size, "step size out of range, using default");
        DEFAULT_STEP_SIZE
    } else {
        step_size.min(1.0)
    }
}

// ───────────────────────────────────────── viewport ──────────

/// The part of the host view the engine needs: its width, padding and
/// layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub padding: Insets,
    pub direction: LayoutDirection,
}

impl Viewport {
    /// Width between the horizontal paddings.
    pub fn available_width(&self) -> f32 {
        self.width - self.padding.horizontal()
    }
}

// ───────────────────────────────────────── touch ─────────────

/// Touch phase of an interactive bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchPhase {
    #[default]
    Idle,
    Pressed,
    Dragging,
}

/// A touch event delivered by the host, `x` in view pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    Down { x: f32 },
    Move { x: f32 },
    Up { x: f32 },
    Cancel,
}

// ───────────────────────────────────────── engine ────────────

#[derive(Debug, Clone)]
pub struct RatingEngine {
    config: RatingBarConfig,
    viewport: Viewport,
    drag_slop: f32,
    rating: f32,
    offset: f32,
    phase: TouchPhase,
    anchor_x: f32,
}

impl RatingEngine {
    pub fn new(config: RatingBarConfig, drag_slop: f32) -> Self {
        let config = RatingBarConfig {
            step_size: sanitize_step_size(config.step_size),
            ..config
        };
        let mut engine = Self {
            config,
            viewport: Viewport::default(),
            drag_slop: drag_slop.max(0.0),
            rating: 0.0,
            offset: 0.0,
            phase: TouchPhase::Idle,
            anchor_x: 0.0,
        };
        // Until the host lays us out, assume the measured size.
        engine.viewport.width = engine.drawables_width();
        engine
    }

    // ── accessors ───────────────────────────────────────────────

    pub fn config(&self) -> &RatingBarConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn rating(&self) -> f32 {
        self.rating
    }

    /// Normalized width of the filled overlay, in `[0, 1]`.
    pub fn drag_offset(&self) -> f32 {
        self.offset
    }

    pub fn phase(&self) -> TouchPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == TouchPhase::Dragging
    }

    pub fn drag_slop(&self) -> f32 {
        self.drag_slop
    }

    pub fn total_steps(&self) -> f32 {
        self.config.star_count as f32 / self.config.step_size
    }

    pub fn steps_per_star(&self) -> f32 {
        1.0 / self.config.step_size
    }

    /// Width of all stars and the margins between them.
    pub fn drawables_width(&self) -> f32 {
        let count = self.config.star_count as f32;
        (self.config.star_size * count + self.config.star_margin * (count - 1.0))
            .round()
            .max(0.0)
    }

    // ── configuration ───────────────────────────────────────────

    pub fn set_mode(&mut self, mode: RatingMode) {
        self.config.mode = mode;
        if mode == RatingMode::Indicative {
            self.phase = TouchPhase::Idle;
        }
    }

    pub fn set_star_count(&mut self, star_count: u32) {
        self.config.star_count = star_count;
        self.reapply_rating();
    }

    pub fn set_star_size(&mut self, star_size: f32) {
        self.config.star_size = star_size.max(0.0);
        self.reapply_rating();
    }

    pub fn set_star_margin(&mut self, star_margin: f32) {
        self.config.star_margin = star_margin.max(0.0);
        self.reapply_rating();
    }

    pub fn set_step_size(&mut self, step_size: f32) {
        self.config.step_size = sanitize_step_size(step_size);
    }

    pub fn set_drag_slop(&mut self, drag_slop: f32) {
        self.drag_slop = drag_slop.max(0.0);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn reapply_rating(&mut self) {
        let rating = self.rating;
        self.set_rating(rating);
    }

    // ── touch state machine ─────────────────────────────────────

    /// Feed one touch event.  Returns `false` when the event was ignored
    /// (indicative mode).
    pub fn handle(&mut self, event: TouchEvent) -> bool {
        if self.config.mode == RatingMode::Indicative {
            return false;
        }
        match event {
            TouchEvent::Down { x } => self.on_press_start(x),
            TouchEvent::Move { x } => self.on_move(x),
            TouchEvent::Up { x } => self.on_release(x),
            TouchEvent::Cancel => self.on_cancel(),
        }
        true
    }

    pub fn on_press_start(&mut self, x: f32) {
        self.anchor_x = x;
        self.phase = TouchPhase::Pressed;
    }

    pub fn on_move(&mut self, x: f32) {
        match self.phase {
            TouchPhase::Dragging => {
                self.position_to_rating(x);
            }
            TouchPhase::Pressed if (x - self.anchor_x).abs() > self.drag_slop => {
                self.phase = TouchPhase::Dragging;
                self.position_to_rating(x);
            }
            _ => {}
        }
    }

    /// A release always commits the rating at `x`, so a plain tap rates too.
    pub fn on_release(&mut self, x: f32) {
        self.position_to_rating(x);
        self.phase = TouchPhase::Idle;
    }

    pub fn on_cancel(&mut self) {
        self.phase = TouchPhase::Idle;
    }

    // ── quantization ────────────────────────────────────────────

    /// Step 1 of the recompute: map `x` to `[0, 1]` across the available
    /// width, mirrored for right-to-left layouts.
    pub fn normalized_offset(&self, x: f32) -> f32 {
        let x = x.round();
        let vp = &self.viewport;
        let available = vp.available_width();
        if available <= 0.0 {
            return 0.0;
        }
        let start = vp.padding.left;
        let end = vp.width - vp.padding.right;

        if vp.direction.is_rtl() {
            if x > end {
                0.0
            } else if x < start {
                1.0
            } else {
                (available - x + start) / available
            }
        } else if x < start {
            0.0
        } else if x > end {
            1.0
        } else {
            (x - start) / available
        }
    }

    /// Recompute the rating from a touch position, snapping the overlay to a
    /// step boundary and skipping the margins between stars.  Returns the
    /// new rating.
    pub fn position_to_rating(&mut self, x: f32) -> f32 {
        let available = self.viewport.available_width();
        let offset = self.normalized_offset(x);
        let step_count = self.quantize(offset * available);

        self.offset = if available > 0.0 {
            (self.steps_width(step_count) / available).clamp(0.0, 1.0)
        } else {
            0.0
        };
        tracing::debug!(x, step_count, rating = self.rating, offset = self.offset, "rating recomputed");
        self.rating
    }

    /// Consume `remaining` pixels one step at a time; after a full star's
    /// worth of steps the next subtraction eats a margin instead.
    fn quantize(&self, mut remaining: f32) -> u32 {
        let step_width = self.config.star_size * self.config.star_count as f32 / self.total_steps();
        if !step_width.is_finite() || step_width <= 0.0 {
            return 0;
        }
        let steps_per_star = self.steps_per_star();
        let max_steps = self.total_steps().ceil() as u32;

        let mut cut_count = 0u32;
        let mut step_count = 0u32;
        while remaining > 0.0 {
            if (cut_count as f32) < steps_per_star {
                remaining -= step_width;
                cut_count += 1;
                step_count += 1;
            } else {
                cut_count = 0;
                remaining -= self.config.star_margin;
            }
        }
        step_count.min(max_steps)
    }

    /// Pixel width covered by `step_count` steps, margins included.  Also
    /// stores the matching rating.
    fn steps_width(&mut self, step_count: u32) -> f32 {
        if step_count == 0 {
            self.rating = 0.0;
            return 0.0;
        }
        let stars = (step_count as f32 / self.steps_per_star()).min(self.config.star_count as f32);
        let margin_count = (stars.ceil() - 1.0).max(0.0);
        self.rating = stars;
        stars * self.config.star_size + margin_count * self.config.star_margin
    }

    /// Programmatic rating.  The value is clamped to `[0, star_count]` and
    /// rounded up to the next whole step.
    pub fn set_rating(&mut self, value: f32) {
        let max = self.config.star_count as f32;
        let value = if value.is_finite() { value.clamp(0.0, max) } else { 0.0 };

        let step_count = (value * self.steps_per_star()).ceil().max(0.0) as u32;
        let width = self.steps_width(step_count);
        let available = self.drawables_width();
        self.offset = if available > 0.0 {
            (width / available).clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    // ── draw geometry ───────────────────────────────────────────

    /// Bounds of star `position` (0 = the start edge).
    pub fn star_bounds(&self, position: u32) -> RectF {
        let vp = &self.viewport;
        let size = self.config.star_size;
        let advance = (size + self.config.star_margin) * position as f32;
        let top = vp.padding.top;
        if vp.direction.is_rtl() {
            let right = vp.width - vp.padding.right - advance;
            RectF::new(right - size, top, right, top + size)
        } else {
            let left = vp.padding.left + advance;
            RectF::new(left, top, left + size, top + size)
        }
    }

    /// Region of the filled star layer that is visible.
    pub fn clip_rect(&self) -> RectF {
        let vp = &self.viewport;
        let distance = (vp.available_width() * self.offset).round();
        let top = vp.padding.top;
        let bottom = top + self.config.star_size;
        if vp.direction.is_rtl() {
            let right = vp.width - vp.padding.right;
            RectF::new(right - distance, top, right, bottom)
        } else {
            let left = vp.padding.left;
            RectF::new(left, top, left + distance, bottom)
        }
    }
}
