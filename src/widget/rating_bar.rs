//! Star rating bar: a row of track stars with a filled overlay clipped to
//! the current rating.

use ratatui::style::Color;

use super::canvas::Canvas;
use super::drawable::{StarLayers, StarVisual};
use super::saved_state::RatingBarState;
use super::tint::{TintList, ViewState};
use super::view::{resolve_size, Invalidation, MeasureSpec, View};
use crate::core::geometry::{Insets, LayoutDirection, RectF};
use crate::core::rating::{RatingBarConfig, RatingEngine, RatingMode, TouchEvent, Viewport};
use crate::core::star_path::StarAppearance;

/// Minimum horizontal travel, in pixels, before a press becomes a drag.
pub const DEFAULT_DRAG_SLOP: f32 = 2.0;

#[derive(Debug)]
pub struct RatingBar {
    engine: RatingEngine,
    visual: StarVisual,
    appearance: StarAppearance,
    layers: StarLayers,
    tint: TintList,
    /// Fill colour when the tint has no state-specific colour.
    accent: Color,
    padding: Insets,
    direction: LayoutDirection,
    view_state: ViewState,
    invalidation: Invalidation,
}

impl RatingBar {
    pub fn new(config: RatingBarConfig, visual: StarVisual) -> Self {
        let appearance = match &visual {
            StarVisual::Generated(appearance) => *appearance,
            _ => StarAppearance::default(),
        };
        let layers = visual.layers(config.star_size);
        let mut bar = Self {
            engine: RatingEngine::new(config, DEFAULT_DRAG_SLOP),
            visual,
            appearance,
            layers,
            tint: TintList::default(),
            accent: Color::Yellow,
            padding: Insets::ZERO,
            direction: LayoutDirection::Ltr,
            view_state: ViewState::default(),
            invalidation: Invalidation::default(),
        };
        bar.invalidation.request_layout();
        bar
    }

    /// Builder-style initial rating.
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.set_rating(rating);
        self
    }

    pub fn with_tint(mut self, tint: TintList, accent: Color) -> Self {
        self.tint = tint;
        self.accent = accent;
        self
    }

    pub fn engine(&self) -> &RatingEngine {
        &self.engine
    }

    // ── mode ────────────────────────────────────────────────────

    pub fn mode(&self) -> RatingMode {
        self.engine.config().mode
    }

    pub fn set_mode(&mut self, mode: RatingMode) {
        self.engine.set_mode(mode);
        if mode == RatingMode::Indicative && self.view_state.pressed {
            self.view_state.pressed = false;
            self.invalidation.invalidate();
        }
    }

    // ── star visual ─────────────────────────────────────────────

    pub fn star_visual(&self) -> &StarVisual {
        &self.visual
    }

    pub fn set_star_visual(&mut self, visual: StarVisual) {
        if let StarVisual::Generated(appearance) = &visual {
            self.appearance = *appearance;
        }
        self.visual = visual;
        self.rebuild_layers();
    }

    /// Applies to generated stars only; a user visual keeps its own look
    /// and the appearance is remembered for when it is removed.
    pub fn set_star_appearance(&mut self, appearance: StarAppearance) {
        self.appearance = appearance;
        if self.visual.is_generated() {
            self.visual = StarVisual::Generated(appearance);
            self.rebuild_layers();
        }
    }

    pub fn star_appearance(&self) -> &StarAppearance {
        &self.appearance
    }

    fn rebuild_layers(&mut self) {
        self.layers = self.visual.layers(self.engine.config().star_size);
        self.invalidation.invalidate();
    }

    // ── geometry ────────────────────────────────────────────────

    pub fn star_count(&self) -> u32 {
        self.engine.config().star_count
    }

    pub fn set_star_count(&mut self, star_count: u32) {
        self.engine.set_star_count(star_count);
        self.invalidation.request_layout();
    }

    pub fn star_size(&self) -> f32 {
        self.engine.config().star_size
    }

    pub fn set_star_size(&mut self, star_size: f32) {
        self.engine.set_star_size(star_size);
        self.rebuild_layers();
        self.invalidation.request_layout();
    }

    pub fn star_margin(&self) -> f32 {
        self.engine.config().star_margin
    }

    pub fn set_star_margin(&mut self, star_margin: f32) {
        self.engine.set_star_margin(star_margin);
        self.invalidation.request_layout();
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

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

    // ── tint ────────────────────────────────────────────────────

    pub fn star_tint(&self) -> &TintList {
        &self.tint
    }

    pub fn set_star_tint(&mut self, tint: TintList) {
        self.tint = tint;
        self.invalidation.invalidate();
    }

    pub fn view_state(&self) -> ViewState {
        self.view_state
    }

    pub fn set_focused(&mut self, focused: bool) {
        if self.view_state.focused != focused {
            self.view_state.focused = focused;
            self.invalidation.invalidate();
        }
    }

    fn track_color(&self) -> Color {
        self.tint.color_for(self.view_state)
    }

    fn fill_color(&self) -> Color {
        self.tint.activated_color().unwrap_or(self.accent)
    }

    // ── rating ──────────────────────────────────────────────────

    pub fn step_size(&self) -> f32 {
        self.engine.config().step_size
    }

    pub fn set_step_size(&mut self, step_size: f32) {
        self.engine.set_step_size(step_size);
        self.invalidation.invalidate();
    }

    pub fn rating(&self) -> f32 {
        self.engine.rating()
    }

    pub fn set_rating(&mut self, rating: f32) {
        self.engine.set_rating(rating);
        self.invalidation.invalidate();
    }

    /// Move the rating by `steps` whole steps (keyboard control).
    pub fn step_by(&mut self, steps: i32) {
        let rating = self.rating() + self.step_size() * steps as f32;
        self.set_rating(rating);
    }

    pub fn drag_slop(&self) -> f32 {
        self.engine.drag_slop()
    }

    pub fn set_drag_slop(&mut self, drag_slop: f32) {
        self.engine.set_drag_slop(drag_slop);
    }

    /// Visible region of the filled layer.
    pub fn clip_rect(&self) -> RectF {
        self.engine.clip_rect()
    }

    // ── state ───────────────────────────────────────────────────

    pub fn save_state(&self) -> RatingBarState {
        RatingBarState {
            rating: self.rating(),
            ..Default::default()
        }
    }

    pub fn restore_state(&mut self, state: &RatingBarState) {
        tracing::info!(rating = state.rating, "restoring rating bar");
        self.set_rating(state.rating);
    }
}

impl View for RatingBar {
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> (f32, f32) {
        let desired_w = self.engine.drawables_width() + self.padding.horizontal();
        let desired_h = self.star_size() + self.padding.vertical();
        (resolve_size(desired_w, width), resolve_size(desired_h, height))
    }

    fn layout(&mut self, width: f32, _height: f32) {
        self.engine.set_viewport(Viewport {
            width,
            padding: self.padding,
            direction: self.direction,
        });
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let count = self.star_count();

        let track_color = self.track_color();
        for i in 0..count {
            self.layers
                .track
                .draw(canvas, self.engine.star_bounds(i), track_color);
        }

        let fill_color = self.fill_color();
        canvas.save();
        canvas.clip_rect(self.engine.clip_rect());
        for i in 0..count {
            self.layers
                .fill
                .draw(canvas, self.engine.star_bounds(i), fill_color);
        }
        canvas.restore();
    }

    fn handle_event(&mut self, event: &TouchEvent) -> bool {
        if !self.engine.handle(*event) {
            return false;
        }
        self.view_state.pressed = self.engine.is_dragging();
        self.invalidation.invalidate();
        true
    }

    fn invalidation(&mut self) -> &mut Invalidation {
        &mut self.invalidation
    }
}
