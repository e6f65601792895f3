//! The capability interface every widget offers its host: measure, lay out,
//! draw, handle touches.  The host owns the event loop and calls these.

use super::canvas::Canvas;
use crate::core::rating::TouchEvent;

/// Size constraint handed down by the host for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasureSpec {
    Exactly(f32),
    AtMost(f32),
    Unspecified,
}

/// Reconcile a desired size with a constraint.
pub fn resolve_size(desired: f32, spec: MeasureSpec) -> f32 {
    match spec {
        MeasureSpec::Exactly(size) => size,
        MeasureSpec::AtMost(max) => desired.min(max),
        MeasureSpec::Unspecified => desired,
    }
}

/// Pending redraw / relayout requests.  Repeated requests before the next
/// frame coalesce into one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Invalidation {
    redraw: bool,
    relayout: bool,
}

impl Invalidation {
    pub fn invalidate(&mut self) {
        self.redraw = true;
    }

    /// Geometry changed: measure and lay out again, then redraw.
    pub fn request_layout(&mut self) {
        self.relayout = true;
        self.redraw = true;
    }

    /// Consume the relayout request.
    pub fn take_layout(&mut self) -> bool {
        std::mem::take(&mut self.relayout)
    }

    /// Consume the redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }
}

pub trait View {
    /// Desired `(width, height)` in pixels under the given constraints.
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> (f32, f32);
    /// The host assigned the final size.
    fn layout(&mut self, width: f32, height: f32);
    fn draw(&self, canvas: &mut dyn Canvas);
    /// Returns `true` when the event was consumed.
    fn handle_event(&mut self, event: &TouchEvent) -> bool;
    fn invalidation(&mut self) -> &mut Invalidation;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10.0, MeasureSpec::Exactly(30.0), 30.0)]
    #[case(10.0, MeasureSpec::AtMost(30.0), 10.0)]
    #[case(50.0, MeasureSpec::AtMost(30.0), 30.0)]
    #[case(50.0, MeasureSpec::Unspecified, 50.0)]
    fn resolves_against_spec(#[case] desired: f32, #[case] spec: MeasureSpec, #[case] expected: f32) {
        assert_eq!(resolve_size(desired, spec), expected);
    }

    #[test]
    fn repeated_invalidations_coalesce() {
        let mut inv = Invalidation::default();
        inv.invalidate();
        inv.invalidate();
        inv.request_layout();
        assert!(inv.take_redraw());
        assert!(!inv.take_redraw());
        assert!(inv.take_layout());
        assert!(!inv.take_layout());
    }
}
