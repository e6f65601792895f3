//! Star drawables: the generated star shape and user-supplied visuals.

use std::fmt;
use std::sync::Arc;

use ratatui::style::Color;

use super::canvas::Canvas;
use crate::core::geometry::{Point, RectF};
use crate::core::star_path::{build_star, StarAppearance, StarPath};

/// Anything that can paint itself into a bounds rectangle with a tint.
pub trait Drawable: fmt::Debug + Send + Sync {
    fn draw(&self, canvas: &mut dyn Canvas, bounds: RectF, color: Color);
}

// ───────────────────────────────────────── generated star ────

/// A generated star of a fixed size, drawn at the top-left of its bounds.
#[derive(Debug, Clone)]
pub struct StarDrawable {
    appearance: StarAppearance,
    path: StarPath,
    outline: Vec<Point>,
}

impl StarDrawable {
    pub fn new(size: f32, appearance: StarAppearance) -> Self {
        let path = build_star(size, &appearance);
        let outline = path.outline();
        Self {
            appearance,
            path,
            outline,
        }
    }

    pub fn appearance(&self) -> &StarAppearance {
        &self.appearance
    }

    pub fn path(&self) -> &StarPath {
        &self.path
    }

    /// Re-apply an appearance, rebuilding the outline at the same size.
    pub fn apply_appearance(&mut self, appearance: StarAppearance) {
        *self = Self::new(self.path.size(), appearance);
    }
}

impl Drawable for StarDrawable {
    fn draw(&self, canvas: &mut dyn Canvas, bounds: RectF, color: Color) {
        canvas.draw_path(
            &self.outline,
            self.path.style(),
            Point::new(bounds.left, bounds.top),
            color,
        );
    }
}

// ───────────────────────────────────────── visuals ───────────

/// What a star looks like in a widget.
#[derive(Clone)]
pub enum StarVisual {
    /// A generated star; the fill layer is the same shape, always solid.
    Generated(StarAppearance),
    /// A user drawable used for both the track and the fill layer.
    External(Arc<dyn Drawable>),
    /// A user layer pair: layer 0 is the track, layer 1 the fill.
    Layered {
        track: Arc<dyn Drawable>,
        fill: Arc<dyn Drawable>,
    },
}

impl fmt::Debug for StarVisual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StarVisual::Generated(appearance) => {
                f.debug_tuple("Generated").field(appearance).finish()
            }
            StarVisual::External(d) => f.debug_tuple("External").field(d).finish(),
            StarVisual::Layered { track, fill } => f
                .debug_struct("Layered")
                .field("track", track)
                .field("fill", fill)
                .finish(),
        }
    }
}

impl Default for StarVisual {
    fn default() -> Self {
        StarVisual::Generated(StarAppearance::default())
    }
}

/// The two star layers of a rating bar.
#[derive(Debug, Clone)]
pub struct StarLayers {
    pub track: Arc<dyn Drawable>,
    pub fill: Arc<dyn Drawable>,
}

impl StarVisual {
    pub fn is_generated(&self) -> bool {
        matches!(self, StarVisual::Generated(_))
    }

    /// Track and fill layers for stars of `size` pixels.
    pub fn layers(&self, size: f32) -> StarLayers {
        match self {
            StarVisual::Generated(appearance) => StarLayers {
                track: Arc::new(StarDrawable::new(size, *appearance)),
                fill: Arc::new(StarDrawable::new(size, appearance.as_overlay())),
            },
            StarVisual::External(drawable) => StarLayers {
                track: Arc::clone(drawable),
                fill: Arc::clone(drawable),
            },
            StarVisual::Layered { track, fill } => StarLayers {
                track: Arc::clone(track),
                fill: Arc::clone(fill),
            },
        }
    }

    /// Every layer, bottom first, for widgets that draw the visual as one
    /// unclipped stack.
    pub fn stacked(&self, size: f32) -> Vec<Arc<dyn Drawable>> {
        match self {
            StarVisual::Generated(appearance) => {
                vec![Arc::new(StarDrawable::new(size, *appearance))]
            }
            StarVisual::External(drawable) => vec![Arc::clone(drawable)],
            StarVisual::Layered { track, fill } => vec![Arc::clone(track), Arc::clone(fill)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::canvas::DotCanvas;

    #[test]
    fn generated_fill_layer_is_solid_even_for_hollow_tracks() {
        let visual = StarVisual::Generated(StarAppearance {
            hollowed: true,
            outline_width: 1.0,
            ..Default::default()
        });
        let layers = visual.layers(16.0);

        let mut track = DotCanvas::new(16, 16);
        layers.track.draw(&mut track, RectF::new(0.0, 0.0, 16.0, 16.0), Color::Gray);
        let mut fill = DotCanvas::new(16, 16);
        layers.fill.draw(&mut fill, RectF::new(0.0, 0.0, 16.0, 16.0), Color::Yellow);

        assert_eq!(track.pixel(8, 9), None);
        assert_eq!(fill.pixel(8, 9), Some(Color::Yellow));
        assert!(fill.painted().count() > track.painted().count());
    }

    #[test]
    fn apply_appearance_keeps_the_size() {
        let mut star = StarDrawable::new(20.0, StarAppearance::default());
        star.apply_appearance(StarAppearance {
            hollowed: true,
            ..Default::default()
        });
        assert_eq!(star.path().size(), 20.0);
        assert!(star.appearance().hollowed);
    }

    #[test]
    fn layered_visual_stacks_both_layers() {
        let track: Arc<dyn Drawable> = Arc::new(StarDrawable::new(8.0, StarAppearance::default()));
        let fill: Arc<dyn Drawable> = Arc::new(StarDrawable::new(8.0, StarAppearance::default()));
        let visual = StarVisual::Layered { track, fill };
        assert_eq!(visual.stacked(8.0).len(), 2);
        assert!(!visual.is_generated());
    }
}
