//! Shapes that can be drawn over the map by a [`crate::ShapeLayer`].

mod label;
mod marker;
mod patch;
mod polyline;

pub use label::{Label, LabelStyle};
pub use marker::{Marker, MarkerIcon, MarkerStyle};
pub use patch::Patch;
pub use polyline::Polyline;

use egui::{Context, Painter, Pos2, Vec2};

use crate::{Footprint, Projector};

/// Screen-space geometry of a single shape, derived once per scene build and reused until
/// the camera or the dataset changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// The shape's resolved anchor point on the viewport.
    pub anchor: Pos2,

    /// Area the shape occupies, for hit-testing.
    pub footprint: Footprint,
}

impl Placement {
    pub(crate) fn translated(&self, offset: Vec2) -> Self {
        let mut footprint = self.footprint.clone();
        footprint.translate(offset);
        Self {
            anchor: self.anchor + offset,
            footprint,
        }
    }
}

/// A shape drawable by a [`crate::ShapeLayer`]. Implement it to draw your own kinds of
/// overlays; [`Marker`], [`Polyline`], [`Patch`] and [`Label`] are the built-in ones.
pub trait Shape {
    /// Resolve the shape into screen space. Called when the layer rebuilds its scene, which
    /// happens only when the camera or the dataset changed; geographical locations go through
    /// the projector here, exactly once per build.
    fn place(&self, ctx: &Context, projector: &Projector) -> Placement;

    /// Paint the shape. `placement` is what [`Shape::place`] returned, possibly translated
    /// while the map is being dragged. `opacity` is the layer's opacity, to be multiplied
    /// into every color.
    fn draw(&self, painter: &Painter, placement: &Placement, opacity: f32);
}
