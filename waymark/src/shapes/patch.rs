use egui::{Color32, Context, Painter, Rect, Stroke, StrokeKind};

use super::{Placement, Shape};
use crate::{Footprint, Location, Projector};

/// A filled, axis-aligned rectangle spanned between two corner locations.
#[derive(Debug, Clone)]
pub struct Patch {
    pub top_left: Location,
    pub bottom_right: Location,
    pub fill: Color32,
    pub stroke: Stroke,
}

impl Patch {
    pub fn new(top_left: impl Into<Location>, bottom_right: impl Into<Location>) -> Self {
        Self {
            top_left: top_left.into(),
            bottom_right: bottom_right.into(),
            fill: Color32::RED.gamma_multiply(0.3),
            stroke: Stroke::new(1., Color32::RED.gamma_multiply(0.8)),
        }
    }

    pub fn with_fill(mut self, fill: Color32) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }
}

impl Shape for Patch {
    fn place(&self, _ctx: &Context, projector: &Projector) -> Placement {
        // `from_two_pos` sorts the corners, so a patch spanning the antimeridian does not
        // end up with a negative size.
        let rect = Rect::from_two_pos(
            self.top_left.resolve(projector),
            self.bottom_right.resolve(projector),
        );

        Placement {
            anchor: rect.center(),
            footprint: Footprint::Rect(rect),
        }
    }

    fn draw(&self, painter: &Painter, placement: &Placement, opacity: f32) {
        let Footprint::Rect(rect) = placement.footprint else {
            return;
        };

        if !painter.clip_rect().intersects(rect) {
            return;
        }

        painter.rect_filled(rect, 0., self.fill.gamma_multiply(opacity));
        painter.rect_stroke(
            rect,
            0.,
            Stroke::new(self.stroke.width, self.stroke.color.gamma_multiply(opacity)),
            StrokeKind::Middle,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lon_lat, Camera};
    use egui::{pos2, Pos2, Vec2};

    #[test]
    fn corners_projected_into_a_rect() {
        let projector = Projector::new(
            Rect::from_min_size(Pos2::ZERO, Vec2::splat(100.)),
            &Camera::new(lon_lat(17., 51.), 12.).unwrap(),
        );

        let patch = Patch::new(pos2(10., 20.), pos2(30., 60.));
        let placement = patch.place(&Context::default(), &projector);

        assert_eq!(
            Footprint::Rect(Rect::from_min_max(pos2(10., 20.), pos2(30., 60.))),
            placement.footprint
        );
        assert_eq!(pos2(20., 40.), placement.anchor);
    }

    #[test]
    fn geo_corners_keep_north_up() {
        let projector = Projector::new(
            Rect::from_min_size(Pos2::ZERO, Vec2::splat(100.)),
            &Camera::new(lon_lat(17., 51.), 10.).unwrap(),
        );

        // North-west corner first, as on a map.
        let patch = Patch::new(lon_lat(16.9, 51.1), lon_lat(17.1, 50.9));
        let placement = patch.place(&Context::default(), &projector);

        let Footprint::Rect(rect) = placement.footprint else {
            panic!("expected a rect footprint");
        };
        assert!(rect.width() > 0.);
        assert!(rect.height() > 0.);

        // Mercator is not linear in latitude, so the middle is only approximately centered.
        assert!((rect.center() - pos2(50., 50.)).length() < 0.5);
    }
}
