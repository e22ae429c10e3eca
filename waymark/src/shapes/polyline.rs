use egui::{Color32, Context, Painter, Pos2, Stroke};

use super::{Placement, Shape};
use crate::{Footprint, Location, Projector};

/// A stroked path along a sequence of locations.
#[derive(Debug, Clone)]
pub struct Polyline {
    pub path: Vec<Location>,
    pub stroke: Stroke,
}

impl Polyline {
    pub fn new<L>(path: impl IntoIterator<Item = L>) -> Self
    where
        L: Into<Location>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            stroke: Stroke::new(3., Color32::BLUE.gamma_multiply(0.8)),
        }
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }
}

impl Shape for Polyline {
    fn place(&self, _ctx: &Context, projector: &Projector) -> Placement {
        let points: Vec<Pos2> = self
            .path
            .iter()
            .map(|location| location.resolve(projector))
            .collect();

        Placement {
            anchor: points.first().copied().unwrap_or_default(),
            footprint: Footprint::Strip {
                points,
                width: self.stroke.width,
            },
        }
    }

    fn draw(&self, painter: &Painter, placement: &Placement, opacity: f32) {
        let Footprint::Strip { points, .. } = &placement.footprint else {
            return;
        };

        if !painter.clip_rect().intersects(placement.footprint.bounds()) {
            return;
        }

        painter.add(egui::Shape::line(
            points.clone(),
            Stroke::new(self.stroke.width, self.stroke.color.gamma_multiply(opacity)),
        ));
    }
}
