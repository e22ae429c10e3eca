use egui::{Pos2, Rect};

use crate::{
    mercator::{project, unproject},
    position::{Pixels, PixelsExt as _},
    Camera, Position,
};

/// Projects geographical positions into pixels on the viewport, suitable for [`egui::Painter`].
///
/// A projector is a snapshot of the camera state at the time it was constructed. Since panning
/// and zooming change the projection, a fresh instance must be obtained every frame; the
/// [`crate::Map`] widget hands one to each of its layers.
#[derive(Debug, Clone)]
pub struct Projector {
    clip_rect: Rect,
    center: Position,
    zoom: f64,
}

impl Projector {
    pub fn new(clip_rect: Rect, camera: &Camera) -> Self {
        Self {
            clip_rect,
            center: camera.center(),
            zoom: camera.zoom(),
        }
    }

    /// Project `position` into pixels on the viewport.
    ///
    /// No validation is performed; out-of-range coordinates (e.g. latitudes at or beyond the
    /// poles) produce whatever the IEEE arithmetic produces.
    pub fn project(&self, position: Position) -> Pos2 {
        let projected = project(position, self.zoom);
        let center_projected = project(self.center, self.zoom);

        // Both projected points are large, so the subtraction must happen in f64 before
        // narrowing to screen coordinates.
        self.clip_rect.center()
            + (projected - center_projected).to_vec2()
    }

    /// Get geographical coordinates of the given viewport pixel.
    pub fn unproject(&self, position: Pos2) -> Position {
        let center_projected = project(self.center, self.zoom);
        let clip_center = self.clip_rect.center();
        let x = center_projected.x() + (position.x as f64) - (clip_center.x as f64);
        let y = center_projected.y() + (position.y as f64) - (clip_center.y as f64);

        unproject(Pixels::new(x, y), self.zoom)
    }

    /// What is the local scale of the map at the provided position and given the current zoom
    /// level?
    pub fn scale_pixel_per_meter(&self, position: Position) -> f32 {
        // return f32 for ergonomics, as the result is typically used for egui code
        calculate_pixels_per_meter(position.y(), self.zoom) as f32
    }

    /// The viewport this projector projects onto.
    pub fn clip_rect(&self) -> Rect {
        self.clip_rect
    }

    /// Zoom level this projector was constructed with.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub(crate) fn center(&self) -> Position {
        self.center
    }
}

fn calculate_pixels_per_meter(latitude: f64, zoom: f64) -> f64 {
    const EARTH_CIRCUMFERENCE: f64 = 40_075_016.686;

    let total_pixels = crate::mercator::total_pixels(zoom);
    let pixels_per_meter_equator = total_pixels / EARTH_CIRCUMFERENCE;
    let latitude_rad = latitude.abs().to_radians();
    pixels_per_meter_equator / latitude_rad.cos()
}
