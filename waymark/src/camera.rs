use egui::Vec2;

use crate::{
    mercator::{project, unproject},
    position::{Pixels, PixelsExt as _},
    zoom::{InvalidZoom, Zoom},
    Position,
};

/// State of the map viewport which must persist between frames: where the map is centered and
/// how far it is zoomed in. Typically kept in the application state, while the [`crate::Map`]
/// widget itself is constructed and consumed on each frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct Camera {
    center: Position,
    zoom: Zoom,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: Position::new(0., 0.),
            zoom: Zoom::default(),
        }
    }
}

impl Camera {
    /// Camera centered at the given position.
    pub fn new(center: Position, zoom: f64) -> Result<Self, InvalidZoom> {
        Ok(Self {
            center,
            zoom: Zoom::try_from(zoom)?,
        })
    }

    /// Position at the center of the viewport.
    pub fn center(&self) -> Position {
        self.center
    }

    /// Center exactly at the given position.
    pub fn center_at(&mut self, position: Position) {
        self.center = position;
    }

    /// Returns the current zoom level.
    pub fn zoom(&self) -> f64 {
        self.zoom.into()
    }

    /// Set exact zoom level.
    pub fn set_zoom(&mut self, zoom: f64) -> Result<(), InvalidZoom> {
        self.zoom = Zoom::try_from(zoom)?;
        Ok(())
    }

    /// Try to zoom in, returning `Err(InvalidZoom)` if already at maximum.
    pub fn zoom_in(&mut self) -> Result<(), InvalidZoom> {
        self.zoom.zoom_in()
    }

    /// Try to zoom out, returning `Err(InvalidZoom)` if already at minimum.
    pub fn zoom_out(&mut self) -> Result<(), InvalidZoom> {
        self.zoom.zoom_out()
    }

    /// Zoom using a relative value, doing nothing when the limit is reached.
    pub fn zoom_by(&mut self, value: f64) {
        self.zoom.zoom_by(value);
    }

    /// Move the visible map content by the given number of screen pixels, i.e. the direction
    /// a drag gesture moves the map. The center moves the opposite way in projected space.
    pub fn pan_pixels(&mut self, delta: Vec2) {
        let zoom = self.zoom();
        self.center = unproject(project(self.center, zoom) - Pixels::from_vec2(delta), zoom);
    }
}
