use egui::Pos2;

use crate::{Position, Projector};

/// Where a shape is anchored: either a geographical position, projected anew every time the
/// camera changes, or a fixed position on the screen, which never goes through the projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Location {
    /// Longitude and latitude, following the map as it pans and zooms.
    Geo(Position),

    /// Viewport pixels, unaffected by the camera.
    Screen(Pos2),
}

impl Location {
    /// Resolve into viewport pixels. This is the only place deciding between the two variants;
    /// [`Location::Screen`] is returned verbatim and the projector is not consulted.
    pub fn resolve(&self, projector: &Projector) -> Pos2 {
        match self {
            Self::Geo(position) => projector.project(*position),
            Self::Screen(pos) => *pos,
        }
    }
}

impl From<Position> for Location {
    fn from(position: Position) -> Self {
        Self::Geo(position)
    }
}

impl From<Pos2> for Location {
    fn from(pos: Pos2) -> Self {
        Self::Screen(pos)
    }
}
