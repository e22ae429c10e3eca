#![doc = include_str!("../README.md")]
#![deny(clippy::unwrap_used, rustdoc::broken_intra_doc_links)]

mod camera;
mod footprint;
mod hover;
mod layer;
mod location;
mod map;
mod mercator;
mod position;
mod projector;
mod scene;
pub mod shapes;
mod zoom;

pub use camera::Camera;
pub use footprint::Footprint;
pub use layer::{
    Handler, LabelLayer, LayerOptions, LayerStats, MarkerLayer, PatchLayer, PointerEvent,
    PolylineLayer, ShapeLayer,
};
pub use location::Location;
pub use map::{Layer, Map};
pub use position::{lat_lon, lon_lat, Position};
pub use projector::Projector;
pub use shapes::{Label, LabelStyle, Marker, MarkerIcon, MarkerStyle, Patch, Polyline};
pub use zoom::InvalidZoom;
