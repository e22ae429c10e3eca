//! Project the lat/lon coordinates into a 2D x/y using the Web Mercator.
//! <https://en.wikipedia.org/wiki/Web_Mercator_projection>

use crate::{
    lon_lat,
    position::{Pixels, Position},
};
use std::f64::consts::PI;

/// Size of the imaginary tile the world is made of. The exact value does not matter for this
/// crate, but using the OSM convention means zoom levels line up with what slippy maps show.
const TILE_SIZE: u32 = 256;

/// Zoom specifies how many pixels are in the whole map. For example, zoom 0 means that the whole
/// map is just one 256x256 tile, zoom 1 means that it is 2x2 tiles, and so on.
pub(crate) fn total_pixels(zoom: f64) -> f64 {
    2f64.powf(zoom) * (TILE_SIZE as f64)
}

/// Project the position into the Mercator projection and normalize it to 0-1 range.
fn mercator_normalized(position: Position) -> (f64, f64) {
    // Project into Mercator (cylindrical map projection).
    let x = position.x().to_radians();
    let y = position.y().to_radians().tan().asinh();

    // Scale both x and y to 0-1 range.
    let x = (1. + (x / PI)) / 2.;
    let y = (1. - (y / PI)) / 2.;

    (x, y)
}

/// Project geographical position onto a 2D plane using Mercator.
pub(crate) fn project(position: Position, zoom: f64) -> Pixels {
    let total_pixels = total_pixels(zoom);
    let (x, y) = mercator_normalized(position);
    Pixels::new(x * total_pixels, y * total_pixels)
}

/// Transforms a projected point back into a geographical position.
pub(crate) fn unproject(pixels: Pixels, zoom: f64) -> Position {
    let number_of_pixels = total_pixels(zoom);

    let lon = pixels.x();
    let lon = lon / number_of_pixels;
    let lon = (lon * 2. - 1.) * PI;
    let lon = lon.to_degrees();

    let lat = pixels.y();
    let lat = lat / number_of_pixels;
    let lat = (-lat * 2. + 1.) * PI;
    let lat = lat.sinh().atan().to_degrees();

    lon_lat(lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pixels_doubles_with_each_zoom_level() {
        assert_eq!(256., total_pixels(0.));
        assert_eq!(512., total_pixels(1.));
        assert_eq!(2. * total_pixels(15.), total_pixels(16.));
    }

    #[test]
    fn projects_the_center_of_the_world_to_the_center_of_the_bitmap() {
        let projected = project(lon_lat(0., 0.), 0.);
        approx::assert_relative_eq!(projected.x(), 128.);
        approx::assert_relative_eq!(projected.y(), 128.);
    }

    #[test]
    fn projects_north_west_up_and_left() {
        let center = project(lon_lat(0., 0.), 10.);
        let wroclaw = project(lon_lat(17.03664, 51.09916), 10.);
        assert!(wroclaw.x() > center.x());
        assert!(wroclaw.y() < center.y());
    }

    #[test]
    fn project_there_and_back() {
        let citadel = lon_lat(21.00027, 52.26470);
        let zoom = 16.;
        let calculated = unproject(project(citadel, zoom), zoom);

        approx::assert_relative_eq!(calculated.x(), citadel.x(), max_relative = 1e-6);
        approx::assert_relative_eq!(calculated.y(), citadel.y(), max_relative = 1e-6);
    }
}
