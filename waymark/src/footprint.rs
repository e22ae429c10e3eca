use egui::{Pos2, Rect, Vec2};

/// Screen-space area a shape occupies, used for hit-testing pointer events against the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Footprint {
    /// Circular area, the footprint of markers.
    Disc { center: Pos2, radius: f32 },

    /// Axis-aligned rectangle, the footprint of patches and labels.
    Rect(Rect),

    /// Polyline with a stroke width, hit anywhere within half the width of a segment.
    Strip { points: Vec<Pos2>, width: f32 },
}

impl Footprint {
    /// Bounding box, used as the envelope in the scene's spatial index.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Disc { center, radius } => {
                Rect::from_center_size(*center, Vec2::splat(radius * 2.))
            }
            Self::Rect(rect) => *rect,
            Self::Strip { points, width } => Rect::from_points(points).expand(width / 2.),
        }
    }

    /// Whether the given viewport pixel lies within the footprint, enlarged by `tolerance`
    /// pixels in every direction.
    pub fn hit(&self, pos: Pos2, tolerance: f32) -> bool {
        match self {
            Self::Disc { center, radius } => (pos - *center).length() <= radius + tolerance,
            Self::Rect(rect) => rect.expand(tolerance).contains(pos),
            Self::Strip { points, width } => {
                let reach = width / 2. + tolerance;
                match points.as_slice() {
                    [] => false,
                    [single] => (pos - *single).length() <= reach,
                    points => points
                        .windows(2)
                        .any(|segment| distance_to_segment(pos, segment[0], segment[1]) <= reach),
                }
            }
        }
    }

    pub(crate) fn translate(&mut self, offset: Vec2) {
        match self {
            Self::Disc { center, .. } => *center += offset,
            Self::Rect(rect) => *rect = rect.translate(offset),
            Self::Strip { points, .. } => {
                for point in points {
                    *point += offset;
                }
            }
        }
    }
}

/// Distance from `pos` to the segment between `a` and `b`.
fn distance_to_segment(pos: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_sq();
    if length_sq == 0. {
        return (pos - a).length();
    }
    let t = ((pos - a).dot(ab) / length_sq).clamp(0., 1.);
    (pos - (a + ab * t)).length()
}
