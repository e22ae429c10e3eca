use egui::{Pos2, Rect, Vec2};
use rstar::{RTree, RTreeObject, AABB};

use crate::{shapes::Placement, Position, Projector};

/// Camera and dataset state a [`Scene`] was derived from. Two equal stamps guarantee the scene
/// would come out identical, so it can be reused instead of rebuilt.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Stamp {
    /// Dataset revision, bumped by the layer on every reconfiguration.
    pub revision: u64,
    pub zoom: f64,
    pub clip_rect: Rect,
    pub center: Position,
}

impl Stamp {
    pub fn new(revision: u64, projector: &Projector) -> Self {
        Self {
            revision,
            zoom: projector.zoom(),
            clip_rect: projector.clip_rect(),
            center: projector.center(),
        }
    }

    /// Whether a scene built with `self` is a plain translation of what a build with `other`
    /// would produce: same data, same zoom, same viewport size, only the center moved.
    pub fn translatable_to(&self, other: &Self) -> bool {
        self.revision == other.revision
            && self.zoom == other.zoom
            && self.clip_rect.size() == other.clip_rect.size()
    }
}

struct IndexedBounds {
    index: usize,
    envelope: AABB<[f32; 2]>,
}

impl RTreeObject for IndexedBounds {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Screen-space geometry of a whole layer: one [`Placement`] per shape, spatially indexed for
/// hit lookups, together with the [`Stamp`] it was derived from.
pub(crate) struct Scene {
    placements: Vec<Placement>,
    tree: RTree<IndexedBounds>,
    stamp: Stamp,
}

impl Scene {
    pub fn build(placements: Vec<Placement>, stamp: Stamp) -> Self {
        let tree = RTree::bulk_load(
            placements
                .iter()
                .enumerate()
                .filter(|(_, placement)| placement.footprint.bounds().is_positive())
                .map(|(index, placement)| {
                    let bounds = placement.footprint.bounds();
                    IndexedBounds {
                        index,
                        envelope: AABB::from_corners(
                            [bounds.min.x, bounds.min.y],
                            [bounds.max.x, bounds.max.y],
                        ),
                    }
                })
                .collect(),
        );

        Self {
            placements,
            tree,
            stamp,
        }
    }

    pub fn stamp(&self) -> &Stamp {
        &self.stamp
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// By how many pixels the scene needs to be shifted to be correct under the given
    /// projector. Zero when the camera has not moved since the scene was built.
    pub fn offset(&self, projector: &Projector) -> Vec2 {
        // At build time the stamp's center projected exactly onto the middle of the viewport,
        // so its position under the current projector is the accumulated pan delta.
        projector.project(self.stamp.center) - self.stamp.clip_rect.center()
    }

    /// Indices of shapes whose footprint contains `pos`, topmost (highest index) first.
    /// `pos` is expected in the scene's own coordinates, i.e. with any pan offset already
    /// subtracted by the caller.
    pub fn query(&self, pos: Pos2, tolerance: f32) -> Vec<usize> {
        let envelope = AABB::from_corners(
            [pos.x - tolerance, pos.y - tolerance],
            [pos.x + tolerance, pos.y + tolerance],
        );

        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| self.placements[entry.index].footprint.hit(pos, tolerance))
            .map(|entry| entry.index)
            .collect();

        // Later shapes are drawn on top, so they are matched first.
        hits.sort_unstable_by(|a, b| b.cmp(a));
        hits
    }
}
