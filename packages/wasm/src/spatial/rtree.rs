//! R-tree based spatial index using the rstar crate.
//!
//! Provides O(log n) hit testing over laid-out nodes: the nearest node
//! within a click radius.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// A laid-out node position tagged with its slot in the view's node list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePoint {
    /// Index into the owning view's node list.
    pub slot: usize,
    pub x: f32,
    pub y: f32,
}

impl NodePoint {
    pub fn new(slot: usize, x: f32, y: f32) -> Self {
        Self { slot, x, y }
    }
}

impl RTreeObject for NodePoint {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for NodePoint {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        (self.x - point[0]).abs() < f32::EPSILON && (self.y - point[1]).abs() < f32::EPSILON
    }
}

/// Spatial index over laid-out nodes.
///
/// Built once per layout with a bulk load; a new layout means a new index.
#[derive(Debug, Clone, Default)]
pub struct SpatialIndex {
    tree: RTree<NodePoint>,
}

impl SpatialIndex {
    /// Bulk-load an index from node points.
    pub fn build(points: Vec<NodePoint>) -> Self {
        Self {
            tree: RTree::bulk_load(points),
        }
    }

    /// Number of indexed nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Slot of the nearest node within `max_distance` of a point.
    pub fn nearest_within(&self, x: f32, y: f32, max_distance: f32) -> Option<usize> {
        let max_distance_sq = max_distance * max_distance;
        self.tree
            .nearest_neighbor(&[x, y])
            .filter(|point| point.distance_2(&[x, y]) <= max_distance_sq)
            .map(|point| point.slot)
    }
}
