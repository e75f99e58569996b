//! Spatial indexing for O(log n) hit testing.
//!
//! This module provides an R-tree based spatial index so the renderer can
//! map a pointer position back to the starter under it.

mod rtree;

pub use rtree::{NodePoint, SpatialIndex};
