//! Layout algorithms for lineage trees.
//!
//! This module turns a reconstructed [`LineageTree`](crate::tree::LineageTree)
//! into positions, plus the color, style and viewport information a renderer
//! needs to draw it. Everything here is pure: no I/O and no mutation of the
//! inputs, so a changed tree or focal starter simply means computing again.

pub mod color;
pub mod level;
pub mod style;
pub mod viewport;

pub use color::{NodeColor, PALETTE, assign_colors};
pub use level::{LevelLayout, LevelLayoutConfig, PlacedEdge, PlacedNode, Point, TreeLayout};
pub use style::{NodeStyle, NodeStyleConfig, edge_path};
pub use viewport::{Viewport, ViewportConfig};
