//! Tree reconstruction.
//!
//! Turns the flat node and edge lists of an API response into a rooted
//! [`LineageTree`] that the layout stage walks from the root down.

mod lineage;

pub use lineage::LineageTree;
pub use petgraph::stable_graph::NodeIndex;
