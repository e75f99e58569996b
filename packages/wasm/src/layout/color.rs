//! Positional palette colors.
//!
//! The k-th starter of the input list gets palette entry `k mod 12`. Colors
//! depend only on list position, never on tree shape, so re-rooting or
//! re-laying-out the same starters keeps every color.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::StarterNode;

/// Fill and stroke pair for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeColor {
    pub fill: &'static str,
    pub stroke: &'static str,
}

impl NodeColor {
    const fn new(fill: &'static str, stroke: &'static str) -> Self {
        Self { fill, stroke }
    }
}

/// Lineage palette, cycled by input position.
pub const PALETTE: [NodeColor; 12] = [
    NodeColor::new("#f59e0b", "#d97706"), // amber
    NodeColor::new("#10b981", "#059669"), // emerald
    NodeColor::new("#8b5cf6", "#7c3aed"), // violet
    NodeColor::new("#ec4899", "#db2777"), // pink
    NodeColor::new("#06b6d4", "#0891b2"), // cyan
    NodeColor::new("#f97316", "#ea580c"), // orange
    NodeColor::new("#84cc16", "#65a30d"), // lime
    NodeColor::new("#6366f1", "#4f46e5"), // indigo
    NodeColor::new("#14b8a6", "#0d9488"), // teal
    NodeColor::new("#ef4444", "#dc2626"), // red
    NodeColor::new("#a855f7", "#9333ea"), // purple
    NodeColor::new("#eab308", "#ca8a04"), // yellow
];

/// Palette entry for the given input position.
#[inline]
pub fn color_at(position: usize) -> NodeColor {
    PALETTE[position % PALETTE.len()]
}

/// Assign every starter its positional color, keyed by joined identifier.
///
/// With duplicate ids the later position wins, as in tree reconstruction.
pub fn assign_colors(nodes: &[StarterNode]) -> HashMap<String, NodeColor> {
    nodes
        .iter()
        .enumerate()
        .map(|(position, node)| (node.key(), color_at(position)))
        .collect()
}
