//! Render-ready family tree.
//!
//! [`FamilyTreeView::build`] runs the whole pipeline for one API response:
//! positional colors, tree reconstruction, level layout, then joins the
//! results with starter data, focal styling, edge paths and a viewport.
//! The view owns its output; a new response or focal starter means a new
//! view.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{
    LevelLayout, LevelLayoutConfig, NodeColor, NodeStyle, NodeStyleConfig, Point, TreeLayout,
    Viewport, ViewportConfig, assign_colors, edge_path,
};
use crate::model::{GeoPoint, StarterType, TreeResponse};
use crate::spatial::{NodePoint, SpatialIndex};
use crate::tree::LineageTree;

/// Full configuration of the family tree pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FamilyTreeConfig {
    pub layout: LevelLayoutConfig,
    pub viewport: ViewportConfig,
    pub style: NodeStyleConfig,
}

/// A positioned starter with everything needed to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    /// Joined identifier key; also the navigation target.
    pub id: String,
    pub words: Vec<String>,
    pub label: String,
    pub name: Option<String>,
    pub starter_type: StarterType,
    pub type_label: String,
    pub location: GeoPoint,
    pub depth: u32,
    pub x: f32,
    pub y: f32,
    /// Positional palette color.
    pub color: NodeColor,
    pub is_focal: bool,
    pub style: NodeStyle,
}

impl LayoutNode {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A parent → child connection with endpoint positions and path data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEdge {
    pub from: String,
    pub to: String,
    pub source: Point,
    pub target: Point,
    /// SVG path data for the connecting curve.
    pub path: String,
}

/// The laid-out family tree of one API response.
#[derive(Debug, Clone)]
pub struct FamilyTreeView {
    nodes: Vec<LayoutNode>,
    edges: Vec<LayoutEdge>,
    colors: HashMap<String, NodeColor>,
    level_sizes: Vec<usize>,
    viewport: Viewport,
    truncated: bool,
    spatial: SpatialIndex,
}

impl FamilyTreeView {
    /// Lay out a tree response.
    ///
    /// `focal` names the starter being viewed; when absent, starters flagged
    /// `is_target` by the API are focal. Fails only on invalid spacing.
    pub fn build(
        response: &TreeResponse,
        focal: Option<&str>,
        config: &FamilyTreeConfig,
    ) -> Result<Self> {
        let engine = LevelLayout::new(config.layout)?;

        let colors = assign_colors(&response.nodes);
        let tree = LineageTree::reconstruct(&response.nodes, &response.edges);
        let layout = engine.compute(&tree)?;

        Ok(Self::compose(&tree, layout, colors, focal, response.truncated, config))
    }

    fn compose(
        tree: &LineageTree,
        layout: TreeLayout,
        colors: HashMap<String, NodeColor>,
        focal: Option<&str>,
        truncated: bool,
        config: &FamilyTreeConfig,
    ) -> Self {
        let nodes: Vec<LayoutNode> = layout
            .nodes
            .iter()
            .filter_map(|placed| {
                let starter = tree.node(placed.index)?;
                let is_focal = match focal {
                    Some(focal) => placed.key == focal,
                    None => starter.is_target,
                };
                Some(LayoutNode {
                    id: placed.key.clone(),
                    words: starter.id.words().to_vec(),
                    label: starter.display_label(),
                    name: starter.name.clone(),
                    starter_type: starter.starter_type,
                    type_label: starter.type_label(),
                    location: starter.location,
                    depth: placed.depth,
                    x: placed.x,
                    y: placed.y,
                    // Both maps are keyed by `StarterNode::key` over the same node list.
                    color: colors[placed.key.as_str()],
                    is_focal,
                    style: config.style.style_for(is_focal),
                })
            })
            .collect();

        let edges: Vec<LayoutEdge> = layout
            .edges
            .iter()
            .map(|placed| LayoutEdge {
                from: placed.edge.from.clone(),
                to: placed.edge.to.clone(),
                source: placed.source,
                target: placed.target,
                path: edge_path(placed.source, placed.target),
            })
            .collect();

        let viewport = Viewport::fit(nodes.iter().map(LayoutNode::position), &config.viewport);
        let spatial = SpatialIndex::build(
            nodes
                .iter()
                .enumerate()
                .map(|(slot, node)| NodePoint::new(slot, node.x, node.y))
                .collect(),
        );

        Self {
            nodes,
            edges,
            colors,
            level_sizes: layout.level_sizes().to_vec(),
            viewport,
            truncated,
            spatial,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Laid-out nodes, root first, in breadth-first order.
    #[inline]
    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    #[inline]
    pub fn edges(&self) -> &[LayoutEdge] {
        &self.edges
    }

    /// Palette color of every input starter, laid out or not.
    #[inline]
    pub fn colors(&self) -> &HashMap<String, NodeColor> {
        &self.colors
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[inline]
    pub fn level_sizes(&self) -> &[usize] {
        &self.level_sizes
    }

    /// True when the API capped the tree; the layout is still complete for
    /// the starters it received.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Nothing to show (the response had no starters).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&LayoutNode> {
        self.nodes.first()
    }

    pub fn focal_node(&self) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.is_focal)
    }

    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Nearest node within `max_distance` of a point in layout coordinates.
    pub fn node_at(&self, x: f32, y: f32, max_distance: f32) -> Option<&LayoutNode> {
        self.spatial
            .nearest_within(x, y, max_distance)
            .and_then(|slot| self.nodes.get(slot))
    }

    /// Node positions interleaved as `[x0, y0, x1, y1, ...]`.
    pub fn positions(&self) -> Vec<f32> {
        let mut positions = Vec::with_capacity(self.nodes.len() * 2);
        for node in &self.nodes {
            positions.push(node.x);
            positions.push(node.y);
        }
        positions
    }
}
