//! Breadth-first level layout.
//!
//! Every depth level is centered on x = 0 independently of the others:
//!
//! 1. **Depth census:** a breadth-first walk counts the nodes at each depth.
//! 2. **Placement:** a second breadth-first walk hands out a running index
//!    per depth and places node `i` of a level holding `count` nodes at
//!    `x = -(count - 1) * Sx / 2 + i * Sx`, `y = depth * Sy`.
//!
//! Siblings on a level are exactly `Sx` apart and a wide level never shifts
//! a narrow one. Both walks use a FIFO queue and a visited-set, so cyclic or
//! multi-parent input still terminates with every node placed once.

use std::collections::{HashMap, VecDeque};

use log::debug;
use petgraph::visit::VisitMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::LineageEdge;
use crate::tree::{LineageTree, NodeIndex};

/// Configuration for the level layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LevelLayoutConfig {
    /// Distance between neighbouring nodes on one level (Sx).
    pub horizontal_spacing: f32,
    /// Distance between consecutive levels (Sy).
    pub vertical_spacing: f32,
}

impl Default for LevelLayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 140.0,
            vertical_spacing: 100.0,
        }
    }
}

impl LevelLayoutConfig {
    /// Reject zero, negative and non-finite spacings.
    pub fn validate(&self) -> Result<()> {
        check_spacing("horizontal", self.horizontal_spacing)?;
        check_spacing("vertical", self.vertical_spacing)
    }
}

fn check_spacing(axis: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidSpacing { axis, value })
    }
}

/// A 2-D point in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A node with its computed position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    /// Arena index in the source tree.
    pub index: NodeIndex,
    /// Joined identifier key.
    pub key: String,
    /// Depth below the root (root = 0).
    pub depth: u32,
    /// Horizontal position, centered per level.
    pub x: f32,
    /// Vertical position, `depth * vertical_spacing`.
    pub y: f32,
}

impl PlacedNode {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A realized parent → child link with both endpoint positions.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEdge {
    pub parent: NodeIndex,
    pub child: NodeIndex,
    /// The link expressed as an input edge (parent key → child key).
    pub edge: LineageEdge,
    pub source: Point,
    pub target: Point,
}

/// Result of the level layout computation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeLayout {
    /// Placed nodes in breadth-first order (root first).
    pub nodes: Vec<PlacedNode>,
    /// One edge per placed non-root node, in discovery order.
    pub edges: Vec<PlacedEdge>,
    /// Number of nodes at each depth.
    level_sizes: Vec<usize>,
}

impl TreeLayout {
    /// True when nothing was laid out (empty input).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node count per depth, root level first.
    #[inline]
    pub fn level_sizes(&self) -> &[usize] {
        &self.level_sizes
    }

    /// Number of levels (0 for an empty layout).
    #[inline]
    pub fn depth_count(&self) -> usize {
        self.level_sizes.len()
    }
}

/// The level layout engine.
#[derive(Debug, Clone)]
pub struct LevelLayout {
    config: LevelLayoutConfig,
}

impl LevelLayout {
    /// Create a level layout, failing fast on invalid spacing.
    pub fn new(config: LevelLayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a level layout with default spacing.
    pub fn with_defaults() -> Self {
        Self {
            config: LevelLayoutConfig::default(),
        }
    }

    /// Lay out the tree from its selected root.
    ///
    /// A tree without a root (empty input) yields an empty layout.
    pub fn compute(&self, tree: &LineageTree) -> Result<TreeLayout> {
        match tree.root() {
            Some(root) => self.compute_from(tree, root),
            None => Ok(TreeLayout::default()),
        }
    }

    /// Lay out the part of the tree reachable from `root`.
    pub fn compute_from(&self, tree: &LineageTree, root: NodeIndex) -> Result<TreeLayout> {
        if !tree.contains(root) {
            return Err(Error::RootNotInTree {
                index: root.index(),
            });
        }

        let level_sizes = Self::depth_census(tree, root);
        let layout = self.place(tree, root, level_sizes);

        debug!(
            "laid out {} of {} starter(s) over {} level(s) with {} edge(s)",
            layout.nodes.len(),
            tree.len(),
            layout.depth_count(),
            layout.edges.len()
        );
        Ok(layout)
    }

    /// First pass: count nodes per depth.
    fn depth_census(tree: &LineageTree, root: NodeIndex) -> Vec<usize> {
        let mut level_sizes: Vec<usize> = Vec::new();
        breadth_first(tree, root, |_, depth, _| {
            let depth = depth as usize;
            if level_sizes.len() <= depth {
                level_sizes.resize(depth + 1, 0);
            }
            level_sizes[depth] += 1;
        });
        level_sizes
    }

    /// Second pass: assign centered positions and collect edges.
    fn place(&self, tree: &LineageTree, root: NodeIndex, level_sizes: Vec<usize>) -> TreeLayout {
        let spacing_x = self.config.horizontal_spacing;
        let spacing_y = self.config.vertical_spacing;

        let total: usize = level_sizes.iter().sum();
        let mut nodes: Vec<PlacedNode> = Vec::with_capacity(total);
        let mut edges: Vec<PlacedEdge> = Vec::with_capacity(total.saturating_sub(1));
        let mut slot_of: HashMap<NodeIndex, usize> = HashMap::with_capacity(total);
        let mut next_in_level: Vec<usize> = vec![0; level_sizes.len()];

        breadth_first(tree, root, |index, depth, parent| {
            let level = depth as usize;
            let count = level_sizes[level];
            let i = next_in_level[level];
            next_in_level[level] += 1;

            let total_width = (count - 1) as f32 * spacing_x;
            let start_x = -total_width / 2.0;
            let x = start_x + i as f32 * spacing_x;
            let y = depth as f32 * spacing_y;

            let key = tree.node(index).map(|n| n.key()).unwrap_or_default();

            // Parents are always dequeued, and so placed, before their children.
            if let Some(parent_slot) = parent.and_then(|p| slot_of.get(&p).copied()) {
                let parent_node: &PlacedNode = &nodes[parent_slot];
                edges.push(PlacedEdge {
                    parent: parent_node.index,
                    child: index,
                    edge: LineageEdge::new(parent_node.key.clone(), key.clone()),
                    source: parent_node.position(),
                    target: Point::new(x, y),
                });
            }

            slot_of.insert(index, nodes.len());
            nodes.push(PlacedNode {
                index,
                key,
                depth,
                x,
                y,
            });
        });

        TreeLayout {
            nodes,
            edges,
            level_sizes,
        }
    }
}

/// Walk the tree breadth-first from `root`, visiting each node once.
///
/// The callback receives the node, its depth and the parent it was
/// discovered from. Links to already-visited nodes are not followed.
fn breadth_first<F>(tree: &LineageTree, root: NodeIndex, mut visit: F)
where
    F: FnMut(NodeIndex, u32, Option<NodeIndex>),
{
    let mut visited = tree.visit_map();
    let mut queue: VecDeque<(NodeIndex, u32, Option<NodeIndex>)> = VecDeque::new();

    visited.visit(root);
    queue.push_back((root, 0, None));

    while let Some((index, depth, parent)) = queue.pop_front() {
        visit(index, depth, parent);
        for &child in tree.children(index) {
            if visited.visit(child) {
                queue.push_back((child, depth + 1, Some(index)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StarterNode;

    const SX: f32 = 140.0;
    const SY: f32 = 100.0;

    fn tree(keys: &[&str], pairs: &[(&str, &str)]) -> LineageTree {
        let nodes: Vec<StarterNode> = keys.iter().map(|k| StarterNode::new([*k])).collect();
        let edges: Vec<LineageEdge> = pairs.iter().map(|&(f, t)| LineageEdge::new(f, t)).collect();
        LineageTree::reconstruct(&nodes, &edges)
    }

    fn placed<'a>(layout: &'a TreeLayout, key: &str) -> &'a PlacedNode {
        layout
            .nodes
            .iter()
            .find(|n| n.key == key)
            .unwrap_or_else(|| panic!("{key} was not laid out"))
    }

    #[test]
    fn test_empty_tree() {
        let layout = LevelLayout::with_defaults().compute(&tree(&[], &[])).unwrap();
        assert!(layout.is_empty());
        assert!(layout.edges.is_empty());
        assert_eq!(layout.depth_count(), 0);
    }

    #[test]
    fn test_single_node() {
        let layout = LevelLayout::with_defaults().compute(&tree(&["a"], &[])).unwrap();
        assert_eq!(layout.nodes.len(), 1);
        assert_eq!(layout.nodes[0].position(), Point::new(0.0, 0.0));
        assert_eq!(layout.nodes[0].depth, 0);
        assert!(layout.edges.is_empty());
    }

    #[test]
    fn test_simple_tree() {
        let t = tree(&["a", "b", "c"], &[("a", "b"), ("a", "c")]);
        let layout = LevelLayout::with_defaults().compute(&t).unwrap();

        assert_eq!(layout.nodes.len(), 3);
        assert_eq!(placed(&layout, "a").position(), Point::new(0.0, 0.0));
        assert_eq!(placed(&layout, "b").position(), Point::new(-SX / 2.0, SY));
        assert_eq!(placed(&layout, "c").position(), Point::new(SX / 2.0, SY));

        assert_eq!(layout.edges.len(), 2);
        for edge in &layout.edges {
            assert_eq!(edge.source, Point::new(0.0, 0.0));
            assert_eq!(edge.edge.from, "a");
        }
        assert_eq!(layout.edges[0].edge.to, "b");
        assert_eq!(layout.edges[1].edge.to, "c");
        assert_eq!(layout.edges[1].target, Point::new(SX / 2.0, SY));
    }

    #[test]
    fn test_level_spacing_and_centering() {
        // r → a, b; a → a1, a2, a3; b → b1; a1 → x
        let t = tree(
            &["r", "a", "b", "a1", "a2", "a3", "b1", "x"],
            &[
                ("r", "a"),
                ("r", "b"),
                ("a", "a1"),
                ("a", "a2"),
                ("a", "a3"),
                ("b", "b1"),
                ("a1", "x"),
            ],
        );
        let layout = LevelLayout::with_defaults().compute(&t).unwrap();
        assert_eq!(layout.level_sizes(), &[1, 2, 4, 1]);

        for depth in 0..layout.depth_count() as u32 {
            let mut xs: Vec<f32> = layout
                .nodes
                .iter()
                .filter(|n| n.depth == depth)
                .map(|n| n.x)
                .collect();
            xs.sort_by(|a, b| a.partial_cmp(b).unwrap());

            for pair in xs.windows(2) {
                assert!(
                    (pair[1] - pair[0] - SX).abs() < 1e-3,
                    "depth {depth}: neighbours {} and {} are not {SX} apart",
                    pair[0],
                    pair[1]
                );
            }
            let (min, max) = (xs[0], xs[xs.len() - 1]);
            assert_eq!(min, -max, "depth {depth} is not centered");

            for node in layout.nodes.iter().filter(|n| n.depth == depth) {
                assert_eq!(node.y, depth as f32 * SY);
            }
        }
    }

    #[test]
    fn test_narrow_level_not_shifted_by_wide_level() {
        // A single grandchild stays at x = 0 even under a wide middle level.
        let t = tree(
            &["r", "a", "b", "c", "d", "g"],
            &[("r", "a"), ("r", "b"), ("r", "c"), ("r", "d"), ("d", "g")],
        );
        let layout = LevelLayout::with_defaults().compute(&t).unwrap();
        assert_eq!(placed(&layout, "g").x, 0.0);
        assert_eq!(placed(&layout, "d").x, 1.5 * SX);
    }

    #[test]
    fn test_custom_spacing() {
        let layout = LevelLayout::new(LevelLayoutConfig {
            horizontal_spacing: 10.0,
            vertical_spacing: 25.0,
        })
        .unwrap();
        let result = layout
            .compute(&tree(&["a", "b", "c", "d"], &[("a", "b"), ("a", "c"), ("a", "d")]))
            .unwrap();

        let xs: Vec<f32> = result.nodes.iter().skip(1).map(|n| n.x).collect();
        assert_eq!(xs, vec![-10.0, 0.0, 10.0]);
        assert!(result.nodes.iter().skip(1).all(|n| n.y == 25.0));
    }

    #[test]
    fn test_invalid_spacing_is_rejected() {
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let horizontal = LevelLayout::new(LevelLayoutConfig {
                horizontal_spacing: bad,
                ..Default::default()
            });
            assert!(matches!(
                horizontal,
                Err(Error::InvalidSpacing { axis: "horizontal", .. })
            ));

            let vertical = LevelLayout::new(LevelLayoutConfig {
                vertical_spacing: bad,
                ..Default::default()
            });
            assert!(matches!(
                vertical,
                Err(Error::InvalidSpacing { axis: "vertical", .. })
            ));
        }
    }

    #[test]
    fn test_root_not_in_tree() {
        let t = tree(&["a", "b"], &[("a", "b")]);
        let result = LevelLayout::with_defaults().compute_from(&t, NodeIndex::new(42));
        assert_eq!(result, Err(Error::RootNotInTree { index: 42 }));
    }

    #[test]
    fn test_compute_from_explicit_root() {
        let t = tree(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let b = t.index_of("b").unwrap();
        let layout = LevelLayout::with_defaults().compute_from(&t, b).unwrap();

        assert_eq!(layout.nodes.len(), 2);
        assert_eq!(placed(&layout, "b").position(), Point::new(0.0, 0.0));
        assert_eq!(placed(&layout, "c").position(), Point::new(0.0, SY));
    }

    #[test]
    fn test_cycle_terminates() {
        let t = tree(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let layout = LevelLayout::with_defaults().compute(&t).unwrap();

        assert_eq!(layout.nodes.len(), 3);
        assert_eq!(layout.edges.len(), 2);
        assert_eq!(placed(&layout, "c").depth, 2);
    }

    #[test]
    fn test_multi_parent_node_placed_once() {
        // d is linked from both b and c; it appears once, under b.
        let t = tree(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        let layout = LevelLayout::with_defaults().compute(&t).unwrap();

        assert_eq!(layout.nodes.iter().filter(|n| n.key == "d").count(), 1);
        assert_eq!(layout.edges.len(), 3);
        let into_d: Vec<&PlacedEdge> = layout.edges.iter().filter(|e| e.edge.to == "d").collect();
        assert_eq!(into_d.len(), 1);
        assert_eq!(into_d[0].edge.from, "b");
    }

    #[test]
    fn test_disconnected_component_excluded() {
        let t = tree(&["a", "b", "x", "y"], &[("a", "b"), ("x", "y")]);
        let layout = LevelLayout::with_defaults().compute(&t).unwrap();

        let keys: Vec<&str> = layout.nodes.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(layout.edges.len(), 1);
    }

    #[test]
    fn test_edge_count_matches_realized_links() {
        let t = tree(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "ghost"), ("b", "c"), ("nobody", "d"), ("b", "d")],
        );
        let layout = LevelLayout::with_defaults().compute(&t).unwrap();

        assert_eq!(t.link_count(), 3);
        assert_eq!(layout.edges.len(), t.link_count());
    }

    #[test]
    fn test_layout_is_idempotent() {
        let t = tree(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("a", "c"), ("c", "d"), ("c", "e")],
        );
        let layout = LevelLayout::with_defaults();
        let first = layout.compute(&t).unwrap();
        let second = layout.compute(&t).unwrap();

        assert_eq!(first, second);
        for (a, b) in first.nodes.iter().zip(&second.nodes) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
        }
    }

    #[test]
    fn test_duplicate_edge_realized_once() {
        let t = tree(&["a", "b"], &[("a", "b"), ("a", "b")]);
        let layout = LevelLayout::with_defaults().compute(&t).unwrap();

        assert_eq!(t.link_count(), 1);
        assert_eq!(layout.edges.len(), t.link_count());
        assert_eq!(layout.level_sizes(), &[1, 1]);
        assert_eq!(placed(&layout, "b").x, 0.0);
    }

    #[test]
    fn test_self_loop_terminates() {
        let t = tree(&["a", "b"], &[("a", "a"), ("a", "b")]);
        let layout = LevelLayout::with_defaults().compute(&t).unwrap();

        assert_eq!(layout.nodes[0].key, "a");
        assert_eq!(layout.nodes.len(), 2);
        assert_eq!(layout.edges.len(), 1);
        assert_eq!(layout.edges[0].edge, LineageEdge::new("a", "b"));
    }
}
