//! LineageTree - rooted tree reconstructed from a flat node/edge list.
//!
//! The tree stores starters in petgraph's StableGraph, which acts as the
//! arena: every node exclusively owns its outgoing child links, and the
//! parent back-reference is the most recent incoming link. Layout never
//! walks child → parent; the back-reference only drives root selection.

use std::collections::HashMap;

use log::{debug, warn};
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, NodeIndexable, VisitMap, Visitable};
use petgraph::{Directed, Direction};

use crate::model::{LineageEdge, StarterNode};

/// Position of a link in the input edge list. The latest incoming link names the parent.
type LinkOrder = usize;

/// A lineage tree rebuilt from API data.
///
/// Construction never fails. Unknown edge endpoints are dropped, repeated
/// edges are realized once, duplicate ids overwrite earlier records in place,
/// and a missing parentless node falls back to the first input node as root.
#[derive(Debug, Clone)]
pub struct LineageTree {
    /// Starter arena; edges are parent → child links weighted by input order.
    graph: StableGraph<StarterNode, LinkOrder, Directed>,

    /// Map from joined identifier key to arena index.
    key_to_index: HashMap<String, NodeIndex>,

    /// Child lists in input edge order, indexed by arena slot.
    children: Vec<Vec<NodeIndex>>,

    /// Selected root, None only for an empty input.
    root: Option<NodeIndex>,

    /// Edges skipped because an endpoint was not in the node list.
    dropped_edges: usize,
}

impl LineageTree {
    /// Reconstruct a tree from the starters and edges of one API response.
    pub fn reconstruct(nodes: &[StarterNode], edges: &[LineageEdge]) -> Self {
        let mut graph = StableGraph::with_capacity(nodes.len(), edges.len());
        let mut key_to_index: HashMap<String, NodeIndex> = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let key = node.key();
            if let Some(&index) = key_to_index.get(&key) {
                // Last write wins, but the first occurrence keeps its slot.
                debug!("duplicate starter {key}; keeping the later record");
                graph[index] = node.clone();
            } else {
                let index = graph.add_node(node.clone());
                key_to_index.insert(key, index);
            }
        }

        let mut children: Vec<Vec<NodeIndex>> = vec![Vec::new(); graph.node_bound()];
        let mut dropped_edges = 0;
        for (order, edge) in edges.iter().enumerate() {
            let parent = key_to_index.get(edge.from.as_str());
            let child = key_to_index.get(edge.to.as_str());
            match (parent, child) {
                (Some(&parent), Some(&child)) => {
                    if graph.find_edge(parent, child).is_some() {
                        debug!("skipping repeated edge {edge}");
                        continue;
                    }
                    graph.add_edge(parent, child, order);
                    children[parent.index()].push(child);
                }
                _ => {
                    debug!("dropping edge {edge}: endpoint not in node list");
                    dropped_edges += 1;
                }
            }
        }

        let mut tree = Self {
            graph,
            key_to_index,
            children,
            root: None,
            dropped_edges,
        };
        tree.root = tree.select_root();
        tree
    }

    /// Pick the first parentless node in input order, else the first node.
    fn select_root(&self) -> Option<NodeIndex> {
        let first = self.graph.node_indices().next()?;

        let parentless = self
            .graph
            .node_indices()
            .find(|&index| self.parent(index).is_none());

        match parentless {
            Some(root) => Some(root),
            None => {
                warn!(
                    "no parentless starter among {} node(s); using {} as root",
                    self.graph.node_count(),
                    self.graph[first].key()
                );
                Some(first)
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The selected root, or None when the input had no nodes.
    #[inline]
    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Number of distinct starters.
    #[inline]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// True when there is nothing to lay out.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of parent → child links realized from the input edges.
    #[inline]
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of input edges dropped for referencing unknown starters.
    #[inline]
    pub fn dropped_edge_count(&self) -> usize {
        self.dropped_edges
    }

    /// Whether `index` names a node of this tree.
    #[inline]
    pub fn contains(&self, index: NodeIndex) -> bool {
        self.graph.contains_node(index)
    }

    /// Get a starter by arena index.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> Option<&StarterNode> {
        self.graph.node_weight(index)
    }

    /// Look up the arena index of a joined identifier key.
    #[inline]
    pub fn index_of(&self, key: &str) -> Option<NodeIndex> {
        self.key_to_index.get(key).copied()
    }

    /// Iterate over all starters in input order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &StarterNode)> {
        self.graph
            .node_indices()
            .map(move |index| (index, &self.graph[index]))
    }

    /// Children of a node, in input edge order.
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self.children
            .get(index.index())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Parent of a node: the source of its most recent incoming link.
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(index, Direction::Incoming)
            .max_by_key(|edge| *edge.weight())
            .map(|edge| edge.source())
    }

    /// Fresh visited-set sized for this tree.
    pub(crate) fn visit_map(&self) -> impl VisitMap<NodeIndex> + use<> {
        self.graph.visit_map()
    }
}
