//! Payload of the tree endpoint.

use serde::Deserialize;

use super::{LineageEdge, StarterNode};

/// Nodes and edges around one starter, as returned by the API.
///
/// `truncated` marks a server-capped prefix of a larger graph. It is carried
/// through to the view but otherwise needs no special handling: a partial
/// tree is laid out like any other.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TreeResponse {
    pub nodes: Vec<StarterNode>,
    #[serde(default)]
    pub edges: Vec<LineageEdge>,
    #[serde(default)]
    pub truncated: bool,
}

impl TreeResponse {
    pub fn new(nodes: Vec<StarterNode>, edges: Vec<LineageEdge>) -> Self {
        Self {
            nodes,
            edges,
            truncated: false,
        }
    }
}
