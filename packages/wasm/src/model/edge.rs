//! Lineage edge type.
//!
//! An edge states that `from` is the immediate parent of `to`. Both ends
//! are joined identifier keys (see [`StarterId::key`](super::StarterId::key)).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Directed parent → child link between two starters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineageEdge {
    /// Key of the parent starter.
    pub from: String,
    /// Key of the child starter.
    pub to: String,
}

impl LineageEdge {
    /// Create a new edge from parent key to child key.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for LineageEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for LineageEdge {
    #[inline]
    fn from((from, to): (A, B)) -> Self {
        Self::new(from, to)
    }
}
