//! Undirected co-occurrence edge with a canonical endpoint order

use super::node::NodeId;
use serde::{Deserialize, Serialize};

/// An unordered pair of distinct contributors.
///
/// Stored canonically: `source <= target` under the lexicographic order of
/// the names, so `{a, b}` and `{b, a}` are the same value. No weight is
/// tracked; the edge exists or it doesn't.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    /// Build the canonical edge between two names.
    ///
    /// Returns `None` for a self-loop (textually identical names).
    pub fn between(a: &NodeId, b: &NodeId) -> Option<Self> {
        if a == b {
            return None;
        }
        let (source, target) = if a.as_str() <= b.as_str() {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        };
        Some(Self { source, target })
    }

    /// Whether `id` is one of the two endpoints
    pub fn touches(&self, id: &NodeId) -> bool {
        self.source == *id || self.target == *id
    }
}
