//! Universe: the run-scoped accumulator of nodes and co-occurrence edges
//!
//! Built by folding one [`RecordObservation`] per input record. Node metrics
//! and edges are accumulated independently from the same decoded lists.
//! Partial universes built over disjoint record shards combine with
//! [`Universe::merge`], which is associative and (apart from first-seen
//! category) commutative.

use super::edge::Edge;
use super::node::{Category, Node, NodeId};
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// One record, decoded and reduced to what the graph needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordObservation {
    /// Category A contributors, in listed order (duplicates kept)
    pub primary: Vec<NodeId>,
    /// Category B contributors, in listed order (duplicates kept)
    pub secondary: Vec<NodeId>,
    /// Volume estimate for this record (0 when unknown)
    pub volume_estimate: i64,
    /// Satisfaction ratio, absent when not computable
    pub satisfaction: Option<f64>,
}

/// Accumulated nodes and edges for one run.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    /// Nodes keyed by contributor name, in first-seen order
    nodes: IndexMap<NodeId, Node>,
    /// Canonical edges, deduplicated
    edges: BTreeSet<Edge>,
}

impl Universe {
    /// Create an empty universe
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one contributor's participation in one record.
    ///
    /// Creates the node on first sight with `category`; later observations
    /// under the other category do not change it.
    pub fn observe(
        &mut self,
        id: &NodeId,
        category: Category,
        volume_estimate: i64,
        satisfaction: Option<f64>,
    ) {
        self.nodes
            .entry(id.clone())
            .or_insert_with(|| Node::new(id.clone(), category))
            .observe(volume_estimate, satisfaction);
    }

    /// Canonical cross-category pairs implied by one record.
    ///
    /// Full cross product of the two lists, self-loops dropped, each pair
    /// canonicalized. Repeated names collapse in the returned set.
    pub fn record_edges(primary: &[NodeId], secondary: &[NodeId]) -> BTreeSet<Edge> {
        let mut pairs = BTreeSet::new();
        for a in primary {
            for b in secondary {
                if let Some(edge) = Edge::between(a, b) {
                    pairs.insert(edge);
                }
            }
        }
        pairs
    }

    /// Fold one record into the universe.
    ///
    /// The primary list is observed before the secondary list, which is what
    /// makes the first-seen category deterministic within a record.
    pub fn observe_record(&mut self, record: &RecordObservation) {
        for id in &record.primary {
            self.observe(id, Category::Primary, record.volume_estimate, record.satisfaction);
        }
        for id in &record.secondary {
            self.observe(id, Category::Secondary, record.volume_estimate, record.satisfaction);
        }
        self.edges
            .extend(Self::record_edges(&record.primary, &record.secondary));
    }

    /// Merge a universe built over a later shard of records into this one.
    ///
    /// Sums counts and volumes, concatenates samples, unions edges. Nodes
    /// already present keep their category.
    pub fn merge(mut self, other: Universe) -> Universe {
        for (id, node) in other.nodes {
            match self.nodes.get_mut(&id) {
                Some(existing) => existing.absorb(node),
                None => {
                    self.nodes.insert(id, node);
                }
            }
        }
        self.edges.extend(other.edges);
        self
    }

    /// Get a node by ID
    pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get all nodes, in first-seen order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all edges, in canonical order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Whether the canonical edge between `a` and `b` exists
    pub fn has_edge(&self, a: &NodeId, b: &NodeId) -> bool {
        Edge::between(a, b).is_some_and(|e| self.edges.contains(&e))
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
