//! Two-stage significance filter
//!
//! 1. Keep nodes with `record_count > min_records` OR `volume_total > min_volume`.
//! 2. Keep edges whose endpoints both passed stage 1.
//! 3. Drop stage-1 nodes that no surviving edge touches.
//!
//! The result has no isolated nodes. Metrics are never modified here.

use super::edge::Edge;
use super::node::{Node, NodeId};
use super::universe::Universe;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// Default minimum record count (exclusive)
pub const DEFAULT_MIN_RECORDS: u64 = 5;

/// Default minimum cumulative volume (exclusive)
pub const DEFAULT_MIN_VOLUME: i64 = 250_000;

/// Significance thresholds. Both comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignificanceFilter {
    /// A node passes when its record count exceeds this
    pub min_records: u64,
    /// A node passes when its cumulative volume exceeds this
    pub min_volume: i64,
}

impl Default for SignificanceFilter {
    fn default() -> Self {
        Self {
            min_records: DEFAULT_MIN_RECORDS,
            min_volume: DEFAULT_MIN_VOLUME,
        }
    }
}

/// Node and edge counts at each filter stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub nodes_total: usize,
    pub nodes_significant: usize,
    pub nodes_connected: usize,
    pub edges_total: usize,
    pub edges_surviving: usize,
}

/// The published subset of a universe
#[derive(Debug, Clone, Default)]
pub struct FilteredGraph {
    /// Surviving nodes, in first-seen order
    pub nodes: Vec<Node>,
    /// Surviving edges, in canonical order
    pub edges: Vec<Edge>,
    pub stats: FilterStats,
}

impl SignificanceFilter {
    pub fn new(min_records: u64, min_volume: i64) -> Self {
        Self {
            min_records,
            min_volume,
        }
    }

    /// Stage 1 test for a single node
    pub fn is_significant(&self, node: &Node) -> bool {
        node.record_count > self.min_records || node.volume_total > self.min_volume
    }

    /// Run all three stages over a finished universe
    pub fn apply(&self, universe: &Universe) -> FilteredGraph {
        let significant: Vec<&Node> = universe
            .nodes()
            .filter(|node| self.is_significant(node))
            .collect();
        let significant_ids: HashSet<&NodeId> = significant.iter().copied().map(|n| &n.id).collect();

        let edges: Vec<Edge> = universe
            .edges()
            .filter(|e| significant_ids.contains(&e.source) && significant_ids.contains(&e.target))
            .cloned()
            .collect();

        let connected: HashSet<&NodeId> = edges
            .iter()
            .flat_map(|e| [&e.source, &e.target])
            .collect();

        let nodes: Vec<Node> = significant
            .into_iter()
            .filter(|n| connected.contains(&n.id))
            .cloned()
            .collect();

        let stats = FilterStats {
            nodes_total: universe.node_count(),
            nodes_significant: significant_ids.len(),
            nodes_connected: nodes.len(),
            edges_total: universe.edge_count(),
            edges_surviving: edges.len(),
        };
        info!(
            nodes_total = stats.nodes_total,
            nodes_significant = stats.nodes_significant,
            nodes_connected = stats.nodes_connected,
            edges_surviving = stats.edges_surviving,
            "significance filter applied"
        );

        FilteredGraph {
            nodes,
            edges,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Category, RecordObservation};

    fn node(name: &str, records: u64, volume: i64) -> Node {
        let mut n = Node::new(name, Category::Primary);
        n.record_count = records;
        n.volume_total = volume;
        n
    }

    fn observation(primary: &[&str], secondary: &[&str], volume: i64) -> RecordObservation {
        RecordObservation {
            primary: primary.iter().map(|s| NodeId::from(*s)).collect(),
            secondary: secondary.iter().map(|s| NodeId::from(*s)).collect(),
            volume_estimate: volume,
            satisfaction: None,
        }
    }

    #[test]
    fn threshold_boundary_is_strict() {
        let filter = SignificanceFilter::new(5, 250_000);
        assert!(!filter.is_significant(&node("at-both", 5, 250_000)));
        assert!(filter.is_significant(&node("count+1", 6, 0)));
        assert!(filter.is_significant(&node("volume+1", 0, 250_001)));
    }

    #[test]
    fn edges_need_both_endpoints_significant() {
        let mut universe = Universe::new();
        universe.observe_record(&observation(&["Big"], &["Small"], 0));
        for _ in 0..3 {
            universe.observe_record(&observation(&["Big"], &["Other"], 0));
        }
        universe.observe_record(&observation(&["Other"], &[], 0));

        // Big: 4 records, Other: 4 records, Small: 1 record
        let graph = SignificanceFilter::new(2, 1_000).apply(&universe);

        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].source.as_str(), "Big");
        assert_eq!(graph.edges[0].target.as_str(), "Other");
        assert_eq!(graph.stats.edges_total, 2);
    }

    #[test]
    fn orphans_are_pruned() {
        let mut universe = Universe::new();
        // Loner is significant by volume but only connects to an insignificant node
        universe.observe_record(&observation(&["Loner"], &["Tiny"], 0));
        universe.observe_record(&observation(&["Loner"], &[], 1_000_000));
        universe.observe_record(&observation(&["A"], &["B"], 1_000_000));

        let graph = SignificanceFilter::new(5, 250_000).apply(&universe);
        let names: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();

        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(graph.stats.nodes_significant, 3);
        assert_eq!(graph.stats.nodes_connected, 2);
        for n in &graph.nodes {
            assert!(graph.edges.iter().any(|e| e.touches(&n.id)), "{} is orphaned", n.id);
        }
    }

    #[test]
    fn nothing_significant_yields_empty_graph() {
        let mut universe = Universe::new();
        universe.observe_record(&observation(&["A"], &["P"], 100));

        let graph = SignificanceFilter::new(5, 1_000_000).apply(&universe);
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
        assert_eq!(graph.stats.nodes_total, 2);
    }

    #[test]
    fn filter_does_not_modify_metrics() {
        let mut universe = Universe::new();
        universe.observe_record(&observation(&["A"], &["P"], 100));

        let graph = SignificanceFilter::new(0, 0).apply(&universe);
        for n in &graph.nodes {
            assert_eq!(Some(n), universe.get_node(&n.id));
        }
    }
}
