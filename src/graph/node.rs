//! Node representation: one contributor and its accumulated metrics

use serde::{Deserialize, Serialize};

/// Unique identifier for a node
///
/// The contributor name, used verbatim (case-sensitive). Serializes as a
/// plain string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a NodeId from a contributor name
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Which attribute list a contributor was first seen in
///
/// Closed set of two. The human-readable label (e.g. "developer") comes
/// from configuration, see [`crate::config::CategoryLabels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// First attribute list of a record (category A)
    Primary,
    /// Second attribute list of a record (category B)
    Secondary,
}

/// A contributor's accumulated profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Contributor name
    pub id: NodeId,
    /// Category fixed at creation (first seen wins)
    pub category: Category,
    /// Number of records this contributor participated in
    pub record_count: u64,
    /// Sum of per-record volume estimates
    pub volume_total: i64,
    /// Per-record satisfaction ratios in [0, 100], in observation order
    pub satisfaction_samples: Vec<f64>,
}

impl Node {
    /// Create an empty node
    pub fn new(id: impl Into<NodeId>, category: Category) -> Self {
        Self {
            id: id.into(),
            category,
            record_count: 0,
            volume_total: 0,
            satisfaction_samples: Vec::new(),
        }
    }

    /// Fold one record's contribution into this node.
    ///
    /// A missing ratio adds no sample, so it never pulls the average toward 0.
    pub fn observe(&mut self, volume_estimate: i64, satisfaction: Option<f64>) {
        self.record_count += 1;
        self.volume_total = self.volume_total.saturating_add(volume_estimate);
        if let Some(ratio) = satisfaction {
            self.satisfaction_samples.push(ratio);
        }
    }

    /// Merge another partial profile of the same contributor into this one.
    ///
    /// Keeps `self.category`; callers merge in input order so the earlier
    /// shard's category wins.
    pub fn absorb(&mut self, other: Node) {
        self.record_count += other.record_count;
        self.volume_total = self.volume_total.saturating_add(other.volume_total);
        self.satisfaction_samples.extend(other.satisfaction_samples);
    }

    /// Unweighted mean of the satisfaction samples, rounded to 2 decimals
    /// with ties to even (3.125 becomes 3.12). 0 when there are no samples.
    pub fn avg_satisfaction(&self) -> f64 {
        if self.satisfaction_samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.satisfaction_samples.iter().sum();
        let mean = sum / self.satisfaction_samples.len() as f64;
        (mean * 100.0).round_ties_even() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_empty() {
        let node = Node::new("Valve", Category::Primary);
        assert_eq!(node.id.as_str(), "Valve");
        assert_eq!(node.record_count, 0);
        assert_eq!(node.volume_total, 0);
        assert!(node.satisfaction_samples.is_empty());
        assert_eq!(node.avg_satisfaction(), 0.0);
    }

    #[test]
    fn observe_accumulates() {
        let mut node = Node::new("Valve", Category::Primary);
        node.observe(100, Some(80.0));
        node.observe(50, None);

        assert_eq!(node.record_count, 2);
        assert_eq!(node.volume_total, 150);
        assert_eq!(node.satisfaction_samples, vec![80.0]);
        assert_eq!(node.avg_satisfaction(), 80.0);
    }

    #[test]
    fn missing_ratio_does_not_pull_average_down() {
        let mut with_gap = Node::new("A", Category::Primary);
        with_gap.observe(0, Some(60.0));
        with_gap.observe(0, None);

        let mut without_gap = Node::new("A", Category::Primary);
        without_gap.observe(0, Some(60.0));

        assert_eq!(with_gap.avg_satisfaction(), without_gap.avg_satisfaction());
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        let mut node = Node::new("A", Category::Secondary);
        node.observe(0, Some(100.0));
        node.observe(0, Some(50.0));
        node.observe(0, Some(50.0));
        // 66.666...
        assert_eq!(node.avg_satisfaction(), 66.67);
    }

    #[test]
    fn average_rounds_exact_halves_to_even() {
        let mut node = Node::new("A", Category::Secondary);
        node.observe(0, Some(12.5));
        for _ in 0..3 {
            node.observe(0, Some(0.0));
        }
        // 3.125
        assert_eq!(node.avg_satisfaction(), 3.12);

        let mut odd = Node::new("B", Category::Secondary);
        odd.observe(0, Some(13.5));
        odd.observe(0, Some(0.0));
        // 6.75 is not a tie at 2 decimals
        assert_eq!(odd.avg_satisfaction(), 6.75);
    }

    #[test]
    fn absorb_keeps_own_category() {
        let mut left = Node::new("A", Category::Primary);
        left.observe(10, Some(40.0));
        let mut right = Node::new("A", Category::Secondary);
        right.observe(5, Some(60.0));

        left.absorb(right);
        assert_eq!(left.category, Category::Primary);
        assert_eq!(left.record_count, 2);
        assert_eq!(left.volume_total, 15);
        assert_eq!(left.satisfaction_samples, vec![40.0, 60.0]);
    }

    #[test]
    fn node_id_serializes_as_string() {
        let id = NodeId::from_string("Valve");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"Valve\"");
    }
}
