//! Serialization tests with fixtures for persisted intermediate state

use serde_json::{json, Value};

/// Fixture: a node as it is dumped for debugging a run
fn node_fixture() -> Value {
    json!({
        "id": "Valve",
        "category": "primary",
        "record_count": 3,
        "volume_total": 20150000,
        "satisfaction_samples": [97.5, 88.25]
    })
}

/// Fixture: a canonical edge
fn edge_fixture() -> Value {
    json!({
        "source": "Hidden Path Entertainment",
        "target": "Valve"
    })
}

#[cfg(test)]
mod serialization_tests {
    use super::*;
    use crate::graph::{Category, Edge, Node, NodeId};

    #[test]
    fn category_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Primary).unwrap(), "\"primary\"");
        assert_eq!(serde_json::to_string(&Category::Secondary).unwrap(), "\"secondary\"");
    }

    #[test]
    fn can_deserialize_node_fixture() {
        let result: Result<Node, _> = serde_json::from_value(node_fixture());
        assert!(result.is_ok(), "Failed to deserialize node fixture: {:?}", result.err());

        let node = result.unwrap();
        assert_eq!(node.id.as_str(), "Valve");
        assert_eq!(node.category, Category::Primary);
        assert_eq!(node.record_count, 3);
        assert_eq!(node.volume_total, 20_150_000);
        assert_eq!(node.avg_satisfaction(), 92.88);
    }

    #[test]
    fn can_deserialize_edge_fixture() {
        let edge: Edge = serde_json::from_value(edge_fixture()).unwrap();
        let rebuilt = Edge::between(&NodeId::from("Valve"), &NodeId::from("Hidden Path Entertainment"));
        assert_eq!(Some(edge), rebuilt);
    }

    #[test]
    fn node_roundtrip() {
        let mut node = Node::new("Devolver Digital", Category::Secondary);
        node.observe(35_000, Some(71.0));
        node.observe(0, None);

        let json = serde_json::to_string(&node).unwrap();
        let node2: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(node, node2);
    }

    #[test]
    fn serialized_edge_has_fixture_structure() {
        let edge = Edge::between(&NodeId::from("Valve"), &NodeId::from("Hidden Path Entertainment"))
            .unwrap();
        assert_eq!(serde_json::to_value(&edge).unwrap(), edge_fixture());
    }
}
