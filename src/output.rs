//! Graph serializer: the published `{nodes, links}` document
//!
//! Field names follow what the downstream renderer reads: `type`,
//! `game_count`, `total_owners`, `avg_review_score`, and `links` for the
//! edge list.

use crate::config::CategoryLabels;
use crate::error::{UniverseError, UniverseResult};
use crate::graph::{Edge, FilteredGraph, Node};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One published node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub category: String,
    #[serde(rename = "game_count")]
    pub record_count: u64,
    #[serde(rename = "total_owners")]
    pub volume_total: i64,
    #[serde(rename = "avg_review_score")]
    pub avg_satisfaction: f64,
}

impl NodeRecord {
    fn from_node(node: &Node, labels: &CategoryLabels) -> Self {
        Self {
            id: node.id.to_string(),
            category: labels.label(node.category).to_string(),
            record_count: node.record_count,
            volume_total: node.volume_total,
            avg_satisfaction: node.avg_satisfaction(),
        }
    }
}

/// One published edge, endpoints in canonical order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub source: String,
    pub target: String,
}

impl From<&Edge> for LinkRecord {
    fn from(edge: &Edge) -> Self {
        Self {
            source: edge.source.to_string(),
            target: edge.target.to_string(),
        }
    }
}

/// The terminal artifact of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniverseDocument {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
}

impl UniverseDocument {
    pub fn from_graph(graph: &FilteredGraph, labels: &CategoryLabels) -> Self {
        Self {
            nodes: graph
                .nodes
                .iter()
                .map(|n| NodeRecord::from_node(n, labels))
                .collect(),
            links: graph.edges.iter().map(LinkRecord::from).collect(),
        }
    }

    /// Render as JSON indented by four spaces
    pub fn to_json_string(&self) -> UniverseResult<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| UniverseError::Serialize(serde::ser::Error::custom(e)))
    }

    /// Write the document, creating the parent directory if needed.
    ///
    /// Failures carry the target path; the document itself is untouched.
    pub fn write(&self, path: &Path) -> UniverseResult<()> {
        let json = self.to_json_string()?;
        let write_err = |source| UniverseError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, json).map_err(write_err)?;
        info!(
            path = %path.display(),
            nodes = self.nodes.len(),
            links = self.links.len(),
            "graph written"
        );
        Ok(())
    }
}
