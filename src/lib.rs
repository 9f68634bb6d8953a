//! Collabgraph: Contributor Co-occurrence Graph Builder
//!
//! Folds a table of records, each listing contributors in two categories
//! (e.g. developers and publishers), into a graph of contributors linked by
//! shared records, then prunes it to the significant and connected part.
//!
//! # Core Concepts
//!
//! - **Nodes**: One per distinct contributor name, carrying record count,
//!   cumulative volume and satisfaction samples
//! - **Edges**: Unordered cross-category pairs that shared at least one record
//! - **Significance filter**: Keep busy nodes, edges between them, and drop
//!   whatever is left isolated
//!
//! # Example
//!
//! ```
//! use collabgraph::{Record, RecordTable, UniverseConfig, UniversePipeline};
//! use serde_json::json;
//!
//! let table = RecordTable::from(vec![Record {
//!     primary: json!("['Valve']"),
//!     secondary: json!("['Hidden Path']"),
//!     owners: json!("100 - 200"),
//!     positive: json!(9),
//!     negative: json!(1),
//! }]);
//!
//! let mut config = UniverseConfig::default();
//! config.thresholds.min_records = 0;
//! let pipeline = UniversePipeline::new(config);
//! let output = pipeline.run(&table);
//! assert_eq!(output.graph.edges.len(), 1);
//! ```

pub mod config;
mod error;
mod graph;
pub mod ingest;
pub mod output;
pub mod pipeline;

pub use config::{CategoryLabels, ColumnMap, UniverseConfig};
pub use error::{UniverseError, UniverseResult};
pub use graph::{
    Category, Edge, FilterStats, FilteredGraph, Node, NodeId, RecordObservation,
    SignificanceFilter, Universe, DEFAULT_MIN_RECORDS, DEFAULT_MIN_VOLUME,
};
pub use ingest::{Record, RecordTable, Recoveries};
pub use output::{LinkRecord, NodeRecord, UniverseDocument};
pub use pipeline::{fold_records, RunOutput, RunStats, UniversePipeline};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
