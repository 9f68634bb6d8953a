//! Core graph data structures

mod edge;
mod filter;
mod node;
mod universe;

#[cfg(test)]
mod tests;

pub use edge::Edge;
pub use filter::{
    FilterStats, FilteredGraph, SignificanceFilter, DEFAULT_MIN_RECORDS, DEFAULT_MIN_VOLUME,
};
pub use node::{Category, Node, NodeId};
pub use universe::{RecordObservation, Universe};
