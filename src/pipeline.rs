//! Build pipeline: records → universe → filtered graph → document
//!
//! Pipeline steps:
//! 1. Decode and extract each record (pure, per record)
//! 2. Fold observations into a [`Universe`], sequentially or over contiguous
//!    shards in parallel, merged left to right
//! 3. Apply the significance filter once over the finished universe
//! 4. Render the published document

use crate::config::UniverseConfig;
use crate::error::UniverseResult;
use crate::graph::{FilterStats, FilteredGraph, Universe};
use crate::ingest::{Record, RecordTable, Recoveries};
use crate::output::UniverseDocument;
use rayon::prelude::*;
use std::path::Path;
use tracing::{info, warn};

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub records: usize,
    pub recoveries: Recoveries,
    pub filter: FilterStats,
}

/// Everything a run produces
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    /// The unfiltered accumulation
    pub universe: Universe,
    /// The published subset
    pub graph: FilteredGraph,
    pub stats: RunStats,
}

/// Fold records in order into a fresh universe
pub fn fold_records(records: &[Record]) -> (Universe, Recoveries) {
    let mut universe = Universe::new();
    let mut recoveries = Recoveries::default();
    for record in records {
        let (observation, recovered) = record.extract();
        universe.observe_record(&observation);
        recoveries += recovered;
    }
    (universe, recoveries)
}

/// Runs the whole build for one configuration
#[derive(Debug, Clone, Default)]
pub struct UniversePipeline {
    config: UniverseConfig,
}

impl UniversePipeline {
    pub fn new(config: UniverseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UniverseConfig {
        &self.config
    }

    /// Fold all records, sharding when configured.
    ///
    /// Shards are contiguous and merged in input order, so the result
    /// (including first-seen categories) matches the sequential fold.
    pub fn fold(&self, records: &[Record]) -> (Universe, Recoveries) {
        let shards = self.config.shards.max(1);
        if shards == 1 || records.len() < 2 {
            return fold_records(records);
        }

        let chunk_size = records.len().div_ceil(shards);
        records
            .par_chunks(chunk_size)
            .map(fold_records)
            .reduce(
                || (Universe::new(), Recoveries::default()),
                |(left, mut left_rec), (right, right_rec)| {
                    left_rec += right_rec;
                    (left.merge(right), left_rec)
                },
            )
    }

    /// Build and filter the graph for a loaded table
    pub fn run(&self, table: &RecordTable) -> RunOutput {
        let (universe, recoveries) = self.fold(&table.records);
        info!(
            records = table.len(),
            nodes = universe.node_count(),
            edges = universe.edge_count(),
            "records folded"
        );
        if recoveries != Recoveries::default() {
            warn!(
                list_cells = recoveries.lists,
                owners_cells = recoveries.owners,
                "malformed cells were recovered as empty values"
            );
        }

        let graph = self.config.thresholds.apply(&universe);
        let stats = RunStats {
            records: table.len(),
            recoveries,
            filter: graph.stats,
        };
        RunOutput {
            universe,
            graph,
            stats,
        }
    }

    /// Render the published document for a run
    pub fn document(&self, output: &RunOutput) -> UniverseDocument {
        UniverseDocument::from_graph(&output.graph, &self.config.categories)
    }

    /// Load `input`, build, and write the document to `output`
    pub fn run_file(&self, input: &Path, output: &Path) -> UniverseResult<RunStats> {
        let table = RecordTable::load(input, &self.config.columns)?;
        let result = self.run(&table);
        self.document(&result).write(output)?;
        Ok(result.stats)
    }
}
