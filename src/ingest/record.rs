//! Record schema and the record table loader
//!
//! Input is a JSON array of objects or JSON Lines (one object per line).
//! Each object is bound once to a [`Record`] through the configured
//! [`ColumnMap`]. A column that is absent from a record aborts the load;
//! a column present with a null value is simply empty.

use super::decode::try_decode_list;
use super::metrics::{satisfaction_ratio, try_volume_estimate};
use crate::config::ColumnMap;
use crate::error::{UniverseError, UniverseResult};
use crate::graph::{NodeId, RecordObservation};
use serde_json::{Map, Value};
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One input record, bound to the fixed schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Category A list cell
    pub primary: Value,
    /// Category B list cell
    pub secondary: Value,
    /// Owners range cell
    pub owners: Value,
    /// Positive review count cell
    pub positive: Value,
    /// Negative review count cell
    pub negative: Value,
}

/// Count of silently recovered cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recoveries {
    /// List cells that did not decode and were treated as empty
    pub lists: usize,
    /// Owners cells that did not parse and contributed 0
    pub owners: usize,
}

impl AddAssign for Recoveries {
    fn add_assign(&mut self, other: Self) {
        self.lists += other.lists;
        self.owners += other.owners;
    }
}

impl Record {
    /// Bind a JSON object to the schema. `index` is the 1-based record number.
    pub fn from_object(
        object: &Map<String, Value>,
        columns: &ColumnMap,
        index: usize,
    ) -> UniverseResult<Self> {
        let cell = |column: &str| -> UniverseResult<Value> {
            object
                .get(column)
                .cloned()
                .ok_or_else(|| UniverseError::MissingColumn {
                    column: column.to_string(),
                    record: index,
                })
        };
        Ok(Self {
            primary: cell(columns.primary.as_str())?,
            secondary: cell(columns.secondary.as_str())?,
            owners: cell(columns.owners.as_str())?,
            positive: cell(columns.positive.as_str())?,
            negative: cell(columns.negative.as_str())?,
        })
    }

    /// Decode the lists and extract the metrics. Never fails.
    pub fn extract(&self) -> (RecordObservation, Recoveries) {
        let mut recoveries = Recoveries::default();

        let mut list = |cell: &Value| -> Vec<NodeId> {
            match try_decode_list(cell) {
                Ok(names) => names.into_iter().map(NodeId::from).collect(),
                Err(err) => {
                    debug!(error = %err, "list cell did not decode, treating as empty");
                    recoveries.lists += 1;
                    Vec::new()
                }
            }
        };
        let primary = list(&self.primary);
        let secondary = list(&self.secondary);

        let volume_estimate = match try_volume_estimate(&self.owners) {
            Ok(v) => v.unwrap_or(0),
            Err(err) => {
                debug!(error = %err, "owners range did not parse, contributing 0");
                recoveries.owners += 1;
                0
            }
        };

        let observation = RecordObservation {
            primary,
            secondary,
            volume_estimate,
            satisfaction: satisfaction_ratio(&self.positive, &self.negative),
        };
        (observation, recoveries)
    }
}

/// All records of one input, in input order
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    pub records: Vec<Record>,
}

impl RecordTable {
    /// Load a JSON or JSON Lines file
    pub fn load(path: &Path, columns: &ColumnMap) -> UniverseResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| UniverseError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&text, path, columns)?;
        info!(path = %path.display(), records = table.len(), "records loaded");
        Ok(table)
    }

    /// Parse input text. `path` is only used for error context.
    pub fn parse(text: &str, path: &Path, columns: &ColumnMap) -> UniverseResult<Self> {
        let trimmed = text.trim_start();
        let objects = if trimmed.starts_with('[') {
            parse_array(text, path)?
        } else {
            parse_lines(text, path)?
        };

        let records = objects
            .iter()
            .enumerate()
            .map(|(i, value)| match value {
                Value::Object(object) => Record::from_object(object, columns, i + 1),
                _ => Err(UniverseError::InvalidRecord {
                    record: i + 1,
                    reason: "expected a JSON object".to_string(),
                }),
            })
            .collect::<UniverseResult<Vec<_>>>()?;

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for RecordTable {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

fn parse_error(path: &Path, source: serde_json::Error) -> UniverseError {
    UniverseError::Parse {
        path: PathBuf::from(path),
        line: source.line(),
        source,
    }
}

/// A whole-document array
fn parse_array(text: &str, path: &Path) -> UniverseResult<Vec<Value>> {
    serde_json::from_str(text).map_err(|e| parse_error(path, e))
}

/// One value per non-blank line
fn parse_lines(text: &str, path: &Path) -> UniverseResult<Vec<Value>> {
    let mut values = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(|source| UniverseError::Parse {
            path: PathBuf::from(path),
            line: i + 1,
            source,
        })?;
        values.push(value);
    }
    Ok(values)
}
