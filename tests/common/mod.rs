//! Common test utilities: synthetic record tables and file fixtures

#![allow(dead_code)]

use collabgraph::{Record, RecordTable};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Build one record from Python-style list literals
pub fn record(primary: &str, secondary: &str, owners: &str, positive: i64, negative: i64) -> Record {
    Record {
        primary: json!(primary),
        secondary: json!(secondary),
        owners: json!(owners),
        positive: json!(positive),
        negative: json!(negative),
    }
}

/// A small catalog with overlapping studios, a name shared across
/// categories, malformed cells and records without reviews.
pub fn catalog() -> Vec<Record> {
    vec![
        record("['Valve']", "['Valve']", "20000000 - 50000000", 950, 50),
        record("['Hidden Path', 'Valve']", "['Valve']", "5000000 - 10000000", 800, 200),
        record("['Studio A']", "['Devolver Digital']", "200000 - 500000", 90, 10),
        record("['Studio B']", "['Devolver Digital']", "100000 - 200000", 70, 30),
        record("['Studio A', 'Studio B']", "['Annapurna']", "50000 - 100000", 0, 0),
        record("['Devolver Digital']", "['Annapurna']", "20000 - 50000", 5, 5),
        record("['Solo Dev']", "[]", "0 - 20000", 3, 1),
        record("[broken", "['Annapurna']", "garbage", 1, 1),
        record("['Tiny']", "['Tinier']", "0 - 20000", 1, 0),
    ]
}

pub fn table(records: Vec<Record>) -> RecordTable {
    RecordTable::from(records)
}

/// Render a record as the JSON object form used on disk
pub fn to_json_object(record: &Record) -> Value {
    json!({
        "developers": record.primary,
        "publishers": record.secondary,
        "estimated_owners": record.owners,
        "positive": record.positive,
        "negative": record.negative,
    })
}

/// Write records as JSON Lines into `dir`
pub fn write_jsonl(dir: &Path, name: &str, records: &[Record]) -> PathBuf {
    let path = dir.join(name);
    let body: Vec<String> = records
        .iter()
        .map(|r| to_json_object(r).to_string())
        .collect();
    std::fs::write(&path, body.join("\n")).unwrap();
    path
}
