//! Run configuration
//!
//! Loaded from an optional YAML file; every field has a default so an empty
//! file (or no file) is valid:
//!
//! ```yaml
//! thresholds:
//!   min_records: 5
//!   min_volume: 250000
//! categories:
//!   primary: developer
//!   secondary: publisher
//! columns:
//!   primary: developers
//!   secondary: publishers
//!   owners: estimated_owners
//!   positive: positive
//!   negative: negative
//! shards: 1
//! ```

use crate::error::{UniverseError, UniverseResult};
use crate::graph::{Category, SignificanceFilter};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output labels for the two categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoryLabels {
    pub primary: String,
    pub secondary: String,
}

impl Default for CategoryLabels {
    fn default() -> Self {
        Self {
            primary: "developer".to_string(),
            secondary: "publisher".to_string(),
        }
    }
}

impl CategoryLabels {
    pub fn label(&self, category: Category) -> &str {
        match category {
            Category::Primary => &self.primary,
            Category::Secondary => &self.secondary,
        }
    }
}

/// Source column names bound to the record schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnMap {
    /// Category A list column
    pub primary: String,
    /// Category B list column
    pub secondary: String,
    /// Owners range column
    pub owners: String,
    /// Positive review count column
    pub positive: String,
    /// Negative review count column
    pub negative: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            primary: "developers".to_string(),
            secondary: "publishers".to_string(),
            owners: "estimated_owners".to_string(),
            positive: "positive".to_string(),
            negative: "negative".to_string(),
        }
    }
}

impl ColumnMap {
    /// All required columns, in the order they are checked
    pub fn required(&self) -> [&str; 5] {
        [
            self.primary.as_str(),
            self.secondary.as_str(),
            self.owners.as_str(),
            self.positive.as_str(),
            self.negative.as_str(),
        ]
    }
}

/// Everything a run needs besides its input and output paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UniverseConfig {
    pub thresholds: SignificanceFilter,
    pub categories: CategoryLabels,
    pub columns: ColumnMap,
    /// Number of contiguous record shards folded in parallel (1 = sequential)
    pub shards: usize,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            thresholds: SignificanceFilter::default(),
            categories: CategoryLabels::default(),
            columns: ColumnMap::default(),
            shards: 1,
        }
    }
}

impl UniverseConfig {
    /// Load and validate a YAML config file
    pub fn load(path: &Path) -> UniverseResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| UniverseError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text).map_err(|source| UniverseError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn validate(&self) -> UniverseResult<()> {
        let labels = &self.categories;
        if labels.primary.is_empty() || labels.secondary.is_empty() {
            return Err(UniverseError::InvalidConfig(
                "category labels must not be empty".to_string(),
            ));
        }
        if labels.primary == labels.secondary {
            return Err(UniverseError::InvalidConfig(format!(
                "category labels must differ, both are '{}'",
                labels.primary
            )));
        }
        if self.columns.required().iter().any(|c| c.is_empty()) {
            return Err(UniverseError::InvalidConfig(
                "column names must not be empty".to_string(),
            ));
        }
        if self.shards == 0 {
            return Err(UniverseError::InvalidConfig(
                "shards must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_is_default() {
        let config = UniverseConfig::from_yaml_str("").unwrap();
        assert_eq!(config, UniverseConfig::default());
        assert_eq!(config.thresholds.min_records, 5);
        assert_eq!(config.thresholds.min_volume, 250_000);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = UniverseConfig::from_yaml_str(
            "thresholds:\n  min_records: 10\ncategories:\n  primary: author\n",
        )
        .unwrap();
        assert_eq!(config.thresholds.min_records, 10);
        assert_eq!(config.thresholds.min_volume, 250_000);
        assert_eq!(config.categories.primary, "author");
        assert_eq!(config.categories.secondary, "publisher");
        assert_eq!(config.columns, ColumnMap::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(UniverseConfig::from_yaml_str("treshold: 3\n").is_err());
        assert!(UniverseConfig::from_yaml_str("thresholds:\n  min_record: 0\n").is_err());
        assert!(UniverseConfig::from_yaml_str("categories:\n  primry: author\n").is_err());
        assert!(UniverseConfig::from_yaml_str("columns:\n  owner: owners\n").is_err());
    }

    #[test]
    fn labels_must_differ() {
        let mut config = UniverseConfig::default();
        config.categories.secondary = "developer".to_string();
        assert!(matches!(config.validate(), Err(UniverseError::InvalidConfig(_))));
    }

    #[test]
    fn zero_shards_is_invalid() {
        let config = UniverseConfig {
            shards: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn label_lookup() {
        let labels = CategoryLabels::default();
        assert_eq!(labels.label(Category::Primary), "developer");
        assert_eq!(labels.label(Category::Secondary), "publisher");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "shards: 4\ncolumns:\n  owners: owners_range").unwrap();

        let config = UniverseConfig::load(file.path()).unwrap();
        assert_eq!(config.shards, 4);
        assert_eq!(config.columns.owners, "owners_range");
    }

    #[test]
    fn load_reports_path_on_bad_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "shards: [not, a, number]").unwrap();

        let err = UniverseConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, UniverseError::Config { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
