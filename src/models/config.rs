//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Corpus shards and label table locations
    #[serde(default)]
    pub input: InputConfig,

    /// Label table layout
    #[serde(default)]
    pub labels: LabelsConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Per-entry processing behavior
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.input.shards.is_empty() {
            return Err(AppError::validation("input.shards is empty"));
        }
        if self.input.labels.as_os_str().is_empty() {
            return Err(AppError::validation("input.labels is empty"));
        }
        if self.input.limit == Some(0) {
            return Err(AppError::validation("input.limit must be > 0"));
        }
        if !self.labels.delimiter.is_ascii() {
            return Err(AppError::validation("labels.delimiter must be ASCII"));
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(AppError::validation("output.path is empty"));
        }
        Ok(())
    }

    /// Check that every declared input exists on disk.
    ///
    /// Must run before the output file is truncated.
    pub fn check_inputs(&self) -> Result<()> {
        for shard in &self.input.shards {
            if !shard.is_file() {
                return Err(AppError::missing("shard", shard));
            }
        }
        if !self.input.labels.is_file() {
            return Err(AppError::missing("label table", &self.input.labels));
        }
        Ok(())
    }
}

/// Corpus input locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Shard archives, processed in this order
    #[serde(default = "defaults::shards")]
    pub shards: Vec<PathBuf>,

    /// Label table keyed by document base filename
    #[serde(default = "defaults::labels")]
    pub labels: PathBuf,

    /// Sort entry names within each shard before processing
    #[serde(default)]
    pub sort_entries: bool,

    /// Only visit the first N listed entries of each shard
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            shards: defaults::shards(),
            labels: defaults::labels(),
            sort_entries: false,
            limit: None,
        }
    }
}

/// Layout of the delimited label table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsConfig {
    /// Zero-based index of the filename column
    #[serde(default)]
    pub key_column: usize,

    /// Header name of the class column (defaults to the column after the key)
    #[serde(default)]
    pub target_column: Option<String>,

    /// Field delimiter
    #[serde(default = "defaults::delimiter")]
    pub delimiter: char,

    /// Whether the first row is a header
    #[serde(default = "defaults::has_headers")]
    pub has_headers: bool,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            key_column: 0,
            target_column: None,
            delimiter: defaults::delimiter(),
            has_headers: defaults::has_headers(),
        }
    }
}

/// Output serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Sparse namespace lines for an out-of-core linear learner
    #[default]
    Vw,
    /// One JSON object per document, for inspection
    Jsonl,
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::output_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: defaults::output_path(),
            format: OutputFormat::default(),
        }
    }
}

/// What to do when a single entry cannot be processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log, count and continue with the next entry
    #[default]
    Skip,
    /// Stop the run on the first faulty entry
    Abort,
}

/// Per-entry processing behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub on_document_error: ErrorPolicy,

    /// Reject entries that are not valid UTF-8 instead of decoding lossily
    #[serde(default)]
    pub strict_utf8: bool,
}

mod defaults {
    use std::path::PathBuf;

    pub fn shards() -> Vec<PathBuf> {
        (0..5)
            .map(|i| PathBuf::from(format!("data/zip/{i}.zip")))
            .collect()
    }
    pub fn labels() -> PathBuf {
        PathBuf::from("data/train_no_holdout.csv")
    }
    pub fn output_path() -> PathBuf {
        PathBuf::from("intermediate/vw.txt")
    }
    pub fn delimiter() -> char {
        ','
    }
    pub fn has_headers() -> bool {
        true
    }
}
