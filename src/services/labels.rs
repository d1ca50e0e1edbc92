// src/services/labels.rs

//! Label table loading and per-document label resolution.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{LabelMarker, LabelsConfig};

/// Binary class per document base filename.
#[derive(Debug, Default, Clone)]
pub struct LabelTable {
    classes: HashMap<String, bool>,
}

impl LabelTable {
    /// Load a label table from a delimited file.
    pub fn load(path: impl AsRef<Path>, config: &LabelsConfig) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AppError::missing("label table", path));
        }
        let table = Self::from_reader(File::open(path)?, config)?;
        log::info!("Loaded {} labels from {}", table.len(), path.display());
        Ok(table)
    }

    /// Read a label table from any delimited source.
    ///
    /// The class cell is positive when it parses as the number 1; any other
    /// present value is negative. For repeated keys the first row wins.
    pub fn from_reader<R: Read>(reader: R, config: &LabelsConfig) -> Result<Self> {
        if !config.delimiter.is_ascii() {
            return Err(AppError::labels(format!(
                "delimiter {:?} is not a single-byte ASCII character",
                config.delimiter
            )));
        }

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(config.delimiter as u8)
            .has_headers(config.has_headers)
            .flexible(true)
            .from_reader(reader);

        let target = match &config.target_column {
            Some(name) if !config.has_headers => {
                return Err(AppError::labels(format!(
                    "target column '{name}' given but the table has no header row"
                )));
            }
            Some(name) => rdr
                .headers()?
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| AppError::labels(format!("no column named '{name}'")))?,
            None => config.key_column + 1,
        };

        let mut classes = HashMap::new();
        let mut duplicates = 0usize;

        for row in rdr.records() {
            let row = row?;
            let Some(key) = row.get(config.key_column).map(str::trim) else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            let positive = row.get(target).is_some_and(is_positive);

            match classes.entry(key.to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(positive);
                }
                Entry::Occupied(_) => duplicates += 1,
            }
        }

        if duplicates > 0 {
            log::warn!("Label table has {duplicates} repeated keys; kept the first of each");
        }

        Ok(Self { classes })
    }

    /// Resolve the label marker for a document id.
    ///
    /// Absent ids are unlabeled, which is the common case for large corpora.
    pub fn resolve(&self, document_id: &str) -> LabelMarker {
        match self.classes.get(document_id) {
            Some(true) => LabelMarker::Positive,
            Some(false) => LabelMarker::Negative,
            None => LabelMarker::Unlabeled,
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl FromIterator<(String, bool)> for LabelTable {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self {
            classes: iter.into_iter().collect(),
        }
    }
}

fn is_positive(cell: &str) -> bool {
    cell.trim().parse::<f64>().is_ok_and(|v| v == 1.0)
}
