//! Output sinks for labeled feature records.
//!
//! The output file is opened once per run in truncate mode and written
//! strictly in traversal order. A line is only handed to the writer once it
//! is fully built.

pub mod jsonl;
pub mod vw;

use std::fs::{self, File};
use std::io::BufWriter;

use crate::error::Result;
use crate::models::{FeatureRecord, LabelMarker, OutputConfig, OutputFormat};

// Re-export for convenience
pub use jsonl::JsonlWriter;
pub use vw::{VwWriter, format_line};

/// Destination for labeled feature records.
pub trait FeatureSink {
    /// Append one record.
    fn write_record(&mut self, record: &FeatureRecord, label: LabelMarker) -> Result<()>;

    /// Push buffered output to the underlying writer.
    fn flush(&mut self) -> Result<()>;
}

/// Create (or truncate) the configured output file.
pub fn open_output(config: &OutputConfig) -> Result<Box<dyn FeatureSink>> {
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let out = BufWriter::new(File::create(&config.path)?);
    log::info!("Writing {:?} output to {}", config.format, config.path.display());

    Ok(match config.format {
        OutputFormat::Vw => Box::new(VwWriter::new(out)),
        OutputFormat::Jsonl => Box::new(JsonlWriter::new(out)),
    })
}
