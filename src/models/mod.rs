// src/models/mod.rs

//! Domain models for the feature extractor.

mod config;
mod record;

// Re-export all public types
pub use config::{
    Config, ErrorPolicy, InputConfig, LabelsConfig, OutputConfig, OutputFormat, PipelineConfig,
};
pub use record::{FeatureRecord, LabelMarker};
