// src/error.rs

//! Unified error handling for the feature extractor.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Zip container could not be read
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Delimited label table could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A declared input (shard or label table) does not exist
    #[error("Missing {kind}: {path}")]
    MissingInput { kind: &'static str, path: String },

    /// A single archive entry could not be turned into a feature record
    #[error("Document error for {entry}: {message}")]
    Document { entry: String, message: String },

    /// Label table content is unusable
    #[error("Label table error: {0}")]
    Labels(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a missing-input error.
    pub fn missing(kind: &'static str, path: impl AsRef<Path>) -> Self {
        Self::MissingInput {
            kind,
            path: path.as_ref().display().to_string(),
        }
    }

    /// Create a per-document error with the entry name as context.
    pub fn document(entry: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Document {
            entry: entry.into(),
            message: message.to_string(),
        }
    }

    /// Create a label table error.
    pub fn labels(message: impl Into<String>) -> Self {
        Self::Labels(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error is confined to a single archive entry.
    pub fn is_entry_fault(&self) -> bool {
        matches!(self, Self::Document { .. })
    }
}
