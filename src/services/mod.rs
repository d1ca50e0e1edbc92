//! Services for turning archived documents into labeled feature records.
//!
//! - `Shard`: Lists and reads entries of one shard
//! - `DocumentParser`: Extracts features from HTML
//! - `LabelTable`: Resolves a document's class marker

pub mod archive;
pub mod document;
pub mod labels;

pub use archive::{Shard, ShardEntry};
pub use document::DocumentParser;
pub use labels::LabelTable;
