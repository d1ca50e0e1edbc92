//! Pipeline entry points.
//!
//! - `run`: Check inputs, load labels, open the output and extract
//! - `run_extraction`: Stream every configured shard into a sink

pub mod extract;

pub use extract::{Extractor, RunSummary, run, run_extraction};
