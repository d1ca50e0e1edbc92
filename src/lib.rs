// src/lib.rs

//! Feature extraction from sharded, zipped HTML corpora.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
