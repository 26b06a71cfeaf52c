//! LVIS Processor Library
//!
//! A Rust library for converting NASA Operation IceBridge LVIS Level-2
//! geolocated surface elevation granules from their ASCII distribution
//! format into optimized Apache Parquet files.
//!
//! This library provides tools for:
//! - Parsing whitespace-delimited LVIS record lines into typed columns
//! - Resolving the versioned column layout (LDS 1.04 / 2.0.2) from granule
//!   filenames through an immutable schema registry
//! - Deriving J2000 timestamps from the acquisition date and per-record
//!   seconds of day
//! - Writing Parquet files with JSON provenance sidecars

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod granule;
pub mod models;
pub mod parser;
pub mod processor;
pub mod schema;

// Re-export commonly used types
pub use config::LvisConfig;
pub use error::{LvisError, Result};
pub use granule::GranuleInfo;
pub use models::LdsVersion;
pub use parser::{RecordColumns, parse_records};
pub use processor::GranuleProcessor;
pub use schema::{ColumnSchema, SchemaRegistry};
