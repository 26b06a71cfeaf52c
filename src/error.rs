//! Error handling for LVIS processing operations.
//!
//! Provides error types with context for granule identification,
//! record parsing, and data conversion failures.

use std::path::PathBuf;
use thiserror::Error;

use crate::models::LdsVersion;

#[derive(Error, Debug)]
pub enum LvisError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Archive not found at path: {path}")]
    ArchiveNotFound { path: PathBuf },

    #[error("No column schema registered for LVIS data structure version: {version}")]
    UnknownVersion { version: String },

    #[error(
        "Malformed record at line {line_index}: expected {expected} columns, found {found} (LDS {version})"
    )]
    MalformedRecord {
        line_index: usize,
        expected: usize,
        found: usize,
        version: LdsVersion,
    },

    #[error(
        "Conversion failed at line {line_index}, field '{field}': cannot parse '{token}' as {expected_type}"
    )]
    Conversion {
        line_index: usize,
        field: String,
        token: String,
        expected_type: &'static str,
    },

    #[error("Unrecognized granule filename: {path}")]
    GranuleNameUnrecognized { path: PathBuf },

    #[error("Invalid acquisition date in granule name: {path} - {reason}")]
    InvalidAcquisitionDate { path: PathBuf, reason: String },

    #[error("Processing failed for granule: {path} - {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Metadata serialization failed: {0}")]
    MetadataSerialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LvisError>;
