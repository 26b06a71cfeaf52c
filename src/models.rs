//! Core data structures and types for LVIS processing.
//!
//! Defines data structure versions, column typing, processing statistics,
//! and provenance objects used throughout the library.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::constants::{LDS_104_LABEL, LDS_202_LABEL};

/// LVIS Data Structure (LDS) versions supported by the processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LdsVersion {
    /// 12-column layout used through the 2017 releases
    V104,
    /// 42-column layout introduced with the 2018 reprocessing
    V202,
}

impl LdsVersion {
    /// Resolve a published version label ("1.04", "2.0.2") to a version tag
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            LDS_104_LABEL => Some(LdsVersion::V104),
            LDS_202_LABEL => Some(LdsVersion::V202),
            _ => None,
        }
    }

    /// The version label as published by the LVIS project
    pub fn label(&self) -> &'static str {
        match self {
            LdsVersion::V104 => LDS_104_LABEL,
            LdsVersion::V202 => LDS_202_LABEL,
        }
    }
}

impl fmt::Display for LdsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Numeric type of a schema column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
}

impl ColumnType {
    /// Human-readable type name for error reporting
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
        }
    }
}

/// Dataset group a field belongs to, mirroring the product's
/// hierarchical organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldGroup {
    Time,
    Geolocation,
    ElevationSurfaces,
    Waveform,
    InstrumentParameters,
}

impl FieldGroup {
    pub fn name(&self) -> &'static str {
        match self {
            FieldGroup::Time => "Time",
            FieldGroup::Geolocation => "Geolocation",
            FieldGroup::ElevationSurfaces => "Elevation_Surfaces",
            FieldGroup::Waveform => "Waveform",
            FieldGroup::InstrumentParameters => "Instrument_Parameters",
        }
    }
}

/// One column definition within a versioned layout
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub dtype: ColumnType,
    /// Zero-based token position within a record line
    pub position: usize,
    pub group: FieldGroup,
}

/// Processing statistics for a conversion run
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_records: usize,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}

/// Geographic bounding box of the lowest-mode coordinates in a granule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

/// Provenance metadata written alongside each Parquet file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provenance {
    pub source_file: String,
    pub lds_version: String,
    pub mission: String,
    pub region: String,
    pub acquisition_date: String,
    pub release: String,
    pub record_count: usize,
    pub geospatial_bounds: Option<GeoBounds>,
    pub field_groups: Vec<(String, Vec<String>)>,
    pub project: String,
    pub instrument: String,
    pub references: Vec<String>,
    pub created: String,
}
