//! Application constants for LVIS processor
//!
//! This module contains configuration constants, default values,
//! and field name mappings used throughout the LVIS processor.

// =============================================================================
// Granule Naming and File Patterns
// =============================================================================

/// Mission prefixes found in LVIS Level-2 granule filenames
pub const MISSION_PREFIXES: &[&str] = &["ILVIS2", "ILVGH2", "BLVIS2", "BVLIS2"];

/// File extension for LVIS Level-2 ASCII granules
pub const GRANULE_EXTENSION: &str = "TXT";

/// Comment/header marker at the start of non-data lines
pub const COMMENT_MARKER: char = '#';

/// Release number year (two digits) from which granules use LDS 2.0.2
pub const LDS_202_RELEASE_CUTOFF: u32 = 18;

/// Version labels as published by the LVIS project
pub const LDS_104_LABEL: &str = "1.04";
pub const LDS_202_LABEL: &str = "2.0.2";

// =============================================================================
// Time Conversion Constants
// =============================================================================

/// Seconds per day for J2000 offset arithmetic
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// The J2000 epoch is 2000-01-01 12:00:00 UTC, half a day past midnight
pub const NOON_OFFSET_SECONDS: f64 = 43_200.0;

// =============================================================================
// Parquet Writer Configuration
// =============================================================================

/// Default row group size for optimal sequential read performance
pub const PARQUET_ROW_GROUP_SIZE: usize = 1_000_000;

/// Data page size in bytes for Parquet files
pub const PARQUET_DATA_PAGE_SIZE: usize = 1024 * 1024;

// =============================================================================
// Processing Configuration Defaults
// =============================================================================

/// Default maximum concurrent granule conversions
pub const DEFAULT_MAX_CONCURRENT_FILES: usize = 8;

// =============================================================================
// Provenance Constants
// =============================================================================

/// Data product references recorded in provenance sidecars
pub const PRODUCT_REFERENCES: &[&str] = &[
    "https://lvis.gsfc.nasa.gov/",
    "https://nsidc.org/data/ilvis2",
];

/// Project name recorded in provenance sidecars
pub const PROJECT_NAME: &str = "NASA Operation IceBridge";

/// Instrument name recorded in provenance sidecars
pub const INSTRUMENT_NAME: &str = "Land, Vegetation, and Ice Sensor (LVIS)";

// =============================================================================
// Column Name Constants
// =============================================================================

/// Field names shared by both LDS layouts
pub mod columns {
    pub const LVIS_LFID: &str = "LVIS_LFID";
    pub const SHOT_NUMBER: &str = "Shot_Number";
    pub const TIME: &str = "Time";
    pub const LONGITUDE_LOW: &str = "Longitude_Low";
    pub const LATITUDE_LOW: &str = "Latitude_Low";
    pub const ELEVATION_LOW: &str = "Elevation_Low";
    pub const LONGITUDE_HIGH: &str = "Longitude_High";
    pub const LATITUDE_HIGH: &str = "Latitude_High";
    pub const ELEVATION_HIGH: &str = "Elevation_High";

    /// Derived time column appended by the conversion pipeline
    pub const J2000: &str = "J2000";
}

/// Relative-height percentiles carried by the LDS 2.0.2 waveform section
pub const RH_PERCENTILES: &[u8] = &[
    10, 15, 20, 25, 30, 35, 40, 45, 50, 55, 60, 65, 70, 75, 80, 85, 90, 95, 96, 97, 98, 99, 100,
];

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the expected Parquet output filename for a granule stem
pub fn get_output_filename(granule_stem: &str) -> String {
    format!("{}.parquet", granule_stem)
}

/// Get the expected provenance sidecar filename for a granule stem
pub fn get_metadata_filename(granule_stem: &str) -> String {
    format!("{}.metadata.json", granule_stem)
}

/// Check if a line is a comment/header line rather than a data record
pub fn is_comment_line(line: &str) -> bool {
    line.trim_start().starts_with(COMMENT_MARKER)
}
