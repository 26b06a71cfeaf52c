//! Granule filename parsing and acquisition-time derivation.
//!
//! LVIS Level-2 granules are distributed with names encoding the mission,
//! campaign region, acquisition date, release and file segment, e.g.
//! `ILVIS2_GL2009_0414_R1314_049903.TXT`. The release number determines
//! which LVIS Data Structure version the file uses: releases from 2018
//! onward follow LDS 2.0.2, earlier releases LDS 1.04.

use chrono::NaiveDate;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

use crate::constants::{
    GRANULE_EXTENSION, LDS_202_RELEASE_CUTOFF, MISSION_PREFIXES, NOON_OFFSET_SECONDS,
    SECONDS_PER_DAY,
};
use crate::error::{LvisError, Result};
use crate::models::LdsVersion;

/// Identity of one LVIS Level-2 granule, extracted from its filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GranuleInfo {
    pub mission: String,
    pub region: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Full release designator, e.g. "R1314"
    pub release: String,
    /// File segment number within the campaign day
    pub segment: String,
    pub version: LdsVersion,
}

fn granule_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r"^({})_([A-Z]{{2}})(\d{{4}})_(\d{{2}})(\d{{2}})_(R(\d{{2}})\d{{2}})_(\d+)\.{}$",
            MISSION_PREFIXES.join("|"),
            GRANULE_EXTENSION
        );
        Regex::new(&pattern).expect("granule filename pattern is valid")
    })
}

impl GranuleInfo {
    /// Parse granule identity from a file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| LvisError::GranuleNameUnrecognized {
                path: path.to_path_buf(),
            })?;

        let captures =
            granule_regex()
                .captures(file_name)
                .ok_or_else(|| LvisError::GranuleNameUnrecognized {
                    path: path.to_path_buf(),
                })?;

        // Numeric captures are guaranteed digits by the pattern
        let year: i32 = captures[3].parse().expect("year capture is numeric");
        let month: u32 = captures[4].parse().expect("month capture is numeric");
        let day: u32 = captures[5].parse().expect("day capture is numeric");
        let release_year: u32 = captures[7].parse().expect("release capture is numeric");

        // Validate the calendar date up front so downstream time derivation
        // cannot fail
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            LvisError::InvalidAcquisitionDate {
                path: path.to_path_buf(),
                reason: format!("{:04}-{:02}-{:02} is not a calendar date", year, month, day),
            }
        })?;

        let version = if release_year >= LDS_202_RELEASE_CUTOFF {
            LdsVersion::V202
        } else {
            LdsVersion::V104
        };

        let info = Self {
            mission: captures[1].to_string(),
            region: captures[2].to_string(),
            year,
            month,
            day,
            release: captures[6].to_string(),
            segment: captures[8].to_string(),
            version,
        };

        debug!(
            "Parsed granule {}: {} {} {} (LDS {})",
            file_name,
            info.mission,
            info.region,
            info.date_string(),
            info.version
        );

        Ok(info)
    }

    /// Acquisition date of the granule
    pub fn acquisition_date(&self) -> NaiveDate {
        // Validated during construction
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .expect("acquisition date validated at parse time")
    }

    /// ISO-8601 date string for reporting and provenance
    pub fn date_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Seconds from the J2000 epoch (2000-01-01 12:00:00 UTC) to midnight
    /// of the acquisition date.
    ///
    /// The per-record `Time` field holds UTC seconds of day; adding it to
    /// this offset yields the record's J2000 timestamp.
    pub fn j2000_midnight_offset(&self) -> f64 {
        let epoch_date = NaiveDate::from_ymd_opt(2000, 1, 1).expect("epoch date is valid");
        let days = self
            .acquisition_date()
            .signed_duration_since(epoch_date)
            .num_days();
        days as f64 * SECONDS_PER_DAY - NOON_OFFSET_SECONDS
    }

    /// Granule filename without the `.TXT` extension
    pub fn stem(&self) -> String {
        format!(
            "{}_{}{:04}_{:02}{:02}_{}_{}",
            self.mission, self.region, self.year, self.month, self.day, self.release, self.segment
        )
    }
}

/// Check if a path looks like an LVIS Level-2 granule file
pub fn is_granule_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| granule_regex().is_match(name))
}
