//! Main processing engine with modular architecture.
//!
//! Orchestrates the complete granule conversion workflow using
//! specialized modules for file discovery and parquet writing.

pub mod discovery;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{discovery::FileDiscovery, writer::ParquetWriter};

use crate::config::LvisConfig;
use crate::constants::{INSTRUMENT_NAME, PRODUCT_REFERENCES, PROJECT_NAME, columns};
use crate::error::{LvisError, Result};
use crate::granule::GranuleInfo;
use crate::models::{GeoBounds, ProcessingStats, Provenance};
use crate::parser::{RecordColumns, data_lines, parse_records};
use crate::schema::SchemaRegistry;

use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::Column;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;
use tracing::{debug, error};

/// Outcome of converting one granule
#[derive(Debug)]
struct GranuleReport {
    records: usize,
}

/// Main processor for LVIS archive conversion
#[derive(Debug)]
pub struct GranuleProcessor {
    archive_path: PathBuf,
    output_dir: PathBuf,
    config: LvisConfig,
    registry: SchemaRegistry,
    file_discovery: FileDiscovery,
    parquet_writer: ParquetWriter,
}

impl GranuleProcessor {
    /// Create a new granule processor
    pub fn new(archive_path: PathBuf, output_dir: Option<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.unwrap_or_else(|| {
            let archive_name = archive_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();

            archive_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("parquet")
                .join(archive_name)
        });

        if !archive_path.exists() {
            return Err(LvisError::ArchiveNotFound { path: archive_path });
        }

        let config = LvisConfig::default();

        Ok(Self {
            archive_path: archive_path.clone(),
            output_dir: output_dir.clone(),
            config: config.clone(),
            registry: SchemaRegistry::standard(),
            file_discovery: FileDiscovery::new(archive_path),
            parquet_writer: ParquetWriter::new(output_dir, config),
        })
    }

    /// Configure the processor
    pub fn with_config(mut self, config: LvisConfig) -> Self {
        self.config = config.clone();
        self.parquet_writer = ParquetWriter::new(self.output_dir.clone(), config);
        self
    }

    /// Main processing entry point
    pub async fn process(&mut self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        println!(
            "{}",
            "Starting LVIS archive conversion".bright_green().bold()
        );
        println!(
            "  {} {}",
            "Archive:".bright_cyan(),
            self.archive_path.display()
        );
        println!(
            "  {} {}",
            "Output:".bright_cyan(),
            self.output_dir.display()
        );

        // Step 1: Discover granule files
        println!("\n{}", "Discovering granules...".bright_yellow());
        let granules = self.file_discovery.discover_granules().await?;
        println!(
            "  {} {} granules from {} campaign days",
            "Found".bright_green(),
            granules.len().to_string().bright_white().bold(),
            self.file_discovery
                .campaign_count()
                .to_string()
                .bright_white()
                .bold()
        );

        if granules.is_empty() {
            return Ok(ProcessingStats {
                files_processed: 0,
                files_failed: 0,
                total_records: 0,
                output_path: self.output_dir.clone(),
                processing_time_ms: start_time.elapsed().as_millis(),
            });
        }

        // Step 2: Handle list-only mode
        if self.config.list_only {
            self.report_granules(&granules)?;
            return Ok(ProcessingStats {
                files_processed: 0,
                files_failed: 0,
                total_records: 0,
                output_path: self.output_dir.clone(),
                processing_time_ms: start_time.elapsed().as_millis(),
            });
        }

        // Step 3: Convert granules concurrently
        println!("\n{}", "Converting granules...".bright_yellow());

        let pb = ProgressBar::new(granules.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Converting granules");

        let concurrent_limit = self.config.max_concurrent_files.min(granules.len()).max(1);
        let pb_clone = pb.clone();

        // Reborrow immutably so concurrent conversion futures can share it
        let processor = &*self;

        let (processed, failed, total_records) = stream::iter(granules.iter())
            .map(|granule_path| {
                let pb = pb_clone.clone();
                async move {
                    if let Some(file_name) = granule_path.file_name() {
                        pb.set_message(format!("Converting: {}", file_name.to_string_lossy()));
                    }

                    let result = processor.convert_granule(granule_path).await;
                    pb.inc(1);

                    match result {
                        Ok(report) => {
                            debug!("Successfully converted: {}", granule_path.display());
                            Ok(report)
                        }
                        Err(e) => {
                            error!("Failed to convert {}: {:#}", granule_path.display(), e);
                            Err(e)
                        }
                    }
                }
            })
            .buffer_unordered(concurrent_limit)
            .fold(
                (0usize, 0usize, 0usize),
                |(processed, failed, records), result| async move {
                    match result {
                        Ok(report) => (processed + 1, failed, records + report.records),
                        Err(_) => (processed, failed + 1, records),
                    }
                },
            )
            .await;

        pb.finish_with_message("All granules converted");

        let total_time = start_time.elapsed().as_millis();
        println!("\n{}", "Conversion Summary".bright_green().bold());
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            total_time.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Granules converted:".bright_cyan(),
            processed.to_string().bright_white()
        );
        if failed > 0 {
            println!(
                "  {} {}",
                "Granules failed:".bright_red(),
                failed.to_string().bright_red().bold()
            );
        }
        println!(
            "  {} {}",
            "Total records:".bright_cyan(),
            total_records.to_string().bright_white().bold()
        );

        Ok(ProcessingStats {
            files_processed: processed,
            files_failed: failed,
            total_records,
            output_path: self.output_dir.clone(),
            processing_time_ms: total_time,
        })
    }

    /// Convert a single granule to Parquet with a provenance sidecar
    async fn convert_granule(&self, granule_path: &Path) -> Result<GranuleReport> {
        let info = GranuleInfo::from_path(granule_path)?;
        let schema = self.registry.schema_for(info.version)?.clone();
        let mut field_groups = schema.grouped_fields();

        // Step 1: Read and parse on the blocking pool; the parse itself is
        // a pure batch transformation
        let path_owned = granule_path.to_path_buf();
        let record_columns = task::spawn_blocking(move || -> Result<RecordColumns> {
            let content = std::fs::read_to_string(&path_owned)?;
            parse_records(data_lines(&content), &schema)
        })
        .await
        .map_err(|e| LvisError::ProcessingFailed {
            path: granule_path.to_path_buf(),
            reason: format!("Parse task failed: {}", e),
        })??;

        let records = record_columns.len();
        let bounds = lowest_mode_bounds(&record_columns);

        // Step 2: Derive the J2000 timestamp column from the acquisition
        // date and per-record seconds of day
        let midnight_offset = info.j2000_midnight_offset();
        let j2000: Option<Vec<f64>> = record_columns
            .float_values(columns::TIME)
            .map(|seconds| seconds.iter().map(|s| midnight_offset + s).collect());

        let mut df = record_columns.into_dataframe()?;
        if let Some(values) = j2000 {
            df.with_column(Column::new(columns::J2000.into(), values))?;
            if let Some((_, names)) = field_groups.iter_mut().find(|(group, _)| group == "Time") {
                names.push(columns::J2000.to_string());
            }
        }

        // Step 3: Write parquet and provenance sidecar
        let provenance = build_provenance(granule_path, &info, records, bounds, field_groups);
        let report = self
            .parquet_writer
            .write_granule(df, &provenance, &info.stem())?;

        debug!(
            "Wrote {} records ({} bytes) for {}",
            records,
            report.bytes_written,
            info.stem()
        );

        Ok(GranuleReport { records })
    }

    /// Report discovered granules and their column layouts without converting
    fn report_granules(&self, granules: &[PathBuf]) -> Result<()> {
        println!("\n{}", "Discovered granules".bright_green().bold());

        let mut versions = BTreeSet::new();
        for granule_path in granules {
            match GranuleInfo::from_path(granule_path) {
                Ok(info) => {
                    versions.insert(info.version);
                    println!(
                        "  {} {} {} (LDS {})",
                        info.stem().bright_cyan(),
                        info.region,
                        info.date_string(),
                        info.version
                    );
                }
                Err(e) => {
                    println!(
                        "  {} {} ({})",
                        "unrecognized".bright_red(),
                        granule_path.display(),
                        e
                    );
                }
            }
        }

        for version in versions {
            self.registry.report_layout(version)?;
        }

        Ok(())
    }
}

/// Bounding box of the lowest-detected-mode coordinates, when present
fn lowest_mode_bounds(record_columns: &RecordColumns) -> Option<GeoBounds> {
    let latitudes = record_columns.float_values(columns::LATITUDE_LOW)?;
    let longitudes = record_columns.float_values(columns::LONGITUDE_LOW)?;

    if latitudes.is_empty() {
        return None;
    }

    let (lat_min, lat_max) = min_max(latitudes);
    let (lon_min, lon_max) = min_max(longitudes);

    Some(GeoBounds {
        lat_min,
        lat_max,
        lon_min,
        lon_max,
    })
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), &v| (min.min(v), max.max(v)),
    )
}

fn build_provenance(
    granule_path: &Path,
    info: &GranuleInfo,
    record_count: usize,
    geospatial_bounds: Option<GeoBounds>,
    field_groups: Vec<(String, Vec<String>)>,
) -> Provenance {
    Provenance {
        source_file: granule_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        lds_version: info.version.label().to_string(),
        mission: info.mission.clone(),
        region: info.region.clone(),
        acquisition_date: info.date_string(),
        release: info.release.clone(),
        record_count,
        geospatial_bounds,
        field_groups,
        project: PROJECT_NAME.to_string(),
        instrument: INSTRUMENT_NAME.to_string(),
        references: PRODUCT_REFERENCES.iter().map(|s| s.to_string()).collect(),
        created: chrono::Utc::now().to_rfc3339(),
    }
}
