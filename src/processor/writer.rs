//! Parquet writing module for LVIS granules
//!
//! Writes one optimized Parquet file per granule together with a JSON
//! provenance sidecar describing the source file, data structure version
//! and geospatial coverage.

use polars::prelude::{DataFrame, ParquetWriter as PolarsParquetWriter, StatisticsOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{LvisConfig, SystemProfile};
use crate::constants::{get_metadata_filename, get_output_filename};
use crate::error::{LvisError, Result};
use crate::models::Provenance;

/// Result of writing one granule
#[derive(Debug, Clone)]
pub struct WriteReport {
    pub parquet_path: PathBuf,
    pub bytes_written: u64,
}

/// Parquet writer with per-granule provenance sidecars
#[derive(Debug)]
pub struct ParquetWriter {
    output_dir: PathBuf,
    config: LvisConfig,
    system_profile: SystemProfile,
}

impl ParquetWriter {
    /// Create a new Parquet writer
    pub fn new(output_dir: PathBuf, config: LvisConfig) -> Self {
        let system_profile = SystemProfile::detect();
        Self {
            output_dir,
            config,
            system_profile,
        }
    }

    /// The directory granule outputs are written into
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write one granule's DataFrame and provenance sidecar
    pub fn write_granule(
        &self,
        mut df: DataFrame,
        provenance: &Provenance,
        granule_stem: &str,
    ) -> Result<WriteReport> {
        std::fs::create_dir_all(&self.output_dir)?;

        let parquet_path = self.output_dir.join(get_output_filename(granule_stem));
        let parquet_config = &self.config.parquet_optimization;
        let row_group_size = parquet_config.calculate_row_group_size(df.height(), &self.system_profile);

        debug!(
            "Writing {} rows to {} (row group size {})",
            df.height(),
            parquet_path.display(),
            row_group_size
        );

        let file = std::fs::File::create(&parquet_path)?;
        PolarsParquetWriter::new(file)
            .with_compression(parquet_config.compression_algorithm.to_polars_compression())
            .with_statistics(if parquet_config.enable_statistics {
                StatisticsOptions::full()
            } else {
                StatisticsOptions::empty()
            })
            .with_row_group_size(Some(row_group_size))
            .finish(&mut df)
            .map_err(|e| LvisError::ProcessingFailed {
                path: parquet_path.clone(),
                reason: format!("Failed to write parquet: {}", e),
            })?;

        self.write_sidecar(provenance, granule_stem)?;

        let bytes_written = std::fs::metadata(&parquet_path).map(|m| m.len()).unwrap_or(0);

        Ok(WriteReport {
            parquet_path,
            bytes_written,
        })
    }

    /// Write the JSON provenance sidecar for a granule
    fn write_sidecar(&self, provenance: &Provenance, granule_stem: &str) -> Result<()> {
        let sidecar_path = self.output_dir.join(get_metadata_filename(granule_stem));
        let json = serde_json::to_string_pretty(provenance)?;
        std::fs::write(&sidecar_path, json)?;

        debug!("Wrote provenance sidecar: {}", sidecar_path.display());
        Ok(())
    }
}
