//! Configuration management and validation.
//!
//! Provides configuration structures for conversion parameters and
//! Parquet output tuning.

use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_MAX_CONCURRENT_FILES, PARQUET_DATA_PAGE_SIZE};
use crate::error::{LvisError, Result};

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }

    /// Resolve an algorithm from its CLI name
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "snappy" => Ok(CompressionAlgorithm::Snappy),
            "zstd" => Ok(CompressionAlgorithm::Zstd),
            "lz4" => Ok(CompressionAlgorithm::Lz4),
            "none" | "uncompressed" => Ok(CompressionAlgorithm::Uncompressed),
            other => Err(LvisError::Configuration {
                message: format!(
                    "Unknown compression algorithm '{}' (expected snappy, zstd, lz4 or none)",
                    other
                ),
            }),
        }
    }
}

/// Row group sizing strategies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RowGroupStrategy {
    /// Fixed size row groups
    Fixed,
    /// Adaptive sizing based on system resources
    Adaptive,
}

/// Parquet-specific output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParquetOptimizationConfig {
    /// Target row group size (rows per group) - dynamically calculated if 0
    pub target_row_group_size: usize,

    /// Compression algorithm selection
    pub compression_algorithm: CompressionAlgorithm,

    /// Enable column statistics for query pruning
    pub enable_statistics: bool,

    /// Data page size in bytes
    pub data_page_size: usize,

    /// Row group sizing strategy
    pub row_group_strategy: RowGroupStrategy,
}

impl Default for ParquetOptimizationConfig {
    fn default() -> Self {
        Self {
            target_row_group_size: 0, // 0 = auto-calculate based on strategy
            compression_algorithm: CompressionAlgorithm::Snappy,
            enable_statistics: true,
            data_page_size: PARQUET_DATA_PAGE_SIZE,
            row_group_strategy: RowGroupStrategy::Adaptive,
        }
    }
}

impl ParquetOptimizationConfig {
    /// Calculate row group size for a granule based on its record count
    /// and system resources
    pub fn calculate_row_group_size(
        &self,
        total_rows: usize,
        system_profile: &SystemProfile,
    ) -> usize {
        if self.target_row_group_size > 0 {
            return self.target_row_group_size;
        }

        let optimal_size = match self.row_group_strategy {
            RowGroupStrategy::Fixed => crate::constants::PARQUET_ROW_GROUP_SIZE,
            RowGroupStrategy::Adaptive => {
                // Target ~128MB row groups assuming ~350 bytes per record,
                // bounded by per-core parallelism
                let target_rows_from_size = (128 * 1024 * 1024) / 350;
                let target_rows_from_cores = system_profile.performance_cores * 100_000;
                target_rows_from_size
                    .min(target_rows_from_cores)
                    .clamp(100_000, 2_000_000)
            }
        };

        debug!(
            "Row group sizing: {} rows (strategy: {:?}, {} total rows, {} cores)",
            optimal_size, self.row_group_strategy, total_rows, system_profile.performance_cores
        );

        optimal_size
    }
}

/// System profiling information for optimization
#[derive(Debug, Clone)]
pub struct SystemProfile {
    /// Number of CPU cores available
    pub cpu_cores: usize,
    /// Available memory in MB
    pub memory_mb: usize,
    /// Performance cores (for systems with efficiency cores)
    pub performance_cores: usize,
}

impl SystemProfile {
    /// Auto-detect system capabilities
    pub fn detect() -> Self {
        use sysinfo::System;

        let cpu_cores = num_cpus::get();
        let performance_cores = num_cpus::get_physical();

        let mut system = System::new();
        system.refresh_memory();
        let memory_mb = (system.total_memory() / 1024 / 1024) as usize;

        Self {
            cpu_cores,
            memory_mb,
            performance_cores,
        }
    }
}

/// Global configuration for LVIS processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LvisConfig {
    /// Maximum concurrent granule conversions
    pub max_concurrent_files: usize,

    /// List granules and schema without converting
    pub list_only: bool,

    /// Parquet output configuration
    pub parquet_optimization: ParquetOptimizationConfig,
}

impl Default for LvisConfig {
    fn default() -> Self {
        Self {
            max_concurrent_files: DEFAULT_MAX_CONCURRENT_FILES,
            list_only: false,
            parquet_optimization: ParquetOptimizationConfig::default(),
        }
    }
}

impl LvisConfig {
    /// Set maximum concurrent granule conversions
    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.max_concurrent_files = max_files;
        self
    }

    /// Enable list-only mode
    pub fn with_list_only(mut self) -> Self {
        self.list_only = true;
        self
    }

    /// Set the compression algorithm for parquet output
    pub fn with_compression(mut self, algorithm: CompressionAlgorithm) -> Self {
        self.parquet_optimization.compression_algorithm = algorithm;
        self
    }
}
