//! Command-line interface components.

use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "lvis")]
#[command(about = "Convert IceBridge LVIS Level-2 ASCII granules to optimized Parquet format")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the LVIS archive directory (optional - will discover from the
    /// local data directory if not provided)
    #[arg(value_name = "ARCHIVE_PATH")]
    pub archive_path: Option<PathBuf>,

    /// Output directory for Parquet files
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// List mode: report discovered granules and column layouts then exit
    /// (no data conversion)
    #[arg(long)]
    pub list_only: bool,

    /// Parquet compression algorithm (snappy, zstd, lz4, none)
    #[arg(long, default_value = "snappy")]
    pub compression: String,

    /// Maximum concurrent granule conversions
    #[arg(long, default_value_t = crate::constants::DEFAULT_MAX_CONCURRENT_FILES)]
    pub max_concurrent: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Get the output path, defaulting to archive_path/../parquet/<name> if
    /// not specified
    pub fn get_output_path(&self, archive_path: &Path) -> PathBuf {
        match &self.output_path {
            Some(path) => path.clone(),
            None => {
                let archive_name = archive_path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy();
                archive_path
                    .parent()
                    .unwrap_or(archive_path)
                    .join("parquet")
                    .join(archive_name.to_string())
            }
        }
    }
}

/// Archive discovery and selection functionality
pub mod archive_discovery {
    use super::*;
    use anyhow::{Context, Result};
    use colored::*;
    use std::io::{self, Write};

    #[derive(Debug, Clone)]
    pub struct DiscoveredArchive {
        pub name: String,
        pub path: PathBuf,
        pub size_estimate: String,
    }

    /// Find the local IceBridge data directory using standard directory
    /// conventions
    pub fn find_data_directory() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().context("Could not determine user data directory")?;

        let archive_root = data_dir.join("icebridge");

        if !archive_root.exists() {
            anyhow::bail!(
                "IceBridge data directory not found at {}. Sync granules from NSIDC first, or pass an archive path explicitly.",
                archive_root.display()
            );
        }

        Ok(archive_root)
    }

    /// Discover available archives in the data directory
    pub fn discover_archives(archive_root: &Path) -> Result<Vec<DiscoveredArchive>> {
        let mut archives = Vec::new();

        for entry in std::fs::read_dir(archive_root).context("Failed to read data directory")? {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_dir() {
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("unknown")
                    .to_string();

                // Skip the parquet output directory
                if name == "parquet" {
                    continue;
                }

                // Check if this looks like an LVIS archive (contains granule files)
                if contains_granules(&path) {
                    let size_estimate = estimate_archive_size(&path)?;

                    archives.push(DiscoveredArchive {
                        name,
                        path,
                        size_estimate,
                    });
                }
            }
        }

        // Sort by name for consistent ordering
        archives.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(archives)
    }

    /// Check whether a directory contains LVIS granule files at any depth
    fn contains_granules(path: &Path) -> bool {
        walkdir::WalkDir::new(path)
            .max_depth(2)
            .into_iter()
            .flatten()
            .any(|entry| {
                entry.file_type().is_file() && crate::granule::is_granule_file(entry.path())
            })
    }

    /// Estimate the size of an archive by walking its granule files
    fn estimate_archive_size(archive_path: &Path) -> Result<String> {
        let mut total_files = 0;
        let mut total_size = 0u64;

        for entry in walkdir::WalkDir::new(archive_path) {
            let entry = entry.context("Failed to walk directory")?;
            if entry.file_type().is_file() && crate::granule::is_granule_file(entry.path()) {
                total_files += 1;
                if let Ok(metadata) = entry.metadata() {
                    total_size += metadata.len();
                }
            }
        }

        let size_str = if total_size > 1_000_000_000 {
            format!("{:.1} GB", total_size as f64 / 1_000_000_000.0)
        } else if total_size > 1_000_000 {
            format!("{:.1} MB", total_size as f64 / 1_000_000.0)
        } else if total_size > 1_000 {
            format!("{:.1} KB", total_size as f64 / 1_000.0)
        } else {
            format!("{} bytes", total_size)
        };

        Ok(format!("{} granules, ~{}", total_files, size_str))
    }

    /// Present archives to user and get their selection
    pub fn select_archive(archives: &[DiscoveredArchive]) -> Result<&DiscoveredArchive> {
        if archives.is_empty() {
            anyhow::bail!(
                "No LVIS archives found in the data directory. Sync granules from NSIDC first."
            );
        }

        println!("{}", "Available LVIS archives:".bright_green().bold());
        println!();

        for (i, archive) in archives.iter().enumerate() {
            println!(
                "  {}. {} {}",
                (i + 1).to_string().bright_yellow().bold(),
                archive.name.bright_cyan(),
                format!("({})", archive.size_estimate).bright_black()
            );
        }

        println!();
        print!("{}", "Select archive to convert (number): ".bright_white());
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .context("Failed to read user input")?;

        let selection: usize = input
            .trim()
            .parse()
            .context("Please enter a valid number")?;

        if selection == 0 || selection > archives.len() {
            anyhow::bail!(
                "Invalid selection. Please choose a number between 1 and {}",
                archives.len()
            );
        }

        Ok(&archives[selection - 1])
    }
}
