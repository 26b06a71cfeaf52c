//! Granule discovery module for LVIS archives
//!
//! Handles discovering Level-2 granule files in an archive directory
//! and counting campaign days for processing statistics.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::{LvisError, Result};
use crate::granule::is_granule_file;

/// Granule discovery component for LVIS archives
#[derive(Debug)]
pub struct FileDiscovery {
    archive_path: PathBuf,
    campaign_count: usize,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(archive_path: PathBuf) -> Self {
        Self {
            archive_path,
            campaign_count: 0,
        }
    }

    /// Get the current campaign-day count
    pub fn campaign_count(&self) -> usize {
        self.campaign_count
    }

    /// Discover all granule files in the archive and count campaign days
    ///
    /// NSIDC archives follow this structure:
    /// ```text
    /// ILVIS2.001/
    ///   2009.04.14/
    ///     ILVIS2_GL2009_0414_R1314_049903.TXT
    ///     ILVIS2_GL2009_0414_R1314_051265.TXT
    ///   2009.04.20/
    ///     ILVIS2_GL2009_0420_R1314_052556.TXT
    /// ```
    ///
    /// Granule files placed directly at the archive root are also accepted.
    pub async fn discover_granules(&mut self) -> Result<Vec<PathBuf>> {
        if !self.archive_path.exists() {
            return Err(LvisError::ArchiveNotFound {
                path: self.archive_path.clone(),
            });
        }

        debug!(
            "Searching for granule files in: {}",
            self.archive_path.display()
        );

        let mut files = Vec::new();
        let mut campaigns = HashSet::new();

        let mut dir = fs::read_dir(&self.archive_path).await?;

        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                let campaign_files = self.discover_campaign_files(&path).await?;
                if !campaign_files.is_empty() {
                    campaigns.insert(campaign_name(&path));
                    files.extend(campaign_files);
                }
            } else if is_granule_file(&path) {
                campaigns.insert(campaign_name(&self.archive_path));
                files.push(path);
            }
        }

        files.sort();
        self.campaign_count = campaigns.len();
        debug!(
            "Found {} granule files from {} campaign days",
            files.len(),
            self.campaign_count
        );

        Ok(files)
    }

    /// Discover granule files within a campaign-day directory
    async fn discover_campaign_files(&self, campaign_path: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut campaign_dir = fs::read_dir(campaign_path).await?;

        while let Some(file_entry) = campaign_dir.next_entry().await? {
            let file_path = file_entry.path();
            if is_granule_file(&file_path) {
                files.push(file_path);
            }
        }

        Ok(files)
    }
}

fn campaign_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Helper to create a test archive structure
    fn create_test_archive(temp_dir: &TempDir) -> PathBuf {
        let archive_path = temp_dir.path().join("ILVIS2.001");

        let day1 = archive_path.join("2009.04.14");
        fs::create_dir_all(&day1).unwrap();
        fs::write(day1.join("ILVIS2_GL2009_0414_R1314_049903.TXT"), "1 2 3").unwrap();
        fs::write(day1.join("ILVIS2_GL2009_0414_R1314_051265.TXT"), "1 2 3").unwrap();

        let day2 = archive_path.join("2009.04.20");
        fs::create_dir_all(&day2).unwrap();
        fs::write(day2.join("ILVIS2_GL2009_0420_R1314_052556.TXT"), "1 2 3").unwrap();

        // Files that should be ignored
        fs::write(day2.join("ILVIS2_GL2009_0420_R1314_052556.TXT.xml"), "meta").unwrap();
        fs::write(archive_path.join("checksums.txt"), "sums").unwrap();

        archive_path
    }

    #[tokio::test]
    async fn test_discover_granules() {
        let temp_dir = TempDir::new().unwrap();
        let archive_path = create_test_archive(&temp_dir);

        let mut discovery = FileDiscovery::new(archive_path);
        let files = discovery.discover_granules().await.unwrap();

        assert_eq!(files.len(), 3);
        assert_eq!(discovery.campaign_count(), 2);

        for file in &files {
            assert!(is_granule_file(file));
        }
    }

    #[tokio::test]
    async fn test_discover_flat_archive() {
        let temp_dir = TempDir::new().unwrap();
        let archive_path = temp_dir.path().join("flat");
        fs::create_dir_all(&archive_path).unwrap();
        fs::write(
            archive_path.join("ILVIS2_AQ2017_1025_R1803_061576.TXT"),
            "1 2 3",
        )
        .unwrap();

        let mut discovery = FileDiscovery::new(archive_path);
        let files = discovery.discover_granules().await.unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(discovery.campaign_count(), 1);
    }

    #[tokio::test]
    async fn test_discover_empty_archive() {
        let temp_dir = TempDir::new().unwrap();
        let archive_path = temp_dir.path().join("empty");
        fs::create_dir_all(&archive_path).unwrap();

        let mut discovery = FileDiscovery::new(archive_path);
        let files = discovery.discover_granules().await.unwrap();

        assert_eq!(files.len(), 0);
        assert_eq!(discovery.campaign_count(), 0);
    }

    #[tokio::test]
    async fn test_discover_missing_archive() {
        let temp_dir = TempDir::new().unwrap();
        let archive_path = temp_dir.path().join("missing");

        let mut discovery = FileDiscovery::new(archive_path.clone());
        let result = discovery.discover_granules().await;

        match result {
            Err(LvisError::ArchiveNotFound { path }) => assert_eq!(path, archive_path),
            _ => panic!("Expected ArchiveNotFound error"),
        }
    }
}
