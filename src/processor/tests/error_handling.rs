//! Error handling integration tests

use super::lds104_line;
use crate::processor::GranuleProcessor;
use std::fs;
use tempfile::TempDir;

fn setup_archive(temp_dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let archive_path = temp_dir.path().join("ILVIS2.001");
    fs::create_dir_all(archive_path.join("2009.04.14")).unwrap();
    let output_path = temp_dir.path().join("output");
    (archive_path, output_path)
}

#[tokio::test]
async fn test_malformed_granule_counted_as_failed() {
    let temp_dir = TempDir::new().unwrap();
    let (archive_path, output_path) = setup_archive(&temp_dir);

    // Second line is truncated to 11 tokens; the whole granule must fail
    let content = format!(
        "{}\n1280903110 468002 80337.5 310.8 68.4 120.3 310.8 68.4 119.8 310.8 68.4\n",
        lds104_line(468001, 68.4)
    );
    fs::write(
        archive_path
            .join("2009.04.14")
            .join("ILVIS2_GL2009_0414_R1314_049903.TXT"),
        content,
    )
    .unwrap();

    let mut processor = GranuleProcessor::new(archive_path, Some(output_path.clone())).unwrap();
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_processed, 0);
    assert_eq!(stats.files_failed, 1);
    assert_eq!(stats.total_records, 0);

    // No partial output for a failed granule
    assert!(!output_path.join("ILVIS2_GL2009_0414_R1314_049903.parquet").exists());
}

#[tokio::test]
async fn test_unconvertible_token_counted_as_failed() {
    let temp_dir = TempDir::new().unwrap();
    let (archive_path, output_path) = setup_archive(&temp_dir);

    let bad_line = lds104_line(468001, 68.4).replace("120.31", "n/a");
    fs::write(
        archive_path
            .join("2009.04.14")
            .join("ILVIS2_GL2009_0414_R1314_049903.TXT"),
        format!("{}\n", bad_line),
    )
    .unwrap();

    let mut processor = GranuleProcessor::new(archive_path, Some(output_path)).unwrap();
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_processed, 0);
    assert_eq!(stats.files_failed, 1);
}

#[tokio::test]
async fn test_failed_granule_does_not_abort_run() {
    let temp_dir = TempDir::new().unwrap();
    let (archive_path, output_path) = setup_archive(&temp_dir);
    let campaign_path = archive_path.join("2009.04.14");

    fs::write(
        campaign_path.join("ILVIS2_GL2009_0414_R1314_049903.TXT"),
        format!("{}\n{}\n", lds104_line(468001, 68.4), lds104_line(468002, 68.5)),
    )
    .unwrap();
    fs::write(
        campaign_path.join("ILVIS2_GL2009_0414_R1314_051265.TXT"),
        "only three tokens\n",
    )
    .unwrap();

    let mut processor = GranuleProcessor::new(archive_path, Some(output_path.clone())).unwrap();
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.files_failed, 1);
    assert_eq!(stats.total_records, 2);
    assert!(output_path.join("ILVIS2_GL2009_0414_R1314_049903.parquet").exists());
    assert!(!output_path.join("ILVIS2_GL2009_0414_R1314_051265.parquet").exists());
}

#[tokio::test]
async fn test_non_granule_files_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let (archive_path, output_path) = setup_archive(&temp_dir);

    fs::write(archive_path.join("README.TXT"), "not a granule").unwrap();
    fs::write(
        archive_path.join("2009.04.14").join("checksums.md5"),
        "sums",
    )
    .unwrap();

    let mut processor = GranuleProcessor::new(archive_path, Some(output_path)).unwrap();
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_processed, 0);
    assert_eq!(stats.files_failed, 0);
}
