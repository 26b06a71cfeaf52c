use clap::Parser;
use lvis_processor::cli::{Args, archive_discovery};
use lvis_processor::config::{CompressionAlgorithm, LvisConfig};
use lvis_processor::processor::GranuleProcessor;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    setup_logging(&args);

    // Create async runtime and run the conversion with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = run(args) => result,
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(anyhow::anyhow!("Conversion interrupted by user"))
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    // Resolve the archive path: explicit argument, or interactive discovery
    // from the local data directory
    let archive_path: PathBuf = match &args.archive_path {
        Some(path) => path.clone(),
        None => {
            let data_dir = archive_discovery::find_data_directory()?;
            let archives = archive_discovery::discover_archives(&data_dir)?;
            archive_discovery::select_archive(&archives)?.path.clone()
        }
    };

    let output_path = args.get_output_path(&archive_path);

    let mut config = LvisConfig::default()
        .with_max_concurrent_files(args.max_concurrent)
        .with_compression(CompressionAlgorithm::from_name(&args.compression)?);
    if args.list_only {
        config = config.with_list_only();
    }

    let mut processor = GranuleProcessor::new(archive_path, Some(output_path))?.with_config(config);
    processor.process().await?;

    Ok(())
}

fn setup_logging(args: &Args) {
    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lvis_processor={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
