//! CLI entry point for the tile descrambler

use clap::Parser;
use tiledescramble::io::cli::{Cli, FileProcessor};
use tiledescramble::io::logging::init_logger;

fn main() -> tiledescramble::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    let mut processor = FileProcessor::new(cli)?;
    let summary = processor.process()?;
    log::info!(
        "{} images: {} solved, {} from cache, {} failed",
        summary.total(),
        summary.solved,
        summary.replayed,
        summary.failed
    );
    Ok(())
}
