//! Command-line interface for batch descrambling of PNG files

use crate::algorithm::executor::{Descrambler, DescramblerConfig};
use crate::io::configuration::{
    DEFAULT_BRANCH_FACTOR, DEFAULT_ITERATIONS_PER_TILE, DEFAULT_MAX_ITERATIONS, DEFAULT_OFFSET,
    DEFAULT_TILE_SIZE, OUTPUT_SUFFIX,
};
use crate::io::error::{DescrambleError, Result, invalid_parameter};
use crate::io::image::descramble_file;
use crate::io::progress::{BatchSummary, ProgressManager};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "tiledescramble")]
#[command(
    author,
    version,
    about = "Restore images whose tiles were shuffled by a grid scrambler"
)]
/// Command-line arguments for the descrambling tool
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Width of the gap strip before each tile
    #[arg(short, long, default_value_t = DEFAULT_OFFSET)]
    pub offset: u32,

    /// Initial tile width guess
    #[arg(short = 'w', long, default_value_t = DEFAULT_TILE_SIZE)]
    pub width: u32,

    /// Initial tile height guess
    #[arg(short = 'H', long, default_value_t = DEFAULT_TILE_SIZE)]
    pub height: u32,

    /// Source key shared by images scrambled the same way
    #[arg(short, long)]
    pub key: Option<String>,

    /// Hard cap on search states per tile size
    #[arg(short, long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub iterations: usize,

    /// Search states allowed per tile of a layout
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS_PER_TILE)]
    pub per_tile: usize,

    /// Candidates expanded per search state
    #[arg(short, long, default_value_t = DEFAULT_BRANCH_FACTOR)]
    pub branch: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Engine configuration from the arguments, defaults elsewhere
    pub fn engine_config(&self) -> DescramblerConfig {
        DescramblerConfig {
            offset: self.offset,
            base_width: self.width,
            base_height: self.height,
            max_iters: self.iterations,
            iters_per_tile: self.per_tile,
            branch_factor: self.branch,
            ..DescramblerConfig::default()
        }
    }
}

/// Orchestrates batch descrambling with one shared engine
pub struct FileProcessor {
    cli: Cli,
    engine: Descrambler,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a processor and its engine from the CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments do not form a valid engine configuration
    pub fn new(cli: Cli) -> Result<Self> {
        let engine = Descrambler::new(cli.engine_config())?;
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Ok(Self {
            cli,
            engine,
            progress_manager,
        })
    }

    /// Process files according to CLI arguments
    ///
    /// Images that cannot be descrambled are reported and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, loading or saving fails
    pub fn process(&mut self) -> Result<BatchSummary> {
        let files = self.collect_files()?;
        let mut summary = BatchSummary::default();

        if files.is_empty() {
            return Ok(summary);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            let (solved, from_cache) = self.process_file(file)?;
            summary.count(solved, from_cache);
            if let Some(ref pm) = self.progress_manager {
                pm.complete_file();
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish(&summary);
        }

        Ok(summary)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_png(target) {
                Ok(if self.should_process_file(target) {
                    vec![target.clone()]
                } else {
                    vec![]
                })
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"file is not a PNG image",
                ))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            let entries = std::fs::read_dir(target).map_err(|source| DescrambleError::Io {
                path: Some(target.clone()),
                operation: "read directory",
                source,
            })?;
            for entry in entries {
                let path = entry?.path();
                if is_png(&path) && !is_output(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"not a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        if output_path(input_path).exists() {
            // Allow print for user feedback for skipped files
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print for user feedback on images that could not be restored
    #[allow(clippy::print_stderr)]
    fn process_file(&self, input_path: &Path) -> Result<(bool, bool)> {
        if let Some(ref pm) = self.progress_manager {
            pm.start_file(input_path);
        }

        let output = output_path(input_path);
        match descramble_file(&self.engine, input_path, &output, self.cli.key.as_deref())? {
            Some(restored) => {
                log::info!(
                    "{} -> {} ({}x{} tiles{})",
                    input_path.display(),
                    output.display(),
                    restored.geometry.width,
                    restored.geometry.height,
                    if restored.from_cache { ", cached" } else { "" }
                );
                Ok((true, restored.from_cache))
            }
            None => {
                eprintln!("Could not descramble: {}", input_path.display());
                Ok((false, false))
            }
        }
    }
}

/// Path the result for `input_path` is written to: `<stem>_result.<ext>` alongside it
pub fn output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let extension = input_path.extension().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        extension.to_string_lossy()
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

fn is_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
