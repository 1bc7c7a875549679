//! Batch progress display for descrambling runs

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tallies of a batch run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Images solved by search
    pub solved: usize,
    /// Images restored from a trusted cached solution
    pub replayed: usize,
    /// Images no geometry could be solved for
    pub failed: usize,
}

impl BatchSummary {
    /// Number of images handled
    pub const fn total(&self) -> usize {
        self.solved + self.replayed + self.failed
    }

    /// Count one handled image
    pub const fn count(&mut self, solved: bool, from_cache: bool) {
        match (solved, from_cache) {
            (false, _) => self.failed += 1,
            (true, true) => self.replayed += 1,
            (true, false) => self.solved += 1,
        }
    }
}

/// Single progress bar advancing once per processed file
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no bar shown yet
    pub const fn new() -> Self {
        Self { bar: None }
    }

    /// Show a bar sized for `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        bar.enable_steady_tick(Duration::from_millis(250));
        self.bar = Some(bar);
    }

    /// Show the file currently being solved
    pub fn start_file(&self, path: &Path) {
        if let Some(ref bar) = self.bar {
            bar.set_message(display_name(path));
        }
    }

    /// Advance the bar past a finished file
    pub fn complete_file(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Replace the bar with a final tally line
    pub fn finish(&self, summary: &BatchSummary) {
        if let Some(ref bar) = self.bar {
            bar.finish_with_message(format!(
                "{} solved, {} from cache, {} failed",
                summary.solved, summary.replayed, summary.failed
            ));
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
