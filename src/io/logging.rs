//! Diagnostic log output for the command-line tool

use crate::io::error::{DescrambleError, Result};
use env_logger::{Builder, Target, WriteStyle, fmt::Formatter};
use log::{Level, LevelFilter};
use std::io::Write;

/// Log level selected by the number of `-v` flags
pub const fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger writing `LEVEL message` lines to stderr
///
/// `RUST_LOG`, when set, overrides the level chosen by `verbosity`.
///
/// # Errors
///
/// Returns an error if a global logger is already installed.
pub fn init_logger(verbosity: u8) -> Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(level_for_verbosity(verbosity))
        .parse_default_env()
        .write_style(WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf: &mut Formatter, record| {
            writeln!(buf, "{} {}", level_tag(record.level()), record.args())
        });

    builder
        .try_init()
        .map_err(|e| DescrambleError::Logging {
            reason: e.to_string(),
        })
}

/// Fixed-width tag printed before each message
pub const fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
