/// Command-line interface and batch file processing
pub mod cli;
/// Engine constants and defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Loading, descrambling and saving image files
pub mod image;
/// Log output setup for the binary
pub mod logging;
/// Batch progress display
pub mod progress;
