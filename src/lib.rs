//! Restoration of images whose rectangular tiles were shuffled by a grid scrambler
//!
//! The scrambler cuts an image into equal tiles, permutes them and leaves a thin
//! gap strip of unpermuted pixels before each tile. The engine recovers the tile
//! size by sweeping candidate geometries, finds the true arrangement with a
//! best-first search over seam costs, and stitches the tiles back together.

#![forbid(unsafe_code)]

/// Seam costs, candidate ranking, search, geometry sweep and the engine
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Pixel access, tile layouts and image reassembly
pub mod spatial;

pub use algorithm::executor::{Descrambler, DescramblerConfig, Restoration};
pub use io::error::{DescrambleError, Result};
