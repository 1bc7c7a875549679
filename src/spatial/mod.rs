//! Spatial data structures and image reassembly
//!
//! This module contains spatial-related functionality including:
//! - Pixel access over any image buffer format
//! - Tile geometry, layouts and seam windows
//! - Partial arrangements built by the search
//! - Stitching and scrambling of tile grids

/// Partial arrangement of placed tiles
pub mod grid;
/// Format-independent pixel access and region copies
pub mod pixels;
/// Grid scrambling used to build fixtures
pub mod scramble;
/// Reassembly of a scrambled image from a tile order
pub mod stitch;
/// Tile geometry and image partitioning
pub mod tiles;

pub use grid::PartialGrid;
pub use tiles::{TileGeometry, TileLayout};
