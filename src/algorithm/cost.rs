//! Seam cost between a reference pixel band and a candidate tile
//!
//! The cost of a seam is the mean pixel distance between the reference lines
//! behind the seam and the candidate's leading lines, mirrored around the
//! seam: the reference line touching the seam is compared with the
//! candidate's first line, the one behind it with the candidate's second line,
//! and so on. Only every second pixel along the seam is sampled.

use crate::algorithm::cache::{BoundedCache, CacheStats};
use crate::spatial::pixels::{PixelAccessor, PixelSample};
use crate::spatial::tiles::{Axis, EdgeWindow, Tile};

/// Pixels skipped between samples along a seam
const SAMPLE_STRIDE: usize = 2;

/// Memoization key for one reference band against one candidate placement
///
/// Keys are coordinate based, so memoized costs are only valid for the image
/// they were computed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    reference: EdgeWindow,
    tile: usize,
    tile_origin: [u32; 2],
    probe_depth: u32,
}

impl EdgeKey {
    /// Key for comparing `reference` against `candidate` at `probe_depth`
    pub const fn new(reference: &EdgeWindow, candidate: &Tile, probe_depth: u32) -> Self {
        Self {
            reference: *reference,
            tile: candidate.index,
            tile_origin: [candidate.origin_x, candidate.origin_y],
            probe_depth,
        }
    }
}

/// Euclidean distance between two samples over all channels
///
/// For single-channel pixels this is the absolute difference.
pub fn pixel_distance(a: &PixelSample, b: &PixelSample) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Mean mirrored pixel distance across the seam between `reference` and `candidate`
///
/// Stops as soon as the mean is certain to exceed `cutoff` and returns the
/// partial mean, which is then already above `cutoff`. A seam with nothing to
/// sample costs zero.
pub fn measure_edge_cost<I: PixelAccessor>(
    image: &I,
    reference: &EdgeWindow,
    candidate: &Tile,
    probe_depth: u32,
    cutoff: f64,
) -> f64 {
    let axis = reference.axis;
    let depth = probe_depth
        .min(reference.depth)
        .min(candidate.extent(axis));
    let across = match axis {
        Axis::Vertical => candidate.height,
        Axis::Horizontal => candidate.width,
    };
    let length = reference.length.min(across);

    let samples_per_line = (length as usize).div_ceil(SAMPLE_STRIDE);
    let total_samples = samples_per_line * depth as usize;
    if total_samples == 0 {
        return 0.0;
    }
    let total = total_samples as f64;

    let mut sum = 0.0;
    for line in 0..depth {
        for along in (0..length).step_by(SAMPLE_STRIDE) {
            let Some([rx, ry]) = reference.reference_pixel(along, line) else {
                continue;
            };
            let [cx, cy] = candidate.leading_pixel(axis, along, line);
            sum += pixel_distance(&image.get(rx, ry), &image.get(cx, cy));
        }
        if sum / total > cutoff {
            return sum / total;
        }
    }

    sum / total
}

/// Memoized seam cost evaluation owned by one engine
pub struct EdgeCostModel {
    memo: BoundedCache<EdgeKey, f64>,
    cutoff: f64,
}

impl EdgeCostModel {
    /// Create a model remembering at most `capacity` seam costs
    ///
    /// `cutoff` is the per-axis cost above which evaluation may stop early.
    pub fn new(capacity: usize, cutoff: f64) -> Self {
        Self {
            memo: BoundedCache::new(capacity),
            cutoff,
        }
    }

    /// Cost above which candidates are pruned
    pub const fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Seam cost of placing `candidate` right after or below `reference`
    ///
    /// Repeated calls with the same window, tile and depth return the stored
    /// value without touching pixels.
    pub fn edge_cost<I: PixelAccessor>(
        &mut self,
        image: &I,
        reference: &EdgeWindow,
        candidate: &Tile,
        probe_depth: u32,
    ) -> f64 {
        let cutoff = self.cutoff;
        self.memo
            .get_or_insert_with(EdgeKey::new(reference, candidate, probe_depth), || {
                measure_edge_cost(image, reference, candidate, probe_depth, cutoff)
            })
    }

    /// Forget every memoized cost
    ///
    /// Must be called before evaluating seams of a different image.
    pub fn reset(&mut self) {
        self.memo.clear();
    }

    /// Number of memoized costs
    pub fn memoized(&self) -> usize {
        self.memo.len()
    }

    /// Memo hit, miss and eviction counts
    pub fn stats(&self) -> CacheStats {
        self.memo.stats()
    }
}
