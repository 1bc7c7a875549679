//! Grid scrambling for fixtures and benchmarks
//!
//! Produces scrambled images in exactly the layout the solver expects: tile
//! bodies permuted, gap strips and the outer border left in true order. Gap
//! strips in the first row and column have no true neighbour, so they repeat
//! the nearest true pixel.

use crate::spatial::pixels::{PixelCanvas, Region};
use crate::spatial::tiles::TileGeometry;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Shape of the scramble applied to a canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScramblePlan {
    /// Tile size and gap width
    pub geometry: TileGeometry,
    /// Tiles per row
    pub cols: u32,
    /// Tiles per column
    pub rows: u32,
}

impl ScramblePlan {
    /// Largest plan that fits an original canvas of the given size
    ///
    /// Returns `None` if no whole tile fits or a leftover border would be
    /// narrower than the gap.
    pub const fn for_canvas(width: u32, height: u32, geometry: TileGeometry) -> Option<Self> {
        if geometry.width == 0 || geometry.height == 0 {
            return None;
        }
        let cols = width / geometry.width;
        let rows = height / geometry.height;
        let residual_x = width % geometry.width;
        let residual_y = height % geometry.height;
        if cols == 0 || rows == 0 {
            return None;
        }
        if (residual_x != 0 && residual_x < geometry.offset)
            || (residual_y != 0 && residual_y < geometry.offset)
        {
            return None;
        }
        Some(Self {
            geometry,
            cols,
            rows,
        })
    }

    /// Number of tiles
    pub const fn tile_count(&self) -> usize {
        (self.cols * self.rows) as usize
    }
}

/// Seeded random permutation of `0..count`
pub fn random_permutation(count: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut permutation: Vec<usize> = (0..count).collect();
    permutation.shuffle(&mut rng);
    permutation
}

/// Inverse of a permutation: `inverse[permutation[i]] == i`
pub fn invert_permutation(permutation: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; permutation.len()];
    for (slot, &tile) in permutation.iter().enumerate() {
        if let Some(entry) = inverse.get_mut(tile) {
            *entry = slot;
        }
    }
    inverse
}

/// Scramble `original` so slot `s` holds the true tile `permutation[s]`
///
/// True tiles are numbered row-major. Returns `None` if the plan does not fit
/// the canvas or `permutation` is not a permutation of the plan's tiles.
pub fn scramble<I: PixelCanvas>(
    original: &I,
    plan: ScramblePlan,
    permutation: &[usize],
) -> Option<I> {
    let fitted = ScramblePlan::for_canvas(original.width(), original.height(), plan.geometry)?;
    if fitted != plan || !is_permutation(permutation, plan.tile_count()) {
        return None;
    }

    let geometry = plan.geometry;
    let residual_x = original.width() - plan.cols * geometry.width;
    let residual_y = original.height() - plan.rows * geometry.height;
    let width = plan.cols * geometry.stride_x() + residual_x;
    let height = plan.rows * geometry.stride_y() + residual_y;

    let horizontal = SlotAxis {
        tile: geometry.width,
        gap: geometry.offset,
        count: plan.cols,
    };
    let vertical = SlotAxis {
        tile: geometry.height,
        gap: geometry.offset,
        count: plan.rows,
    };

    let mut scrambled = I::blank(width, height);
    for y in 0..height {
        let (true_y, body_y) = vertical.locate(y);
        for x in 0..width {
            let (true_x, body_x) = horizontal.locate(x);
            let [source_x, source_y] = match (body_x, body_y) {
                (Some((col, local_x)), Some((row, local_y))) => {
                    let slot = (row * plan.cols + col) as usize;
                    let tile = permutation.get(slot).copied().unwrap_or(slot) as u32;
                    [
                        (tile % plan.cols) * geometry.width + local_x,
                        (tile / plan.cols) * geometry.height + local_y,
                    ]
                }
                _ => [true_x, true_y],
            };
            scrambled.copy_region(original, Region::new(source_x, source_y, 1, 1), x, y);
        }
    }

    Some(scrambled)
}

fn is_permutation(permutation: &[usize], count: usize) -> bool {
    if permutation.len() != count {
        return false;
    }
    let mut seen = vec![false; count];
    permutation.iter().all(|&tile| {
        seen.get_mut(tile)
            .is_some_and(|flag| !std::mem::replace(flag, true))
    })
}

/// Mapping of one scrambled axis back onto the original canvas
struct SlotAxis {
    tile: u32,
    gap: u32,
    count: u32,
}

impl SlotAxis {
    /// True coordinate of scrambled position `s`, plus `(slot, offset)` inside a tile body
    fn locate(&self, s: u32) -> (u32, Option<(u32, u32)>) {
        let stride = self.tile + self.gap;
        let grid = self.count * stride;
        if s >= grid {
            return (self.count * self.tile + (s - grid), None);
        }

        let slot = s / stride;
        let local = s % stride;
        let true_coordinate = (slot * self.tile + local).saturating_sub(self.gap);
        let body = (local >= self.gap).then(|| (slot, local - self.gap));
        (true_coordinate, body)
    }
}
