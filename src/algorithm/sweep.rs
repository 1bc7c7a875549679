//! Sweep over candidate tile sizes around a base guess
//!
//! The true tile size of a scrambled image is not known up front. Sizes close
//! to the base guess are tried first, alternating below and above it, and the
//! first size the solver fully arranges is taken.

use crate::{
    algorithm::{
        cost::EdgeCostModel,
        selection::ProbeDepth,
        solver::{SearchLimits, SolveOutcome, solve},
    },
    spatial::{
        pixels::PixelAccessor,
        tiles::{TileGeometry, TileLayout},
    },
};
use ndarray::Array2;

/// Tile sizes explored by a sweep
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepRange {
    /// Gap strip width shared by every geometry
    pub offset: u32,
    /// Base tile width
    pub base_width: u32,
    /// Base tile height
    pub base_height: u32,
    /// Distance between neighbouring sizes
    pub step: u32,
    /// Largest deviation from the base size
    pub radius: u32,
}

impl SweepRange {
    /// Geometries in the order they are tried
    ///
    /// Width is the outer loop, height the inner one.
    pub fn geometries(&self) -> Vec<TileGeometry> {
        let widths = size_candidates(self.base_width, self.step, self.radius);
        let heights = size_candidates(self.base_height, self.step, self.radius);

        widths
            .iter()
            .flat_map(|&width| {
                heights
                    .iter()
                    .map(move |&height| TileGeometry::new(width, height, self.offset))
            })
            .collect()
    }
}

/// Sizes `base`, `base - step`, `base + step`, `base - 2·step`, … within `radius`
///
/// Non-positive sizes are skipped. A zero step yields only the base.
pub fn size_candidates(base: u32, step: u32, radius: u32) -> Vec<u32> {
    let mut sizes = Vec::new();
    if base > 0 {
        sizes.push(base);
    }
    if step == 0 {
        return sizes;
    }

    let mut delta = step;
    while delta <= radius {
        if let Some(smaller) = base.checked_sub(delta).filter(|&size| size > 0) {
            sizes.push(smaller);
        }
        if let Some(larger) = base.checked_add(delta) {
            sizes.push(larger);
        }
        delta = match delta.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
    sizes
}

/// What happened when one geometry was tried
#[derive(Clone, Debug, PartialEq)]
pub enum AttemptResult {
    /// The image cannot be partitioned with this geometry
    DoesNotFit,
    /// The search ran out of branches
    QueueExhausted {
        /// States popped
        iterations: usize,
    },
    /// The search ran out of iterations
    BudgetExceeded {
        /// States popped
        iterations: usize,
    },
    /// The search placed every tile
    Solved {
        /// States popped
        iterations: usize,
        /// Sum of seam costs of the arrangement
        cost: f64,
    },
}

/// One geometry tried by the sweep
#[derive(Clone, Debug, PartialEq)]
pub struct SweepAttempt {
    /// Geometry tried
    pub geometry: TileGeometry,
    /// Its outcome
    pub result: AttemptResult,
}

/// A geometry together with the tile order that restores the image
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Solution {
    /// Tile size and gap width
    pub geometry: TileGeometry,
    /// `order[[row, col]]` is the slot index of the tile at `(row, col)`
    pub order: Array2<usize>,
}

/// Every attempt made by a sweep and the winning solution, if any
#[derive(Clone, Debug, PartialEq)]
pub struct SweepReport {
    /// Attempts in the order they were made
    pub attempts: Vec<SweepAttempt>,
    /// First solution found
    pub solution: Option<Solution>,
}

impl SweepReport {
    /// Test whether the sweep found a solution
    pub const fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// States popped over all attempts
    pub fn total_iterations(&self) -> usize {
        self.attempts
            .iter()
            .map(|attempt| match attempt.result {
                AttemptResult::DoesNotFit => 0,
                AttemptResult::QueueExhausted { iterations }
                | AttemptResult::BudgetExceeded { iterations }
                | AttemptResult::Solved { iterations, .. } => iterations,
            })
            .sum()
    }
}

/// Try every geometry of `range` in order until one solves
pub fn sweep<I: PixelAccessor>(
    image: &I,
    range: &SweepRange,
    limits: SearchLimits,
    probe: ProbeDepth,
    costs: &mut EdgeCostModel,
) -> SweepReport {
    let mut attempts = Vec::new();

    for geometry in range.geometries() {
        let Some(layout) = TileLayout::partition(image.width(), image.height(), geometry) else {
            attempts.push(SweepAttempt {
                geometry,
                result: AttemptResult::DoesNotFit,
            });
            continue;
        };

        let result = match solve(image, &layout, limits, probe, costs) {
            SolveOutcome::Solved {
                order,
                iterations,
                cost,
                max_edge_cost,
            } => {
                log::debug!(
                    "{}x{}: solved {} tiles in {iterations} iterations (cost {cost:.2}, worst seam {max_edge_cost:.2})",
                    geometry.width,
                    geometry.height,
                    layout.len()
                );
                attempts.push(SweepAttempt {
                    geometry,
                    result: AttemptResult::Solved { iterations, cost },
                });
                return SweepReport {
                    attempts,
                    solution: Some(Solution { geometry, order }),
                };
            }
            SolveOutcome::QueueExhausted { iterations } => {
                AttemptResult::QueueExhausted { iterations }
            }
            SolveOutcome::BudgetExceeded { iterations } => {
                AttemptResult::BudgetExceeded { iterations }
            }
        };

        log::debug!("{}x{}: {result:?}", geometry.width, geometry.height);
        attempts.push(SweepAttempt { geometry, result });
    }

    SweepReport {
        attempts,
        solution: None,
    }
}
