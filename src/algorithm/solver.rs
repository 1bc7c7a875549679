//! Best-first search over partial tile arrangements
//!
//! States are expanded in order of accumulated seam cost. Each expansion fills
//! the next cell in row-major order with one of the best few remaining tiles.
//! The first state popped with no tiles left is the answer.

use crate::{
    algorithm::{
        bitset::TileSet,
        cost::EdgeCostModel,
        selection::{ProbeDepth, SeamWindows, rank_candidates},
    },
    spatial::{grid::PartialGrid, pixels::PixelAccessor, tiles::TileLayout},
};
use ndarray::Array2;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Bounds on a single search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Hard cap on states popped before giving up
    pub max_iters: usize,
    /// States allowed per tile of the layout
    pub iters_per_tile: usize,
    /// Maximum number of candidates expanded per state
    pub branch_factor: usize,
}

impl SearchLimits {
    /// Iteration budget for a layout of `tile_count` tiles
    ///
    /// Grows linearly with the tile count and never exceeds `max_iters`.
    pub const fn budget(&self, tile_count: usize) -> usize {
        let scaled = self.iters_per_tile.saturating_mul(tile_count);
        if scaled < self.max_iters {
            scaled
        } else {
            self.max_iters
        }
    }
}

/// Result of one search over one geometry
#[derive(Clone, Debug, PartialEq)]
pub enum SolveOutcome {
    /// Every tile was placed
    Solved {
        /// `order[[row, col]]` is the slot index of the tile at `(row, col)`
        order: Array2<usize>,
        /// States popped, the final one included
        iterations: usize,
        /// Sum of all seam costs of the arrangement
        cost: f64,
        /// Worst single placement cost along the way
        max_edge_cost: f64,
    },
    /// Every branch was abandoned before all tiles were placed
    QueueExhausted {
        /// States popped
        iterations: usize,
    },
    /// The iteration budget ran out first
    BudgetExceeded {
        /// States popped
        iterations: usize,
    },
}

impl SolveOutcome {
    /// Test whether the search produced an arrangement
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved { .. })
    }

    /// States popped by the search
    pub const fn iterations(&self) -> usize {
        match self {
            Self::Solved { iterations, .. }
            | Self::QueueExhausted { iterations }
            | Self::BudgetExceeded { iterations } => *iterations,
        }
    }
}

/// Partial arrangement together with the tiles still to place
#[derive(Clone, Debug, PartialEq)]
pub struct SearchState {
    /// Tiles placed so far, row-major
    pub grid: PartialGrid,
    /// Tiles not yet placed
    pub remaining: TileSet,
    /// Worst single placement cost so far
    pub max_edge_cost: f64,
}

impl SearchState {
    /// Empty arrangement with every tile of the layout remaining
    pub fn initial(layout: &TileLayout) -> Self {
        Self {
            grid: PartialGrid::new(layout.cols()),
            remaining: TileSet::all(layout.len()),
            max_edge_cost: 0.0,
        }
    }

    /// Test whether every tile has been placed
    pub fn is_terminal(&self) -> bool {
        self.remaining.is_empty()
    }

    /// State with `tile` placed in the open cell at the given cost
    #[must_use]
    pub fn place(&self, tile: usize, cost: f64) -> Self {
        let mut next = self.clone();
        next.grid.push(tile);
        next.remaining.remove(tile);
        next.max_edge_cost = next.max_edge_cost.max(cost);
        next
    }

    /// Reference bands for the open cell
    ///
    /// A cell in column zero is compared against the gap strip left of its
    /// row, a cell in row zero against the gap strip above its column, and any
    /// other cell against the tiles already placed to its left and above.
    pub fn seam_windows(&self, layout: &TileLayout) -> SeamWindows {
        let (row, col) = self.grid.open_cell();

        let right = col
            .checked_sub(1)
            .and_then(|left| self.grid.get(row, left))
            .and_then(|index| layout.tile(index))
            .map_or_else(|| layout.left_strip(row), |tile| tile.right_edge());

        let bottom = row
            .checked_sub(1)
            .and_then(|above| self.grid.get(above, col))
            .and_then(|index| layout.tile(index))
            .map_or_else(|| layout.top_strip(col), |tile| tile.bottom_edge());

        SeamWindows { right, bottom }
    }
}

/// Heap ordering: accumulated cost, then fewest remaining tiles, then push order
#[derive(Clone, Copy, Debug)]
pub struct PriorityKey {
    /// Sum of seam costs of every placement so far
    pub cost: f64,
    /// Tiles still to place
    pub remaining: usize,
    /// Push order, unique per search
    pub sequence: u64,
}

impl PartialEq for PriorityKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriorityKey {}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.remaining.cmp(&other.remaining))
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Frontier {
    key: PriorityKey,
    state: SearchState,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Search for the cheapest full arrangement of the layout's tiles
///
/// States whose remaining count trails the best seen so far by more than two
/// rows are dropped unexpanded. The search stops after
/// [`SearchLimits::budget`] popped states.
pub fn solve<I: PixelAccessor>(
    image: &I,
    layout: &TileLayout,
    limits: SearchLimits,
    probe: ProbeDepth,
    costs: &mut EdgeCostModel,
) -> SolveOutcome {
    let budget = limits.budget(layout.len());
    let stale_margin = 2 * layout.cols();
    let mut heap = BinaryHeap::new();
    let mut sequence = 0_u64;
    let mut iterations = 0;
    let mut min_remaining = layout.len();

    heap.push(Reverse(Frontier {
        key: PriorityKey {
            cost: 0.0,
            remaining: layout.len(),
            sequence,
        },
        state: SearchState::initial(layout),
    }));

    while let Some(Reverse(Frontier { key, state })) = heap.pop() {
        if state.is_terminal() {
            let max_edge_cost = state.max_edge_cost;
            return match state.grid.into_array() {
                Some(order) => SolveOutcome::Solved {
                    order,
                    iterations,
                    cost: key.cost,
                    max_edge_cost,
                },
                None => SolveOutcome::QueueExhausted { iterations },
            };
        }

        if iterations >= budget {
            return SolveOutcome::BudgetExceeded { iterations };
        }
        iterations += 1;

        if key.remaining > min_remaining + stale_margin {
            continue;
        }
        min_remaining = min_remaining.min(key.remaining);

        let windows = state.seam_windows(layout);
        let candidates = rank_candidates(
            image,
            layout,
            &state.remaining,
            &windows,
            probe,
            limits.branch_factor,
            costs,
        );

        for candidate in candidates {
            sequence += 1;
            heap.push(Reverse(Frontier {
                key: PriorityKey {
                    cost: key.cost + candidate.cost,
                    remaining: key.remaining - 1,
                    sequence,
                },
                state: state.place(candidate.tile, candidate.cost),
            }));
        }
    }

    SolveOutcome::QueueExhausted { iterations }
}
