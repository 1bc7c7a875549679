use crate::{
    algorithm::{bitset::TileSet, cost::EdgeCostModel},
    spatial::pixels::PixelAccessor,
    spatial::tiles::{EdgeWindow, TileLayout},
};

/// Number of lines probed on each side of the two seams of an open cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeDepth {
    /// Depth of the seam with the cell to the left
    pub vertical: u32,
    /// Depth of the seam with the cell above
    pub horizontal: u32,
}

impl ProbeDepth {
    /// Same depth on both seams
    pub const fn uniform(depth: u32) -> Self {
        Self {
            vertical: depth,
            horizontal: depth,
        }
    }
}

/// Reference bands bordering the open cell of a partial grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeamWindows {
    /// Band left of the open cell (the grid grows rightwards across it)
    pub right: EdgeWindow,
    /// Band above the open cell (the grid grows downwards across it)
    pub bottom: EdgeWindow,
}

/// A tile that could fill the open cell, with its combined seam cost
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Slot index of the tile
    pub tile: usize,
    /// Vertical plus horizontal seam cost
    pub cost: f64,
}

/// Rank the remaining tiles as fillers for the open cell
///
/// The vertical seam is probed first and any tile over the cost model's cutoff
/// is dropped before its horizontal seam is probed; a horizontal seam over the
/// cutoff drops the tile as well. Survivors are sorted by combined cost with a
/// stable sort, so ties keep ascending tile order, and at most `branch_factor`
/// are returned.
pub fn rank_candidates<I: PixelAccessor>(
    image: &I,
    layout: &TileLayout,
    remaining: &TileSet,
    windows: &SeamWindows,
    probe: ProbeDepth,
    branch_factor: usize,
    costs: &mut EdgeCostModel,
) -> Vec<Candidate> {
    let cutoff = costs.cutoff();
    let mut ranked = Vec::with_capacity(remaining.len());

    for index in remaining.iter() {
        let Some(tile) = layout.tile(index) else {
            continue;
        };

        let vertical = costs.edge_cost(image, &windows.right, tile, probe.vertical);
        if vertical > cutoff {
            continue;
        }

        let horizontal = costs.edge_cost(image, &windows.bottom, tile, probe.horizontal);
        if horizontal > cutoff {
            continue;
        }

        ranked.push(Candidate {
            tile: index,
            cost: vertical + horizontal,
        });
    }

    ranked.sort_by(|a, b| a.cost.total_cmp(&b.cost));
    ranked.truncate(branch_factor);
    ranked
}
