use bitvec::vec::BitVec;
use std::fmt;

/// Fixed-size bitset of tile indices not yet placed in a partial grid
///
/// Uses the same 0-based slot indices as the tile layout. Iteration is
/// always in ascending index order, which keeps candidate ranking
/// reproducible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileSet {
    bits: BitVec,
}

impl TileSet {
    /// Empty set over `slot_count` slots
    pub fn new(slot_count: usize) -> Self {
        Self {
            bits: BitVec::repeat(false, slot_count),
        }
    }

    /// Set holding every one of `slot_count` slots
    pub fn all(slot_count: usize) -> Self {
        Self {
            bits: BitVec::repeat(true, slot_count),
        }
    }

    /// Number of tile slots the set can hold
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a tile index; out-of-range indices are ignored
    pub fn insert(&mut self, tile: usize) {
        if tile < self.bits.len() {
            self.bits.set(tile, true);
        }
    }

    /// Remove a tile index, reporting whether it was present
    pub fn remove(&mut self, tile: usize) -> bool {
        if tile < self.bits.len() {
            self.bits.replace(tile, false)
        } else {
            false
        }
    }

    /// Whether `tile` is still unplaced
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Whether every tile has been placed
    pub fn is_empty(&self) -> bool {
        !self.bits.any()
    }

    /// Number of unplaced tiles
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate over present tile indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Unplaced tiles in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} remaining {:?}", self.len(), self.capacity(), self.to_vec())
    }
}
