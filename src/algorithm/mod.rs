/// Fixed-size set of tile indices still to be placed
pub mod bitset;
/// Bounded least-recently-used map backing every engine table
pub mod cache;
/// Seam cost evaluation and memoization
pub mod cost;
/// Engine orchestration and runtime configuration
pub mod executor;
/// Candidate ranking for the open cell of a partial arrangement
pub mod selection;
/// Confirmation-gated cache of solved arrangements
pub mod solutions;
/// Best-first search over partial arrangements
pub mod solver;
/// Sweep over candidate tile sizes
pub mod sweep;
