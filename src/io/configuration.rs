//! Engine constants and runtime configuration defaults

// Scramble geometry defaults
/// Width in pixels of the gap strip the scrambler leaves before each tile
pub const DEFAULT_OFFSET: u32 = 8;
/// Initial tile width and height guess for the geometry sweep
pub const DEFAULT_TILE_SIZE: u32 = 64;

// Geometry sweep
/// Distance between neighbouring tile sizes tried by the sweep
pub const SWEEP_STEP: u32 = 8;
/// Largest deviation from the base tile size tried by the sweep
pub const SWEEP_RADIUS: u32 = 16;

// Search limits
/// Hard cap on search states popped per geometry attempt
pub const DEFAULT_MAX_ITERATIONS: usize = 200_000;
/// Search states allowed per tile before a geometry attempt gives up
pub const DEFAULT_ITERATIONS_PER_TILE: usize = 100;
/// Number of ranked candidates expanded per search state
pub const DEFAULT_BRANCH_FACTOR: usize = 4;
/// Number of pixel lines probed on each side of a seam
pub const DEFAULT_PROBE_DEPTH: u32 = 1;

// Any seam averaging above this is never a true neighbour
/// Per-axis seam cost above which a candidate is pruned
pub const MAX_INDIVIDUAL_COST: f64 = 48.0;

// Solution cache
/// Independent confirmations needed before a solution is trusted
pub const PENDING_CACHE_NUM: usize = 3;
/// Maximum number of source keys tracked by the solution cache
pub const DEFAULT_CACHE_CAPACITY: usize = 256;
/// Maximum number of memoized seam costs
pub const DEFAULT_MEMO_CAPACITY: usize = 1 << 18;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
