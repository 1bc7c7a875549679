//! Tests for consistency between engine constants

#[cfg(test)]
mod tests {
    use tiledescramble::io::configuration::{
        DEFAULT_BRANCH_FACTOR, DEFAULT_CACHE_CAPACITY, DEFAULT_ITERATIONS_PER_TILE,
        DEFAULT_MAX_ITERATIONS, DEFAULT_MEMO_CAPACITY, DEFAULT_OFFSET, DEFAULT_PROBE_DEPTH,
        DEFAULT_TILE_SIZE, MAX_INDIVIDUAL_COST, OUTPUT_SUFFIX, PENDING_CACHE_NUM,
        PROGRESS_BAR_WIDTH, SWEEP_RADIUS, SWEEP_STEP,
    };

    // Probing deeper than the gap would read past the reference strips
    #[test]
    fn test_probe_depth_within_offset() {
        assert!(DEFAULT_PROBE_DEPTH >= 1);
        assert!(DEFAULT_PROBE_DEPTH <= DEFAULT_OFFSET);
    }

    // The sweep must never step down to a non-positive size around the default
    #[test]
    fn test_sweep_stays_positive() {
        assert!(SWEEP_STEP > 0);
        assert!(SWEEP_RADIUS < DEFAULT_TILE_SIZE);
        assert_eq!(SWEEP_RADIUS % SWEEP_STEP, 0);
    }

    #[test]
    fn test_search_and_cache_defaults() {
        assert_eq!(PENDING_CACHE_NUM, 3);
        assert!(DEFAULT_ITERATIONS_PER_TILE > 0);
        // Layouts of up to a thousand tiles get their full per-tile budget
        assert!(DEFAULT_MAX_ITERATIONS >= DEFAULT_ITERATIONS_PER_TILE * 1000);
        assert!(DEFAULT_BRANCH_FACTOR > 0);
        assert!(DEFAULT_CACHE_CAPACITY > 0);
        assert!(DEFAULT_MEMO_CAPACITY > DEFAULT_CACHE_CAPACITY);
        assert!(MAX_INDIVIDUAL_COST > 0.0 && MAX_INDIVIDUAL_COST < 255.0);
    }

    #[test]
    fn test_output_settings() {
        assert_eq!(OUTPUT_SUFFIX, "_result");
        assert!(PROGRESS_BAR_WIDTH > 0);
    }
}
