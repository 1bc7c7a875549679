//! Tests for geometry enumeration order and sweep outcomes

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use tiledescramble::algorithm::cost::EdgeCostModel;
    use tiledescramble::algorithm::selection::ProbeDepth;
    use tiledescramble::algorithm::solver::SearchLimits;
    use tiledescramble::algorithm::sweep::{
        AttemptResult, SweepRange, size_candidates, sweep,
    };
    use tiledescramble::spatial::scramble::{
        ScramblePlan, invert_permutation, random_permutation, scramble,
    };
    use tiledescramble::spatial::tiles::TileGeometry;

    const LIMITS: SearchLimits = SearchLimits {
        max_iters: 10_000,
        iters_per_tile: 1_000,
        branch_factor: 4,
    };

    fn smooth_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let (fx, fy) = (f64::from(x), f64::from(y));
            let channel = |v: f64| (128.0 + 90.0 * v).round() as u8;
            Rgb([
                channel((fx / 31.0 + fy / 47.0).sin()),
                channel((fy / 33.0 - fx / 59.0 + 1.3).sin()),
                channel((fx / 43.0 - fy / 37.0).cos()),
            ])
        })
    }

    // 4x3 grid of 32px tiles with a 4px gap: 144x108 scrambled
    fn scrambled_grid(permutation: &[usize]) -> RgbImage {
        let original = smooth_image(128, 96);
        let plan = ScramblePlan::for_canvas(128, 96, TileGeometry::new(32, 32, 4))
            .expect("plan fits");
        scramble(&original, plan, permutation).expect("valid permutation")
    }

    // Sizes alternate below and above the base
    // Verified by emitting all smaller sizes before larger ones
    #[test]
    fn test_size_candidates_alternate() {
        assert_eq!(size_candidates(64, 8, 16), vec![64, 56, 72, 48, 80]);
    }

    // Non-positive sizes are skipped
    #[test]
    fn test_size_candidates_skip_non_positive() {
        assert_eq!(size_candidates(8, 8, 16), vec![8, 16, 24]);
        assert_eq!(size_candidates(0, 4, 4), vec![4]);
    }

    #[test]
    fn test_size_candidates_zero_step_or_radius() {
        assert_eq!(size_candidates(64, 0, 16), vec![64]);
        assert_eq!(size_candidates(64, 8, 0), vec![64]);
    }

    // Width is the outer loop
    #[test]
    fn test_geometries_width_outer() {
        let range = SweepRange {
            offset: 4,
            base_width: 32,
            base_height: 16,
            step: 8,
            radius: 8,
        };
        let sizes: Vec<(u32, u32)> = range
            .geometries()
            .iter()
            .map(|g| (g.width, g.height))
            .collect();
        assert_eq!(
            sizes,
            vec![
                (32, 16),
                (32, 8),
                (32, 24),
                (24, 16),
                (24, 8),
                (24, 24),
                (40, 16),
                (40, 8),
                (40, 24),
            ]
        );
        assert!(range.geometries().iter().all(|g| g.offset == 4));
    }

    // The base geometry solves on the first attempt
    #[test]
    fn test_sweep_solves_at_base() {
        let permutation = random_permutation(12, 11);
        let image = scrambled_grid(&permutation);
        let range = SweepRange {
            offset: 4,
            base_width: 32,
            base_height: 32,
            step: 8,
            radius: 16,
        };
        let mut costs = EdgeCostModel::new(1 << 14, 48.0);

        let report = sweep(&image, &range, LIMITS, ProbeDepth::uniform(2), &mut costs);

        assert!(report.is_solved());
        assert_eq!(report.attempts.len(), 1);
        let solution = report.solution.expect("solved");
        assert_eq!(solution.geometry, TileGeometry::new(32, 32, 4));
        assert_eq!(
            solution.order.iter().copied().collect::<Vec<_>>(),
            invert_permutation(&permutation)
        );
    }

    // Geometries that leave a sliver border are recorded and skipped
    // Verified by solving every geometry regardless of fit
    #[test]
    fn test_sweep_skips_geometries_that_do_not_fit() {
        let permutation = random_permutation(12, 5);
        let image = scrambled_grid(&permutation);
        // Width 43 leaves a 3px sliver on a 144px image
        let range = SweepRange {
            offset: 4,
            base_width: 43,
            base_height: 32,
            step: 11,
            radius: 11,
        };
        let mut costs = EdgeCostModel::new(1 << 14, 48.0);

        let report = sweep(&image, &range, LIMITS, ProbeDepth::uniform(2), &mut costs);

        assert_eq!(report.attempts.len(), 4);
        assert!(
            report
                .attempts
                .iter()
                .take(3)
                .all(|a| a.result == AttemptResult::DoesNotFit && a.geometry.width == 43)
        );
        let last = report.attempts.last().expect("four attempts");
        assert_eq!(last.geometry, TileGeometry::new(32, 32, 4));
        assert!(matches!(last.result, AttemptResult::Solved { .. }));
        assert_eq!(
            report.solution.map(|s| s.order.iter().copied().collect::<Vec<_>>()),
            Some(invert_permutation(&permutation))
        );
    }

    // An image too small for every geometry yields no solution
    #[test]
    fn test_sweep_exhausted() {
        let image = smooth_image(10, 10);
        let range = SweepRange {
            offset: 8,
            base_width: 64,
            base_height: 64,
            step: 8,
            radius: 16,
        };
        let mut costs = EdgeCostModel::new(64, 48.0);

        let report = sweep(&image, &range, LIMITS, ProbeDepth::uniform(2), &mut costs);

        assert!(!report.is_solved());
        assert_eq!(report.attempts.len(), 25);
        assert_eq!(report.total_iterations(), 0);
    }
}
