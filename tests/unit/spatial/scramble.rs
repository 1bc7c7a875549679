//! Tests for fixture scrambling and permutation helpers

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};
    use tiledescramble::spatial::scramble::{
        ScramblePlan, invert_permutation, random_permutation, scramble,
    };
    use tiledescramble::spatial::tiles::TileGeometry;

    // Each true tile is filled with its own index
    fn labelled(cols: u32, rows: u32, size: u32) -> GrayImage {
        GrayImage::from_fn(cols * size, rows * size, |x, y| {
            Luma([((y / size) * cols + x / size) as u8])
        })
    }

    #[test]
    fn test_plan_for_canvas() {
        let plan = ScramblePlan::for_canvas(256, 192, TileGeometry::new(64, 64, 8))
            .expect("plan fits");
        assert_eq!((plan.cols, plan.rows), (4, 3));
        assert_eq!(plan.tile_count(), 12);

        // 2px border is thinner than the gap
        assert!(ScramblePlan::for_canvas(66, 64, TileGeometry::new(64, 64, 8)).is_none());
        assert!(ScramblePlan::for_canvas(10, 10, TileGeometry::new(64, 64, 8)).is_none());
    }

    // Same seed, same permutation
    #[test]
    fn test_random_permutation_is_seeded() {
        let a = random_permutation(20, 42);
        assert_eq!(a, random_permutation(20, 42));

        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_invert_permutation() {
        let permutation = vec![2, 0, 3, 1];
        let inverse = invert_permutation(&permutation);
        assert_eq!(inverse, vec![1, 3, 0, 2]);
        for (slot, &tile) in permutation.iter().enumerate() {
            assert_eq!(inverse[tile], slot);
        }
    }

    // Slot s holds true tile permutation[s] behind an unpermuted gap
    // Verified by placing tiles by inverse permutation
    #[test]
    fn test_scramble_places_bodies() {
        let original = labelled(3, 2, 8);
        let geometry = TileGeometry::new(8, 8, 2);
        let plan = ScramblePlan::for_canvas(24, 16, geometry).expect("plan fits");
        let permutation = vec![4, 0, 5, 1, 3, 2];

        let scrambled = scramble(&original, plan, &permutation).expect("valid permutation");

        assert_eq!(scrambled.dimensions(), (30, 20));
        for (slot, &tile) in permutation.iter().enumerate() {
            let (col, row) = ((slot % 3) as u32, (slot / 3) as u32);
            let body = scrambled.get_pixel(col * 10 + 2 + 3, row * 10 + 2 + 3);
            assert_eq!(body, &Luma([tile as u8]));
        }

        // Gap column before slot (0, 1) holds the last column of true tile 0
        assert_eq!(scrambled.get_pixel(11, 5), &Luma([0]));
        // Leading gap of the first column repeats true tile 0's edge
        assert_eq!(scrambled.get_pixel(0, 5), &Luma([0]));
    }

    #[test]
    fn test_scramble_rejects_bad_permutations() {
        let original = labelled(2, 2, 8);
        let plan = ScramblePlan::for_canvas(16, 16, TileGeometry::new(8, 8, 2)).expect("fits");

        assert!(scramble(&original, plan, &[0, 1, 2]).is_none());
        assert!(scramble(&original, plan, &[0, 1, 1, 3]).is_none());
        assert!(scramble(&original, plan, &[0, 1, 2, 9]).is_none());

        let wrong_plan = ScramblePlan { cols: 3, ..plan };
        assert!(scramble(&original, wrong_plan, &[0, 1, 2, 3, 4, 5]).is_none());
    }
}
