//! Tests for tile geometry, partitioning and seam windows

#[cfg(test)]
mod tests {
    use tiledescramble::spatial::tiles::{Axis, EdgeWindow, TileGeometry, TileLayout};

    #[test]
    fn test_geometry_strides() {
        let geometry = TileGeometry::new(64, 48, 8);
        assert_eq!(geometry.stride_x(), 72);
        assert_eq!(geometry.stride_y(), 56);
    }

    // 4x3 tiles of 64px with an 8px gap
    // Verified by dropping the gap from the tile origin
    #[test]
    fn test_partition_counts_and_origins() {
        let layout = TileLayout::partition(288, 216, TileGeometry::new(64, 64, 8))
            .expect("geometry fits");
        assert_eq!(layout.cols(), 4);
        assert_eq!(layout.rows(), 3);
        assert_eq!(layout.len(), 12);
        assert!(!layout.is_empty());

        let tile = layout.tile(5).expect("tile 5");
        assert_eq!((tile.origin_x, tile.origin_y), (80, 80));
        assert_eq!(tile.index, 5);
        assert!(layout.tile(12).is_none());
        assert_eq!(layout.output_size(), (256, 192));
        assert_eq!(layout.residual_x(), 0);
        assert_eq!(layout.image_size(), (288, 216));
    }

    // A border thinner than the gap cannot exist
    #[test]
    fn test_partition_rejects_sliver_border() {
        let geometry = TileGeometry::new(10, 10, 4);
        // 2 slots of 14 plus a 2px sliver
        assert!(TileLayout::partition(30, 28, geometry).is_none());
        assert!(TileLayout::partition(32, 28, geometry).is_some());
    }

    #[test]
    fn test_partition_rejects_degenerate() {
        assert!(TileLayout::partition(100, 100, TileGeometry::new(0, 10, 4)).is_none());
        assert!(TileLayout::partition(10, 100, TileGeometry::new(10, 10, 4)).is_none());
    }

    #[test]
    fn test_residual_border_sizes() {
        let layout = TileLayout::partition(112, 78, TileGeometry::new(32, 32, 4))
            .expect("geometry fits");
        assert_eq!(layout.grid_width(), 108);
        assert_eq!(layout.grid_height(), 72);
        assert_eq!(layout.residual_x(), 4);
        assert_eq!(layout.residual_y(), 6);
        assert_eq!(layout.output_size(), (100, 70));
    }

    // Gap strips sit directly before the first body of their row or column
    #[test]
    fn test_strip_windows() {
        let layout = TileLayout::partition(288, 216, TileGeometry::new(64, 64, 8))
            .expect("geometry fits");

        let left = layout.left_strip(2);
        assert_eq!(left.axis, Axis::Vertical);
        assert_eq!((left.x, left.y), (7, 152));
        assert_eq!((left.length, left.depth), (64, 8));

        let top = layout.top_strip(1);
        assert_eq!(top.axis, Axis::Horizontal);
        assert_eq!((top.x, top.y), (80, 7));
        assert_eq!((top.length, top.depth), (64, 8));
    }

    #[test]
    fn test_tile_edges() {
        let layout = TileLayout::partition(288, 216, TileGeometry::new(64, 64, 8))
            .expect("geometry fits");
        let tile = layout.tile(0).expect("tile 0");

        let right = tile.right_edge();
        assert_eq!((right.x, right.y, right.depth), (71, 8, 64));
        let bottom = tile.bottom_edge();
        assert_eq!((bottom.x, bottom.y, bottom.depth), (8, 71, 64));

        assert_eq!(tile.leading_pixel(Axis::Vertical, 3, 1), [9, 11]);
        assert_eq!(tile.leading_pixel(Axis::Horizontal, 3, 1), [11, 9]);
        assert_eq!(tile.extent(Axis::Vertical), 64);
    }

    // Reference pixels run away from the seam and stop at the window depth
    #[test]
    fn test_reference_pixel_bounds() {
        let window = EdgeWindow {
            axis: Axis::Vertical,
            x: 5,
            y: 10,
            length: 4,
            depth: 3,
        };
        assert_eq!(window.reference_pixel(2, 0), Some([5, 12]));
        assert_eq!(window.reference_pixel(2, 2), Some([3, 12]));
        assert_eq!(window.reference_pixel(0, 3), None);

        let edge = EdgeWindow {
            axis: Axis::Horizontal,
            x: 0,
            y: 1,
            length: 4,
            depth: 4,
        };
        assert_eq!(edge.reference_pixel(1, 1), Some([1, 0]));
        assert_eq!(edge.reference_pixel(1, 2), None);
    }
}
