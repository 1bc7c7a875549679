//! Reassembly of a solved arrangement into the unscrambled image

use crate::io::error::{DescrambleError, Result, unusable_image};
use crate::spatial::pixels::{PixelCanvas, Region};
use crate::spatial::tiles::TileLayout;
use ndarray::Array2;

/// Build the reconstructed image from a scrambled image and its solved arrangement
///
/// `order[[row, col]]` is the slot index of the tile that truly belongs at
/// `(row, col)`. Gap strips are dropped, tile bodies are packed edge to edge,
/// and the unpermuted border right of and below the slot grid is carried over
/// unchanged.
///
/// # Errors
///
/// Returns an error if:
/// - The layout was built for a different image size
/// - `order` does not have the layout's `rows × cols` shape
/// - `order` names a tile index the layout does not have
pub fn stitch<I: PixelCanvas>(image: &I, layout: &TileLayout, order: &Array2<usize>) -> Result<I> {
    if layout.image_size() != (image.width(), image.height()) {
        return Err(unusable_image(&format!(
            "layout for {}x{} applied to {}x{} image",
            layout.image_size().0,
            layout.image_size().1,
            image.width(),
            image.height()
        )));
    }
    if order.dim() != (layout.rows(), layout.cols()) {
        return Err(unusable_image(&format!(
            "arrangement is {}x{} but layout is {}x{}",
            order.dim().0,
            order.dim().1,
            layout.rows(),
            layout.cols()
        )));
    }

    let geometry = layout.geometry();
    let (output_width, output_height) = layout.output_size();
    let mut canvas = I::blank(output_width, output_height);

    for ((row, col), &index) in order.indexed_iter() {
        let tile = layout.tile(index).ok_or(DescrambleError::UnknownTile {
            index,
            tile_count: layout.len(),
        })?;
        canvas.copy_region(
            image,
            Region::new(tile.origin_x, tile.origin_y, tile.width, tile.height),
            col as u32 * geometry.width,
            row as u32 * geometry.height,
        );
    }

    copy_borders(image, layout, &mut canvas);
    Ok(canvas)
}

// Borders are aligned with slot rows and columns, so they lose the same gaps
fn copy_borders<I: PixelCanvas>(image: &I, layout: &TileLayout, canvas: &mut I) {
    let geometry = layout.geometry();
    let residual_x = layout.residual_x();
    let residual_y = layout.residual_y();
    let packed_width = layout.cols() as u32 * geometry.width;
    let packed_height = layout.rows() as u32 * geometry.height;

    if residual_x > 0 {
        for row in 0..layout.rows() as u32 {
            canvas.copy_region(
                image,
                Region::new(
                    layout.grid_width(),
                    row * geometry.stride_y() + geometry.offset,
                    residual_x,
                    geometry.height,
                ),
                packed_width,
                row * geometry.height,
            );
        }
    }

    if residual_y > 0 {
        for col in 0..layout.cols() as u32 {
            canvas.copy_region(
                image,
                Region::new(
                    col * geometry.stride_x() + geometry.offset,
                    layout.grid_height(),
                    geometry.width,
                    residual_y,
                ),
                col * geometry.width,
                packed_height,
            );
        }
    }

    let corner = Region::new(
        layout.grid_width(),
        layout.grid_height(),
        residual_x,
        residual_y,
    );
    if !corner.is_empty() {
        canvas.copy_region(image, corner, packed_width, packed_height);
    }
}
