//! Tile geometry and the partition of a scrambled image into tiles
//!
//! A scrambled image is a grid of slots, each `(width + offset) × (height + offset)`.
//! The leading `offset` columns and rows of a slot are gap strips holding
//! unpermuted content from just left of and just above the true tile for that
//! cell. The rest of the slot is the tile body, which holds a permuted tile.
//! Whatever is left over on the right and bottom after the last full slot is an
//! unpermuted border.

/// Candidate tile size together with the scrambler's gap width
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileGeometry {
    /// Tile body width in pixels
    pub width: u32,
    /// Tile body height in pixels
    pub height: u32,
    /// Gap strip width in pixels
    pub offset: u32,
}

impl TileGeometry {
    /// Create a geometry
    pub const fn new(width: u32, height: u32, offset: u32) -> Self {
        Self {
            width,
            height,
            offset,
        }
    }

    /// Horizontal distance between consecutive slots
    pub const fn stride_x(&self) -> u32 {
        self.width.saturating_add(self.offset)
    }

    /// Vertical distance between consecutive slots
    pub const fn stride_y(&self) -> u32 {
        self.height.saturating_add(self.offset)
    }
}

/// Seam direction probed by an edge comparison
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Seam runs top to bottom; the candidate extends the row to the right
    Vertical,
    /// Seam runs left to right; the candidate extends the column downwards
    Horizontal,
}

/// Band of reference pixels lying directly before a seam
///
/// For [`Axis::Vertical`] `(x, y)` is the top pixel of the column touching the
/// seam and deeper lines lie further left. For [`Axis::Horizontal`] it is the
/// left pixel of the row touching the seam and deeper lines lie further up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeWindow {
    /// Seam direction
    pub axis: Axis,
    /// Column of the seam-adjacent reference line start
    pub x: u32,
    /// Row of the seam-adjacent reference line start
    pub y: u32,
    /// Number of pixels along the seam
    pub length: u32,
    /// Number of reference lines available behind the seam
    pub depth: u32,
}

impl EdgeWindow {
    /// Reference pixel `along` pixels down the seam and `behind` lines away from it
    ///
    /// Returns `None` if the window is not that deep.
    pub const fn reference_pixel(&self, along: u32, behind: u32) -> Option<[u32; 2]> {
        if behind >= self.depth {
            return None;
        }
        match self.axis {
            Axis::Vertical => {
                if behind > self.x {
                    return None;
                }
                Some([self.x - behind, self.y + along])
            }
            Axis::Horizontal => {
                if behind > self.y {
                    return None;
                }
                Some([self.x + along, self.y - behind])
            }
        }
    }
}

/// One tile body in the scrambled buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    /// Row-major slot position in the scrambled image
    pub index: usize,
    /// Left edge of the body in the scrambled buffer
    pub origin_x: u32,
    /// Top edge of the body in the scrambled buffer
    pub origin_y: u32,
    /// Body width in pixels
    pub width: u32,
    /// Body height in pixels
    pub height: u32,
}

impl Tile {
    /// Reference band along this tile's right edge
    pub const fn right_edge(&self) -> EdgeWindow {
        EdgeWindow {
            axis: Axis::Vertical,
            x: self.origin_x + self.width - 1,
            y: self.origin_y,
            length: self.height,
            depth: self.width,
        }
    }

    /// Reference band along this tile's bottom edge
    pub const fn bottom_edge(&self) -> EdgeWindow {
        EdgeWindow {
            axis: Axis::Horizontal,
            x: self.origin_x,
            y: self.origin_y + self.height - 1,
            length: self.width,
            depth: self.height,
        }
    }

    /// Leading-band pixel `along` pixels down the seam and `into` lines inside the tile
    pub const fn leading_pixel(&self, axis: Axis, along: u32, into: u32) -> [u32; 2] {
        match axis {
            Axis::Vertical => [self.origin_x + into, self.origin_y + along],
            Axis::Horizontal => [self.origin_x + along, self.origin_y + into],
        }
    }

    /// Number of lines the tile extends away from a seam on `axis`
    pub const fn extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Vertical => self.width,
            Axis::Horizontal => self.height,
        }
    }
}

/// Partition of a scrambled image into slots for one geometry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileLayout {
    geometry: TileGeometry,
    image_width: u32,
    image_height: u32,
    cols: usize,
    rows: usize,
    tiles: Vec<Tile>,
}

impl TileLayout {
    /// Partition an image of the given size, or `None` if the geometry does not fit
    ///
    /// A geometry fits when at least one slot fits on each axis and each
    /// leftover border is either empty or at least as wide as the gap, since a
    /// thinner sliver cannot be a border strip.
    pub fn partition(image_width: u32, image_height: u32, geometry: TileGeometry) -> Option<Self> {
        if geometry.width == 0 || geometry.height == 0 {
            return None;
        }

        let cols = image_width / geometry.stride_x();
        let rows = image_height / geometry.stride_y();
        if cols == 0 || rows == 0 {
            return None;
        }

        let residual_x = image_width - cols * geometry.stride_x();
        let residual_y = image_height - rows * geometry.stride_y();
        let fits = |residual: u32| residual == 0 || residual >= geometry.offset;
        if !fits(residual_x) || !fits(residual_y) {
            return None;
        }

        let mut tiles = Vec::with_capacity((cols * rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                tiles.push(Tile {
                    index: (row * cols + col) as usize,
                    origin_x: col * geometry.stride_x() + geometry.offset,
                    origin_y: row * geometry.stride_y() + geometry.offset,
                    width: geometry.width,
                    height: geometry.height,
                });
            }
        }

        Some(Self {
            geometry,
            image_width,
            image_height,
            cols: cols as usize,
            rows: rows as usize,
            tiles,
        })
    }

    /// Geometry this layout was built for
    pub const fn geometry(&self) -> TileGeometry {
        self.geometry
    }

    /// Number of slot columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of slot rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Test whether the layout holds no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles in slot order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile occupying the given slot index
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Scrambled image size this layout partitions
    pub const fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    /// Width of the tiled part of the scrambled image, gaps included
    pub const fn grid_width(&self) -> u32 {
        self.cols as u32 * self.geometry.stride_x()
    }

    /// Height of the tiled part of the scrambled image, gaps included
    pub const fn grid_height(&self) -> u32 {
        self.rows as u32 * self.geometry.stride_y()
    }

    /// Width of the unpermuted border right of the last slot column
    pub const fn residual_x(&self) -> u32 {
        self.image_width - self.grid_width()
    }

    /// Height of the unpermuted border below the last slot row
    pub const fn residual_y(&self) -> u32 {
        self.image_height - self.grid_height()
    }

    /// Size of the image once every gap is removed
    pub const fn output_size(&self) -> (u32, u32) {
        (
            self.cols as u32 * self.geometry.width + self.residual_x(),
            self.rows as u32 * self.geometry.height + self.residual_y(),
        )
    }

    /// Gap strip left of the true tile in `row`, column zero
    pub const fn left_strip(&self, row: usize) -> EdgeWindow {
        let offset = self.geometry.offset;
        EdgeWindow {
            axis: Axis::Vertical,
            x: offset.saturating_sub(1),
            y: row as u32 * self.geometry.stride_y() + offset,
            length: self.geometry.height,
            depth: offset,
        }
    }

    /// Gap strip above the true tile in row zero, `col`
    pub const fn top_strip(&self, col: usize) -> EdgeWindow {
        let offset = self.geometry.offset;
        EdgeWindow {
            axis: Axis::Horizontal,
            x: col as u32 * self.geometry.stride_x() + offset,
            y: offset.saturating_sub(1),
            length: self.geometry.width,
            depth: offset,
        }
    }
}
