//! Tile geometry and tile-major pixel traversal
//!
//! A tiled resource stores the pixels of the first tile contiguously,
//! followed by the second tile and so on, so the runtime can index a tile
//! directly with `tile_index * stride`. The geometry here decides how an
//! image is cut into tiles and in which order its pixels are visited.

/// How an image is divided into tiles.
///
/// Invariant: `cols * tile_width` equals the image width and
/// `rows * tile_height` equals the image height. When no valid tile size is
/// given the whole image is a single tile, which makes the untiled and tiled
/// paths the same traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGeometry {
    pub tile_width: u32,
    pub tile_height: u32,
    pub rows: u32,
    pub cols: u32,
}

impl TileGeometry {
    /// Build the geometry for an image, applying an optional tile size.
    ///
    /// The tile size is only honored when both dimensions divide the image
    /// exactly; otherwise the geometry silently degrades to one tile
    /// covering the whole image. Degrading resets the tile dimensions too,
    /// so the pixel-count invariant holds on every path.
    pub fn new(width: u32, height: u32, tile: Option<(u32, u32)>) -> TileGeometry {
        if let Some((tile_width, tile_height)) = tile {
            if tile_width > 0
                && tile_height > 0
                && width % tile_width == 0
                && height % tile_height == 0
            {
                return TileGeometry {
                    tile_width,
                    tile_height,
                    rows: height / tile_height,
                    cols: width / tile_width,
                };
            }
        }
        TileGeometry {
            tile_width: width,
            tile_height: height,
            rows: 1,
            cols: 1,
        }
    }

    /// Total number of tiles.
    pub fn tile_count(self) -> u32 {
        self.rows * self.cols
    }

    /// Number of pixels in one tile.
    pub fn pixels_per_tile(self) -> u32 {
        self.tile_width * self.tile_height
    }

    /// Total number of pixels in the image.
    pub fn pixel_count(self) -> u32 {
        self.pixels_per_tile() * self.tile_count()
    }

    /// Storage units occupied by one tile in the packed stream: bytes for
    /// the 3-byte alpha format, 16-bit elements otherwise.
    pub fn tile_stride(self, alpha: bool) -> u32 {
        if alpha {
            self.pixels_per_tile() * 3
        } else {
            self.pixels_per_tile()
        }
    }

    /// Absolute pixel coordinates in packed-stream order.
    ///
    /// Tiles are visited left-to-right, top-to-bottom, and within each tile
    /// pixels are visited row by row, left-to-right. Every image pixel is
    /// yielded exactly once.
    pub fn coords(self) -> impl Iterator<Item = (u32, u32)> {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).flat_map(move |col| {
                (0..self.tile_height).flat_map(move |y| {
                    (0..self.tile_width).map(move |x| {
                        (col * self.tile_width + x, row * self.tile_height + y)
                    })
                })
            })
        })
    }
}
