//! Source image decoding and tiling plan

use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use image::{RgbaImage, imageops};
use std::path::Path;
use tracing::warn;

/// How a source raster divides into square tiles
///
/// Block counts are floor-divided: when the raster size is not a multiple of
/// the tile edge, the trailing partial column and row of pixels are excluded
/// from cataloging rather than padded or wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tiling {
    /// Edge length of a tile in pixels
    pub tile_edge: u32,
    /// Number of complete tile columns
    pub columns: usize,
    /// Number of complete tile rows
    pub rows: usize,
    /// Pixels dropped from the right edge
    pub excluded_width: u32,
    /// Pixels dropped from the bottom edge
    pub excluded_height: u32,
}

impl Tiling {
    /// Plan the tiling of a `width` x `height` raster
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tile_edge` is zero
    /// - The raster is smaller than a single tile in either dimension
    pub fn plan(width: u32, height: u32, tile_edge: u32) -> Result<Self> {
        if tile_edge == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &tile_edge,
                &"tile edge must be at least one pixel",
            ));
        }

        let columns = (width / tile_edge) as usize;
        let rows = (height / tile_edge) as usize;
        if columns == 0 || rows == 0 {
            return Err(AlgorithmError::InvalidSourceData {
                reason: format!(
                    "source image {width}x{height} is smaller than one {tile_edge}x{tile_edge} tile"
                ),
            });
        }

        Ok(Self {
            tile_edge,
            columns,
            rows,
            excluded_width: width % tile_edge,
            excluded_height: height % tile_edge,
        })
    }

    /// Whether every source pixel belongs to some tile
    pub const fn is_exact(&self) -> bool {
        self.excluded_width == 0 && self.excluded_height == 0
    }

    /// Human-readable note about excluded pixels, `None` for exact tilings
    pub fn diagnostic(&self) -> Option<String> {
        (!self.is_exact()).then(|| {
            format!(
                "tile size {edge} leaves {w}px right and {h}px below unused, keeping {c}x{r} tiles",
                edge = self.tile_edge,
                w = self.excluded_width,
                h = self.excluded_height,
                c = self.columns,
                r = self.rows,
            )
        })
    }
}

/// Decoded source image in RGBA8
pub struct SourceRaster {
    pixels: RgbaImage,
}

impl SourceRaster {
    /// Decode an image file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or read
    /// - The file is not a supported image format
    pub fn from_image_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
            path: path_buf,
            source: e,
        })?;

        Ok(Self::from_rgba(img.to_rgba8()))
    }

    /// Wrap an already decoded image
    pub const fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Underlying pixel buffer
    pub const fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Plan tiling with the given edge, warning about excluded pixels
    ///
    /// # Errors
    ///
    /// Propagates the validation errors of [`Tiling::plan`]
    pub fn tiling(&self, tile_edge: u32) -> Result<Tiling> {
        let tiling = Tiling::plan(self.width(), self.height(), tile_edge)?;
        if let Some(note) = tiling.diagnostic() {
            warn!(
                width = self.width(),
                height = self.height(),
                tile_edge,
                "{note}"
            );
        }
        Ok(tiling)
    }

    /// Copy out the tile block at grid position `(column, row)`
    pub fn block(&self, column: usize, row: usize, tile_edge: u32) -> RgbaImage {
        let x = column as u32 * tile_edge;
        let y = row as u32 * tile_edge;
        imageops::crop_imm(&self.pixels, x, y, tile_edge, tile_edge).to_image()
    }
}
