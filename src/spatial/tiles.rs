//! Tile extraction, cataloging and fingerprint grids
//!
//! Splits a source raster into non-overlapping square blocks, deduplicates
//! them by content fingerprint and counts how often each distinct block
//! occurs. The per-block fingerprints form the source [`TileMap`] from which
//! adjacency is learned.

use crate::analysis::patterns::{SourceRaster, Tiling};
use crate::io::error::{AlgorithmError, Result, computation_error};
use crate::spatial::direction::Direction;
use crate::spatial::fingerprint::Fingerprint;
use image::RgbaImage;
use ndarray::Array2;
use std::collections::BTreeMap;
use tracing::debug;

/// A distinct tile with its observed frequency
#[derive(Debug, Clone)]
pub struct Tile {
    fingerprint: Fingerprint,
    weight: u32,
    pixels: RgbaImage,
}

impl Tile {
    /// Content fingerprint
    pub const fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Number of source blocks with identical content
    pub const fn weight(&self) -> u32 {
        self.weight
    }

    /// Pixel block of the first occurrence
    pub const fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// 2-D grid of fingerprints addressed by `(x, y)`
///
/// Used both for the source grid that adjacency is learned from and for the
/// fully resolved output grid handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    /// Stored as `(row, column)`
    tiles: Array2<Fingerprint>,
}

impl TileMap {
    /// Build a map from row-major fingerprints
    ///
    /// # Errors
    ///
    /// Returns an error if `tiles.len()` is not `columns * rows`
    pub fn from_row_major(columns: usize, rows: usize, tiles: Vec<Fingerprint>) -> Result<Self> {
        let tiles = Array2::from_shape_vec((rows, columns), tiles)
            .map_err(|e| computation_error("tile map shape", &e))?;
        Ok(Self { tiles })
    }

    /// Width in tiles
    pub fn columns(&self) -> usize {
        self.tiles.ncols()
    }

    /// Height in tiles
    pub fn rows(&self) -> usize {
        self.tiles.nrows()
    }

    /// Fingerprint at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<Fingerprint> {
        self.tiles.get((y, x)).copied()
    }

    /// Fingerprint of the neighbor of `(x, y)` in `direction`, if in bounds
    pub fn neighbor(&self, x: usize, y: usize, direction: Direction) -> Option<Fingerprint> {
        let (nx, ny) = direction.step(x, y, self.columns(), self.rows())?;
        self.get(nx, ny)
    }

    /// All cells as `((x, y), fingerprint)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), Fingerprint)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((row, col), fingerprint)| ((col, row), *fingerprint))
    }
}

/// Deduplicated tiles of a source raster with occurrence weights
#[derive(Debug, Clone)]
pub struct TileCatalog {
    tiling: Tiling,
    /// Tiles in first-seen scan order
    tiles: Vec<Tile>,
    /// Position of each fingerprint in `tiles`
    index: BTreeMap<Fingerprint, usize>,
}

impl TileCatalog {
    /// Catalog every complete tile of the raster
    ///
    /// Scans block rows top to bottom and columns left to right. The first
    /// occurrence of a fingerprint registers a tile with weight 1 and keeps its
    /// pixels; later occurrences only increment the weight. Pixels beyond the
    /// last complete block are excluded (see [`Tiling`]).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tile_edge` is zero
    /// - The raster holds no complete tile
    pub fn build(raster: &SourceRaster, tile_edge: u32) -> Result<(Self, TileMap)> {
        let tiling = raster.tiling(tile_edge)?;

        let mut tiles: Vec<Tile> = Vec::new();
        let mut index: BTreeMap<Fingerprint, usize> = BTreeMap::new();
        let mut grid = Vec::with_capacity(tiling.columns * tiling.rows);

        for row in 0..tiling.rows {
            for column in 0..tiling.columns {
                let block = raster.block(column, row, tile_edge);
                let fingerprint = Fingerprint::of_block(&block);

                if let Some(tile) = index.get(&fingerprint).and_then(|&i| tiles.get_mut(i)) {
                    tile.weight = tile.weight.saturating_add(1);
                } else {
                    index.insert(fingerprint, tiles.len());
                    tiles.push(Tile {
                        fingerprint,
                        weight: 1,
                        pixels: block,
                    });
                }

                grid.push(fingerprint);
            }
        }

        let source_map = TileMap::from_row_major(tiling.columns, tiling.rows, grid)?;

        debug!(
            distinct = tiles.len(),
            columns = tiling.columns,
            rows = tiling.rows,
            "cataloged source tiles"
        );

        Ok((
            Self {
                tiling,
                tiles,
                index,
            },
            source_map,
        ))
    }

    /// Tile registered under `fingerprint`
    ///
    /// # Errors
    ///
    /// Returns `UnknownFingerprint` if the fingerprint was never cataloged
    pub fn lookup(&self, fingerprint: &Fingerprint) -> Result<&Tile> {
        self.index_of(fingerprint)
            .and_then(|i| self.tiles.get(i))
            .ok_or(AlgorithmError::UnknownFingerprint {
                fingerprint: *fingerprint,
            })
    }

    /// Position of `fingerprint` in first-seen order
    pub fn index_of(&self, fingerprint: &Fingerprint) -> Option<usize> {
        self.index.get(fingerprint).copied()
    }

    /// Tiles in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    /// Number of distinct tiles
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tile was cataloged
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Edge length of every tile in pixels
    pub const fn tile_edge(&self) -> u32 {
        self.tiling.tile_edge
    }

    /// Tiling plan the catalog was built with
    pub const fn tiling(&self) -> &Tiling {
        &self.tiling
    }
}
