//! Superposition grid state for wave function collapse
//!
//! Every output cell holds the set of tiles still consistent with the
//! decisions made so far. Cells only ever lose candidates: one candidate left
//! means the cell is collapsed, none left means it is in contradiction.

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::direction::Direction;
use crate::spatial::fingerprint::Fingerprint;
use crate::spatial::tiles::{TileCatalog, TileMap};
use ndarray::Array2;
use std::collections::BTreeMap;

/// Resolution state derived from a cell's candidate count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Two or more candidates remain
    Undetermined,
    /// Exactly one candidate remains
    Collapsed(Fingerprint),
    /// No candidate remains
    Contradiction,
}

/// Candidate tiles with weights at one grid position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuperpositionCell {
    candidates: BTreeMap<Fingerprint, u32>,
}

impl SuperpositionCell {
    /// Cell allowing every tile of the catalog at its source weight
    pub fn from_catalog(catalog: &TileCatalog) -> Self {
        Self {
            candidates: catalog
                .iter()
                .map(|tile| (tile.fingerprint(), tile.weight()))
                .collect(),
        }
    }

    /// Cell with explicit candidates
    pub fn from_candidates<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = (Fingerprint, u32)>,
    {
        Self {
            candidates: candidates.into_iter().collect(),
        }
    }

    /// Current resolution state
    pub fn state(&self) -> CellState {
        let mut keys = self.candidates.keys();
        match (keys.next(), keys.next()) {
            (None, _) => CellState::Contradiction,
            (Some(only), None) => CellState::Collapsed(*only),
            (Some(_), Some(_)) => CellState::Undetermined,
        }
    }

    /// `candidates - 1`, undefined for a contradiction
    pub fn entropy(&self) -> Option<usize> {
        self.candidates.len().checked_sub(1)
    }

    /// Number of remaining candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the cell is in contradiction
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Whether `fingerprint` is still possible here
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.candidates.contains_key(fingerprint)
    }

    /// Current weight of a candidate
    pub fn weight(&self, fingerprint: &Fingerprint) -> Option<u32> {
        self.candidates.get(fingerprint).copied()
    }

    /// Candidates in fingerprint order
    pub fn candidates(&self) -> impl Iterator<Item = (Fingerprint, u32)> + '_ {
        self.candidates.iter().map(|(f, w)| (*f, *w))
    }

    /// Keep only `fingerprint`, returning whether it was a candidate
    pub fn retain_only(&mut self, fingerprint: &Fingerprint) -> bool {
        match self.candidates.remove_entry(fingerprint) {
            Some((kept, weight)) => {
                self.candidates.clear();
                self.candidates.insert(kept, weight);
                true
            }
            None => false,
        }
    }

    /// Intersect with `allowed`, taking the weights from `allowed`
    ///
    /// The previous weights of surviving candidates are discarded.
    pub fn restrict(&mut self, allowed: &BTreeMap<Fingerprint, u32>) {
        let kept: BTreeMap<Fingerprint, u32> = if self.candidates.len() <= allowed.len() {
            self.candidates
                .keys()
                .filter_map(|f| allowed.get(f).map(|w| (*f, *w)))
                .collect()
        } else {
            allowed
                .iter()
                .filter(|(f, _)| self.candidates.contains_key(*f))
                .map(|(f, w)| (*f, *w))
                .collect()
        };
        self.candidates = kept;
    }
}

/// Fixed-size output grid of superposition cells
#[derive(Debug, Clone)]
pub struct OutputGrid {
    /// Stored as `(row, column)`
    cells: Array2<SuperpositionCell>,
}

impl OutputGrid {
    /// Create a `width` x `height` grid with every catalog tile possible everywhere
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero or exceeds `MAX_GRID_DIMENSION`
    /// - The catalog is empty
    pub fn seeded(width: usize, height: usize, catalog: &TileCatalog) -> Result<Self> {
        validate_dimension("output_width", width)?;
        validate_dimension("output_height", height)?;
        if catalog.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "tile catalog is empty".to_string(),
            });
        }

        let cell = SuperpositionCell::from_catalog(catalog);
        Ok(Self {
            cells: Array2::from_elem((height, width), cell),
        })
    }

    /// Create a grid from explicit cells in row-major order
    ///
    /// # Errors
    ///
    /// Returns an error if the cell count does not match `width * height`
    pub fn from_cells(width: usize, height: usize, cells: Vec<SuperpositionCell>) -> Result<Self> {
        validate_dimension("output_width", width)?;
        validate_dimension("output_height", height)?;
        let cells = Array2::from_shape_vec((height, width), cells)
            .map_err(|e| invalid_parameter("cells", &format!("{width}x{height}"), &e))?;
        Ok(Self { cells })
    }

    /// Width in cells
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, grids have at least one cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` outside the grid
    pub fn cell(&self, x: usize, y: usize) -> Result<&SuperpositionCell> {
        let (width, height) = (self.width(), self.height());
        self.cells.get((y, x)).ok_or(AlgorithmError::OutOfBounds {
            x,
            y,
            width,
            height,
        })
    }

    /// Mutable cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` outside the grid
    pub fn cell_mut(&mut self, x: usize, y: usize) -> Result<&mut SuperpositionCell> {
        let (width, height) = (self.width(), self.height());
        self.cells
            .get_mut((y, x))
            .ok_or(AlgorithmError::OutOfBounds {
                x,
                y,
                width,
                height,
            })
    }

    /// In-bounds neighbor coordinate of `(x, y)`
    pub fn neighbor(&self, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
        direction.step(x, y, self.width(), self.height())
    }

    /// All cells as `((x, y), cell)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), &SuperpositionCell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((col, row), cell))
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.len() == 1).count()
    }

    /// Positions of cells in contradiction
    pub fn contradiction_positions(&self) -> Vec<(usize, usize)> {
        self.cells()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(position, _)| position)
            .collect()
    }

    /// Whether every cell holds exactly one candidate
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(|cell| cell.len() == 1)
    }

    /// Entropy of every cell, `None` where in contradiction
    pub fn entropy_map(&self) -> Array2<Option<usize>> {
        self.cells.map(SuperpositionCell::entropy)
    }

    /// Resolved fingerprints once every cell is collapsed
    pub fn resolve(&self) -> Option<TileMap> {
        let tiles = self
            .cells
            .iter()
            .map(|cell| match cell.state() {
                CellState::Collapsed(fingerprint) => Some(fingerprint),
                CellState::Undetermined | CellState::Contradiction => None,
            })
            .collect::<Option<Vec<_>>>()?;
        TileMap::from_row_major(self.width(), self.height(), tiles).ok()
    }
}

fn validate_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 || value > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            parameter,
            &value,
            &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}
