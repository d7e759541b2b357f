use crate::spatial::grid::{CellState, OutputGrid};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
///
/// Every random decision of a generation run goes through one selector, so a
/// fixed seed replays the same sequence of cell picks and tile draws.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
    seed: u64,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed the selector was created with
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..len`, `None` when `len` is zero
    pub fn uniform_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Index drawn with probability proportional to its weight
    ///
    /// Builds cumulative weights and binary-searches a single draw. Zero
    /// weights are never chosen; `None` when the total weight is zero.
    pub fn weighted_index(&mut self, weights: &[u32]) -> Option<usize> {
        let cumulative: Vec<u64> = weights
            .iter()
            .scan(0_u64, |total, &weight| {
                *total += u64::from(weight);
                Some(*total)
            })
            .collect();

        let total = cumulative.last().copied().unwrap_or(0);
        if total == 0 {
            return None;
        }

        let draw = self.rng.random_range(0..total);
        Some(cumulative.partition_point(|&bound| bound <= draw))
    }
}

/// Undetermined cells sharing the lowest entropy
///
/// Collapsed cells and cells in contradiction are skipped; the latter have no
/// defined entropy and can never be selected.
pub fn lowest_entropy_cells(grid: &OutputGrid) -> Vec<(usize, usize)> {
    let mut best = usize::MAX;
    let mut tied = Vec::new();

    for (position, cell) in grid.cells() {
        if cell.state() != CellState::Undetermined {
            continue;
        }
        let Some(entropy) = cell.entropy() else {
            continue;
        };

        if entropy < best {
            best = entropy;
            tied.clear();
        }
        if entropy == best {
            tied.push(position);
        }
    }

    tied
}

/// Pick the next cell to collapse, breaking entropy ties uniformly
///
/// Returns `None` once no undetermined cell remains.
pub fn select_cell(grid: &OutputGrid, selector: &mut RandomSelector) -> Option<(usize, usize)> {
    let tied = lowest_entropy_cells(grid);
    let index = selector.uniform_index(tied.len())?;
    tied.get(index).copied()
}
