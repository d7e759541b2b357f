//! Cell collapse and one-hop constraint propagation

use crate::algorithm::selection::RandomSelector;
use crate::analysis::adjacency::AdjacencyModel;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::direction::Direction;
use crate::spatial::fingerprint::Fingerprint;
use crate::spatial::grid::{CellState, OutputGrid};
use std::fmt;

/// A cell emptied by propagation and the placement that emptied it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContradictionSite {
    /// Position of the emptied cell
    pub position: (usize, usize),
    /// Tile whose rules left no candidate
    pub trigger: Fingerprint,
    /// Position where `trigger` was placed
    pub origin: (usize, usize),
    /// Direction from `origin` to `position`
    pub direction: Direction,
}

impl fmt::Display for ContradictionSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) emptied by tile {} at ({}, {}) looking {}",
            self.position.0,
            self.position.1,
            self.trigger.short(),
            self.origin.0,
            self.origin.1,
            self.direction
        )
    }
}

/// Resolve the cell at `(x, y)` to one weighted random candidate
///
/// # Errors
///
/// Returns an error if:
/// - `(x, y)` is outside the grid
/// - The cell has no candidate with a positive weight
pub fn collapse(
    grid: &mut OutputGrid,
    x: usize,
    y: usize,
    selector: &mut RandomSelector,
) -> Result<Fingerprint> {
    let cell = grid.cell_mut(x, y)?;
    let (fingerprints, weights): (Vec<Fingerprint>, Vec<u32>) = cell.candidates().unzip();

    let chosen = selector
        .weighted_index(&weights)
        .and_then(|index| fingerprints.get(index).copied())
        .ok_or(AlgorithmError::Contradiction { x, y })?;

    cell.retain_only(&chosen);
    Ok(chosen)
}

/// Restrict the four neighbors of `(x, y)` to the rules of `chosen`
///
/// Only undetermined neighbors are touched and nothing cascades beyond them,
/// even when a neighbor is left with a single candidate. Surviving candidates
/// take the rule weight. Returns the neighbors left without candidates.
///
/// # Errors
///
/// Returns `OutOfBounds` if `(x, y)` is outside the grid
pub fn propagate(
    grid: &mut OutputGrid,
    model: &AdjacencyModel,
    x: usize,
    y: usize,
    chosen: Fingerprint,
) -> Result<Vec<ContradictionSite>> {
    grid.cell(x, y)?;
    let mut contradictions = Vec::new();

    for direction in Direction::ALL {
        let Some((nx, ny)) = grid.neighbor(x, y, direction) else {
            continue;
        };

        let cell = grid.cell_mut(nx, ny)?;
        if cell.state() != CellState::Undetermined {
            continue;
        }

        cell.restrict(model.neighbors(&chosen, direction));

        if cell.is_empty() {
            contradictions.push(ContradictionSite {
                position: (nx, ny),
                trigger: chosen,
                origin: (x, y),
                direction,
            });
        }
    }

    Ok(contradictions)
}
