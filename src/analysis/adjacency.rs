//! Adjacency rules learned from the source tile grid

use crate::io::error::Result;
use crate::spatial::direction::Direction;
use crate::spatial::fingerprint::Fingerprint;
use crate::spatial::tiles::{TileCatalog, TileMap};
use std::collections::BTreeMap;
use tracing::debug;

/// Observed neighbors of one tile in one direction with occurrence counts
pub type NeighborWeights = BTreeMap<Fingerprint, u32>;

static NO_NEIGHBORS: NeighborWeights = BTreeMap::new();

/// A single learned neighbor relation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyRule {
    /// Side of the owning tile the neighbor sits on
    pub direction: Direction,
    /// Fingerprint of the neighbor tile
    pub neighbor: Fingerprint,
    /// Number of times the pair was observed in the source
    pub weight: u32,
}

/// Which tiles were seen next to which, per direction
#[derive(Debug, Clone, Default)]
pub struct AdjacencyModel {
    rules: BTreeMap<(Fingerprint, Direction), NeighborWeights>,
}

impl AdjacencyModel {
    /// Create a model with no rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn rules from every in-bounds neighbor pair of the source grid
    ///
    /// Each horizontal and vertical edge is visited once and counted from both
    /// sides, giving the same weights as checking all four directions of every
    /// cell.
    ///
    /// # Errors
    ///
    /// Returns `UnknownFingerprint` if the grid references a tile missing from
    /// the catalog
    pub fn build(source: &TileMap, catalog: &TileCatalog) -> Result<Self> {
        let mut model = Self::new();

        for ((x, y), tile) in source.iter() {
            catalog.lookup(&tile)?;

            for direction in [Direction::Right, Direction::Down] {
                if let Some(neighbor) = source.neighbor(x, y, direction) {
                    model.record(tile, direction, neighbor);
                    model.record(neighbor, direction.inverse(), tile);
                }
            }
        }

        debug!(rules = model.len(), "learned adjacency rules");
        Ok(model)
    }

    /// Count one observation of `neighbor` on the `direction` side of `tile`
    pub fn record(&mut self, tile: Fingerprint, direction: Direction, neighbor: Fingerprint) {
        let weight = self
            .rules
            .entry((tile, direction))
            .or_default()
            .entry(neighbor)
            .or_insert(0);
        *weight = weight.saturating_add(1);
    }

    /// Observed neighbors of `tile` in `direction`, empty when none
    pub fn neighbors(&self, tile: &Fingerprint, direction: Direction) -> &NeighborWeights {
        self.rules.get(&(*tile, direction)).unwrap_or(&NO_NEIGHBORS)
    }

    /// Rules of `tile` in `direction`
    pub fn rules_for(&self, tile: &Fingerprint, direction: Direction) -> Vec<AdjacencyRule> {
        self.neighbors(tile, direction)
            .iter()
            .map(|(neighbor, weight)| AdjacencyRule {
                direction,
                neighbor: *neighbor,
                weight: *weight,
            })
            .collect()
    }

    /// Rules of `tile` in every direction
    pub fn rules(&self, tile: &Fingerprint) -> Vec<AdjacencyRule> {
        Direction::ALL
            .into_iter()
            .flat_map(|direction| self.rules_for(tile, direction))
            .collect()
    }

    /// Weight of a single relation, zero if never observed
    pub fn weight(&self, tile: &Fingerprint, direction: Direction, neighbor: &Fingerprint) -> u32 {
        self.neighbors(tile, direction)
            .get(neighbor)
            .copied()
            .unwrap_or(0)
    }

    /// Whether every rule is mirrored by its inverse with equal weight
    pub fn is_symmetric(&self) -> bool {
        self.rules.iter().all(|((tile, direction), neighbors)| {
            neighbors.iter().all(|(neighbor, weight)| {
                self.weight(neighbor, direction.inverse(), tile) == *weight
            })
        })
    }

    /// Number of distinct `(tile, direction, neighbor)` relations
    pub fn len(&self) -> usize {
        self.rules.values().map(BTreeMap::len).sum()
    }

    /// Whether no relation was recorded
    pub fn is_empty(&self) -> bool {
        self.rules.values().all(BTreeMap::is_empty)
    }
}
