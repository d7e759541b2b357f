use crate::{
    algorithm::propagation::{ContradictionSite, collapse, propagate},
    algorithm::selection::{RandomSelector, select_cell},
    analysis::adjacency::AdjacencyModel,
    io::error::{AlgorithmError, Result, computation_error},
    spatial::direction::Direction,
    spatial::fingerprint::Fingerprint,
    spatial::grid::OutputGrid,
    spatial::tiles::{TileCatalog, TileMap},
};
use tracing::{debug, trace, warn};

/// Engine parameters for a single generation attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Output grid width in tiles
    pub output_width: usize,
    /// Output grid height in tiles
    pub output_height: usize,
    /// Seed for every random choice of the attempt
    pub seed: u64,
    /// Optional cap on collapse iterations
    pub max_iterations: Option<usize>,
}

/// Lifecycle of a generation run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Undetermined cells remain
    Running,
    /// Every cell is collapsed
    Done,
    /// No undetermined cell remains but some are in contradiction
    Failed,
}

/// One collapse performed by the engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollapseStep {
    /// Iteration number, starting at 1
    pub iteration: usize,
    /// Collapsed cell
    pub position: (usize, usize),
    /// Tile the cell resolved to
    pub fingerprint: Fingerprint,
}

/// Wave function collapse executor over a fixed output grid
///
/// Repeatedly selects the lowest-entropy undetermined cell, collapses it by
/// weighted draw and propagates its adjacency rules one hop. Every iteration
/// collapses one cell and no cell ever regains candidates, so a run needs at
/// most `width * height` iterations.
pub struct WaveCollapse<'a> {
    model: &'a AdjacencyModel,
    grid: OutputGrid,
    random_selector: RandomSelector,
    max_iterations: Option<usize>,
    iteration: usize,
    collapsed: usize,
    state: EngineState,
    history: Vec<CollapseStep>,
    contradictions: Vec<ContradictionSite>,
}

impl<'a> WaveCollapse<'a> {
    /// Create an engine with every cell allowing every catalog tile
    ///
    /// # Errors
    ///
    /// Returns an error if the output dimensions are invalid or the catalog is
    /// empty
    pub fn new(
        catalog: &TileCatalog,
        model: &'a AdjacencyModel,
        config: EngineConfig,
    ) -> Result<Self> {
        let grid = OutputGrid::seeded(config.output_width, config.output_height, catalog)?;
        Ok(Self::from_grid(grid, model, config.seed, config.max_iterations))
    }

    /// Create an engine over a prepared grid
    pub fn from_grid(
        grid: OutputGrid,
        model: &'a AdjacencyModel,
        seed: u64,
        max_iterations: Option<usize>,
    ) -> Self {
        let collapsed = grid.collapsed_count();
        Self {
            model,
            grid,
            random_selector: RandomSelector::new(seed),
            max_iterations,
            iteration: 0,
            collapsed,
            state: EngineState::Running,
            history: Vec::new(),
            contradictions: Vec::new(),
        }
    }

    /// Run a single select, collapse and propagate step
    ///
    /// Returns `false` once the run has terminated.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The iteration cap is reached while cells are still undetermined
    /// - Grid access or collapse violates an internal invariant
    pub fn run_iteration(&mut self) -> Result<bool> {
        if self.state != EngineState::Running {
            return Ok(false);
        }

        let Some((x, y)) = select_cell(&self.grid, &mut self.random_selector) else {
            self.terminate();
            return Ok(false);
        };

        if let Some(limit) = self.max_iterations
            && self.iteration >= limit
        {
            return Err(AlgorithmError::IterationLimit {
                limit,
                collapsed: self.collapsed,
                cells: self.grid.len(),
            });
        }

        self.iteration += 1;
        let fingerprint = collapse(&mut self.grid, x, y, &mut self.random_selector)?;
        trace!(
            iteration = self.iteration,
            x,
            y,
            tile = %fingerprint.short(),
            "collapsed cell"
        );
        self.history.push(CollapseStep {
            iteration: self.iteration,
            position: (x, y),
            fingerprint,
        });

        let resolved_before = self.resolved_neighbors(x, y);
        let sites = propagate(&mut self.grid, self.model, x, y, fingerprint)?;
        let resolved_by_rules = self.resolved_neighbors(x, y).saturating_sub(resolved_before);
        self.collapsed += 1 + resolved_by_rules;
        for site in &sites {
            warn!(iteration = self.iteration, "contradiction: {site}");
        }
        self.contradictions.extend(sites);

        Ok(true)
    }

    /// Iterate until termination and return the resolved grid
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` when cells end in contradiction, or any error
    /// of [`Self::run_iteration`]
    pub fn run(mut self) -> Result<TileMap> {
        while self.run_iteration()? {}
        self.finish()
    }

    /// Consume a terminated engine and return the resolved grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cells ended in contradiction (`GenerationFailed`)
    /// - The engine has not terminated yet
    pub fn finish(self) -> Result<TileMap> {
        match self.state {
            EngineState::Done => self.grid.resolve().ok_or_else(|| {
                computation_error("finish", &"grid reported done but is not fully collapsed")
            }),
            EngineState::Failed => Err(AlgorithmError::GenerationFailed {
                seed: self.random_selector.seed(),
                collapsed: self.collapsed,
                cells: self.grid.len(),
                contradictions: self.contradictions,
            }),
            EngineState::Running => {
                Err(computation_error("finish", &"generation has not terminated"))
            }
        }
    }

    /// Neighbors of `(x, y)` holding exactly one candidate
    fn resolved_neighbors(&self, x: usize, y: usize) -> usize {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.grid.neighbor(x, y, direction))
            .filter(|&(nx, ny)| self.grid.cell(nx, ny).is_ok_and(|cell| cell.len() == 1))
            .count()
    }

    fn terminate(&mut self) {
        self.state = if self.grid.is_fully_collapsed() {
            EngineState::Done
        } else {
            EngineState::Failed
        };
        debug!(
            state = ?self.state,
            iterations = self.iteration,
            contradictions = self.contradictions.len(),
            "generation terminated"
        );
    }

    /// Current grid state
    pub const fn grid(&self) -> &OutputGrid {
        &self.grid
    }

    /// Current lifecycle state
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Number of collapse iterations performed
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Number of collapsed cells, kept up to date by each iteration
    pub const fn collapsed(&self) -> usize {
        self.collapsed
    }

    /// Seed driving this run
    pub const fn seed(&self) -> u64 {
        self.random_selector.seed()
    }

    /// Collapses in the order they were performed
    pub fn history(&self) -> &[CollapseStep] {
        &self.history
    }

    /// Cells emptied by propagation so far
    pub fn contradictions(&self) -> &[ContradictionSite] {
        &self.contradictions
    }
}
