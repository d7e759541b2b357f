//! Generation constants and runtime configuration defaults

use crate::algorithm::executor::EngineConfig;

/// Default tile edge length in pixels
pub const DEFAULT_TILE_SIZE: u32 = 32;

/// Default output width in tiles
pub const DEFAULT_OUTPUT_WIDTH: usize = 16;

/// Default output height in tiles
pub const DEFAULT_OUTPUT_HEIGHT: usize = 16;

/// Default number of seeds tried before giving up
pub const DEFAULT_ATTEMPTS: usize = 1;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output grid dimension in tiles
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Options recognized by a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Edge length in pixels of a square tile
    pub tile_size: u32,
    /// Output grid width in tiles
    pub output_width: usize,
    /// Output grid height in tiles
    pub output_height: usize,
    /// Seed for reproducible runs, drawn from the OS when absent
    pub seed: Option<u64>,
    /// Number of seeds tried; attempt `k` uses `seed + k`
    pub attempts: usize,
    /// Optional cap on collapse iterations per attempt
    pub max_iterations: Option<usize>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            output_width: DEFAULT_OUTPUT_WIDTH,
            output_height: DEFAULT_OUTPUT_HEIGHT,
            seed: None,
            attempts: DEFAULT_ATTEMPTS,
            max_iterations: None,
        }
    }
}

impl GenerationConfig {
    /// Seed used by attempt number `attempt` (zero-based)
    pub const fn attempt_seed(base_seed: u64, attempt: usize) -> u64 {
        base_seed.wrapping_add(attempt as u64)
    }

    /// Engine settings for one attempt
    pub const fn engine_config(&self, seed: u64) -> EngineConfig {
        EngineConfig {
            output_width: self.output_width,
            output_height: self.output_height,
            seed,
            max_iterations: self.max_iterations,
        }
    }
}
