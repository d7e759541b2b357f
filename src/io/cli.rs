//! Command-line interface for generating a tiled image from one source file

use crate::algorithm::executor::WaveCollapse;
use crate::analysis::adjacency::AdjacencyModel;
use crate::analysis::patterns::SourceRaster;
use crate::io::configuration::{
    DEFAULT_ATTEMPTS, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_TILE_SIZE,
    GenerationConfig, OUTPUT_SUFFIX,
};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::image::{export_png, render_tile_map};
use crate::io::progress::ProgressManager;
use crate::spatial::tiles::{TileCatalog, TileMap};
use clap::Parser;
use rand::Rng;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "wfctile")]
#[command(
    author,
    version,
    about = "Generate a tiled image that locally resembles a reference image"
)]
/// Command-line arguments for the tile generation tool
pub struct Cli {
    /// Source image to learn tiles from
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Edge length in pixels of a square tile
    #[arg(short = 'n', long, default_value_t = DEFAULT_TILE_SIZE)]
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub tile_size: u32,

    /// Output width in tiles
    #[arg(short = 'w', long, default_value_t = DEFAULT_OUTPUT_WIDTH)]
    pub width: usize,

    /// Output height in tiles
    #[arg(short = 'H', long, default_value_t = DEFAULT_OUTPUT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation (drawn at random if omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Seeds to try before giving up on contradictions
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Maximum collapse iterations per attempt
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Output PNG path (defaults to <input>_result.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the source and generated grids as tile indices
    #[arg(short = 'm', long)]
    pub show_map: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Generation options selected by the arguments
    pub const fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            tile_size: self.tile_size,
            output_width: self.width,
            output_height: self.height,
            seed: self.seed,
            attempts: self.attempts,
            max_iterations: self.iterations,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Where the generated image is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// `<stem>_result.png` next to the input file
pub fn default_output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!("{}{OUTPUT_SUFFIX}.png", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// Render a tile map as rows of catalog indices
pub fn format_tile_map(map: &TileMap, catalog: &TileCatalog) -> String {
    let width = catalog.len().saturating_sub(1).to_string().len().max(2);
    let mut out = String::new();
    for y in 0..map.rows() {
        let row: Vec<String> = (0..map.columns())
            .map(|x| {
                map.get(x, y)
                    .and_then(|fingerprint| catalog.index_of(&fingerprint))
                    .map_or_else(|| format!("{:>width$}", "?"), |i| format!("{i:>width$}"))
            })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// Runs the full pipeline for one input file
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Catalog the input, generate, render and save
    ///
    /// Recoverable generation failures are retried with the next seed until
    /// the attempts run out.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input cannot be decoded or holds no complete tile
    /// - Every attempt ends in contradiction
    /// - The output image cannot be written
    // Allow print for user feedback on diagnostics and results
    #[allow(clippy::print_stderr)]
    pub fn process(&mut self) -> Result<()> {
        let config = self.cli.generation_config();
        if config.attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &config.attempts,
                &"at least one attempt is required",
            ));
        }

        let raster = SourceRaster::from_image_file(&self.cli.input)?;
        let (catalog, source_map) = TileCatalog::build(&raster, config.tile_size)?;
        if let Some(note) = catalog.tiling().diagnostic() {
            eprintln!("Warning: {note}");
        }

        let model = AdjacencyModel::build(&source_map, &catalog)?;
        if !self.cli.quiet {
            eprintln!(
                "Cataloged {} distinct tiles from a {}x{} source grid ({} adjacency rules)",
                catalog.len(),
                source_map.columns(),
                source_map.rows(),
                model.len()
            );
        }
        if self.cli.show_map {
            Self::print_map("Source", &source_map, &catalog);
        }

        let base_seed = config.seed.unwrap_or_else(|| rand::rng().random());
        if config.seed.is_none() && !self.cli.quiet {
            eprintln!("Using random seed {base_seed}");
        }
        let mut last_failure = None;

        for attempt in 0..config.attempts {
            let seed = GenerationConfig::attempt_seed(base_seed, attempt);
            match self.generate(&catalog, &model, &config, attempt, seed) {
                Ok(resolved) => {
                    if self.cli.show_map {
                        Self::print_map("Generated", &resolved, &catalog);
                    }
                    let output_path = self.cli.output_path();
                    let image = render_tile_map(&resolved, &catalog)?;
                    export_png(&image, &output_path)?;
                    if !self.cli.quiet {
                        eprintln!("Wrote {} (seed {seed})", output_path.display());
                    }
                    return Ok(());
                }
                Err(error) if error.is_recoverable() => {
                    eprintln!("Attempt {}/{}: {error}", attempt + 1, config.attempts);
                    last_failure = Some(error);
                }
                Err(error) => return Err(error),
            }
        }

        Err(last_failure.unwrap_or_else(|| {
            invalid_parameter("attempts", &config.attempts, &"no attempt was run")
        }))
    }

    fn generate(
        &mut self,
        catalog: &TileCatalog,
        model: &AdjacencyModel,
        config: &GenerationConfig,
        attempt: usize,
        seed: u64,
    ) -> Result<TileMap> {
        let mut engine = WaveCollapse::new(catalog, model, config.engine_config(seed))?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_attempt(attempt, config.attempts, seed, engine.grid().len());
            pm.update(engine.collapsed());
        }

        let result = loop {
            match engine.run_iteration() {
                Ok(true) => {
                    if let Some(ref pm) = self.progress_manager {
                        pm.update(engine.collapsed());
                    }
                }
                Ok(false) => break engine.finish(),
                Err(error) => break Err(error),
            }
        };

        if let Some(ref mut pm) = self.progress_manager {
            let outcome = match &result {
                Ok(_) => "done",
                Err(AlgorithmError::GenerationFailed { .. }) => "contradiction",
                Err(_) => "failed",
            };
            pm.finish_attempt(outcome);
        }

        result
    }

    // Allow print for the requested tile index maps
    #[allow(clippy::print_stdout)]
    fn print_map(label: &str, map: &TileMap, catalog: &TileCatalog) {
        println!("{label} tile map:");
        print!("{}", format_tile_map(map, catalog));
    }
}
