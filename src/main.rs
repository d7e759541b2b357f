//! CLI entry point for wave function collapse tile generation

use clap::Parser;
use wfctile::io::cli::{Cli, FileProcessor};

fn main() -> wfctile::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
