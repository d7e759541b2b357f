//! Error types for cataloging, generation and file operations

use crate::algorithm::propagation::ContradictionSite;
use crate::spatial::fingerprint::Fingerprint;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for all algorithm operations
#[derive(Debug, Error)]
pub enum AlgorithmError {
    /// Failed to load source image from filesystem
    #[error("Failed to load image '{}': {source}", .path.display())]
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source data doesn't meet algorithm requirements
    #[error("Invalid source data: {reason}")]
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Algorithm parameter validation failed
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Grid access outside `[0, width) x [0, height)`
    #[error("Position ({x}, {y}) is out of bounds for a {width}x{height} grid")]
    OutOfBounds {
        /// Requested column
        x: usize,
        /// Requested row
        y: usize,
        /// Grid width in cells
        width: usize,
        /// Grid height in cells
        height: usize,
    },

    /// Lookup of a fingerprint that was never cataloged
    #[error("Unknown tile fingerprint {fingerprint}")]
    UnknownFingerprint {
        /// The fingerprint that has no catalog entry
        fingerprint: Fingerprint,
    },

    /// A cell with no remaining candidates was asked to collapse
    #[error("Cell ({x}, {y}) has no remaining candidates")]
    Contradiction {
        /// Column of the empty cell
        x: usize,
        /// Row of the empty cell
        y: usize,
    },

    /// Generation stopped with cells left in contradiction
    #[error(
        "Generation failed with seed {seed}: {collapsed}/{cells} cells collapsed, {} in contradiction [{}]",
        .contradictions.len(),
        describe_sites(.contradictions)
    )]
    GenerationFailed {
        /// Seed of the failed attempt
        seed: u64,
        /// Number of collapsed cells at termination
        collapsed: usize,
        /// Total number of cells in the output grid
        cells: usize,
        /// Every cell left without candidates and what emptied it
        contradictions: Vec<ContradictionSite>,
    },

    /// The configured iteration cap was reached before termination
    #[error("Iteration limit {limit} reached with {collapsed}/{cells} cells collapsed")]
    IterationLimit {
        /// Configured cap
        limit: usize,
        /// Number of collapsed cells when the cap was hit
        collapsed: usize,
        /// Total number of cells in the output grid
        cells: usize,
    },

    /// Failed to save generated image to disk
    #[error("Failed to export image to '{}': {source}", .path.display())]
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    #[error("File system error during {operation} on '{}': {source}", .path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// An operation was used out of order or produced an invalid result
    #[error("Computation error in {operation}: {reason}")]
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl AlgorithmError {
    /// Whether a fresh attempt with another seed may succeed
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::GenerationFailed { .. } | Self::Contradiction { .. }
        )
    }
}

/// Convenience type alias for algorithm results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

fn describe_sites(sites: &[ContradictionSite]) -> String {
    sites
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
