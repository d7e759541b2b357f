//! Wave function collapse tile synthesis from a reference image
//!
//! The source image is cut into fixed-size tiles that are deduplicated by
//! content fingerprint. Neighbor relations observed in the source become
//! adjacency rules, and a new grid is generated by repeatedly collapsing the
//! most constrained cell and restricting its immediate neighbors.

#![forbid(unsafe_code)]

/// Collapse engine including cell selection and constraint propagation
pub mod algorithm;
/// Source image analysis and adjacency learning
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Tile identity, cataloging and grid state
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
