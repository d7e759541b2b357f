//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - Grid directions
//! - Tile fingerprints, cataloging and fingerprint maps
//! - The superposition grid

/// Cardinal directions and neighbor stepping
pub mod direction;
/// Content-addressed tile identity
pub mod fingerprint;
/// Superposition grid state
pub mod grid;
/// Tile extraction and cataloging
pub mod tiles;

pub use grid::OutputGrid;
