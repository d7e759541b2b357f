//! Analysis of the source image

/// Adjacency rule learning from the source tile grid
pub mod adjacency;
/// Source image decoding and tiling plan
pub mod patterns;
