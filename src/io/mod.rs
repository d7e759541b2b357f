/// Command-line interface
pub mod cli;
/// Constants and generation options
pub mod configuration;
/// Error types
pub mod error;
/// Rendering and PNG export
pub mod image;
/// Progress display
pub mod progress;
