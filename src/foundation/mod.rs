//! Shared primitives: timing, canvas, colors and the error taxonomy.

/// Hex color parsing.
pub mod color;
/// Timing, canvas and color primitives.
pub mod core;
/// Error taxonomy.
pub mod error;
