//! Error types for palette operations

use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for palette construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// A grayscale ramp needs between 2 and 256 stops
    #[error("invalid palette size {requested}: a grayscale ramp needs 2 to 256 stops")]
    InvalidPaletteSize {
        /// Number of stops that was asked for
        requested: usize,
    },
    /// No colors provided
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// Display and device color lists don't have the same length
    #[error(
        "palette length mismatch: {colors} display colors but {device_colors} device colors"
    )]
    LengthMismatch {
        /// Length of the display (matched) color list
        colors: usize,
        /// Length of the device (output) color list
        device_colors: usize,
    },
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}
