//! Unified error type for the eink-bmp public API.

use thiserror::Error;

use crate::bmp::DepthSet;
use crate::palette::PaletteError;

/// Every failure the quantizer and encoder can report.
///
/// All of them are detected before any output is produced.
///
/// # Example
///
/// ```
/// use eink_bmp::{BmpError, Palette};
///
/// fn ramp(n: usize) -> Result<Palette, BmpError> {
///     Ok(Palette::grayscale(n)?)
/// }
///
/// assert!(matches!(ramp(1), Err(BmpError::Palette(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BmpError {
    /// Requested bits per pixel is not one the encoder accepts
    #[error("unsupported bits per pixel: {bits} (supported: {supported})")]
    UnsupportedBitDepth { bits: u16, supported: DepthSet },

    /// Indexed depth without a palette, or a palette larger than the color table
    #[error("{bits}-bit BMP needs a palette of 1 to {max} colors, got {colors}")]
    PaletteSizeMismatch { bits: u16, colors: usize, max: usize },

    /// Palette unusable for quantization (empty, or more than 256 colors)
    #[error("cannot quantize against a palette of {len} colors")]
    InvalidPalette { len: usize },

    /// Pixel buffer length doesn't match the dimensions
    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    InvalidRasterSize { expected: usize, actual: usize },

    /// Raster channel count other than 1, 3 or 4
    #[error("unsupported channel count: {channels} (expected 1, 3 or 4)")]
    UnsupportedChannels { channels: usize },

    /// Palette index with no palette entry
    #[error("pixel index {index} out of range for a palette of {palette_len} colors")]
    PixelIndexOutOfRange { index: u8, palette_len: usize },

    /// Image too large for the BMP header's 32-bit fields
    #[error("image dimensions {width}x{height} are too large for a BMP file")]
    DimensionsTooLarge { width: u32, height: u32 },

    /// Palette construction failed
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
}
