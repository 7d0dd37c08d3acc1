//! QuantizedRaster: index plane plus rewritten raster.

use crate::dither::DitherAlgorithm;
use crate::palette::Palette;
use crate::raster::Raster;

/// The result of [`quantize`](crate::quantize).
///
/// Stores one `u8` palette index per pixel in row-major order, the raster
/// rewritten with the matched device colors, and the palette that produced
/// both.
///
/// # Example
///
/// ```
/// use eink_bmp::{quantize, DitherAlgorithm, Palette, Raster, Rgb};
///
/// let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE]);
/// let raster = Raster::filled(2, 2, Rgb::gray(250)).unwrap();
/// let quantized = quantize(&raster, &palette, DitherAlgorithm::None).unwrap();
///
/// assert_eq!(quantized.indices(), &[1, 1, 1, 1]);
/// assert_eq!(quantized.raster().pixel(0, 0), Rgb::WHITE);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedRaster {
    indices: Vec<u8>,
    raster: Raster,
    palette: Palette,
    algorithm: DitherAlgorithm,
}

impl QuantizedRaster {
    pub(crate) fn new(
        indices: Vec<u8>,
        raster: Raster,
        palette: Palette,
        algorithm: DitherAlgorithm,
    ) -> Self {
        debug_assert_eq!(
            indices.len(),
            raster.pixel_count(),
            "one index per pixel"
        );
        Self {
            indices,
            raster,
            palette,
            algorithm,
        }
    }

    /// Palette indices, one per pixel, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// The raster with every pixel replaced by its device color.
    #[inline]
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn algorithm(&self) -> DitherAlgorithm {
        self.algorithm
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    pub fn into_raster(self) -> Raster {
        self.raster
    }

    /// Split into index plane, rewritten raster and palette.
    pub fn into_parts(self) -> (Vec<u8>, Raster, Palette) {
        (self.indices, self.raster, self.palette)
    }
}
