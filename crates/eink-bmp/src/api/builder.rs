//! BmpPipeline builder: the primary entry point for the crate.
//!
//! [`BmpPipeline`] chains palette resolution, quantization and encoding
//! behind a fluent builder.

use tracing::debug;

use super::error::BmpError;
use crate::bmp::{BitDepth, BmpEncoder, EncoderConfig, PixelSource};
use crate::dither::{quantize, DitherAlgorithm};
use crate::palette::Palette;
use crate::raster::Raster;

/// Raster-to-BMP conversion for one bit depth.
///
/// # Design
///
/// - Configuration methods consume and return `self`
/// - [`run()`](Self::run) takes `&self`, so one pipeline converts any number
///   of rasters
/// - Depth, palette and output dimensions are validated before any pixel
///   is quantized
///
/// # Depth Handling
///
/// - Indexed depths quantize against the palette (or the depth's implicit
///   grayscale palette when the encoder config allows it) and store indices.
/// - 24 bits with a palette quantize and store the resulting device colors.
/// - 24 bits without a palette store the raster unchanged.
///
/// # Example
///
/// ```
/// use eink_bmp::{BmpPipeline, DitherAlgorithm, Palette};
///
/// let pipeline = BmpPipeline::new(2)
///     .palette(Palette::grayscale(4).unwrap())
///     .algorithm(DitherAlgorithm::Atkinson);
///
/// // 3x1 RGB raster from raw bytes
/// let image = pipeline.run_bytes(vec![0, 0, 0, 128, 128, 128, 255, 255, 255], 3, 1, 3).unwrap();
/// assert_eq!(image.len(), 54 + 16 + 4);
/// ```
#[derive(Debug, Clone)]
pub struct BmpPipeline {
    bits: u16,
    palette: Option<Palette>,
    algorithm: DitherAlgorithm,
    encoder: BmpEncoder,
}

impl BmpPipeline {
    /// Create a pipeline producing `bits` per pixel.
    ///
    /// Defaults: no palette, [`DitherAlgorithm::Atkinson`], and the default
    /// [`EncoderConfig`]. The depth is checked when the pipeline runs.
    pub fn new(bits: u16) -> Self {
        Self {
            bits,
            palette: None,
            algorithm: DitherAlgorithm::default(),
            encoder: BmpEncoder::default(),
        }
    }

    /// Set the palette to quantize against.
    #[inline]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Set the quantization algorithm.
    #[inline]
    pub fn algorithm(mut self, algorithm: DitherAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the encoder configuration.
    #[inline]
    pub fn config(mut self, config: EncoderConfig) -> Self {
        self.encoder = BmpEncoder::new(config);
        self
    }

    #[inline]
    pub fn bits(&self) -> u16 {
        self.bits
    }

    #[inline]
    pub fn encoder_config(&self) -> &EncoderConfig {
        self.encoder.config()
    }

    /// Quantize and encode `raster`.
    ///
    /// # Errors
    ///
    /// Any [`BmpError`] from depth and palette validation, quantization or
    /// encoding.
    pub fn run(&self, raster: &Raster) -> Result<BmpImage, BmpError> {
        let depth = self.encoder.check_depth(self.bits)?;
        let palette = self.encoder.resolve_palette(depth, self.palette.as_ref())?;
        let (width, height) = (raster.width(), raster.height());
        self.encoder.check_dimensions(width, height, depth)?;

        let bytes = match palette.as_deref() {
            Some(palette) if depth.is_indexed() => {
                let quantized = quantize(raster, palette, self.algorithm)?;
                self.encoder.encode(
                    width,
                    height,
                    self.bits,
                    PixelSource::Indexed(quantized.indices()),
                    Some(palette),
                )?
            }
            Some(palette) => {
                let quantized = quantize(raster, palette, self.algorithm)?;
                self.encoder.encode(
                    width,
                    height,
                    self.bits,
                    PixelSource::Raster(quantized.raster()),
                    None,
                )?
            }
            None => {
                self.encoder
                    .encode(width, height, self.bits, PixelSource::Raster(raster), None)?
            }
        };

        debug!(
            width,
            height,
            bits = self.bits,
            algorithm = %self.algorithm,
            bytes = bytes.len(),
            "converted raster to bmp"
        );
        Ok(BmpImage {
            bytes,
            width,
            height,
            depth,
        })
    }

    /// Like [`run`](Self::run) for a raw buffer of `channels` (1, 3 or 4)
    /// bytes per pixel.
    pub fn run_bytes(
        &self,
        data: Vec<u8>,
        width: u32,
        height: u32,
        channels: usize,
    ) -> Result<BmpImage, BmpError> {
        self.encoder.check_depth(self.bits)?;
        let raster = Raster::from_channels(width, height, channels, data)?;
        self.run(&raster)
    }
}

/// An encoded BMP file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmpImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    depth: BitDepth,
}

impl BmpImage {
    /// MIME type of the encoded bytes.
    pub const CONTENT_TYPE: &'static str = "image/bmp";

    #[inline]
    pub fn content_type(&self) -> &'static str {
        Self::CONTENT_TYPE
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn depth(&self) -> BitDepth {
        self.depth
    }
}
