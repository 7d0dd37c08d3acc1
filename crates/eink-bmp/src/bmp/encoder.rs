//! BMP encoder

use std::borrow::Cow;

use tracing::debug;

use super::config::{EncoderConfig, RowOrder};
use super::depth::BitDepth;
use super::header::BmpHeader;
use crate::api::BmpError;
use crate::palette::Palette;
use crate::raster::{expected_len, Raster};

/// Pixels handed to the encoder.
#[derive(Debug, Clone, Copy)]
pub enum PixelSource<'a> {
    /// Color pixels. For indexed depths each pixel is mapped to the nearest
    /// palette device color; for 24 bits they are written as-is.
    Raster(&'a Raster),
    /// One palette index per pixel, row-major. For 24 bits each index is
    /// expanded to its device color.
    Indexed(&'a [u8]),
}

/// Serializes rasters into BMP files.
///
/// The encoder holds only its [`EncoderConfig`]; each [`encode`] call is
/// independent and either returns a complete file or fails before any
/// output is produced.
///
/// # Example
///
/// ```
/// use eink_bmp::{BmpEncoder, EncoderConfig, Palette, PixelSource};
///
/// let palette = Palette::grayscale(2).unwrap();
/// let encoder = BmpEncoder::new(EncoderConfig::default());
/// let bytes = encoder
///     .encode(8, 1, 1, PixelSource::Indexed(&[1, 0, 1, 0, 1, 0, 1, 0]), Some(&palette))
///     .unwrap();
///
/// // 54-byte header, 2-entry color table, one 4-byte row
/// assert_eq!(bytes.len(), 54 + 8 + 4);
/// assert_eq!(bytes[62], 0b1010_1010);
/// ```
///
/// [`encode`]: BmpEncoder::encode
#[derive(Debug, Clone, Default)]
pub struct BmpEncoder {
    config: EncoderConfig,
}

impl BmpEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode `pixels` as a `width` x `height` BMP with `bits` per pixel.
    ///
    /// # Errors
    ///
    /// Checked in this order, before anything is allocated:
    ///
    /// - [`BmpError::UnsupportedBitDepth`] if `bits` is not in the configured set
    /// - [`BmpError::PaletteSizeMismatch`] if an indexed depth has no usable
    ///   palette or more colors than `2^bits`
    /// - [`BmpError::DimensionsTooLarge`] if the file would not fit the header fields
    /// - [`BmpError::InvalidRasterSize`] if the pixel source doesn't match
    ///   `width` x `height`
    /// - [`BmpError::PixelIndexOutOfRange`] if an index has no palette entry
    pub fn encode(
        &self,
        width: u32,
        height: u32,
        bits: u16,
        pixels: PixelSource<'_>,
        palette: Option<&Palette>,
    ) -> Result<Vec<u8>, BmpError> {
        let depth = self.check_depth(bits)?;
        let palette = self.resolve_palette(depth, palette)?;
        let header = BmpHeader::new(width, height, depth, self.config.row_order)?;
        check_source(width, height, pixels, palette.as_deref(), depth)?;

        let mut out = Vec::with_capacity(header.file_size());
        header.write(&mut out, palette.as_deref());

        let width = width as usize;
        let height = height as usize;
        let stride = header.stride();

        match (depth, pixels) {
            (BitDepth::TwentyFour, PixelSource::Raster(raster)) => {
                for y in self.stored_rows(height) {
                    let start = out.len();
                    for x in 0..width {
                        let c = raster.pixel_at(y * width + x);
                        out.extend_from_slice(&[c.b, c.g, c.r]);
                    }
                    out.resize(start + stride, 0);
                }
            }
            (BitDepth::TwentyFour, PixelSource::Indexed(indices)) => {
                let palette = palette.as_deref().ok_or(BmpError::PaletteSizeMismatch {
                    bits,
                    colors: 0,
                    max: 256,
                })?;
                for y in self.stored_rows(height) {
                    let start = out.len();
                    for &idx in &indices[y * width..(y + 1) * width] {
                        let c = palette.device_color(idx as usize);
                        out.extend_from_slice(&[c.b, c.g, c.r]);
                    }
                    out.resize(start + stride, 0);
                }
            }
            (_, source) => {
                let palette = palette.as_deref().ok_or(BmpError::PaletteSizeMismatch {
                    bits,
                    colors: 0,
                    max: depth.max_colors(),
                })?;
                let indices = match source {
                    PixelSource::Indexed(indices) => Cow::Borrowed(indices),
                    // Raw pixels are matched against what the color table holds
                    PixelSource::Raster(raster) => Cow::Owned(
                        raster
                            .pixels()
                            .map(|c| palette.find_nearest_device(c).unwrap_or(0) as u8)
                            .collect::<Vec<u8>>(),
                    ),
                };
                for y in self.stored_rows(height) {
                    let start = out.len();
                    pack_row(&indices[y * width..(y + 1) * width], depth, &mut out);
                    out.resize(start + stride, 0);
                }
            }
        }

        debug!(
            width,
            height,
            bits,
            colors = palette.as_deref().map_or(0, Palette::len),
            bytes = out.len(),
            "encoded bmp"
        );
        Ok(out)
    }

    /// Reject depths outside the configured set.
    pub fn check_depth(&self, bits: u16) -> Result<BitDepth, BmpError> {
        BitDepth::from_bits(bits)
            .filter(|&d| self.config.depths.contains(d))
            .ok_or(BmpError::UnsupportedBitDepth {
                bits,
                supported: self.config.depths,
            })
    }

    /// Reject dimensions whose file would not fit the header's 32-bit fields.
    pub(crate) fn check_dimensions(
        &self,
        width: u32,
        height: u32,
        depth: BitDepth,
    ) -> Result<(), BmpError> {
        BmpHeader::new(width, height, depth, self.config.row_order).map(|_| ())
    }

    /// The palette an encode at `depth` will use.
    ///
    /// Indexed depths need a non-empty palette of at most `2^bits` colors,
    /// falling back to [`Palette::for_depth`] when the configuration allows
    /// it. Truecolor passes the palette through untouched.
    pub(crate) fn resolve_palette<'p>(
        &self,
        depth: BitDepth,
        palette: Option<&'p Palette>,
    ) -> Result<Option<Cow<'p, Palette>>, BmpError> {
        if !depth.is_indexed() {
            return Ok(palette.map(Cow::Borrowed));
        }

        let max = depth.max_colors();
        let mismatch = |colors| BmpError::PaletteSizeMismatch {
            bits: depth.bits(),
            colors,
            max,
        };
        let palette = match palette {
            Some(p) if !p.is_empty() => Cow::Borrowed(p),
            _ if self.config.implicit_palette => {
                Cow::Owned(Palette::for_depth(depth).ok_or_else(|| mismatch(0))?)
            }
            _ => return Err(mismatch(0)),
        };
        if palette.len() > max {
            return Err(mismatch(palette.len()));
        }
        Ok(Some(palette))
    }

    // Source row for each stored row
    fn stored_rows(&self, height: usize) -> Box<dyn Iterator<Item = usize>> {
        match self.config.row_order {
            RowOrder::BottomUp => Box::new((0..height).rev()),
            RowOrder::TopDown => Box::new(0..height),
        }
    }
}

/// Encode with the default configuration (bottom-up, every depth, palette
/// required for indexed depths).
pub fn encode_bmp(
    width: u32,
    height: u32,
    bits: u16,
    pixels: PixelSource<'_>,
    palette: Option<&Palette>,
) -> Result<Vec<u8>, BmpError> {
    BmpEncoder::default().encode(width, height, bits, pixels, palette)
}

fn check_source(
    width: u32,
    height: u32,
    pixels: PixelSource<'_>,
    palette: Option<&Palette>,
    depth: BitDepth,
) -> Result<(), BmpError> {
    match pixels {
        PixelSource::Raster(raster) => {
            if raster.width() != width || raster.height() != height {
                let expected = expected_len(width, height, raster.channels())
                    .ok_or(BmpError::DimensionsTooLarge { width, height })?;
                return Err(BmpError::InvalidRasterSize {
                    expected,
                    actual: raster.as_bytes().len(),
                });
            }
        }
        PixelSource::Indexed(indices) => {
            let expected = expected_len(width, height, 1)
                .ok_or(BmpError::DimensionsTooLarge { width, height })?;
            if indices.len() != expected {
                return Err(BmpError::InvalidRasterSize {
                    expected,
                    actual: indices.len(),
                });
            }
            let palette_len = palette.map_or(0, Palette::len);
            if palette_len == 0 && !depth.is_indexed() {
                return Err(BmpError::PaletteSizeMismatch {
                    bits: depth.bits(),
                    colors: 0,
                    max: 256,
                });
            }
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= palette_len) {
                return Err(BmpError::PixelIndexOutOfRange { index, palette_len });
            }
        }
    }
    Ok(())
}

/// Pack one row of indices MSB-first, `8 / bits` pixels per byte.
///
/// Unused low bits of a trailing partial byte stay zero.
fn pack_row(row: &[u8], depth: BitDepth, out: &mut Vec<u8>) {
    let bits = depth.bits() as u8;
    if bits == 8 {
        out.extend_from_slice(row);
        return;
    }
    let pixels_per_byte = 8 / bits as usize;
    let mask = (1u8 << bits) - 1;
    for chunk in row.chunks(pixels_per_byte) {
        let mut byte = 0u8;
        for (i, &idx) in chunk.iter().enumerate() {
            let shift = (8 - bits) - i as u8 * bits;
            byte |= (idx & mask) << shift;
        }
        out.push(byte);
    }
}
