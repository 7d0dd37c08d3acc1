//! Continuous-tone input raster
//!
//! A [`Raster`] is a row-major, top-down, 8-bit-per-channel pixel buffer as
//! produced by a screenshot or PNG decoder. The buffer length is checked
//! against the dimensions once at construction, so everything downstream can
//! index it without re-validating.

use crate::api::BmpError;
use crate::color::Rgb;

/// Channel layout of a [`Raster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// One luminance byte per pixel
    Gray,
    /// R, G, B
    Rgb,
    /// R, G, B, A. Alpha is carried through untouched.
    Rgba,
}

impl PixelLayout {
    /// Bytes per pixel.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            PixelLayout::Gray => 1,
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    /// Layout for a channel count, if supported.
    pub fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(PixelLayout::Gray),
            3 => Some(PixelLayout::Rgb),
            4 => Some(PixelLayout::Rgba),
            _ => None,
        }
    }
}

/// An owned pixel buffer with validated dimensions.
///
/// # Example
///
/// ```
/// use eink_bmp::{PixelLayout, Raster, Rgb};
///
/// let raster = Raster::new(2, 1, PixelLayout::Rgb, vec![255, 0, 0, 0, 0, 255]).unwrap();
/// assert_eq!(raster.pixel(1, 0), Rgb::new(0, 0, 255));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    layout: PixelLayout,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap a pixel buffer.
    ///
    /// # Errors
    ///
    /// - [`BmpError::InvalidRasterSize`] if `data.len() != width * height * channels`
    /// - [`BmpError::DimensionsTooLarge`] if the expected length overflows `usize`
    pub fn new(
        width: u32,
        height: u32,
        layout: PixelLayout,
        data: Vec<u8>,
    ) -> Result<Self, BmpError> {
        let expected = expected_len(width, height, layout.channels())
            .ok_or(BmpError::DimensionsTooLarge { width, height })?;
        if data.len() != expected {
            return Err(BmpError::InvalidRasterSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Wrap a pixel buffer given a raw channel count (1, 3 or 4).
    ///
    /// # Errors
    ///
    /// [`BmpError::UnsupportedChannels`] for any other channel count, plus
    /// the errors of [`Raster::new`].
    pub fn from_channels(
        width: u32,
        height: u32,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, BmpError> {
        let layout =
            PixelLayout::from_channels(channels).ok_or(BmpError::UnsupportedChannels { channels })?;
        Self::new(width, height, layout, data)
    }

    /// A raster of `width * height` copies of one color.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self, BmpError> {
        let pixels = expected_len(width, height, 1)
            .ok_or(BmpError::DimensionsTooLarge { width, height })?;
        let data = std::iter::repeat(color.to_bytes())
            .take(pixels)
            .flatten()
            .collect();
        Self::new(width, height, PixelLayout::Rgb, data)
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
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Number of pixels, `width * height`.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len() / self.channels()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Color of the pixel at `(x, y)`. Gray pixels are expanded to RGB and
    /// alpha is ignored.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the raster.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let idx = y as usize * self.width as usize + x as usize;
        self.pixel_at(idx)
    }

    /// Color of the pixel at linear index `idx` (row-major).
    #[inline]
    pub(crate) fn pixel_at(&self, idx: usize) -> Rgb {
        let c = self.channels();
        let px = &self.data[idx * c..idx * c + c];
        match self.layout {
            PixelLayout::Gray => Rgb::gray(px[0]),
            PixelLayout::Rgb | PixelLayout::Rgba => Rgb::new(px[0], px[1], px[2]),
        }
    }

    /// Alpha of the pixel at linear index `idx`, if the layout has one.
    #[inline]
    pub(crate) fn alpha_at(&self, idx: usize) -> Option<u8> {
        match self.layout {
            PixelLayout::Rgba => Some(self.data[idx * 4 + 3]),
            _ => None,
        }
    }

    /// Iterate over all pixel colors in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        (0..self.pixel_count()).map(move |i| self.pixel_at(i))
    }

    /// Mutable access to the raw buffer. The length cannot change.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

pub(crate) fn expected_len(width: u32, height: u32, channels: usize) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_length() {
        let err = Raster::new(2, 2, PixelLayout::Rgb, vec![0; 11]).unwrap_err();
        assert_eq!(
            err,
            BmpError::InvalidRasterSize {
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn test_zero_sized_raster() {
        let raster = Raster::new(0, 5, PixelLayout::Rgba, Vec::new()).unwrap();
        assert_eq!(raster.pixel_count(), 0);
        assert_eq!(raster.pixels().count(), 0);
    }

    #[test]
    fn test_from_channels() {
        assert!(Raster::from_channels(1, 1, 4, vec![1, 2, 3, 4]).is_ok());
        assert_eq!(
            Raster::from_channels(1, 1, 2, vec![1, 2]),
            Err(BmpError::UnsupportedChannels { channels: 2 })
        );
    }

    #[test]
    fn test_pixel_access_per_layout() {
        let gray = Raster::new(2, 1, PixelLayout::Gray, vec![10, 200]).unwrap();
        assert_eq!(gray.pixel(1, 0), Rgb::gray(200));

        let rgba = Raster::new(1, 2, PixelLayout::Rgba, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(rgba.pixel(0, 1), Rgb::new(5, 6, 7));
        assert_eq!(rgba.alpha_at(1), Some(8));
        assert_eq!(gray.alpha_at(0), None);
    }

    #[test]
    fn test_pixels_row_major() {
        let raster = Raster::new(2, 2, PixelLayout::Gray, vec![1, 2, 3, 4]).unwrap();
        let values: Vec<u8> = raster.pixels().map(|c| c.r).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_filled() {
        let raster = Raster::filled(3, 2, Rgb::new(9, 8, 7)).unwrap();
        assert_eq!(raster.as_bytes().len(), 18);
        assert!(raster.pixels().all(|c| c == Rgb::new(9, 8, 7)));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_pixel_out_of_bounds_panics() {
        let raster = Raster::filled(1, 1, Rgb::BLACK).unwrap();
        raster.pixel(1, 0);
    }
}
