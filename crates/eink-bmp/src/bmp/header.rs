//! BITMAPFILEHEADER + BITMAPINFOHEADER layout

use super::config::RowOrder;
use super::depth::BitDepth;
use crate::api::BmpError;
use crate::palette::Palette;

/// File header (14 bytes) plus info header (40 bytes).
pub const HEADER_SIZE: u32 = 14 + 40;

const INFO_HEADER_SIZE: u32 = 40;

/// Geometry of one BMP file, with every size precomputed and checked to fit
/// the header's 32-bit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BmpHeader {
    width: u32,
    height: u32,
    depth: BitDepth,
    row_order: RowOrder,
    stride: u32,
    image_size: u32,
    file_size: u32,
}

impl BmpHeader {
    pub(crate) fn new(
        width: u32,
        height: u32,
        depth: BitDepth,
        row_order: RowOrder,
    ) -> Result<Self, BmpError> {
        let too_large = BmpError::DimensionsTooLarge { width, height };
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(too_large);
        }

        let stride = row_stride(width, depth);
        let image_size = stride * height as u64;
        let file_size = HEADER_SIZE as u64 + color_table_len(depth) as u64 + image_size;
        if stride > u32::MAX as u64 || file_size > u32::MAX as u64 {
            return Err(too_large);
        }

        Ok(Self {
            width,
            height,
            depth,
            row_order,
            stride: stride as u32,
            image_size: image_size as u32,
            file_size: file_size as u32,
        })
    }

    /// Bytes per stored row, padding included.
    #[inline]
    pub(crate) fn stride(&self) -> usize {
        self.stride as usize
    }

    #[inline]
    pub(crate) fn file_size(&self) -> usize {
        self.file_size as usize
    }

    #[inline]
    pub(crate) fn pixel_offset(&self) -> u32 {
        HEADER_SIZE + color_table_len(self.depth)
    }

    /// Append both headers and the color table to `out`.
    ///
    /// The color table holds `2^bits` BGR0 entries taken from the palette's
    /// device colors, zero-filled past the palette's length.
    pub(crate) fn write(&self, out: &mut Vec<u8>, palette: Option<&Palette>) {
        let entries = self.depth.max_colors() as u32;
        let stored_height = match self.row_order {
            RowOrder::BottomUp => self.height as i32,
            RowOrder::TopDown => -(self.height as i32),
        };

        // BITMAPFILEHEADER
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // reserved
        out.extend_from_slice(&self.pixel_offset().to_le_bytes());

        // BITMAPINFOHEADER
        out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
        out.extend_from_slice(&(self.width as i32).to_le_bytes());
        out.extend_from_slice(&stored_height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // planes
        out.extend_from_slice(&self.depth.bits().to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&0i32.to_le_bytes()); // h-res
        out.extend_from_slice(&0i32.to_le_bytes()); // v-res
        out.extend_from_slice(&entries.to_le_bytes()); // colors used
        out.extend_from_slice(&entries.to_le_bytes()); // colors important

        let device_colors = palette.map(Palette::device_colors).unwrap_or_default();
        for i in 0..entries as usize {
            match device_colors.get(i) {
                Some(c) => out.extend_from_slice(&[c.b, c.g, c.r, 0]),
                None => out.extend_from_slice(&[0; 4]),
            }
        }
    }
}

/// `ceil(width * bits / 8)` rounded up to a multiple of 4.
pub(crate) fn row_stride(width: u32, depth: BitDepth) -> u64 {
    let data = (width as u64 * depth.bits() as u64).div_ceil(8);
    data.div_ceil(4) * 4
}

fn color_table_len(depth: BitDepth) -> u32 {
    depth.max_colors() as u32 * 4
}
