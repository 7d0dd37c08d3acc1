//! PNG to raster decoding

use eink_bmp::{PixelLayout, Raster};

use crate::error::ConvertError;

/// Decode a PNG into an 8-bit raster.
///
/// Palette, low-bit and 16-bit images are normalized to 8 bits per channel.
/// Gray+alpha is widened to RGBA since rasters have no two-channel layout.
pub fn decode_png(bytes: &[u8]) -> Result<Raster, ConvertError> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let (layout, data) = match info.color_type {
        png::ColorType::Grayscale => (PixelLayout::Gray, buf),
        png::ColorType::Rgb => (PixelLayout::Rgb, buf),
        png::ColorType::Rgba => (PixelLayout::Rgba, buf),
        png::ColorType::GrayscaleAlpha => (
            PixelLayout::Rgba,
            buf.chunks_exact(2)
                .flat_map(|px| [px[0], px[0], px[0], px[1]])
                .collect(),
        ),
        png::ColorType::Indexed => {
            return Err(ConvertError::PngDecode(
                "indexed image was not expanded".to_string(),
            ))
        }
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        layout = ?layout,
        "Decoded PNG"
    );
    Ok(Raster::new(info.width, info.height, layout, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eink_bmp::Rgb;
    use std::io::Cursor;

    fn encode(
        width: u32,
        height: u32,
        color: png::ColorType,
        depth: png::BitDepth,
        palette: Option<&[u8]>,
        data: &[u8],
    ) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(color);
            encoder.set_depth(depth);
            if let Some(plte) = palette {
                encoder.set_palette(plte);
            }
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_decode_rgb() {
        let png = encode(
            2,
            1,
            png::ColorType::Rgb,
            png::BitDepth::Eight,
            None,
            &[255, 0, 0, 0, 0, 255],
        );
        let raster = decode_png(&png).unwrap();
        assert_eq!(raster.layout(), PixelLayout::Rgb);
        assert_eq!(raster.pixel(0, 0), Rgb::new(255, 0, 0));
        assert_eq!(raster.pixel(1, 0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_decode_rgba_keeps_alpha() {
        let png = encode(
            1,
            1,
            png::ColorType::Rgba,
            png::BitDepth::Eight,
            None,
            &[10, 20, 30, 40],
        );
        let raster = decode_png(&png).unwrap();
        assert_eq!(raster.layout(), PixelLayout::Rgba);
        assert_eq!(raster.as_bytes(), &[10, 20, 30, 40]);
    }

    #[test]
    fn test_decode_gray_alpha_widens_to_rgba() {
        let png = encode(
            2,
            1,
            png::ColorType::GrayscaleAlpha,
            png::BitDepth::Eight,
            None,
            &[100, 255, 200, 0],
        );
        let raster = decode_png(&png).unwrap();
        assert_eq!(raster.layout(), PixelLayout::Rgba);
        assert_eq!(raster.as_bytes(), &[100, 100, 100, 255, 200, 200, 200, 0]);
    }

    #[test]
    fn test_decode_one_bit_gray_expands() {
        // 0b1010_0000: white, black, white, black
        let png = encode(
            4,
            1,
            png::ColorType::Grayscale,
            png::BitDepth::One,
            None,
            &[0b1010_0000],
        );
        let raster = decode_png(&png).unwrap();
        assert_eq!(raster.layout(), PixelLayout::Gray);
        assert_eq!(raster.as_bytes(), &[255, 0, 255, 0]);
    }

    #[test]
    fn test_decode_indexed_expands_to_rgb() {
        let plte = [0, 0, 0, 0, 255, 0];
        let png = encode(
            2,
            1,
            png::ColorType::Indexed,
            png::BitDepth::Eight,
            Some(&plte),
            &[1, 0],
        );
        let raster = decode_png(&png).unwrap();
        assert_eq!(raster.layout(), PixelLayout::Rgb);
        assert_eq!(raster.pixel(0, 0), Rgb::new(0, 255, 0));
        assert_eq!(raster.pixel(1, 0), Rgb::BLACK);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_png(b"definitely not a png").unwrap_err();
        assert!(matches!(err, ConvertError::PngDecode(_)));
    }
}
