//! Test fixtures: PNG builders and sample configuration.

use std::io::Cursor;

/// Configuration with one device profile of each palette kind
pub const TEST_CONFIG: &str = r##"
panels:
  duo:
    colors: ["#202020", "#E0E0E0"]
    device_colors: ["#000000", "#FFFFFF"]
devices:
  trmnl:
    bits: 1
    gray_levels: 2
    threshold: 220
  kindle:
    bits: 8
    gray_levels: 256
    dither: none
  frame:
    panel: spectra6
    rotate: 90
aliases:
  og: trmnl
"##;

/// Encode raw 8-bit pixels as a PNG
pub fn png(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("Failed to write PNG header");
        writer
            .write_image_data(data)
            .expect("Failed to write PNG data");
    }
    buf.into_inner()
}

/// Solid RGB PNG
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let data: Vec<u8> = std::iter::repeat(rgb)
        .take((width * height) as usize)
        .flatten()
        .collect();
    png(width, height, png::ColorType::Rgb, &data)
}

/// Grayscale PNG where every row is `0, 1, 2, ...` (x mod 256)
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let data: Vec<u8> = (0..height)
        .flat_map(|_| (0..width).map(|x| (x % 256) as u8))
        .collect();
    png(width, height, png::ColorType::Grayscale, &data)
}
