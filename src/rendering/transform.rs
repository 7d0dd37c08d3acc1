//! Raster transforms applied before quantization.

use eink_bmp::{BmpError, PixelLayout, Raster, Rgb};
use std::fmt;

/// Clockwise rotation in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    /// Parse a rotation in degrees. Only 0, 90, 180 and 270 are accepted.
    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Cw90),
            180 => Some(Rotation::Cw180),
            270 => Some(Rotation::Cw270),
            _ => None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Rotate a raster clockwise. Quarter turns swap width and height.
pub fn rotate(raster: &Raster, rotation: Rotation) -> Result<Raster, BmpError> {
    if rotation == Rotation::None {
        return Ok(raster.clone());
    }

    let (w, h) = (raster.width() as usize, raster.height() as usize);
    let (out_w, out_h) = match rotation {
        Rotation::Cw90 | Rotation::Cw270 => (h, w),
        _ => (w, h),
    };
    let c = raster.channels();
    let src = raster.as_bytes();
    let mut out = vec![0u8; src.len()];

    for y in 0..h {
        for x in 0..w {
            let (dx, dy) = match rotation {
                Rotation::Cw90 => (h - 1 - y, x),
                Rotation::Cw180 => (w - 1 - x, h - 1 - y),
                Rotation::Cw270 => (y, w - 1 - x),
                Rotation::None => (x, y),
            };
            let from = (y * w + x) * c;
            let to = (dy * out_w + dx) * c;
            out[to..to + c].copy_from_slice(&src[from..from + c]);
        }
    }

    Raster::new(out_w as u32, out_h as u32, raster.layout(), out)
}

/// Invert color channels in place. Alpha is untouched.
pub fn invert(raster: &mut Raster) {
    let color_channels = match raster.layout() {
        PixelLayout::Gray => 1,
        PixelLayout::Rgb | PixelLayout::Rgba => 3,
    };
    let c = raster.channels();
    for px in raster.as_bytes_mut().chunks_exact_mut(c) {
        for v in &mut px[..color_channels] {
            *v = 255 - *v;
        }
    }
}

/// Map every pixel to black or white in place: luma at or above `level`
/// becomes white.
pub fn threshold(raster: &mut Raster, level: u8) {
    let layout = raster.layout();
    let c = raster.channels();
    for px in raster.as_bytes_mut().chunks_exact_mut(c) {
        let luma = match layout {
            PixelLayout::Gray => px[0],
            PixelLayout::Rgb | PixelLayout::Rgba => Rgb::new(px[0], px[1], px[2]).luma(),
        };
        let v = if luma >= level { 255 } else { 0 };
        match layout {
            PixelLayout::Gray => px[0] = v,
            PixelLayout::Rgb | PixelLayout::Rgba => px[..3].fill(v),
        }
    }
}

/// Composite an RGBA raster over white, dropping alpha. Other layouts are
/// returned unchanged.
pub fn flatten_alpha(raster: Raster) -> Result<Raster, BmpError> {
    if raster.layout() != PixelLayout::Rgba {
        return Ok(raster);
    }
    let (width, height) = (raster.width(), raster.height());
    let data = raster
        .as_bytes()
        .chunks_exact(4)
        .flat_map(|px| {
            let a = px[3] as u32;
            let blend = move |v: u8| ((v as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
            [blend(px[0]), blend(px[1]), blend(px[2])]
        })
        .collect();
    Raster::new(width, height, PixelLayout::Rgb, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// 3x2 gray raster with distinct values:
    /// ```text
    /// 1 2 3
    /// 4 5 6
    /// ```
    fn sample() -> Raster {
        Raster::new(3, 2, PixelLayout::Gray, vec![1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::from_degrees(0), Some(Rotation::None));
        assert_eq!(Rotation::from_degrees(90), Some(Rotation::Cw90));
        assert_eq!(Rotation::from_degrees(270), Some(Rotation::Cw270));
        assert_eq!(Rotation::from_degrees(45), None);
        assert_eq!(Rotation::from_degrees(360), None);
    }

    #[test]
    fn test_rotate_90_swaps_dimensions() {
        let rotated = rotate(&sample(), Rotation::Cw90).unwrap();
        assert_eq!((rotated.width(), rotated.height()), (2, 3));
        // 4 1
        // 5 2
        // 6 3
        assert_eq!(rotated.as_bytes(), &[4, 1, 5, 2, 6, 3]);
    }

    #[test]
    fn test_rotate_180() {
        let rotated = rotate(&sample(), Rotation::Cw180).unwrap();
        assert_eq!((rotated.width(), rotated.height()), (3, 2));
        assert_eq!(rotated.as_bytes(), &[6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_rotate_270() {
        let rotated = rotate(&sample(), Rotation::Cw270).unwrap();
        assert_eq!((rotated.width(), rotated.height()), (2, 3));
        // 3 6
        // 2 5
        // 1 4
        assert_eq!(rotated.as_bytes(), &[3, 6, 2, 5, 1, 4]);
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let original = Raster::new(
            2,
            3,
            PixelLayout::Rgb,
            (0..18).collect::<Vec<u8>>(),
        )
        .unwrap();
        let mut raster = original.clone();
        for _ in 0..4 {
            raster = rotate(&raster, Rotation::Cw90).unwrap();
        }
        assert_eq!(raster, original);
    }

    #[test]
    fn test_rotate_keeps_pixels_together() {
        let raster = Raster::new(2, 1, PixelLayout::Rgba, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let rotated = rotate(&raster, Rotation::Cw90).unwrap();
        assert_eq!(rotated.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!((rotated.width(), rotated.height()), (1, 2));
    }

    #[test]
    fn test_invert_twice_is_identity() {
        let original = Raster::new(1, 2, PixelLayout::Rgb, vec![0, 100, 255, 1, 2, 3]).unwrap();
        let mut raster = original.clone();
        invert(&mut raster);
        assert_eq!(raster.as_bytes(), &[255, 155, 0, 254, 253, 252]);
        invert(&mut raster);
        assert_eq!(raster, original);
    }

    #[test]
    fn test_invert_leaves_alpha() {
        let mut raster = Raster::new(1, 1, PixelLayout::Rgba, vec![0, 0, 0, 77]).unwrap();
        invert(&mut raster);
        assert_eq!(raster.as_bytes(), &[255, 255, 255, 77]);
    }

    #[test]
    fn test_threshold_is_binary() {
        let mut raster = Raster::new(
            4,
            1,
            PixelLayout::Rgb,
            vec![219, 219, 219, 220, 220, 220, 255, 255, 0, 10, 250, 10],
        )
        .unwrap();
        threshold(&mut raster, 220);
        assert_eq!(
            raster.as_bytes(),
            &[0, 0, 0, 255, 255, 255, 255, 255, 255, 0, 0, 0]
        );
        assert!(raster.as_bytes().iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn test_threshold_gray() {
        let mut raster = sample();
        threshold(&mut raster, 4);
        assert_eq!(raster.as_bytes(), &[0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn test_flatten_alpha_over_white() {
        let raster = Raster::new(
            3,
            1,
            PixelLayout::Rgba,
            vec![10, 20, 30, 255, 10, 20, 30, 0, 0, 0, 0, 128],
        )
        .unwrap();
        let flat = flatten_alpha(raster).unwrap();
        assert_eq!(flat.layout(), PixelLayout::Rgb);
        assert_eq!(
            flat.as_bytes(),
            &[10, 20, 30, 255, 255, 255, 127, 127, 127]
        );
    }

    #[test]
    fn test_flatten_alpha_passes_opaque_layouts() {
        let raster = sample();
        assert_eq!(flatten_alpha(raster.clone()).unwrap(), raster);
    }
}
