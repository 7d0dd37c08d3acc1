//! Palette struct with dual color storage and nearest-color matching.

use std::str::FromStr;

use super::error::PaletteError;
use crate::bmp::BitDepth;
use crate::color::Rgb;

/// An ordered color table with optional device color substitution.
///
/// # Dual Palette Support
///
/// Color e-ink panels rarely show the colors their controllers are driven
/// with. A Spectra 6 panel asked for `#FF0000` shows a dark brick red. A
/// palette can therefore carry two lists of the same length:
///
/// - **Colors**: what the panel really shows. Matching and error diffusion
///   use these.
/// - **Device colors**: what the controller expects. Quantized pixels and
///   the BMP color table use these.
///
/// Without device colors both lists are identical.
///
/// # Example
///
/// ```
/// use eink_bmp::{Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE]);
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.find_nearest(Rgb::gray(200)), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    // What the panel shows, used for matching
    colors: Vec<Rgb>,
    // What the controller expects, used for output
    device_colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from an explicit color list, used as-is.
    ///
    /// The list is neither sorted nor deduplicated. An empty list is
    /// accepted here; the quantizer and encoder reject it when it is used.
    pub fn new(colors: &[Rgb]) -> Self {
        Self {
            colors: colors.to_vec(),
            device_colors: colors.to_vec(),
        }
    }

    /// Create a palette whose matched colors differ from its output colors.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::LengthMismatch`] if the lists differ in length
    ///
    /// # Example
    ///
    /// ```
    /// use eink_bmp::{Palette, Rgb};
    ///
    /// // The panel shows a muddy red when driven with pure red
    /// let palette = Palette::with_device_colors(
    ///     &[Rgb::new(25, 30, 33), Rgb::new(178, 19, 24)],
    ///     &[Rgb::BLACK, Rgb::new(255, 0, 0)],
    /// ).unwrap();
    /// assert_eq!(palette.device_color(1), Rgb::new(255, 0, 0));
    /// ```
    pub fn with_device_colors(colors: &[Rgb], device_colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if colors.len() != device_colors.len() {
            return Err(PaletteError::LengthMismatch {
                colors: colors.len(),
                device_colors: device_colors.len(),
            });
        }
        Ok(Self {
            colors: colors.to_vec(),
            device_colors: device_colors.to_vec(),
        })
    }

    /// Create a palette from hex color strings.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] if any hex string is invalid and
    /// [`PaletteError::EmptyPalette`] if `colors` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use eink_bmp::Palette;
    ///
    /// let palette = Palette::from_hex(&["#000", "#FFFFFF", "ff0000"]).unwrap();
    /// assert_eq!(palette.len(), 3);
    /// ```
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let colors = parse_hex_list(colors)?;
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self::new(&colors))
    }

    /// Create a dual palette from two hex color lists.
    pub fn from_hex_with_device_colors(
        colors: &[&str],
        device_colors: &[&str],
    ) -> Result<Self, PaletteError> {
        let colors = parse_hex_list(colors)?;
        let device_colors = parse_hex_list(device_colors)?;
        Self::with_device_colors(&colors, &device_colors)
    }

    /// Build a black-to-white ramp of `n` evenly spaced grays.
    ///
    /// Stop `i` is `round(i / (n - 1) * 255)` on every channel, so the ramp
    /// always starts at black and ends at white.
    ///
    /// # Errors
    ///
    /// [`PaletteError::InvalidPaletteSize`] if `n < 2` or `n > 256`.
    ///
    /// # Example
    ///
    /// ```
    /// use eink_bmp::{Palette, Rgb};
    ///
    /// let ramp = Palette::grayscale(4).unwrap();
    /// assert_eq!(ramp.colors(), &[Rgb::gray(0), Rgb::gray(85), Rgb::gray(170), Rgb::gray(255)]);
    /// ```
    pub fn grayscale(n: usize) -> Result<Self, PaletteError> {
        if !(2..=256).contains(&n) {
            return Err(PaletteError::InvalidPaletteSize { requested: n });
        }
        let steps = n - 1;
        // Integer round-half-up of i * 255 / steps
        let colors: Vec<Rgb> = (0..n)
            .map(|i| Rgb::gray(((2 * i * 255 + steps) / (2 * steps)) as u8))
            .collect();
        Ok(Self::new(&colors))
    }

    /// The fixed palette a depth implies when the caller supplies none.
    ///
    /// Indexed depths get a grayscale ramp filling the whole color table
    /// (2, 4, 16 or 256 stops). Truecolor has no palette.
    pub fn for_depth(depth: BitDepth) -> Option<Self> {
        if !depth.is_indexed() {
            return None;
        }
        Self::grayscale(depth.max_colors()).ok()
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the palette has no colors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The displayed color at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// The device color at `idx`, the value written to output.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn device_color(&self, idx: usize) -> Rgb {
        self.device_colors[idx]
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    #[inline]
    pub fn device_colors(&self) -> &[Rgb] {
        &self.device_colors
    }

    /// Returns true if any device color differs from its displayed color.
    pub fn has_device_colors(&self) -> bool {
        self.colors != self.device_colors
    }

    /// Index of the displayed color nearest to `color`.
    ///
    /// Distance is squared Euclidean in RGB. Ties resolve to the lowest
    /// index. Returns `None` for an empty palette.
    #[inline]
    pub fn find_nearest(&self, color: Rgb) -> Option<usize> {
        nearest_in(&self.colors, |c| c.distance_squared(color))
    }

    /// Like [`find_nearest`](Self::find_nearest) but against device colors.
    ///
    /// Used when encoding raw pixels that are already in device space.
    #[inline]
    pub fn find_nearest_device(&self, color: Rgb) -> Option<usize> {
        nearest_in(&self.device_colors, |c| c.distance_squared(color))
    }
}

// Linear scan, first minimum wins
fn nearest_in<D, F>(colors: &[Rgb], distance: F) -> Option<usize>
where
    D: PartialOrd,
    F: Fn(Rgb) -> D,
{
    let mut best: Option<(usize, D)> = None;
    for (i, &c) in colors.iter().enumerate() {
        let d = distance(c);
        match &best {
            Some((_, best_d)) if d >= *best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

fn parse_hex_list(colors: &[&str]) -> Result<Vec<Rgb>, PaletteError> {
    colors
        .iter()
        .map(|s| Rgb::from_str(s).map_err(PaletteError::ParseColor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_grayscale_two_stops() {
        let palette = Palette::grayscale(2).unwrap();
        assert_eq!(palette.colors(), &[Rgb::BLACK, Rgb::WHITE]);
    }

    #[test]
    fn test_grayscale_rounds_half_up() {
        // 1/2 * 255 = 127.5
        let palette = Palette::grayscale(3).unwrap();
        assert_eq!(palette.colors(), &[Rgb::gray(0), Rgb::gray(128), Rgb::gray(255)]);
    }

    #[test]
    fn test_grayscale_sixteen_stops() {
        let palette = Palette::grayscale(16).unwrap();
        let values: Vec<u8> = palette.colors().iter().map(|c| c.r).collect();
        assert_eq!(
            values,
            vec![0, 17, 34, 51, 68, 85, 102, 119, 136, 153, 170, 187, 204, 221, 238, 255]
        );
    }

    #[test]
    fn test_grayscale_256_is_identity_ramp() {
        let palette = Palette::grayscale(256).unwrap();
        for (i, c) in palette.colors().iter().enumerate() {
            assert_eq!(*c, Rgb::gray(i as u8));
        }
    }

    #[test]
    fn test_grayscale_is_monotonic() {
        for n in 2..=256 {
            let palette = Palette::grayscale(n).unwrap();
            assert_eq!(palette.len(), n);
            assert_eq!(palette.color(0), Rgb::BLACK);
            assert_eq!(palette.color(n - 1), Rgb::WHITE);
            assert!(palette.colors().windows(2).all(|w| w[0].r < w[1].r));
        }
    }

    #[test]
    fn test_grayscale_rejects_bad_sizes() {
        for n in [0, 1, 257, 1000] {
            assert_eq!(
                Palette::grayscale(n),
                Err(PaletteError::InvalidPaletteSize { requested: n })
            );
        }
    }

    #[test]
    fn test_new_keeps_order_and_duplicates() {
        let colors = [Rgb::WHITE, Rgb::BLACK, Rgb::WHITE];
        let palette = Palette::new(&colors);
        assert_eq!(palette.colors(), &colors);
        assert!(!palette.has_device_colors());
    }

    #[test]
    fn test_dual_colors() {
        let palette =
            Palette::with_device_colors(&[Rgb::new(178, 19, 24)], &[Rgb::new(255, 0, 0)]).unwrap();
        assert_eq!(palette.color(0), Rgb::new(178, 19, 24));
        assert_eq!(palette.device_color(0), Rgb::new(255, 0, 0));
        assert!(palette.has_device_colors());
    }

    #[test]
    fn test_dual_colors_length_mismatch() {
        let result = Palette::with_device_colors(&[Rgb::BLACK, Rgb::WHITE], &[Rgb::BLACK]);
        assert_eq!(
            result,
            Err(PaletteError::LengthMismatch {
                colors: 2,
                device_colors: 1
            })
        );
    }

    #[test]
    fn test_dual_colors_empty() {
        assert_eq!(
            Palette::with_device_colors(&[], &[]),
            Err(PaletteError::EmptyPalette)
        );
    }

    #[test]
    fn test_from_hex() {
        let palette = Palette::from_hex(&["#000", "#FFF", "#F00"]).unwrap();
        assert_eq!(
            palette.colors(),
            &[Rgb::BLACK, Rgb::WHITE, Rgb::new(255, 0, 0)]
        );
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(matches!(
            Palette::from_hex(&["#000000", "#ZZZZZZ"]),
            Err(PaletteError::ParseColor(_))
        ));
        assert_eq!(Palette::from_hex(&[]), Err(PaletteError::EmptyPalette));
    }

    #[test]
    fn test_from_hex_with_device_colors() {
        let palette =
            Palette::from_hex_with_device_colors(&["#191E21", "#E8E8E8"], &["#000", "#FFF"])
                .unwrap();
        assert_eq!(palette.color(1), Rgb::gray(0xe8));
        assert_eq!(palette.device_color(1), Rgb::WHITE);
    }

    #[test]
    fn test_for_depth() {
        assert_eq!(Palette::for_depth(BitDepth::One).unwrap().len(), 2);
        assert_eq!(Palette::for_depth(BitDepth::Two).unwrap().len(), 4);
        assert_eq!(Palette::for_depth(BitDepth::Four).unwrap().len(), 16);
        assert_eq!(Palette::for_depth(BitDepth::Eight).unwrap().len(), 256);
        assert_eq!(Palette::for_depth(BitDepth::TwentyFour), None);
    }

    #[test]
    fn test_find_nearest_tie_goes_to_lowest_index() {
        let palette = Palette::new(&[Rgb::BLACK, Rgb::gray(10)]);
        assert_eq!(palette.find_nearest(Rgb::gray(5)), Some(0));

        let reversed = Palette::new(&[Rgb::gray(10), Rgb::BLACK]);
        assert_eq!(reversed.find_nearest(Rgb::gray(5)), Some(0));
    }

    #[test]
    fn test_find_nearest_duplicates_pick_first() {
        let palette = Palette::new(&[Rgb::WHITE, Rgb::BLACK, Rgb::BLACK]);
        assert_eq!(palette.find_nearest(Rgb::gray(3)), Some(1));
    }

    #[test]
    fn test_find_nearest_empty() {
        assert_eq!(Palette::new(&[]).find_nearest(Rgb::BLACK), None);
    }

    #[test]
    fn test_find_nearest_uses_displayed_colors() {
        // Displayed colors are swapped relative to device colors
        let palette =
            Palette::with_device_colors(&[Rgb::WHITE, Rgb::BLACK], &[Rgb::BLACK, Rgb::WHITE])
                .unwrap();
        assert_eq!(palette.find_nearest(Rgb::gray(30)), Some(1));
        assert_eq!(palette.find_nearest_device(Rgb::gray(30)), Some(0));
    }
}
