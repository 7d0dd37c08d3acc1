//! 8-bit RGB color type

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A color as three 8-bit channels.
///
/// This is both the pixel type of a [`Raster`](crate::Raster) and the entry
/// type of a [`Palette`](crate::Palette).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a neutral grey with all three channels set to `value`.
    #[inline]
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// # Example
    /// ```
    /// use eink_bmp::Rgb;
    /// assert_eq!(Rgb::gray(5).distance_squared(Rgb::gray(10)), 75);
    /// ```
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Channels as floats, for scaling diffused error.
    #[inline]
    pub(crate) fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Rec. 601 luma, rounded to the nearest integer.
    ///
    /// # Example
    /// ```
    /// use eink_bmp::Rgb;
    /// assert_eq!(Rgb::WHITE.luma(), 255);
    /// assert_eq!(Rgb::new(255, 0, 0).luma(), 76);
    /// ```
    #[inline]
    pub fn luma(self) -> u8 {
        let weighted = 299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32;
        ((weighted + 500) / 1000) as u8
    }

    /// Every channel replaced by `255 - value`.
    #[inline]
    pub fn inverted(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    /// Formats as `#rrggbb`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` / `RRGGBB`
    /// - `#RGB` / `RGB` (each digit doubled, `#F00` is `#FF0000`)
    ///
    /// Surrounding whitespace is ignored and digits are case-insensitive.
    ///
    /// # Example
    /// ```
    /// use eink_bmp::Rgb;
    /// let orange: Rgb = "#FF8000".parse().unwrap();
    /// assert_eq!(orange, Rgb::new(255, 128, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        assert_eq!("#191E21".parse::<Rgb>().unwrap(), Rgb::new(0x19, 0x1e, 0x21));
        assert_eq!("e8e8e8".parse::<Rgb>().unwrap(), Rgb::gray(0xe8));
    }

    #[test]
    fn test_parse_shorthand_hex() {
        assert_eq!("#F00".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!("abc".parse::<Rgb>().unwrap(), Rgb::new(0xaa, 0xbb, 0xcc));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(" #ffffff ".parse::<Rgb>().unwrap(), Rgb::WHITE);
    }

    #[test]
    fn test_parse_invalid_length() {
        assert_eq!(
            "#FFFF".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength)
        );
        assert_eq!("".parse::<Rgb>(), Err(ParseColorError::InvalidLength));
    }

    #[test]
    fn test_parse_invalid_hex_digit() {
        assert!(matches!(
            "#GG0000".parse::<Rgb>(),
            Err(ParseColorError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_parse_rejects_multibyte_input() {
        // Three bytes of UTF-8 would otherwise slice through a character
        assert_eq!("é0".parse::<Rgb>(), Err(ParseColorError::InvalidLength));
    }

    #[test]
    fn test_display_round_trip() {
        let color = Rgb::new(18, 52, 86);
        assert_eq!(color.to_string(), "#123456");
        assert_eq!(color.to_string().parse::<Rgb>().unwrap(), color);
    }

    #[test]
    fn test_distance_squared() {
        assert_eq!(Rgb::BLACK.distance_squared(Rgb::BLACK), 0);
        assert_eq!(Rgb::BLACK.distance_squared(Rgb::WHITE), 3 * 255 * 255);
        assert_eq!(
            Rgb::new(10, 20, 30).distance_squared(Rgb::new(13, 16, 30)),
            9 + 16
        );
    }

    #[test]
    fn test_luma_of_greys_is_identity() {
        for v in [0u8, 1, 127, 128, 220, 255] {
            assert_eq!(Rgb::gray(v).luma(), v);
        }
    }

    #[test]
    fn test_inverted() {
        assert_eq!(Rgb::BLACK.inverted(), Rgb::WHITE);
        assert_eq!(Rgb::new(10, 100, 250).inverted(), Rgb::new(245, 155, 5));
    }
}
