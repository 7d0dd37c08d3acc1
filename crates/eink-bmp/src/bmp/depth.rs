//! Bit depths and depth sets

use std::fmt;

use crate::api::BmpError;

/// Bits per pixel of a BMP pixel array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BitDepth {
    /// 2 colors, 8 pixels per byte
    One,
    /// 4 colors, 4 pixels per byte
    Two,
    /// 16 colors, 2 pixels per byte
    Four,
    /// 256 colors, one index byte per pixel
    Eight,
    /// Truecolor, B, G, R per pixel, no color table
    TwentyFour,
}

impl BitDepth {
    pub const ALL: [BitDepth; 5] = [
        BitDepth::One,
        BitDepth::Two,
        BitDepth::Four,
        BitDepth::Eight,
        BitDepth::TwentyFour,
    ];

    #[inline]
    pub const fn bits(self) -> u16 {
        match self {
            BitDepth::One => 1,
            BitDepth::Two => 2,
            BitDepth::Four => 4,
            BitDepth::Eight => 8,
            BitDepth::TwentyFour => 24,
        }
    }

    pub const fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            1 => Some(BitDepth::One),
            2 => Some(BitDepth::Two),
            4 => Some(BitDepth::Four),
            8 => Some(BitDepth::Eight),
            24 => Some(BitDepth::TwentyFour),
            _ => None,
        }
    }

    /// True for the depths that store palette indices.
    #[inline]
    pub const fn is_indexed(self) -> bool {
        !matches!(self, BitDepth::TwentyFour)
    }

    /// Size of the color table, `2^bits` for indexed depths and 0 for
    /// truecolor.
    #[inline]
    pub const fn max_colors(self) -> usize {
        if self.is_indexed() {
            1 << self.bits()
        } else {
            0
        }
    }

    /// Smallest indexed depth whose color table holds `colors` entries.
    ///
    /// ```
    /// use eink_bmp::BitDepth;
    ///
    /// assert_eq!(BitDepth::for_colors(2), Some(BitDepth::One));
    /// assert_eq!(BitDepth::for_colors(6), Some(BitDepth::Four));
    /// assert_eq!(BitDepth::for_colors(300), None);
    /// ```
    pub fn for_colors(colors: usize) -> Option<Self> {
        BitDepth::ALL
            .into_iter()
            .filter(|d| d.is_indexed())
            .find(|d| colors <= d.max_colors())
    }

    #[inline]
    const fn mask(self) -> u8 {
        match self {
            BitDepth::One => 0b0000_0001,
            BitDepth::Two => 0b0000_0010,
            BitDepth::Four => 0b0000_0100,
            BitDepth::Eight => 0b0000_1000,
            BitDepth::TwentyFour => 0b0001_0000,
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = BmpError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        BitDepth::from_bits(bits).ok_or(BmpError::UnsupportedBitDepth {
            bits,
            supported: DepthSet::ALL,
        })
    }
}

/// A set of bit depths an encoder accepts.
///
/// ```
/// use eink_bmp::{BitDepth, DepthSet};
///
/// let set = DepthSet::from_depths(&[BitDepth::One, BitDepth::TwentyFour]);
/// assert!(set.contains(BitDepth::One));
/// assert!(!set.contains(BitDepth::Eight));
/// assert_eq!(set.to_string(), "1, 24");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthSet(u8);

impl DepthSet {
    pub const ALL: DepthSet = DepthSet::from_depths(&BitDepth::ALL);
    pub const EMPTY: DepthSet = DepthSet(0);

    pub const fn from_depths(depths: &[BitDepth]) -> Self {
        let mut mask = 0;
        let mut i = 0;
        while i < depths.len() {
            mask |= depths[i].mask();
            i += 1;
        }
        DepthSet(mask)
    }

    /// Build a set from raw bit counts, rejecting any unknown depth.
    pub fn from_bits(bits: &[u16]) -> Result<Self, BmpError> {
        bits.iter()
            .map(|&b| BitDepth::try_from(b))
            .collect::<Result<DepthSet, _>>()
    }

    #[inline]
    pub const fn contains(self, depth: BitDepth) -> bool {
        self.0 & depth.mask() != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn with(self, depth: BitDepth) -> Self {
        DepthSet(self.0 | depth.mask())
    }

    /// Members in ascending order.
    pub fn iter(self) -> impl Iterator<Item = BitDepth> {
        BitDepth::ALL.into_iter().filter(move |&d| self.contains(d))
    }
}

impl Default for DepthSet {
    fn default() -> Self {
        DepthSet::ALL
    }
}

impl FromIterator<BitDepth> for DepthSet {
    fn from_iter<I: IntoIterator<Item = BitDepth>>(iter: I) -> Self {
        iter.into_iter().fold(DepthSet::EMPTY, DepthSet::with)
    }
}

impl fmt::Display for DepthSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for depth in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{depth}")?;
            first = false;
        }
        Ok(())
    }
}
