//! Encoder configuration

use super::depth::{BitDepth, DepthSet};

/// Order in which pixel rows are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowOrder {
    /// Last image row first. Stored height is positive.
    #[default]
    BottomUp,
    /// First image row first. Stored height is negative.
    TopDown,
}

/// Settings for a [`BmpEncoder`](super::BmpEncoder).
///
/// Two deployed display families disagree on orientation and on which
/// depths they accept, so both are presets:
///
/// ```
/// use eink_bmp::{BitDepth, EncoderConfig, RowOrder};
///
/// let config = EncoderConfig::top_down();
/// assert_eq!(config.row_order, RowOrder::TopDown);
/// assert!(config.depths.contains(BitDepth::Eight));
/// assert!(!config.depths.contains(BitDepth::Two));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    pub row_order: RowOrder,
    /// Depths the encoder accepts. Anything else is `UnsupportedBitDepth`.
    pub depths: DepthSet,
    /// Use [`Palette::for_depth`](crate::Palette::for_depth) when an indexed
    /// depth is requested without a palette.
    pub implicit_palette: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            row_order: RowOrder::BottomUp,
            depths: DepthSet::ALL,
            implicit_palette: false,
        }
    }
}

impl EncoderConfig {
    /// Bottom-up rows, depths 1, 2, 4 and 24, palette required.
    pub fn bottom_up() -> Self {
        Self {
            row_order: RowOrder::BottomUp,
            depths: DepthSet::from_depths(&[
                BitDepth::One,
                BitDepth::Two,
                BitDepth::Four,
                BitDepth::TwentyFour,
            ]),
            implicit_palette: false,
        }
    }

    /// Top-down rows, depths 1, 8 and 24, grayscale palette implied per depth.
    pub fn top_down() -> Self {
        Self {
            row_order: RowOrder::TopDown,
            depths: DepthSet::from_depths(&[BitDepth::One, BitDepth::Eight, BitDepth::TwentyFour]),
            implicit_palette: true,
        }
    }

    pub fn with_row_order(mut self, row_order: RowOrder) -> Self {
        self.row_order = row_order;
        self
    }

    pub fn with_depths(mut self, depths: DepthSet) -> Self {
        self.depths = depths;
        self
    }

    pub fn with_implicit_palette(mut self, implicit_palette: bool) -> Self {
        self.implicit_palette = implicit_palette;
        self
    }
}
