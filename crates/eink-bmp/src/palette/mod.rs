//! Palette types and utilities
//!
//! A [`Palette`] is the ordered color table shared by the quantizer and the
//! BMP encoder. Index order is the on-disk index value, so palettes are never
//! sorted or deduplicated.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::Palette;
