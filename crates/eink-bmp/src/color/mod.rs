//! Color types
//!
//! Everything in this crate works on 8-bit sRGB triples; there is no
//! color-space conversion step.

mod rgb;

pub use rgb::Rgb;
