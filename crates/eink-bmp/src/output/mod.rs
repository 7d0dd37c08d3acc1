//! Output types for the quantization stage.
//!
//! [`QuantizedRaster`] carries both forms the encoder can consume: the
//! palette index plane for indexed depths and the rewritten device-color
//! raster for truecolor output or previews.

mod quantized;

pub use quantized::QuantizedRaster;
