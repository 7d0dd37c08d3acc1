//! eink-bmp: palette quantization and BMP encoding for e-ink displays
//!
//! This library turns a continuous-tone raster (typically a screenshot of a
//! rendered page) into a reduced-palette image and serializes it as a BMP
//! file that small display controllers can stream straight into their frame
//! buffer.
//!
//! # Quick Start
//!
//! The [`BmpPipeline`] builder is the primary entry point:
//!
//! ```
//! use eink_bmp::{BmpPipeline, DitherAlgorithm, Palette, PixelLayout, Raster};
//!
//! let palette = Palette::grayscale(2).unwrap();
//! let raster = Raster::new(2, 2, PixelLayout::Rgb, vec![128; 2 * 2 * 3]).unwrap();
//!
//! let image = BmpPipeline::new(1)
//!     .palette(palette)
//!     .algorithm(DitherAlgorithm::FloydSteinberg)
//!     .run(&raster)
//!     .unwrap();
//!
//! assert_eq!(image.content_type(), "image/bmp");
//! assert_eq!(&image.as_bytes()[0..2], b"BM");
//! ```
//!
//! # Components
//!
//! The pipeline is three small pieces that can also be used on their own:
//!
//! - [`Palette`]: ordered color table, either a grayscale ramp
//!   ([`Palette::grayscale`]) or a fixed device palette used as-is
//! - [`quantize`]: nearest-color mapping with optional error diffusion
//!   ([`DitherAlgorithm`])
//! - [`BmpEncoder`]: BITMAPINFOHEADER writer for 1, 2, 4, 8 and 24 bits
//!   per pixel, with configurable row order ([`EncoderConfig`])
//!
//! ```text
//! Raster ──> quantize(palette, algorithm) ──> QuantizedRaster
//!                                                 |
//!                                     indices (1/2/4/8 bpp)
//!                                     or RGB  (24 bpp)
//!                                                 v
//!                                   BmpEncoder::encode ──> Vec<u8>
//! ```
//!
//! # Color Matching
//!
//! Matching is plain squared Euclidean distance in 8-bit RGB. Ties go to
//! the lowest palette index, so palettes with duplicate or equidistant
//! entries resolve deterministically. Error diffusion works on the same
//! 0..=255 scale, clamping each channel after every neighbor update.
//!
//! All calls are pure: no global state, no I/O, and every type is
//! `Send + Sync`, so independent conversions can run on any thread.

pub mod api;
pub mod bmp;
pub mod color;
pub mod dither;
pub mod output;
pub mod palette;
pub mod raster;


pub use api::{BmpError, BmpImage, BmpPipeline};
pub use bmp::{encode_bmp, BitDepth, BmpEncoder, DepthSet, EncoderConfig, PixelSource, RowOrder};
pub use color::Rgb;
pub use dither::{quantize, DitherAlgorithm, ParseAlgorithmError};
pub use output::QuantizedRaster;
pub use palette::{Palette, PaletteError, ParseColorError};
pub use raster::{PixelLayout, Raster};
