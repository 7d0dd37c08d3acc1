//! Nearest-color quantization with optional error diffusion.
//!
//! [`quantize`] maps every pixel of a [`Raster`] to the nearest palette color
//! and, for the diffusing algorithms, pushes the quantization error onto the
//! unprocessed neighbors using the algorithm's [`Kernel`].
//!
//! # Processing Order
//!
//! Strictly row-major, left to right and top to bottom, in a single pass.
//! There is no serpentine scan. Neighbor offsets falling outside the image
//! are dropped. Every neighbor update is clamped to `0..=255` and truncated
//! to a whole byte, so the working copy stays an 8-bit raster.
//!
//! # Example
//!
//! ```
//! use eink_bmp::{quantize, DitherAlgorithm, Palette, PixelLayout, Raster};
//!
//! let palette = Palette::grayscale(2).unwrap();
//! let raster = Raster::new(4, 1, PixelLayout::Gray, vec![128; 4]).unwrap();
//!
//! let quantized = quantize(&raster, &palette, DitherAlgorithm::FloydSteinberg).unwrap();
//! // Mid-gray dithers to alternating black and white
//! assert_eq!(quantized.indices(), &[1, 0, 1, 0]);
//! ```

mod kernel;

pub use kernel::{Kernel, ATKINSON, FLOYD_STEINBERG};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::api::BmpError;
use crate::color::Rgb;
use crate::output::QuantizedRaster;
use crate::palette::Palette;
use crate::raster::{PixelLayout, Raster};

/// Quantization algorithm.
///
/// Parsed from its external name once at the edge of the program, then
/// passed around as a plain value.
///
/// ```
/// use eink_bmp::DitherAlgorithm;
///
/// assert_eq!("floyd-steinberg".parse(), Ok(DitherAlgorithm::FloydSteinberg));
/// assert_eq!("floydSteinberg".parse(), Ok(DitherAlgorithm::FloydSteinberg));
/// assert_eq!(DitherAlgorithm::default(), DitherAlgorithm::Atkinson);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherAlgorithm {
    /// Nearest palette color per pixel, no error propagation.
    None,

    /// Floyd-Steinberg error diffusion (100% propagation).
    FloydSteinberg,

    /// Atkinson error diffusion with 0.75 dampening (56.25% propagation).
    ///
    /// The discarded error keeps flat areas clean on small palettes.
    #[default]
    Atkinson,
}

impl DitherAlgorithm {
    pub const ALL: [DitherAlgorithm; 3] = [
        DitherAlgorithm::None,
        DitherAlgorithm::FloydSteinberg,
        DitherAlgorithm::Atkinson,
    ];

    /// The diffusion kernel, or `None` for plain nearest-color mapping.
    pub fn kernel(self) -> Option<&'static Kernel> {
        match self {
            DitherAlgorithm::None => None,
            DitherAlgorithm::FloydSteinberg => Some(&FLOYD_STEINBERG),
            DitherAlgorithm::Atkinson => Some(&ATKINSON),
        }
    }

    /// Canonical external name.
    pub fn name(self) -> &'static str {
        match self {
            DitherAlgorithm::None => "none",
            DitherAlgorithm::FloydSteinberg => "floyd-steinberg",
            DitherAlgorithm::Atkinson => "atkinson",
        }
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dither algorithm '{0}' (expected none, floyd-steinberg or atkinson)")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for DitherAlgorithm {
    type Err = ParseAlgorithmError;

    /// Case-insensitive; `-`, `_` and spaces are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "none" => Ok(DitherAlgorithm::None),
            "floydsteinberg" => Ok(DitherAlgorithm::FloydSteinberg),
            "atkinson" => Ok(DitherAlgorithm::Atkinson),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Working copy of a raster's color channels.
///
/// Channels stay 8-bit: every diffusion update is clamped to `0..=255` and
/// truncated back to a whole byte before it is stored. Alpha never enters
/// the plane.
#[derive(Debug)]
pub(crate) struct WorkingPlane {
    pixels: Vec<Rgb>,
    width: usize,
    height: usize,
}

impl WorkingPlane {
    pub(crate) fn from_raster(raster: &Raster) -> Self {
        Self {
            pixels: raster.pixels().collect(),
            width: raster.width() as usize,
            height: raster.height() as usize,
        }
    }

    #[inline]
    pub(crate) fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// Spread `error` from `(x, y)` over the kernel's neighbors.
    ///
    /// Out-of-bounds neighbors are skipped. Each touched channel is clamped
    /// to `0.0..=255.0` and truncated before it is stored.
    pub(crate) fn diffuse(&mut self, x: usize, y: usize, kernel: &Kernel, error: [f32; 3]) {
        for &(dx, dy, weight) in kernel.entries {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            if nx < 0 || ny < 0 || nx >= self.width as i64 || ny >= self.height as i64 {
                continue;
            }
            let factor = kernel.factor(weight);
            let target = &mut self.pixels[ny as usize * self.width + nx as usize];
            let mut channels = target.to_f32();
            for c in 0..3 {
                channels[c] = (channels[c] + error[c] * factor).clamp(0.0, 255.0);
            }
            *target = Rgb::new(channels[0] as u8, channels[1] as u8, channels[2] as u8);
        }
    }
}

/// Map a raster onto a palette.
///
/// Matching uses the palette's displayed colors (squared RGB distance,
/// lowest index on ties). The returned raster holds the matched *device*
/// colors, so a palette without device colors yields exactly its own colors.
/// Gray input comes back as RGB because device colors may be chromatic; RGBA
/// input keeps its alpha bytes unchanged.
///
/// The input raster is only read.
///
/// # Errors
///
/// [`BmpError::InvalidPalette`] if the palette is empty or has more than 256
/// entries.
pub fn quantize(
    raster: &Raster,
    palette: &Palette,
    algorithm: DitherAlgorithm,
) -> Result<QuantizedRaster, BmpError> {
    if palette.is_empty() || palette.len() > 256 {
        return Err(BmpError::InvalidPalette { len: palette.len() });
    }

    let width = raster.width() as usize;
    let height = raster.height() as usize;
    debug!(
        width,
        height,
        colors = palette.len(),
        %algorithm,
        "quantizing raster"
    );

    let kernel = algorithm.kernel();
    let mut plane = WorkingPlane::from_raster(raster);
    let mut indices = Vec::with_capacity(width * height);

    for y in 0..height {
        for x in 0..width {
            let old = plane.get(x, y);
            let idx = palette
                .find_nearest(old)
                .ok_or(BmpError::InvalidPalette { len: 0 })?;
            indices.push(idx as u8);

            if let Some(kernel) = kernel {
                let (old, new) = (old.to_f32(), palette.color(idx).to_f32());
                let error = [old[0] - new[0], old[1] - new[1], old[2] - new[2]];
                plane.diffuse(x, y, kernel, error);
            }
        }
    }

    let output = render_device_colors(raster, palette, &indices)?;
    Ok(QuantizedRaster::new(indices, output, palette.clone(), algorithm))
}

// Device colors for every index, alpha copied from the source
fn render_device_colors(
    raster: &Raster,
    palette: &Palette,
    indices: &[u8],
) -> Result<Raster, BmpError> {
    let layout = match raster.layout() {
        PixelLayout::Rgba => PixelLayout::Rgba,
        PixelLayout::Gray | PixelLayout::Rgb => PixelLayout::Rgb,
    };
    let mut data = Vec::with_capacity(indices.len() * layout.channels());
    for (i, &idx) in indices.iter().enumerate() {
        data.extend_from_slice(&palette.device_color(idx as usize).to_bytes());
        if let Some(alpha) = raster.alpha_at(i) {
            data.push(alpha);
        }
    }
    Raster::new(raster.width(), raster.height(), layout, data)
}
