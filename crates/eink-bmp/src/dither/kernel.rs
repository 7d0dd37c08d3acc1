//! Error diffusion kernel definitions.
//!
//! Each kernel specifies how quantization error is distributed to
//! neighboring pixels that haven't been processed yet.

/// An error diffusion kernel.
///
/// Each entry specifies an offset (dx, dy) and a weight for that neighbor.
/// A neighbor receives `error * weight / divisor * dampening`.
///
/// # Error Propagation
///
/// The total error propagated is `sum(weights) / divisor * dampening`, see
/// [`Kernel::propagation`]. Floyd-Steinberg propagates all of it. Atkinson
/// gives up a quarter through its weights and another quarter of the rest
/// through dampening, which keeps small palettes from bleeding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    /// (dx, dy, weight) entries for error diffusion.
    ///
    /// - `dx`: horizontal offset (positive = right)
    /// - `dy`: vertical offset (never negative)
    /// - `weight`: numerator of the neighbor's share
    pub entries: &'static [(i32, i32, u8)],

    /// Total divisor for normalizing weights.
    pub divisor: u8,

    /// Scale applied to the error before it is split among neighbors.
    pub dampening: f32,
}

impl Kernel {
    /// Fraction of a pixel's error that reaches its neighbors in total.
    pub fn propagation(&self) -> f32 {
        let sum: u32 = self.entries.iter().map(|&(_, _, w)| w as u32).sum();
        sum as f32 / self.divisor as f32 * self.dampening
    }

    /// Share of the error a neighbor with `weight` receives.
    #[inline]
    pub(crate) fn factor(&self, weight: u8) -> f32 {
        weight as f32 / self.divisor as f32 * self.dampening
    }
}

/// Atkinson dithering kernel.
///
/// Six neighbors at 1/8 each with the error first scaled by 0.75, for a
/// total propagation of 0.5625.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
///
/// Originally developed by Bill Atkinson for the Apple Macintosh.
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),  // right
        (2, 0, 1),  // two right
        (-1, 1, 1), // bottom-left
        (0, 1, 1),  // bottom
        (1, 1, 1),  // bottom-right
        (0, 2, 1),  // two below
    ],
    divisor: 8,
    dampening: 0.75,
};

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    dampening: 1.0,
};
