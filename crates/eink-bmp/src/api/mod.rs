//! Public API for the eink-bmp crate.
//!
//! This module provides the high-level API: the [`BmpPipeline`] builder,
//! its [`BmpImage`] output and the unified [`BmpError`] type.

mod builder;
mod error;

pub use builder::{BmpImage, BmpPipeline};
pub use error::BmpError;
