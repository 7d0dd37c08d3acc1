//! Inkshot
//!
//! Converts rendered page screenshots into BMP files for e-ink displays.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
