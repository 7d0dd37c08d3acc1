pub mod converter;

pub use converter::{ConversionPlan, Converter};
