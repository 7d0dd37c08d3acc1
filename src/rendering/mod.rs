pub mod png_decode;
pub mod transform;

pub use png_decode::decode_png;
pub use transform::{flatten_alpha, invert, rotate, threshold, Rotation};
