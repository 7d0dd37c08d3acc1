//! BMP (BITMAPINFOHEADER) encoding.
//!
//! # File Layout
//!
//! ```text
//! offset  size  field
//!      0     2  "BM"
//!      2     4  file size
//!      6     4  reserved (0)
//!     10     4  pixel array offset (54 + color table)
//!     14     4  info header size (40)
//!     18     4  width
//!     22     4  height (negative when rows are stored top-down)
//!     26     2  planes (1)
//!     28     2  bits per pixel
//!     30     4  compression (0, BI_RGB)
//!     34     4  pixel array size
//!     38     8  resolution (0, 0)
//!     46     4  colors used
//!     50     4  colors important
//!     54        color table, 2^bits BGR0 entries (indexed depths only)
//!               pixel array, rows padded to a multiple of 4 bytes
//! ```
//!
//! All fields are little-endian. Indexed rows are packed MSB-first.

mod config;
mod depth;
mod encoder;
mod header;

pub use config::{EncoderConfig, RowOrder};
pub use depth::{BitDepth, DepthSet};
pub use encoder::{encode_bmp, BmpEncoder, PixelSource};
pub use header::HEADER_SIZE;
