pub mod convert;

pub use convert::{__path_handle_convert, __path_handle_palettes};
pub use convert::{
    handle_convert, handle_palettes, ErrorResponse, PalettesResponse, PanelInfo,
};
