use serde::Deserialize;
use utoipa::IntoParams;

/// Conversion parameters, shared by `POST /convert` and the `convert`
/// command. Anything left unset falls back to the device profile, then to
/// the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConvertParams {
    /// Bits per pixel: 1, 2, 4, 8 or 24
    pub bits: Option<u16>,

    /// Palette as comma-separated hex colors (e.g. "#000000,#FFFFFF,#FF0000")
    pub colors: Option<String>,

    /// Grayscale ramp size (2 to 256)
    pub gray: Option<usize>,

    /// Name of a configured panel palette
    pub panel: Option<String>,

    /// Name or alias of a configured device profile
    pub device: Option<String>,

    /// Dithering algorithm: none, floyd-steinberg or atkinson
    pub dither: Option<String>,

    /// Clockwise rotation in degrees: 0, 90, 180 or 270
    pub rotate: Option<u16>,

    /// Invert colors
    pub invert: Option<bool>,

    /// Luma cutoff: pixels at or above become white, the rest black
    pub threshold: Option<u8>,
}

impl ConvertParams {
    /// Split a comma-separated color list, dropping empty entries.
    pub fn color_list(&self) -> Option<Vec<&str>> {
        self.colors.as_deref().map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .collect()
        })
    }
}
