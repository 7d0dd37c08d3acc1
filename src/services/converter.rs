use std::collections::BTreeMap;
use std::sync::Arc;

use eink_bmp::{
    BitDepth, BmpEncoder, BmpImage, BmpPipeline, DitherAlgorithm, EncoderConfig, Palette, Raster,
};

use crate::error::ConvertError;
use crate::models::{AppConfig, ConvertParams, DeviceConfig};
use crate::rendering::{self, Rotation};

/// Everything one conversion needs, with every parameter parsed and
/// defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionPlan {
    pub bits: u16,
    pub palette: Option<Palette>,
    pub algorithm: DitherAlgorithm,
    pub rotation: Rotation,
    pub invert: bool,
    pub threshold: Option<u8>,
}

/// Where a palette comes from, before it is built.
enum PaletteSource<'a> {
    Colors(Vec<&'a str>),
    Gray(usize),
    Panel(&'a str),
}

/// PNG to BMP conversion service.
///
/// Panel palettes are parsed once here and handed to every conversion.
pub struct Converter {
    config: Arc<AppConfig>,
    encoder: EncoderConfig,
    panels: BTreeMap<String, Palette>,
}

impl Converter {
    /// Build a converter from configuration.
    ///
    /// Panels whose colors don't parse are logged and left out, so requests
    /// naming them fail as unknown panels.
    pub fn new(config: Arc<AppConfig>) -> Result<Self, ConvertError> {
        let encoder = config.encoder.to_encoder_config()?;

        let mut panels = BTreeMap::new();
        for (name, panel) in &config.panels {
            match panel.palette() {
                Ok(palette) => {
                    panels.insert(name.clone(), palette);
                }
                Err(e) => tracing::warn!(panel = %name, %e, "Ignoring invalid panel"),
            }
        }

        tracing::debug!(
            panels = panels.len(),
            row_order = ?encoder.row_order,
            depths = %encoder.depths,
            "Converter ready"
        );

        Ok(Self {
            config,
            encoder,
            panels,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn encoder_config(&self) -> &EncoderConfig {
        &self.encoder
    }

    /// Parsed palette of a configured panel
    pub fn panel(&self, name: &str) -> Option<&Palette> {
        self.panels.get(name)
    }

    /// Apply request parameters over the device profile over the defaults.
    ///
    /// The palette is taken as a whole from whichever level names one
    /// (`colors`, then `gray`, then `panel`), so a request palette always
    /// replaces the device's. Without an explicit depth, the smallest
    /// supported indexed depth that fits the palette is used, or 24 bits
    /// when there is no palette.
    pub fn resolve(&self, params: &ConvertParams) -> Result<ConversionPlan, ConvertError> {
        let no_device = DeviceConfig::default();
        let device = match params.device.as_deref() {
            Some(name) => self
                .config
                .device(name)
                .ok_or_else(|| ConvertError::UnknownDevice(name.to_string()))?,
            None => &no_device,
        };

        let palette = match request_palette(params).or_else(|| device_palette(device)) {
            Some(source) => Some(self.build_palette(source)?),
            None => None,
        };

        let bits = match params.bits.or(device.bits) {
            Some(bits) => bits,
            None => self.default_bits(palette.as_ref()),
        };
        BmpEncoder::new(self.encoder).check_depth(bits)?;

        let algorithm = match params.dither.as_deref().or(device.dither.as_deref()) {
            Some(name) => name
                .parse()
                .map_err(|e| ConvertError::invalid_param("dither", e))?,
            None => DitherAlgorithm::default(),
        };

        let rotation = match params.rotate.or(device.rotate) {
            Some(degrees) => Rotation::from_degrees(degrees).ok_or_else(|| {
                ConvertError::invalid_param(
                    "rotate",
                    format!("{degrees} is not one of 0, 90, 180 or 270"),
                )
            })?,
            None => Rotation::None,
        };

        Ok(ConversionPlan {
            bits,
            palette,
            algorithm,
            rotation,
            invert: params.invert.or(device.invert).unwrap_or(false),
            threshold: params.threshold.or(device.threshold),
        })
    }

    /// Decode a PNG and convert it to BMP.
    ///
    /// Parameters are resolved before the image is decoded, so bad
    /// parameters are reported even for bad images.
    pub fn convert(&self, png: &[u8], params: &ConvertParams) -> Result<BmpImage, ConvertError> {
        let plan = self.resolve(params)?;
        let raster = rendering::decode_png(png)?;
        self.convert_raster(raster, &plan)
    }

    /// Transform and encode a decoded raster.
    ///
    /// Order: flatten alpha, rotate, threshold, invert, then quantize and
    /// encode.
    pub fn convert_raster(
        &self,
        raster: Raster,
        plan: &ConversionPlan,
    ) -> Result<BmpImage, ConvertError> {
        let mut raster = rendering::flatten_alpha(raster)?;
        if plan.rotation != Rotation::None {
            raster = rendering::rotate(&raster, plan.rotation)?;
        }
        if let Some(level) = plan.threshold {
            rendering::threshold(&mut raster, level);
        }
        if plan.invert {
            rendering::invert(&mut raster);
        }

        let mut pipeline = BmpPipeline::new(plan.bits)
            .algorithm(plan.algorithm)
            .config(self.encoder);
        if let Some(palette) = &plan.palette {
            pipeline = pipeline.palette(palette.clone());
        }
        let image = pipeline.run(&raster)?;

        tracing::info!(
            width = image.width(),
            height = image.height(),
            bits = plan.bits,
            colors = plan.palette.as_ref().map(Palette::len),
            algorithm = %plan.algorithm,
            rotation = %plan.rotation,
            bytes = image.len(),
            "Converted image"
        );
        Ok(image)
    }

    fn build_palette(&self, source: PaletteSource<'_>) -> Result<Palette, ConvertError> {
        match source {
            PaletteSource::Colors(colors) => {
                Palette::from_hex(&colors).map_err(|e| ConvertError::invalid_param("colors", e))
            }
            PaletteSource::Gray(levels) => {
                Palette::grayscale(levels).map_err(|e| ConvertError::invalid_param("gray", e))
            }
            PaletteSource::Panel(name) => self
                .panels
                .get(name)
                .cloned()
                .ok_or_else(|| ConvertError::UnknownPanel(name.to_string())),
        }
    }

    fn default_bits(&self, palette: Option<&Palette>) -> u16 {
        let Some(palette) = palette else {
            return BitDepth::TwentyFour.bits();
        };
        self.encoder
            .depths
            .iter()
            .find(|d| d.is_indexed() && palette.len() <= d.max_colors())
            .unwrap_or(BitDepth::TwentyFour)
            .bits()
    }
}

fn request_palette(params: &ConvertParams) -> Option<PaletteSource<'_>> {
    if let Some(colors) = params.color_list() {
        return Some(PaletteSource::Colors(colors));
    }
    if let Some(levels) = params.gray {
        return Some(PaletteSource::Gray(levels));
    }
    params.panel.as_deref().map(PaletteSource::Panel)
}

fn device_palette(device: &DeviceConfig) -> Option<PaletteSource<'_>> {
    if let Some(colors) = &device.colors {
        return Some(PaletteSource::Colors(
            colors.iter().map(String::as_str).collect(),
        ));
    }
    if let Some(levels) = device.gray_levels {
        return Some(PaletteSource::Gray(levels));
    }
    device.panel.as_deref().map(PaletteSource::Panel)
}
