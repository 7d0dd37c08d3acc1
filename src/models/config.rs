use eink_bmp::{BmpError, DepthSet, EncoderConfig, Palette, PaletteError, RowOrder};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// BMP encoder settings shared by every conversion
    #[serde(default)]
    pub encoder: EncoderSettings,

    /// Named fixed panel palettes
    #[serde(default)]
    pub panels: BTreeMap<String, PanelConfig>,

    /// Named conversion profiles
    #[serde(default)]
    pub devices: BTreeMap<String, DeviceConfig>,

    /// Alternative device names
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RowOrderSetting {
    #[default]
    BottomUp,
    TopDown,
}

impl From<RowOrderSetting> for RowOrder {
    fn from(setting: RowOrderSetting) -> Self {
        match setting {
            RowOrderSetting::BottomUp => RowOrder::BottomUp,
            RowOrderSetting::TopDown => RowOrder::TopDown,
        }
    }
}

/// The `encoder:` section
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EncoderSettings {
    pub row_order: RowOrderSetting,

    /// Accepted bits per pixel
    pub depths: Vec<u16>,

    /// Fall back to a grayscale ramp when an indexed depth has no palette
    pub implicit_palette: bool,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            row_order: RowOrderSetting::BottomUp,
            depths: vec![1, 2, 4, 8, 24],
            implicit_palette: false,
        }
    }
}

impl EncoderSettings {
    /// Convert to the encoder's own configuration.
    pub fn to_encoder_config(&self) -> Result<EncoderConfig, BmpError> {
        Ok(EncoderConfig::default()
            .with_row_order(self.row_order.into())
            .with_depths(DepthSet::from_bits(&self.depths)?)
            .with_implicit_palette(self.implicit_palette))
    }
}

/// A fixed panel palette.
///
/// `colors` are what the panel actually shows and are used for matching.
/// `device_colors` are the values its controller expects in the file; when
/// omitted, `colors` are written as-is.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    pub colors: Vec<String>,

    #[serde(default)]
    pub device_colors: Vec<String>,
}

impl PanelConfig {
    pub fn new(colors: &[&str], device_colors: &[&str]) -> Self {
        Self {
            colors: colors.iter().map(|c| c.to_string()).collect(),
            device_colors: device_colors.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn palette(&self) -> Result<Palette, PaletteError> {
        let colors: Vec<&str> = self.colors.iter().map(String::as_str).collect();
        if self.device_colors.is_empty() {
            return Palette::from_hex(&colors);
        }
        let device_colors: Vec<&str> = self.device_colors.iter().map(String::as_str).collect();
        Palette::from_hex_with_device_colors(&colors, &device_colors)
    }
}

/// Conversion profile for one kind of display. Every field is optional and
/// is overridden by the matching request parameter.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DeviceConfig {
    pub bits: Option<u16>,

    /// Size of a grayscale ramp
    pub gray_levels: Option<usize>,

    /// Explicit palette as hex colors
    pub colors: Option<Vec<String>>,

    /// Name of a configured panel
    pub panel: Option<String>,

    pub dither: Option<String>,

    /// Clockwise rotation in degrees
    pub rotate: Option<u16>,

    pub invert: Option<bool>,

    /// Luma cutoff for black and white output
    pub threshold: Option<u8>,
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing path yields the built-in defaults. A file that cannot be
    /// read or parsed is logged and also yields the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::info!("No config file set, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        panels = config.panels.len(),
                        devices = config.devices.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        %e,
                        path = %path.display(),
                        "Failed to parse config, using defaults"
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse a YAML document. Built-in panels are added unless the document
    /// defines a panel of the same name.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let mut config: Self = serde_yaml::from_str(content)?;
        for (name, panel) in builtin_panels() {
            config.panels.entry(name).or_insert(panel);
        }
        Ok(config)
    }

    /// Resolve an alias to its device name. Unknown names pass through.
    pub fn resolve_device_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Get the profile for a device name or alias
    pub fn device(&self, name: &str) -> Option<&DeviceConfig> {
        self.devices.get(self.resolve_device_name(name))
    }

    pub fn panel(&self, name: &str) -> Option<&PanelConfig> {
        self.panels.get(name)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            encoder: EncoderSettings::default(),
            panels: builtin_panels().collect(),
            devices: BTreeMap::new(),
            aliases: BTreeMap::new(),
        }
    }
}

/// Panels every configuration knows about.
fn builtin_panels() -> impl Iterator<Item = (String, PanelConfig)> {
    [
        (
            "spectra6",
            PanelConfig::new(
                &["#191E21", "#E8E8E8", "#2157BA", "#125F20", "#B21318", "#EFDE44"],
                &["#000000", "#FFFFFF", "#0000FF", "#00FF00", "#FF0000", "#FFFF00"],
            ),
        ),
        (
            "acep",
            PanelConfig::new(
                &[
                    "#191E21", "#F1F1F1", "#31318F", "#53A428", "#D20E13", "#F3CF11", "#B85E1C",
                ],
                &[
                    "#000000", "#FFFFFF", "#0000FF", "#00FF00", "#FF0000", "#FFFF00", "#FF8000",
                ],
            ),
        ),
    ]
    .into_iter()
    .map(|(name, panel)| (name.to_string(), panel))
}
