pub mod config;
pub mod request;

pub use config::{AppConfig, DeviceConfig, EncoderSettings, PanelConfig, RowOrderSetting};
pub use request::ConvertParams;
