//! EdgeTrace Settings Crate
//!
//! Handles the tool configuration file: tracer, edge extraction and G-code
//! sections, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{default_config_path, Config, TracerSettings, CONFIG_FILE_NAME};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
