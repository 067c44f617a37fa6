//! Configuration management for EdgeTrace
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats; the default location is
//! platform-specific.
//!
//! Configuration is organized into sections:
//! - Tracer settings (ring table size, traversal policy, node limit)
//! - Edge extraction (method, thresholds, sharpening)
//! - G-code output (scale, feeds, depths, offsets)

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use edgetrace_camtools::{ContourGcodeParameters, EdgeDetectionSettings};
use edgetrace_core::GeometryError;
use edgetrace_tracer::{
    CircleOffsetTable, TracerOptions, TraversalPolicy, VisitMarking, DEFAULT_MAX_RADIUS,
    MAX_SUPPORTED_RADIUS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name used inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Tracer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerSettings {
    /// Largest ring radius sampled around each point
    pub max_radius: usize,
    /// Depth-first or breadth-first expansion
    pub policy: TraversalPolicy,
    /// What a processed point marks as visited
    pub visit_marking: VisitMarking,
    /// Optional cap on nodes per trace
    pub max_nodes: Option<usize>,
}

impl Default for TracerSettings {
    fn default() -> Self {
        Self {
            max_radius: DEFAULT_MAX_RADIUS,
            policy: TraversalPolicy::default(),
            visit_marking: VisitMarking::default(),
            max_nodes: None,
        }
    }
}

impl TracerSettings {
    pub fn options(&self) -> TracerOptions {
        TracerOptions {
            policy: self.policy,
            visit_marking: self.visit_marking,
            max_nodes: self.max_nodes,
        }
    }

    /// Build the ring table these settings call for.
    pub fn build_table(&self) -> Result<CircleOffsetTable, GeometryError> {
        CircleOffsetTable::new(self.max_radius)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub tracer: TracerSettings,
    pub edges: EdgeDetectionSettings,
    pub gcode: ContourGcodeParameters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a `.json` or `.toml` configuration file.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate and write the configuration, creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        // Validate tracer settings
        if self.tracer.max_radius == 0 || self.tracer.max_radius > MAX_SUPPORTED_RADIUS {
            return Err(ConfigError::ValueOutOfRange {
                key: "tracer.max_radius".to_string(),
                value: self.tracer.max_radius.to_string(),
            }
            .into());
        }

        if self.tracer.max_nodes == Some(0) {
            return Err(SettingsError::invalid(
                "tracer.max_nodes",
                "must be > 0 when set",
            ));
        }

        // Validate edge extraction and G-code sections
        self.edges
            .validate()
            .map_err(|e| SettingsError::invalid("edges", e.to_string()))?;
        self.gcode
            .validate()
            .map_err(|e| SettingsError::invalid("gcode", e.to_string()))?;

        Ok(())
    }
}

/// Default configuration file location, e.g. `~/.config/edgetrace/config.toml`.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| {
        SettingsError::ConfigDirectory("no configuration directory for this platform".to_string())
    })?;
    Ok(base.join("edgetrace").join(CONFIG_FILE_NAME))
}
