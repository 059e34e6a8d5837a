//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration. Command line flags are applied on top.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::battery::BatterySelector;
use crate::block::icons::{parse_custom_pair, IconStyle};
use crate::block::output::OutputFormat;
use crate::error::{BatteryBlockError, Result};
use crate::telemetry::source::DEFAULT_BASE_PATH;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub icons: IconsConfig,

    #[serde(default)]
    pub battery: BatteryConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Icon configuration
#[derive(Debug, Deserialize, Clone)]
pub struct IconsConfig {
    #[serde(rename = "type", default = "default_icon_style")]
    pub style: IconStyle,

    /// `FULL,EMPTY` pair used by the custom style
    #[serde(default)]
    pub custom: Option<String>,
}

/// Battery selection configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BatteryConfig {
    /// Zero-based battery index; unset combines all batteries
    #[serde(default)]
    pub index: Option<usize>,

    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,
}

/// Display configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Percentage at or below which the low color is emitted
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    #[serde(default = "default_low_color")]
    pub low_color: String,

    #[serde(default = "default_output_format")]
    pub format: OutputFormat,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Log to this file instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

// Default value functions
fn default_icon_style() -> IconStyle { IconStyle::Battery }

fn default_base_path() -> PathBuf { PathBuf::from(DEFAULT_BASE_PATH) }

fn default_threshold() -> f64 { 10.0 }
fn default_low_color() -> String { "#FF0000".to_string() }
fn default_output_format() -> OutputFormat { OutputFormat::Text }

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            style: default_icon_style(),
            custom: None,
        }
    }
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            index: None,
            base_path: default_base_path(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            low_color: default_low_color(),
            format: default_output_format(),
        }
    }
}

impl BatteryConfig {
    /// Battery selection this configuration asks for
    pub fn selector(&self) -> BatterySelector {
        self.index
            .map(BatterySelector::Index)
            .unwrap_or(BatterySelector::Combined)
    }
}

/// Default config file location, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("battery-block").join("config.toml")
}

/// Whether `color` has the `#RRGGBB` form
fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].bytes().all(|b| b.is_ascii_hexdigit())
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use battery_block::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file is missing
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] for a file that exists.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns [`BatteryBlockError::Config`] if a value is out of range, or
    /// [`BatteryBlockError::InvalidIcons`] if the custom icon pair is
    /// missing or malformed while the custom style is selected.
    pub fn validate(&self) -> Result<()> {
        if self.battery.base_path.as_os_str().is_empty() {
            return Err(BatteryBlockError::Config(
                toml::de::Error::custom("base_path cannot be empty")
            ));
        }

        // NaN fails both comparisons
        if !(self.display.threshold >= 0.0 && self.display.threshold <= 100.0) {
            return Err(BatteryBlockError::Config(
                toml::de::Error::custom("threshold must be between 0.0 and 100.0")
            ));
        }

        if !is_hex_color(&self.display.low_color) {
            return Err(BatteryBlockError::Config(
                toml::de::Error::custom("low_color must be of the form #RRGGBB")
            ));
        }

        if self.icons.style == IconStyle::Custom {
            let spec = self.icons.custom.as_deref().ok_or_else(|| {
                BatteryBlockError::InvalidIcons(
                    "custom icon style needs a FULL,EMPTY pair".to_string(),
                )
            })?;
            parse_custom_pair(spec)?;
        }

        Ok(())
    }
}
