//! Configuration file support for inkframe.
//!
//! This module handles loading and validating settings from the configuration file
//! located at `~/.config/inkframe/config.toml`. Settings include the panel geometry,
//! update protocol thresholds, the client sleep schedule, text and dithering defaults.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{DitherMatrixSpec, FitModeSpec};
pub use types::{
    DisplayConfig, DitherConfig, OutputConfig, ProtocolConfig, ScheduleConfig, TextConfig,
};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::dither::DitherOptions;
use crate::draw::FontDescriptor;
use crate::protocol::{ProtocolSettings, SleepSchedule};

/// Main configuration structure containing all settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [display]
/// width = 800
/// height = 480
///
/// [protocol]
/// max_partial_pixels = 70000
/// full_refresh_minutes = 60
///
/// [schedule]
/// quiet_start_hour = 2
/// quiet_end_hour = 6
///
/// [text]
/// font_family = "Sans"
/// threshold = 0.9
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Panel geometry
    #[serde(default)]
    pub display: DisplayConfig,

    /// Full/partial update thresholds
    #[serde(default)]
    pub protocol: ProtocolConfig,

    /// Client sleep policy
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Text rendering defaults
    #[serde(default)]
    pub text: TextConfig,

    /// Photo dithering defaults
    #[serde(default)]
    pub dither: DitherConfig,

    /// Output file defaults
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `display.width` / `display.height`: at least 8
    /// - `protocol.full_refresh_minutes`: at least 1
    /// - `schedule.*_hour`: 0 - 23
    /// - `schedule.interval_minutes`: 1 - 60
    /// - `schedule.min_sleep_minutes` / `max_sleep_minutes`: 1 - 255, min ≤ max
    /// - `schedule.wake_margin_minutes`: 0 - 255
    /// - `text.threshold`: 0.0 - 1.0, non-finite values reset to the default
    pub fn validate_and_clamp(&mut self) {
        if self.display.width < 8 {
            log::warn!(
                "Invalid display width {}, clamping to 8",
                self.display.width
            );
            self.display.width = 8;
        }
        if self.display.height < 8 {
            log::warn!(
                "Invalid display height {}, clamping to 8",
                self.display.height
            );
            self.display.height = 8;
        }

        if self.protocol.max_partial_pixels < 0 {
            log::warn!(
                "Invalid max_partial_pixels {}, clamping to 0 (always full)",
                self.protocol.max_partial_pixels
            );
            self.protocol.max_partial_pixels = 0;
        }
        if self.protocol.full_refresh_minutes == 0 {
            log::warn!("Invalid full_refresh_minutes 0, clamping to 1");
            self.protocol.full_refresh_minutes = 1;
        }

        // Hours: 0 - 23
        if self.schedule.quiet_start_hour > 23 {
            log::warn!(
                "Invalid quiet_start_hour {}, clamping to 0-23 range",
                self.schedule.quiet_start_hour
            );
            self.schedule.quiet_start_hour = 23;
        }
        if self.schedule.quiet_end_hour > 23 {
            log::warn!(
                "Invalid quiet_end_hour {}, clamping to 0-23 range",
                self.schedule.quiet_end_hour
            );
            self.schedule.quiet_end_hour = 23;
        }

        // Interval: 1 - 60
        if !(1..=60).contains(&self.schedule.interval_minutes) {
            log::warn!(
                "Invalid interval_minutes {}, clamping to 1-60 range",
                self.schedule.interval_minutes
            );
            self.schedule.interval_minutes = self.schedule.interval_minutes.clamp(1, 60);
        }

        // Sleep bounds: 1 - 255, min <= max
        if self.schedule.min_sleep_minutes == 0 {
            log::warn!("Invalid min_sleep_minutes 0, clamping to 1");
            self.schedule.min_sleep_minutes = 1;
        }
        if self.schedule.max_sleep_minutes < self.schedule.min_sleep_minutes {
            log::warn!(
                "max_sleep_minutes {} is below min_sleep_minutes {}, raising it",
                self.schedule.max_sleep_minutes,
                self.schedule.min_sleep_minutes
            );
            self.schedule.max_sleep_minutes = self.schedule.min_sleep_minutes;
        }

        // Wake margin: 0 - 255
        if self.schedule.wake_margin_minutes > 255 {
            log::warn!(
                "Invalid wake_margin_minutes {}, clamping to 255",
                self.schedule.wake_margin_minutes
            );
            self.schedule.wake_margin_minutes = 255;
        }

        // Text threshold: 0.0 - 1.0
        if !self.text.threshold.is_finite() {
            log::warn!(
                "Invalid text threshold {}, falling back to {}",
                self.text.threshold,
                types::default_threshold()
            );
            self.text.threshold = types::default_threshold();
        }
        if !(0.0..=1.0).contains(&self.text.threshold) {
            log::warn!(
                "Invalid text threshold {:.2}, clamping to 0.0-1.0 range",
                self.text.threshold
            );
            self.text.threshold = self.text.threshold.clamp(0.0, 1.0);
        }

        // Validate font style
        if !matches!(
            self.text.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.text.font_style
            );
            self.text.font_style = "normal".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/inkframe/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("inkframe");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Writes the documented example config to `path`.
    ///
    /// # Errors
    /// Returns an error if a file already exists at `path` or it cannot be written.
    pub fn create_default_file(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                path.display()
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(path, default_config)?;

        info!("Created default config at {}", path.display());
        Ok(())
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    // ------------------------------------------------------------------
    // Conversions into runtime settings
    // ------------------------------------------------------------------

    pub fn protocol_settings(&self) -> ProtocolSettings {
        ProtocolSettings {
            width: self.display.width,
            height: self.display.height,
            max_partial_pixels: self.protocol.max_partial_pixels,
            full_refresh_minutes: self.protocol.full_refresh_minutes,
        }
    }

    pub fn sleep_schedule(&self) -> SleepSchedule {
        SleepSchedule {
            quiet_start_hour: self.schedule.quiet_start_hour,
            quiet_end_hour: self.schedule.quiet_end_hour,
            interval_minutes: self.schedule.interval_minutes,
            min_sleep_minutes: self.schedule.min_sleep_minutes,
            max_sleep_minutes: self.schedule.max_sleep_minutes,
            wake_margin_minutes: self.schedule.wake_margin_minutes,
        }
    }

    pub fn font_descriptor(&self) -> FontDescriptor {
        FontDescriptor::new(
            self.text.font_family.clone(),
            self.text.font_weight.clone(),
            self.text.font_style.clone(),
        )
    }

    pub fn dither_options(&self) -> DitherOptions {
        DitherOptions {
            matrix: self.dither.matrix.to_matrix(),
            fit: self.dither.fit.to_fit_mode(),
            corner_radius: self.dither.corner_radius,
        }
    }
}
