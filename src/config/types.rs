//! Configuration type definitions.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::enums::{DitherMatrixSpec, FitModeSpec};

/// Display panel geometry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DisplayConfig {
    /// Panel width in pixels
    #[serde(default = "default_width")]
    pub width: usize,

    /// Panel height in pixels
    #[serde(default = "default_height")]
    pub height: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Update protocol thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProtocolConfig {
    /// Largest byte-aligned changed area (in pixels) still sent as a partial update
    #[serde(default = "default_max_partial_pixels")]
    pub max_partial_pixels: i64,

    /// Length of a refresh slot in minutes; each slot begins with a full update
    #[serde(default = "default_full_refresh_minutes")]
    pub full_refresh_minutes: u32,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            max_partial_pixels: default_max_partial_pixels(),
            full_refresh_minutes: default_full_refresh_minutes(),
        }
    }
}

/// Client sleep policy.
///
/// Between `quiet_start_hour` and `quiet_end_hour` clients sleep until the
/// quiet window ends; otherwise they wake on the next `interval_minutes` mark.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScheduleConfig {
    /// Hour (0-23) at which the quiet window starts
    #[serde(default = "default_quiet_start")]
    pub quiet_start_hour: u32,

    /// Hour (0-23) at which the quiet window ends
    #[serde(default = "default_quiet_end")]
    pub quiet_end_hour: u32,

    /// Wake-up interval outside quiet hours (1-60 minutes)
    #[serde(default = "default_interval")]
    pub interval_minutes: u32,

    /// Shortest sleep sent to a client (1-255)
    #[serde(default = "default_min_sleep")]
    pub min_sleep_minutes: u8,

    /// Longest sleep sent to a client (1-255)
    #[serde(default = "default_max_sleep")]
    pub max_sleep_minutes: u8,

    /// Extra minutes added so clients never wake just before fresh data
    #[serde(default)]
    pub wake_margin_minutes: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            quiet_start_hour: default_quiet_start(),
            quiet_end_hour: default_quiet_end(),
            interval_minutes: default_interval(),
            min_sleep_minutes: default_min_sleep(),
            max_sleep_minutes: default_max_sleep(),
            wake_margin_minutes: 0,
        }
    }
}

/// Text rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TextConfig {
    /// Font family name for high-resolution text (e.g., "Sans", "DejaVu Sans")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,

    /// Fraction of full glyph coverage (0.0-1.0) a pixel needs to be inked
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Directory with bitmap font tables (`font8.json`, `font12.json`, ...)
    #[serde(default)]
    pub bitmap_font_dir: Option<PathBuf>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
            threshold: default_threshold(),
            bitmap_font_dir: None,
        }
    }
}

/// Photo import settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DitherConfig {
    /// Threshold matrix (bayer4, bayer8)
    #[serde(default)]
    pub matrix: DitherMatrixSpec,

    /// Fit mode for photo panels (contain, cover)
    #[serde(default)]
    pub fit: FitModeSpec,

    /// Corner rounding for photo panels; negative values notch the corners
    #[serde(default = "default_photo_radius")]
    pub corner_radius: i32,
}

impl Default for DitherConfig {
    fn default() -> Self {
        Self {
            matrix: DitherMatrixSpec::default(),
            fit: FitModeSpec::default(),
            corner_radius: default_photo_radius(),
        }
    }
}

/// Output file defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct OutputConfig {
    /// Where to write a PNG preview of every rendered frame
    #[serde(default)]
    pub preview_path: Option<PathBuf>,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_width() -> usize {
    800
}

fn default_height() -> usize {
    480
}

fn default_max_partial_pixels() -> i64 {
    70_000
}

fn default_full_refresh_minutes() -> u32 {
    60
}

fn default_quiet_start() -> u32 {
    2
}

fn default_quiet_end() -> u32 {
    6
}

fn default_interval() -> u32 {
    60
}

fn default_min_sleep() -> u8 {
    15
}

fn default_max_sleep() -> u8 {
    240
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "bold".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

pub(crate) fn default_threshold() -> f64 {
    0.9
}

fn default_photo_radius() -> i32 {
    8
}
