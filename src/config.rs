//! Chart configuration.
//!
//! Everything here is optional in the JSON file; missing sections fall back
//! to the stock six-panel layout, red/gray palette and 50 ms reveal steps.

use indexmap::IndexMap;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{WaffleError, WaffleResult};
use crate::plotting::Color;

// ============================================================================
// Palette
// ============================================================================

/// Colors for the two subcategories and the caption text
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PaletteConfig {
    /// Color of highlighted ("no") people and of the caption number
    #[serde(default = "default_highlight")]
    pub highlight: Color,
    /// Color of everyone else ("yes")
    #[serde(default = "default_base")]
    pub base: Color,
    #[serde(default = "default_caption_text")]
    pub caption_text: Color,
}

fn default_highlight() -> Color { Color::ALERT_RED }
fn default_base() -> Color { Color::SILVER_GRAY }
fn default_caption_text() -> Color { Color::CAPTION_GRAY }

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            highlight: default_highlight(),
            base: default_base(),
            caption_text: default_caption_text(),
        }
    }
}

// ============================================================================
// Reveal timing
// ============================================================================

/// Reveal animation timing
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TimingConfig {
    /// Delay between consecutive recolor steps
    #[serde(default = "default_step_interval")]
    pub step_interval_ms: u64,
    /// Length of one recolor transition
    #[serde(default = "default_step_duration")]
    pub step_duration_ms: u64,
}

/// Upper bound for either timing value.
pub const MAX_STEP_MS: u64 = 60_000;

fn default_step_interval() -> u64 { 50 }
fn default_step_duration() -> u64 { 50 }

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: default_step_interval(),
            step_duration_ms: default_step_duration(),
        }
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Canvas and panel geometry. The grid inside a panel is always 10x10.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f64,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f64,
    #[serde(default = "default_panel_width")]
    pub panel_width: f64,
    #[serde(default = "default_panel_height")]
    pub panel_height: f64,
    #[serde(default = "default_panel_padding")]
    pub panel_padding: f64,
    #[serde(default = "default_panels_per_row")]
    pub panels_per_row: usize,
}

fn default_canvas_width() -> f64 { 720.0 }
fn default_canvas_height() -> f64 { 680.0 }
fn default_panel_width() -> f64 { 240.0 }
fn default_panel_height() -> f64 { 320.0 }
fn default_panel_padding() -> f64 { 20.0 }
fn default_panels_per_row() -> usize { 3 }

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            panel_width: default_panel_width(),
            panel_height: default_panel_height(),
            panel_padding: default_panel_padding(),
            panels_per_row: default_panels_per_row(),
        }
    }
}

impl LayoutConfig {
    /// Number of panels that fit on the canvas.
    pub fn slot_count(&self) -> usize {
        if self.panel_height <= 0.0 {
            return 0;
        }
        let rows = ((self.canvas_height - self.panel_padding) / self.panel_height).floor();
        self.panels_per_row * rows.max(0.0) as usize
    }
}

// ============================================================================
// Chart configuration
// ============================================================================

/// Main chart configuration
#[derive(Deserialize, Debug, Clone, Default)]
pub struct WaffleConfig {
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Caption lines per category, shown under the caption number
    #[serde(default)]
    pub captions: IndexMap<String, Vec<String>>,
}

impl WaffleConfig {
    /// Load and validate a configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> WaffleResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            WaffleError::InvalidConfig(format!("cannot open {}: {}", path.display(), e))
        })?;
        let reader = BufReader::new(file);
        let config: WaffleConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use the defaults
    pub fn load_or_default(path: Option<&str>) -> WaffleResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> WaffleResult<()> {
        let layout = &self.layout;
        let sizes = [
            ("canvas_width", layout.canvas_width),
            ("canvas_height", layout.canvas_height),
            ("panel_width", layout.panel_width),
            ("panel_height", layout.panel_height),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(WaffleError::InvalidConfig(format!(
                    "layout.{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !(layout.panel_padding.is_finite() && layout.panel_padding >= 0.0) {
            return Err(WaffleError::InvalidConfig(format!(
                "layout.panel_padding must be non-negative, got {}",
                layout.panel_padding
            )));
        }
        let timing = [
            ("step_interval_ms", self.timing.step_interval_ms),
            ("step_duration_ms", self.timing.step_duration_ms),
        ];
        for (name, value) in timing {
            if value > MAX_STEP_MS {
                return Err(WaffleError::InvalidConfig(format!(
                    "timing.{} must be at most {} ms, got {}",
                    name, MAX_STEP_MS, value
                )));
            }
        }
        if layout.panels_per_row == 0 {
            return Err(WaffleError::InvalidConfig(
                "layout.panels_per_row must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
