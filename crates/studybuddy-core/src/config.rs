//! Dashboard configuration.

use std::fs;
use std::path::Path;

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Viewport;
use crate::placement::DEFAULT_MAX_ATTEMPTS;
use crate::widget::ICON_DIAMETER;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Position of the to-do side panel, anchored to the top-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelAnchor {
    pub width: f64,
    pub height: f64,
    /// Gap to the right viewport edge.
    pub right: f64,
    pub top: f64,
}

impl Default for PanelAnchor {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 500.0,
            right: 16.0,
            top: 16.0,
        }
    }
}

/// Tunables for the dashboard engine. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base URL of the remote API, handed to the host's HTTP collaborators.
    pub api_base_url: String,
    pub icon_diameter: f64,
    pub dock_height: f64,
    /// Extra space kept free above the dock when spawning icons.
    pub icon_spawn_margin: f64,
    pub todo_panel: PanelAnchor,
    pub note_size: Size,
    pub note_min_size: Size,
    pub note_spawn_padding: f64,
    pub note_bottom_reserve: f64,
    pub placement_attempts: usize,
    /// Keep freshly spawned icons from overlapping each other.
    pub avoid_sibling_overlap: bool,
    /// Pointer travel (px) before a press counts as a drag.
    pub move_threshold: f64,
    pub focus_minutes: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            icon_diameter: ICON_DIAMETER,
            dock_height: 72.0,
            icon_spawn_margin: 48.0,
            todo_panel: PanelAnchor::default(),
            note_size: Size::new(384.0, 200.0),
            note_min_size: Size::new(300.0, 150.0),
            note_spawn_padding: 20.0,
            note_bottom_reserve: 100.0,
            placement_attempts: DEFAULT_MAX_ATTEMPTS,
            avoid_sibling_overlap: false,
            move_threshold: 0.0,
            focus_minutes: 25,
        }
    }
}

impl DashboardConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, v)))
            }
        };
        positive("icon_diameter", self.icon_diameter)?;
        positive("note_min_size.width", self.note_min_size.width)?;
        positive("note_min_size.height", self.note_min_size.height)?;
        if self.placement_attempts == 0 {
            return Err(ConfigError::Invalid("placement_attempts must be at least 1".to_string()));
        }
        if !(self.move_threshold.is_finite() && self.move_threshold >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "move_threshold must be non-negative, got {}",
                self.move_threshold
            )));
        }
        Ok(())
    }

    /// The to-do panel's rectangle in `viewport`; icons are never spawned on it.
    pub fn todo_panel_rect(&self, viewport: Viewport) -> Rect {
        let panel = self.todo_panel;
        let x = viewport.width - panel.right - panel.width;
        Rect::from_origin_size(Point::new(x, panel.top), Size::new(panel.width, panel.height))
    }

    /// Area icons are sampled in: above the dock and the spawn margin.
    pub fn icon_spawn_area(&self, viewport: Viewport) -> Viewport {
        viewport.without_bottom(self.dock_height + self.icon_spawn_margin)
    }

    pub fn focus_secs(&self) -> u32 {
        self.focus_minutes.saturating_mul(60)
    }
}
