//! Engine configuration supplied by the host.
//!
//! Every field has a default, so a partial JSON document (or `{}`) is a valid
//! configuration.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Horizontal stagger, in pixels, between concurrent events.
pub const DEFAULT_OVERLAP_OFFSET_PX: f64 = 20.0;

/// Width of the hour-label gutter subtracted from the measured width.
pub const DEFAULT_FIXED_MARGIN_PX: f64 = 50.0;

/// Number of day columns covered by one horizontal drag unit.
pub const DEFAULT_COLUMNS_PER_UNIT: f64 = 3.5;

/// How vertical pointer movement is discretized into hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalSnap {
    /// Round to quarter rows, truncate to whole rows, then halve: one hour-row
    /// of movement moves the event by half an hour, and movements under
    /// 7/8 of a row are ignored.
    #[default]
    Coarse,
    /// One hour-row of movement moves the event by one hour, rounded to the
    /// nearest half hour.
    HalfHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    pub fixed_margin: f64,
    pub columns_per_unit: f64,
    pub vertical_snap: VerticalSnap,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            fixed_margin: DEFAULT_FIXED_MARGIN_PX,
            columns_per_unit: DEFAULT_COLUMNS_PER_UNIT,
            vertical_snap: VerticalSnap::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub overlap_offset_px: f64,
    /// Minutes past midnight the grid is initially scrolled to.
    pub scroll_offset_minutes: u32,
    pub drag: DragConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overlap_offset_px: DEFAULT_OVERLAP_OFFSET_PX,
            scroll_offset_minutes: 0,
            drag: DragConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON configuration document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| GridError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.overlap_offset_px.is_finite() || self.overlap_offset_px < 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "overlap_offset_px must be a non-negative number, got {}",
                self.overlap_offset_px
            )));
        }
        if self.scroll_offset_minutes > 24 * 60 {
            return Err(GridError::InvalidConfig(format!(
                "scroll_offset_minutes must be at most 1440, got {}",
                self.scroll_offset_minutes
            )));
        }
        if !self.drag.fixed_margin.is_finite() || self.drag.fixed_margin < 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "drag.fixed_margin must be a non-negative number, got {}",
                self.drag.fixed_margin
            )));
        }
        if !self.drag.columns_per_unit.is_finite() || self.drag.columns_per_unit <= 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "drag.columns_per_unit must be positive, got {}",
                self.drag.columns_per_unit
            )));
        }
        Ok(())
    }
}
