//! Measured grid dimensions.

use serde::{Deserialize, Serialize};

use crate::splitter::HOURS_PER_DAY;

/// Container width used when no measurement is available yet.
pub const FALLBACK_CELL_WIDTH: f64 = 400.0;

/// Pixels per hour-row used when no measurement is available yet.
pub const FALLBACK_CELL_HEIGHT: f64 = 1000.0 / 24.0;

/// Grid dimensions reported by the host's measurement step.
///
/// `cell_width` is the measured width of the scrollable grid body; the drag
/// translator derives its per-day pitch from it. `cell_height` is the height
/// of one hour-row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub cell_width: f64,
    pub cell_height: f64,
    pub visible_days: u32,
}

impl LayoutMetrics {
    pub fn new(cell_width: f64, cell_height: f64, visible_days: u32) -> Self {
        Self {
            cell_width,
            cell_height,
            visible_days,
        }
    }

    /// Derive metrics from a container measurement covering a full day.
    pub fn from_measurement(container_width: f64, container_height: f64, visible_days: u32) -> Self {
        Self::new(
            container_width,
            container_height / f64::from(HOURS_PER_DAY),
            visible_days,
        )
    }

    /// Whether both dimensions are usable for pixel/time conversion.
    pub fn is_measured(&self) -> bool {
        self.cell_width.is_finite()
            && self.cell_width > 0.0
            && self.cell_height.is_finite()
            && self.cell_height > 0.0
    }

    /// Vertical scroll position, in pixels, that brings `minutes` past
    /// midnight to the top of the grid.
    pub fn scroll_offset_px(&self, minutes: u32) -> f64 {
        let cell_height = if self.cell_height.is_finite() && self.cell_height > 0.0 {
            self.cell_height
        } else {
            FALLBACK_CELL_HEIGHT
        };
        cell_height * f64::from(minutes) / 60.0
    }
}
