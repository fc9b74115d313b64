//! Convert pointer movement into discrete day/hour move deltas.
//!
//! Horizontal movement is measured in day-column units derived from the
//! measured grid width; vertical movement in hour-rows. Both are snapped to
//! integers (days) or half hours before they leave this module, so callers
//! only ever see whole [`MoveDelta`] values.
//!
//! Rounding is half-up (`floor(x + 0.5)`) in both axes, including for
//! negative movement.

use serde::{Deserialize, Serialize};

use crate::config::{DragConfig, VerticalSnap};
use crate::event::MoveDelta;
use crate::metrics::{LayoutMetrics, FALLBACK_CELL_HEIGHT, FALLBACK_CELL_WIDTH};

/// Smallest horizontal unit, in pixels, ever used for conversion.
pub const MIN_UNIT_PX: f64 = 1.0;

/// One pointer sample: where the gesture started and where it is now.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerSample {
    pub origin_x: f64,
    pub origin_y: f64,
    pub current_x: f64,
    pub current_y: f64,
}

impl PointerSample {
    pub fn new(origin_x: f64, origin_y: f64, current_x: f64, current_y: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            current_x,
            current_y,
        }
    }

    pub fn dx(&self) -> f64 {
        self.current_x - self.origin_x
    }

    pub fn dy(&self) -> f64 {
        self.current_y - self.origin_y
    }
}

/// Result of translating one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Translation {
    pub delta: MoveDelta,
    /// True when fallback metrics were used or the sample was not finite.
    pub degraded: bool,
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn horizontal_unit(metrics: &LayoutMetrics, config: &DragConfig) -> (f64, bool) {
    let unit = (metrics.cell_width - config.fixed_margin) / config.columns_per_unit;
    if unit.is_finite() && unit > 0.0 {
        return (unit, false);
    }
    let fallback = (FALLBACK_CELL_WIDTH - config.fixed_margin) / config.columns_per_unit;
    let fallback = if fallback.is_finite() {
        fallback.max(MIN_UNIT_PX)
    } else {
        MIN_UNIT_PX
    };
    (fallback, true)
}

fn vertical_unit(metrics: &LayoutMetrics) -> (f64, bool) {
    if metrics.cell_height.is_finite() && metrics.cell_height > 0.0 {
        (metrics.cell_height, false)
    } else {
        (FALLBACK_CELL_HEIGHT, true)
    }
}

fn finite_or_zero(value: f64) -> (f64, bool) {
    if value.is_finite() {
        (value, false)
    } else {
        (0.0, true)
    }
}

/// Translate one sample into a move delta. Pure; no suppression.
pub fn translate(sample: &PointerSample, metrics: &LayoutMetrics, config: &DragConfig) -> Translation {
    let (x_unit, x_fallback) = horizontal_unit(metrics, config);
    let (y_unit, y_fallback) = vertical_unit(metrics);
    let (dx, dx_bad) = finite_or_zero(sample.dx());
    let (dy, dy_bad) = finite_or_zero(sample.dy());

    let day_delta = round_half_up(dx / x_unit) as i32;

    let rows = dy / y_unit;
    let half_hours = match config.vertical_snap {
        VerticalSnap::Coarse => (round_half_up(4.0 * rows) / 4.0).trunc(),
        VerticalSnap::HalfHour => round_half_up(2.0 * rows),
    } as i32;

    let degraded = x_fallback || y_fallback || dx_bad || dy_bad;
    if degraded {
        log::warn!(
            "degraded drag translation: metrics={:?} sample={:?}",
            metrics,
            sample
        );
    }

    Translation {
        delta: MoveDelta::new(day_delta, half_hours),
        degraded,
    }
}

/// Stateful translator for one gesture that drops repeated deltas.
///
/// Move samples whose delta equals the last emitted one are swallowed. The
/// release sample is always emitted so that a commit fires even when the
/// pointer has not crossed a snap boundary since the last move.
#[derive(Debug, Clone, Default)]
pub struct DragTranslator {
    config: DragConfig,
    last: Option<MoveDelta>,
}

impl DragTranslator {
    pub fn new(config: DragConfig) -> Self {
        Self { config, last: None }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// The last delta handed to the caller during this gesture.
    pub fn last_emitted(&self) -> Option<MoveDelta> {
        self.last
    }

    /// Translate a move sample; `None` if it repeats the last emitted delta.
    pub fn on_move(&mut self, sample: &PointerSample, metrics: &LayoutMetrics) -> Option<Translation> {
        let translation = translate(sample, metrics, &self.config);
        if self.last == Some(translation.delta) {
            return None;
        }
        self.last = Some(translation.delta);
        Some(translation)
    }

    /// Translate the terminal sample. Always emits and resets suppression.
    pub fn on_release(&mut self, sample: &PointerSample, metrics: &LayoutMetrics) -> Translation {
        let translation = translate(sample, metrics, &self.config);
        self.last = None;
        translation
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
