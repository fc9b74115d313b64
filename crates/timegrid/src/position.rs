//! Map clipped segments to normalized cell geometry.
//!
//! Vertical placement is a percentage of the day column (midnight = 0%,
//! next midnight = 100%). Concurrent events are not narrowed to share the
//! column width; each later-ranked event is shifted right by a fixed pixel
//! offset and drawn above the earlier ones.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::overlap::StackSlot;
use crate::splitter::{DaySegment, DAY_MINUTES};

const DAY_SECONDS: f64 = (DAY_MINUTES * 60) as f64;

/// Segments shorter than this render their title and start time on one line.
pub const COMPACT_THRESHOLD_MINUTES: i64 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellGeometry {
    pub top_pct: f64,
    pub height_pct: f64,
    pub left_offset_px: f64,
    pub order: usize,
    /// Not used for geometry; lets the renderer pick a contrasting color.
    pub size: usize,
    pub compact: bool,
}

impl CellGeometry {
    /// Background palette slot for this cell.
    pub fn palette_index(&self, palette_len: usize) -> usize {
        if palette_len == 0 {
            return 0;
        }
        self.order % palette_len
    }

    /// Text-contrast palette slot for this cell.
    pub fn contrast_index(&self, palette_len: usize) -> usize {
        if palette_len == 0 {
            return 0;
        }
        self.size % palette_len
    }
}

fn day_pct(seconds: i64) -> f64 {
    (100.0 * seconds as f64 / DAY_SECONDS).clamp(0.0, 100.0)
}

/// Compute geometry for one segment given its stacking slot.
pub fn map_segment(segment: &DaySegment<'_>, slot: StackSlot, overlap_offset_px: f64) -> CellGeometry {
    let duration = segment.duration();

    CellGeometry {
        top_pct: day_pct(segment.offset_in_day().num_seconds()),
        height_pct: day_pct(duration.num_seconds()),
        left_offset_px: slot.order as f64 * overlap_offset_px,
        order: slot.order,
        size: slot.size,
        compact: duration.num_minutes() < COMPACT_THRESHOLD_MINUTES,
    }
}

/// Vertical position of a time of day, as a percentage of the column.
/// Used for the current-time indicator.
pub fn relative_top_in_day(time: NaiveTime) -> f64 {
    day_pct(i64::from(time.num_seconds_from_midnight()))
}
