//! The full layout pass: split -> resolve -> map for every visible day.
//!
//! The pass is pure and cheap enough to re-run on every change to the event
//! set, the visible range, or the drag preview.

use chrono::NaiveDate;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::event::{Event, PreviewEvent};
use crate::overlap::{self, OverlapGroup};
use crate::position::{self, CellGeometry};
use crate::splitter::{self, DaySegment};

/// The events taking part in one layout pass: the host's events followed by
/// the drag preview, if any.
#[derive(Debug, Clone, Copy)]
pub struct WorkingSet<'a> {
    events: &'a [Event],
    preview: Option<&'a PreviewEvent>,
}

impl<'a> WorkingSet<'a> {
    pub fn new(events: &'a [Event], preview: Option<&'a PreviewEvent>) -> Self {
        Self { events, preview }
    }

    pub fn preview(&self) -> Option<&'a PreviewEvent> {
        self.preview
    }

    pub fn len(&self) -> usize {
        self.events.len() + usize::from(self.preview.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Events in render order, each paired with its preview flag.
    pub fn iter(&self) -> impl Iterator<Item = (&'a Event, bool)> + 'a {
        self.events
            .iter()
            .map(|event| (event, false))
            .chain(self.preview.map(|preview| (&preview.event, true)))
    }
}

/// A positioned segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventCell<'a> {
    pub segment: DaySegment<'a>,
    pub geometry: CellGeometry,
}

/// Everything rendered in one day column.
#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn<'a> {
    pub date: NaiveDate,
    /// Cells in render order: later cells are drawn above earlier ones.
    pub cells: Vec<EventCell<'a>>,
    /// Transitive overlap groups, as indices into `cells`.
    pub groups: Vec<OverlapGroup>,
}

/// Lay out `set` over the visible `days`, one column per day.
///
/// # Errors
/// Returns `GridError::InvalidEvent` for the first event that ends before it
/// starts; no partial layout is produced.
pub fn layout_days<'a>(
    set: &WorkingSet<'a>,
    days: &[NaiveDate],
    config: &EngineConfig,
) -> Result<Vec<DayColumn<'a>>> {
    let mut per_day: Vec<Vec<DaySegment<'a>>> = vec![Vec::new(); days.len()];

    // Bucket by column index, not date: a repeated date gets its own copy.
    for (event, is_preview) in set.iter() {
        event.validate().inspect_err(|e| {
            log::warn!("skipping layout: {}", e);
        })?;
        for (column, &date) in per_day.iter_mut().zip(days) {
            column.extend(splitter::segment_on(event, is_preview, date));
        }
    }

    Ok(days
        .iter()
        .zip(per_day)
        .map(|(&date, segments)| layout_column(date, segments, config.overlap_offset_px))
        .collect())
}

/// Convenience wrapper over [`layout_days`] for callers without a drag manager.
pub fn layout_events<'a>(
    events: &'a [Event],
    preview: Option<&'a PreviewEvent>,
    days: &[NaiveDate],
    config: &EngineConfig,
) -> Result<Vec<DayColumn<'a>>> {
    layout_days(&WorkingSet::new(events, preview), days, config)
}

fn layout_column<'a>(
    date: NaiveDate,
    segments: Vec<DaySegment<'a>>,
    overlap_offset_px: f64,
) -> DayColumn<'a> {
    let slots = overlap::resolve(&segments);
    let groups = overlap::overlap_groups(&segments);

    let cells = segments
        .into_iter()
        .zip(slots)
        .map(|(segment, slot)| EventCell {
            geometry: position::map_segment(&segment, slot, overlap_offset_px),
            segment,
        })
        .collect();

    DayColumn {
        date,
        cells,
        groups,
    }
}
