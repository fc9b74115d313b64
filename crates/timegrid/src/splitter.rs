//! Split events into per-day segments clipped to each visible day.
//!
//! A day covers the half-open range `[date 00:00, date+1 00:00)`. For each
//! visible day an event falls into at most one of three cases:
//!
//! ```text
//!  M  T (W) T  F        case
//!      [S-E]            starts on the day         -> (start, min(end, day end))
//!  S----[-E]            ends on the day           -> (day start, end)
//!     S-[---]--E        covers the whole day      -> (day start, day end)
//! ```
//!
//! An event that touches none of the days produces no segments; that is not
//! an error.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::Result;
use crate::event::Event;

pub const HOURS_PER_DAY: u32 = 24;
pub const DAY_MINUTES: i64 = 24 * 60;

/// The `[start, end)` boundaries of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayBounds {
    pub date: NaiveDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DayBounds {
    pub fn new(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN);
        Self {
            date,
            start,
            end: start + Duration::days(1),
        }
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Clip `event` to this day, or `None` when it is not visible here.
    fn clip(&self, event: &Event) -> Option<(NaiveDateTime, NaiveDateTime)> {
        if self.contains(event.start) {
            Some((event.start, event.end.min(self.end)))
        } else if event.start < self.start && event.end > self.start && event.end < self.end {
            // Strict `>`: an event ending at midnight leaves no empty tail here.
            Some((self.start, event.end))
        } else if event.start < self.start && event.end >= self.end {
            Some((self.start, self.end))
        } else {
            None
        }
    }
}

/// The part of an event visible on one day.
///
/// Invariant: `day start <= start <= end <= day end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySegment<'a> {
    pub day: NaiveDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub event: &'a Event,
    pub is_preview: bool,
}

impl DaySegment<'_> {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Time from the day's midnight to the segment start.
    pub fn offset_in_day(&self) -> Duration {
        self.start - DayBounds::new(self.day).start
    }

    pub fn start_minutes(&self) -> i64 {
        self.offset_in_day().num_minutes()
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Whether this segment and `other` share any instant.
    ///
    /// Two segments overlap when either one starts inside the other's
    /// `[start, end)` range. Adjacent segments (one ends exactly when the
    /// other starts) do NOT overlap.
    pub fn overlaps(&self, other: &DaySegment<'_>) -> bool {
        (other.start <= self.start && self.start < other.end)
            || (self.start <= other.start && other.start < self.end)
    }
}

/// Split one event over the visible `days`.
///
/// # Errors
/// Returns `GridError::InvalidEvent` if the event ends before it starts.
pub fn split_event<'a>(event: &'a Event, days: &[NaiveDate]) -> Result<Vec<DaySegment<'a>>> {
    event.validate()?;

    Ok(days
        .iter()
        .filter_map(|&date| segment_on(event, false, date))
        .collect())
}

/// The segment of an already validated `event` on `date`, if it shows there.
pub(crate) fn segment_on(event: &Event, is_preview: bool, date: NaiveDate) -> Option<DaySegment<'_>> {
    let bounds = DayBounds::new(date);
    bounds.clip(event).map(|(start, end)| DaySegment {
        day: date,
        start,
        end,
        event,
        is_preview,
    })
}

/// Consecutive dates starting at `first`, e.g. a week view.
pub fn visible_days(first: NaiveDate, count: u32) -> Vec<NaiveDate> {
    first.iter_days().take(count as usize).collect()
}
