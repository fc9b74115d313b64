//! Calendar events, move deltas, and the transient drag preview.
//!
//! Events are owned by the host and only borrowed by the layout pipeline.
//! Rescheduling never mutates an [`Event`]: [`MoveDelta::apply`] returns a new,
//! shifted copy that the host may store in place of the original.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// A calendar event in the display timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Opaque host payload, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<serde_json::Value>,
}

impl Event {
    /// Create an event, rejecting one that ends before it starts.
    ///
    /// Zero-length events (`end == start`) are valid.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self> {
        let event = Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            annotation: None,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn with_annotation(mut self, annotation: serde_json::Value) -> Self {
        self.annotation = Some(annotation);
        self
    }

    /// Check `end >= start`. Deserialized events bypass [`Event::new`], so the
    /// layout pipeline calls this again at ingestion.
    pub fn validate(&self) -> Result<()> {
        if self.end < self.start {
            return Err(GridError::InvalidEvent {
                id: self.id.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Wire form of [`MoveDelta`]: the hour offset as a real number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct MoveDeltaRepr {
    day_delta: i32,
    hour_delta: f64,
}

/// A candidate reschedule offset: whole days plus a whole number of half hours.
///
/// The hour part is stored as a half-hour count so that it is always a
/// multiple of 0.5 and the type can be compared and hashed exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "MoveDeltaRepr", try_from = "MoveDeltaRepr")]
pub struct MoveDelta {
    day_delta: i32,
    half_hours: i32,
}

impl MoveDelta {
    pub const ZERO: MoveDelta = MoveDelta {
        day_delta: 0,
        half_hours: 0,
    };

    pub fn new(day_delta: i32, half_hours: i32) -> Self {
        Self {
            day_delta,
            half_hours,
        }
    }

    /// Build a delta from a fractional hour offset such as `1.5` or `-0.5`.
    ///
    /// # Errors
    /// Returns `GridError::InvalidDelta` when `hours` is not finite or not a
    /// multiple of 0.5.
    pub fn from_hours(day_delta: i32, hours: f64) -> Result<Self> {
        let doubled = hours * 2.0;
        if !doubled.is_finite() || doubled.fract() != 0.0 || doubled.abs() > i32::MAX as f64 {
            return Err(GridError::InvalidDelta(hours));
        }
        Ok(Self::new(day_delta, doubled as i32))
    }

    pub fn day_delta(&self) -> i32 {
        self.day_delta
    }

    pub fn half_hours(&self) -> i32 {
        self.half_hours
    }

    pub fn hour_delta(&self) -> f64 {
        f64::from(self.half_hours) / 2.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// The total offset as a duration (days are 24 hours in the display timezone).
    pub fn offset(&self) -> Duration {
        Duration::days(i64::from(self.day_delta)) + Duration::minutes(30 * i64::from(self.half_hours))
    }

    /// Return a copy of `event` with both bounds shifted by this delta.
    ///
    /// # Errors
    /// Returns `GridError::DeltaOutOfRange` when either shifted bound falls
    /// outside the range `NaiveDateTime` can represent.
    pub fn apply(&self, event: &Event) -> Result<Event> {
        let offset = self.offset();
        let shifted = event
            .start
            .checked_add_signed(offset)
            .zip(event.end.checked_add_signed(offset));
        let Some((start, end)) = shifted else {
            return Err(GridError::DeltaOutOfRange {
                id: event.id.clone(),
                day_delta: self.day_delta,
                hour_delta: self.hour_delta(),
            });
        };
        Ok(Event {
            start,
            end,
            ..event.clone()
        })
    }
}

impl From<MoveDelta> for MoveDeltaRepr {
    fn from(delta: MoveDelta) -> Self {
        Self {
            day_delta: delta.day_delta,
            hour_delta: delta.hour_delta(),
        }
    }
}

impl TryFrom<MoveDeltaRepr> for MoveDelta {
    type Error = GridError;

    fn try_from(repr: MoveDeltaRepr) -> Result<Self> {
        MoveDelta::from_hours(repr.day_delta, repr.hour_delta)
    }
}

/// The shifted copy of an event shown while it is being dragged.
///
/// At most one exists at a time. Layout tags its segments `is_preview`, which
/// hosts render as the moving cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewEvent {
    pub event: Event,
    pub delta: MoveDelta,
}

impl PreviewEvent {
    pub fn new(original: &Event, delta: MoveDelta) -> Result<Self> {
        Ok(Self {
            event: delta.apply(original)?,
            delta,
        })
    }

    pub fn source_id(&self) -> &str {
        &self.event.id
    }
}
