//! Error types for timegrid operations.

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// The event ends before it starts.
    #[error("Invalid event '{id}': end {end} is before start {start}")]
    InvalidEvent {
        id: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// An hour delta that is not a whole number of half hours.
    #[error("Invalid hour delta: {0} is not a multiple of 0.5")]
    InvalidDelta(f64),

    /// Shifting the event would move it outside the representable date range.
    #[error("Cannot move event '{id}' by {day_delta} day(s) and {hour_delta} hour(s): out of range")]
    DeltaOutOfRange {
        id: String,
        day_delta: i32,
        hour_delta: f64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// `drag_start` was called while another drag is still active.
    #[error("Drag already in progress for event '{0}'")]
    DragInProgress(String),

    #[error("No drag in progress")]
    NoActiveDrag,
}

pub type Result<T> = std::result::Result<T, GridError>;
