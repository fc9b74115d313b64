//! # timegrid
//!
//! Event layout and drag-translation engine for week/day calendar grids.
//!
//! Given the host's events and the visible days, timegrid computes where each
//! event block goes: events spanning midnight are split into per-day
//! segments, concurrent segments get a stacking order, and every segment is
//! mapped to percentage-based vertical geometry plus a pixel stagger. While
//! the user drags a block, pointer samples are snapped to whole days and half
//! hours and a preview event joins the layout until the drag is released.
//!
//! Everything is synchronous and pure except [`DragStateManager`], which owns
//! the single active drag.
//!
//! ## Modules
//!
//! - [`event`] — `Event`, `MoveDelta`, `PreviewEvent`
//! - [`splitter`] — Event → per-day clipped segments
//! - [`overlap`] — Stacking order/size and overlap groups per day
//! - [`position`] — Segment → top/height percentages and left offset
//! - [`translator`] — Pointer samples → snapped move deltas
//! - [`drag`] — Drag lifecycle and preview management
//! - [`layout`] — The whole pass over a visible range
//! - [`config`] / [`metrics`] — Host-supplied settings and measurements
//! - [`error`] — Error types

pub mod config;
pub mod drag;
pub mod error;
pub mod event;
pub mod layout;
pub mod metrics;
pub mod overlap;
pub mod position;
pub mod splitter;
pub mod translator;

pub use config::{DragConfig, EngineConfig, VerticalSnap};
pub use drag::{Commit, DragStateManager, DragUpdate};
pub use error::GridError;
pub use event::{Event, MoveDelta, PreviewEvent};
pub use layout::{layout_days, layout_events, DayColumn, EventCell, WorkingSet};
pub use metrics::LayoutMetrics;
pub use overlap::{overlap_groups, resolve, OverlapGroup, StackSlot};
pub use position::{map_segment, relative_top_in_day, CellGeometry};
pub use splitter::{split_event, visible_days, DayBounds, DaySegment};
pub use translator::{translate, DragTranslator, PointerSample, Translation};
