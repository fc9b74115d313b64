//! WASM bindings for timegrid.
//!
//! Exposes the grid layout pass, pointer translation, and event shifting to
//! JavaScript via `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p timegrid-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/timegrid-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/timegrid_wasm.wasm
//! # Rename .js -> .cjs for ESM compatibility
//! mv packages/timegrid-js/wasm/timegrid_wasm.js \
//!    packages/timegrid-js/wasm/timegrid_wasm.cjs
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use timegrid::translator::{DragTranslator, PointerSample, Translation};
use timegrid::{
    DayColumn, EngineConfig, Event, LayoutMetrics, MoveDelta, PreviewEvent,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Input format for events passed from JavaScript.
#[derive(Deserialize)]
struct EventInput {
    id: String,
    #[serde(default)]
    title: String,
    start: String,
    end: String,
    #[serde(default)]
    annotation: Option<serde_json::Value>,
}

/// Input format for the drag preview: the original event and the current delta.
#[derive(Deserialize)]
struct PreviewInput {
    event: EventInput,
    delta: MoveDelta,
}

#[derive(Serialize)]
struct EventDto<'a> {
    id: &'a str,
    title: &'a str,
    start: String,
    end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotation: Option<&'a serde_json::Value>,
}

impl<'a> From<&'a Event> for EventDto<'a> {
    fn from(e: &'a Event) -> Self {
        Self {
            id: &e.id,
            title: &e.title,
            start: format_datetime(e.start),
            end: format_datetime(e.end),
            annotation: e.annotation.as_ref(),
        }
    }
}

#[derive(Serialize)]
struct CellDto<'a> {
    event_id: &'a str,
    title: &'a str,
    start: String,
    end: String,
    moving: bool,
    top_pct: f64,
    height_pct: f64,
    left_offset_px: f64,
    order: usize,
    size: usize,
    compact: bool,
}

#[derive(Serialize)]
struct ColumnDto<'a> {
    date: String,
    cells: Vec<CellDto<'a>>,
    groups: Vec<Vec<usize>>,
}

impl<'a> From<&DayColumn<'a>> for ColumnDto<'a> {
    fn from(column: &DayColumn<'a>) -> Self {
        Self {
            date: column.date.to_string(),
            cells: column
                .cells
                .iter()
                .map(|cell| CellDto {
                    event_id: &cell.segment.event.id,
                    title: &cell.segment.event.title,
                    start: format_datetime(cell.segment.start),
                    end: format_datetime(cell.segment.end),
                    moving: cell.segment.is_preview,
                    top_pct: cell.geometry.top_pct,
                    height_pct: cell.geometry.height_pct,
                    left_offset_px: cell.geometry.left_offset_px,
                    order: cell.geometry.order,
                    size: cell.geometry.size,
                    compact: cell.geometry.compact,
                })
                .collect(),
            groups: column.groups.iter().map(|g| g.members.clone()).collect(),
        }
    }
}

#[derive(Serialize)]
struct TranslationDto {
    day_delta: i32,
    hour_delta: f64,
    degraded: bool,
}

impl From<Translation> for TranslationDto {
    fn from(t: Translation) -> Self {
        Self {
            day_delta: t.delta.day_delta(),
            hour_delta: t.delta.hour_delta(),
            degraded: t.degraded,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers: parsing and formatting
// ---------------------------------------------------------------------------

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Parse an ISO 8601 datetime string into a display-timezone wall-clock time.
///
/// Accepts naive local time (e.g., "2026-02-17T14:00:00") and RFC 3339 with an
/// offset, whose wall-clock part is taken as-is: inputs are already in the
/// display timezone.
fn parse_datetime(s: &str) -> Result<NaiveDateTime, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| js_err(format!("Invalid datetime '{}': {}", s, e)))
}

fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn into_event(input: EventInput) -> Result<Event, JsValue> {
    let start = parse_datetime(&input.start)?;
    let end = parse_datetime(&input.end)?;
    let event = Event::new(input.id, input.title, start, end)
        .map_err(|e| js_err(e.to_string()))?;
    Ok(match input.annotation {
        Some(annotation) => event.with_annotation(annotation),
        None => event,
    })
}

/// Convert a JSON array of event objects into `Vec<Event>`.
fn parse_events_json(json: &str) -> Result<Vec<Event>, JsValue> {
    let inputs: Vec<EventInput> = serde_json::from_str(json)
        .map_err(|e| js_err(format!("Invalid events JSON: {}", e)))?;
    inputs.into_iter().map(into_event).collect()
}

/// Convert a JSON array of "YYYY-MM-DD" strings into dates.
fn parse_days_json(json: &str) -> Result<Vec<NaiveDate>, JsValue> {
    let inputs: Vec<String> = serde_json::from_str(json)
        .map_err(|e| js_err(format!("Invalid days JSON: {}", e)))?;
    inputs
        .iter()
        .map(|s| {
            s.parse::<NaiveDate>()
                .map_err(|e| js_err(format!("Invalid date '{}': {}", s, e)))
        })
        .collect()
}

fn parse_config(json: Option<String>) -> Result<EngineConfig, JsValue> {
    match json {
        Some(json) => EngineConfig::from_json(&json).map_err(|e| js_err(e.to_string())),
        None => Ok(EngineConfig::default()),
    }
}

fn parse_json<T: for<'de> Deserialize<'de>>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| js_err(format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_err(format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Lay out events over the visible days.
///
/// - `events_json` -- JSON array of `{id, title, start, end, annotation?}`
/// - `days_json` -- JSON array of `"YYYY-MM-DD"` strings, in display order
/// - `preview_json` -- Optional `{event, delta}` for an in-progress drag
/// - `config_json` -- Optional engine configuration (defaults for missing fields)
///
/// Returns a JSON array with one `{date, cells, groups}` object per day.
#[wasm_bindgen(js_name = "layoutGrid")]
pub fn layout_grid(
    events_json: &str,
    days_json: &str,
    preview_json: Option<String>,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let events = parse_events_json(events_json)?;
    let days = parse_days_json(days_json)?;
    let config = parse_config(config_json)?;

    let preview = match preview_json {
        Some(json) => {
            let input: PreviewInput = parse_json(&json, "preview")?;
            let original = into_event(input.event)?;
            let preview = PreviewEvent::new(&original, input.delta)
                .map_err(|e| js_err(e.to_string()))?;
            Some(preview)
        }
        None => None,
    };

    let columns = timegrid::layout_events(&events, preview.as_ref(), &days, &config)
        .map_err(|e| js_err(e.to_string()))?;

    let dtos: Vec<ColumnDto> = columns.iter().map(ColumnDto::from).collect();
    to_json(&dtos)
}

/// Translate one pointer sample into a move delta, without suppression.
///
/// `sample_json` is `{origin_x, origin_y, current_x, current_y}`;
/// `metrics_json` is `{cell_width, cell_height, visible_days}`.
#[wasm_bindgen(js_name = "translateDrag")]
pub fn translate_drag(
    sample_json: &str,
    metrics_json: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let sample: PointerSample = parse_json(sample_json, "sample")?;
    let metrics: LayoutMetrics = parse_json(metrics_json, "metrics")?;
    let config = parse_config(config_json)?;

    to_json(&TranslationDto::from(timegrid::translate(
        &sample,
        &metrics,
        &config.drag,
    )))
}

/// Shift an event by `{day_delta, hour_delta}` and return the moved event.
#[wasm_bindgen(js_name = "shiftEvent")]
pub fn shift_event(event_json: &str, delta_json: &str) -> Result<String, JsValue> {
    let event = into_event(parse_json(event_json, "event")?)?;
    let delta: MoveDelta = parse_json(delta_json, "delta")?;
    let moved = delta.apply(&event).map_err(|e| js_err(e.to_string()))?;
    to_json(&EventDto::from(&moved))
}

/// Vertical position (0–100) of a `"HH:MM:SS"` time of day, for the
/// current-time indicator.
#[wasm_bindgen(js_name = "relativeTopInDay")]
pub fn relative_top_in_day(time: &str) -> Result<f64, JsValue> {
    let time = chrono::NaiveTime::parse_from_str(time, "%H:%M:%S")
        .map_err(|e| js_err(format!("Invalid time '{}': {}", time, e)))?;
    Ok(timegrid::relative_top_in_day(time))
}

/// Per-gesture translator that drops repeated deltas.
///
/// Create one when a drag starts, call `move` for every pointer sample and
/// `release` once at the end.
#[wasm_bindgen]
pub struct DragTracker {
    translator: DragTranslator,
}

#[wasm_bindgen]
impl DragTracker {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<DragTracker, JsValue> {
        let config = parse_config(config_json)?;
        Ok(Self {
            translator: DragTranslator::new(config.drag),
        })
    }

    /// Returns the delta JSON, or `undefined` when it repeats the last one.
    #[wasm_bindgen(js_name = "move")]
    pub fn move_to(&mut self, sample_json: &str, metrics_json: &str) -> Result<Option<String>, JsValue> {
        let sample: PointerSample = parse_json(sample_json, "sample")?;
        let metrics: LayoutMetrics = parse_json(metrics_json, "metrics")?;
        self.translator
            .on_move(&sample, &metrics)
            .map(|t| to_json(&TranslationDto::from(t)))
            .transpose()
    }

    /// Returns the final delta JSON. Always emits.
    pub fn release(&mut self, sample_json: &str, metrics_json: &str) -> Result<String, JsValue> {
        let sample: PointerSample = parse_json(sample_json, "sample")?;
        let metrics: LayoutMetrics = parse_json(metrics_json, "metrics")?;
        to_json(&TranslationDto::from(
            self.translator.on_release(&sample, &metrics),
        ))
    }
}
