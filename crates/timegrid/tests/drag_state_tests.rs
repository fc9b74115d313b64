//! Tests for the drag lifecycle and preview management.

use chrono::{Duration, NaiveDateTime};
use timegrid::config::DragConfig;
use timegrid::translator::PointerSample;
use timegrid::{DragStateManager, DragUpdate, Event, GridError, LayoutMetrics, MoveDelta};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(s: &str) -> NaiveDateTime {
    s.parse().unwrap()
}

fn meeting() -> Event {
    Event::new(
        "m1",
        "Planning",
        at("2026-03-16T10:00:00"),
        at("2026-03-16T11:30:00"),
    )
    .unwrap()
}

/// 100 px per day, 40 px per hour-row.
fn metrics() -> LayoutMetrics {
    LayoutMetrics::new(400.0, 40.0, 7)
}

fn moved(dx: f64, dy: f64) -> PointerSample {
    PointerSample::new(10.0, 10.0, 10.0 + dx, 10.0 + dy)
}

// ── Transitions ─────────────────────────────────────────────────────────────

#[test]
fn starts_idle() {
    let manager = DragStateManager::new(DragConfig::default());
    assert!(!manager.is_dragging());
    assert!(manager.preview().is_none());
    assert!(manager.dragged_event().is_none());
}

#[test]
fn drag_start_enters_dragging_without_preview() {
    let ev = meeting();
    let mut manager = DragStateManager::new(DragConfig::default());

    manager.drag_start(&ev).unwrap();

    assert!(manager.is_dragging());
    assert!(manager.preview().is_none());
    assert_eq!(manager.dragged_event().map(|e| e.id.as_str()), Some("m1"));
}

#[test]
fn second_drag_start_is_rejected_and_keeps_first() {
    let first = meeting();
    let second = Event::new(
        "m2",
        "Lunch",
        at("2026-03-16T12:00:00"),
        at("2026-03-16T13:00:00"),
    )
    .unwrap();
    let mut manager = DragStateManager::new(DragConfig::default());

    manager.drag_start(&first).unwrap();
    manager.apply_delta(MoveDelta::new(1, 0)).unwrap();
    let err = manager.drag_start(&second).unwrap_err();

    assert_eq!(err, GridError::DragInProgress("m1".to_string()));
    assert_eq!(manager.dragged_event().map(|e| e.id.as_str()), Some("m1"));
    assert!(manager.preview().is_some(), "active preview must survive");
}

#[test]
fn move_and_release_while_idle_are_errors() {
    let mut manager = DragStateManager::new(DragConfig::default());

    assert_eq!(
        manager.pointer_move(&moved(0.0, 0.0), &metrics()),
        Err(GridError::NoActiveDrag)
    );
    assert_eq!(
        manager.apply_delta(MoveDelta::new(1, 0)),
        Err(GridError::NoActiveDrag)
    );
    assert_eq!(
        manager.release(&moved(0.0, 0.0), &metrics()),
        Err(GridError::NoActiveDrag)
    );
}

// ── Preview ─────────────────────────────────────────────────────────────────

#[test]
fn nonzero_move_creates_shifted_preview() {
    let ev = meeting();
    let mut manager = DragStateManager::new(DragConfig::default());
    manager.drag_start(&ev).unwrap();

    let update = manager.pointer_move(&moved(100.0, 80.0), &metrics()).unwrap();

    assert_eq!(
        update,
        Some(DragUpdate::Preview {
            delta: MoveDelta::new(1, 2),
            degraded: false
        })
    );
    let preview = manager.preview().unwrap();
    assert_eq!(preview.event.start, at("2026-03-17T11:00:00"));
    assert_eq!(preview.event.end, at("2026-03-17T12:30:00"));
    assert_eq!(preview.source_id(), "m1");
    assert_eq!(ev.start, at("2026-03-16T10:00:00"), "original untouched");
}

#[test]
fn preview_is_replaced_not_accumulated() {
    let ev = meeting();
    let mut manager = DragStateManager::new(DragConfig::default());
    manager.drag_start(&ev).unwrap();

    manager.apply_delta(MoveDelta::new(1, 0)).unwrap();
    manager.apply_delta(MoveDelta::new(2, 1)).unwrap();

    let preview = manager.preview().unwrap();
    assert_eq!(preview.delta, MoveDelta::new(2, 1));
    assert_eq!(preview.event.start, at("2026-03-18T10:30:00"));

    let events = [ev.clone()];
    assert_eq!(manager.working_set(&events).len(), 2);
}

#[test]
fn returning_to_zero_delta_removes_preview() {
    let ev = meeting();
    let mut manager = DragStateManager::new(DragConfig::default());
    manager.drag_start(&ev).unwrap();

    manager.pointer_move(&moved(100.0, 0.0), &metrics()).unwrap();
    assert!(manager.preview().is_some());

    let update = manager.pointer_move(&moved(0.0, 0.0), &metrics()).unwrap();
    assert_eq!(update, Some(DragUpdate::Cleared { degraded: false }));
    assert!(manager.preview().is_none());
    assert!(manager.is_dragging(), "zero delta does not end the drag");
}

#[test]
fn repeated_samples_are_suppressed() {
    let ev = meeting();
    let mut manager = DragStateManager::new(DragConfig::default());
    manager.drag_start(&ev).unwrap();

    assert!(manager.pointer_move(&moved(0.0, 0.0), &metrics()).unwrap().is_some());
    assert!(manager.pointer_move(&moved(0.0, 0.0), &metrics()).unwrap().is_none());
    assert!(manager.pointer_move(&moved(120.0, 0.0), &metrics()).unwrap().is_some());
    assert!(manager.pointer_move(&moved(130.0, 5.0), &metrics()).unwrap().is_none());
}

// ── Release ─────────────────────────────────────────────────────────────────

#[test]
fn release_commits_and_returns_to_idle() {
    let ev = meeting();
    let mut manager = DragStateManager::new(DragConfig::default());
    manager.drag_start(&ev).unwrap();
    manager.pointer_move(&moved(100.0, 80.0), &metrics()).unwrap();

    let commit = manager.release(&moved(100.0, 80.0), &metrics()).unwrap();

    assert_eq!(commit.event_id, "m1");
    assert_eq!(commit.delta, MoveDelta::new(1, 2));
    assert!(!commit.is_noop());
    assert!(!manager.is_dragging());
    assert!(manager.preview().is_none());
}

#[test]
fn commit_of_one_day_two_hours_preserves_duration() {
    let ev = meeting();
    let mut manager = DragStateManager::new(DragConfig::default());
    manager.drag_start(&ev).unwrap();

    let delta = MoveDelta::from_hours(1, 2.0).unwrap();
    let commit = manager.release_with_delta(delta).unwrap();

    let shift = Duration::days(1) + Duration::hours(2);
    assert_eq!(commit.start, ev.start + shift);
    assert_eq!(commit.end, ev.end + shift);
    assert_eq!(commit.end - commit.start, ev.duration());
}

#[test]
fn release_at_origin_still_commits() {
    let ev = meeting();
    let mut manager = DragStateManager::new(DragConfig::default());
    manager.drag_start(&ev).unwrap();
    manager.pointer_move(&moved(0.0, 0.0), &metrics()).unwrap();

    let commit = manager.release(&moved(0.0, 0.0), &metrics()).unwrap();

    assert!(commit.is_noop());
    assert_eq!(commit.start, ev.start);
    assert_eq!(commit.end, ev.end);
}

#[test]
fn release_with_unmeasured_metrics_reports_degraded() {
    let ev = meeting();
    let mut manager = DragStateManager::new(DragConfig::default());
    manager.drag_start(&ev).unwrap();

    let commit = manager
        .release(&moved(0.0, 0.0), &LayoutMetrics::default())
        .unwrap();

    assert!(commit.degraded);
}

#[test]
fn new_drag_after_release_is_accepted() {
    let ev = meeting();
    let mut manager = DragStateManager::new(DragConfig::default());

    manager.drag_start(&ev).unwrap();
    manager.release_with_delta(MoveDelta::ZERO).unwrap();
    manager.drag_start(&ev).unwrap();

    assert!(manager.is_dragging());
    assert!(
        manager.pointer_move(&moved(0.0, 0.0), &metrics()).unwrap().is_some(),
        "suppression starts fresh for a new gesture"
    );
}

#[test]
fn cancel_drops_preview_without_commit() {
    let ev = meeting();
    let mut manager = DragStateManager::new(DragConfig::default());
    manager.drag_start(&ev).unwrap();
    manager.apply_delta(MoveDelta::new(0, 3)).unwrap();

    assert!(manager.cancel());
    assert!(!manager.is_dragging());
    assert!(manager.preview().is_none());
    assert!(!manager.cancel());
}

// ── Out-of-range deltas ─────────────────────────────────────────────────────

#[test]
fn huge_pointer_move_is_rejected_without_panicking() {
    let ev = meeting();
    let mut manager = DragStateManager::new(DragConfig::default());
    manager.drag_start(&ev).unwrap();
    manager.apply_delta(MoveDelta::new(1, 0)).unwrap();

    let result = manager.pointer_move(&PointerSample::new(0.0, 0.0, 1e12, 0.0), &metrics());

    assert!(matches!(
        result,
        Err(GridError::DeltaOutOfRange { ref id, .. }) if id == "m1"
    ));
    assert!(manager.is_dragging());
    assert_eq!(
        manager.preview().map(|p| p.delta),
        Some(MoveDelta::new(1, 0)),
        "previous preview is kept"
    );

    // The rejected delta does not count as emitted.
    let update = manager.pointer_move(&moved(100.0, 80.0), &metrics()).unwrap();
    assert!(matches!(update, Some(DragUpdate::Preview { .. })));
}

#[test]
fn out_of_range_release_keeps_drag_active() {
    let ev = meeting();
    let mut manager = DragStateManager::new(DragConfig::default());
    manager.drag_start(&ev).unwrap();

    let err = manager
        .release_with_delta(MoveDelta::new(i32::MAX, 0))
        .unwrap_err();

    assert_eq!(
        err,
        GridError::DeltaOutOfRange {
            id: "m1".to_string(),
            day_delta: i32::MAX,
            hour_delta: 0.0,
        }
    );
    assert!(manager.is_dragging());
    assert!(manager.cancel());
}

#[test]
fn apply_rejects_shift_past_datetime_range() {
    let ev = meeting();

    assert!(MoveDelta::new(i32::MIN, 0).apply(&ev).is_err());
    assert!(MoveDelta::new(0, i32::MAX).apply(&ev).is_ok());
}

// ── MoveDelta ───────────────────────────────────────────────────────────────

#[test]
fn move_delta_rejects_non_half_hours() {
    assert!(MoveDelta::from_hours(0, 1.5).is_ok());
    assert!(MoveDelta::from_hours(0, -0.5).is_ok());
    assert_eq!(
        MoveDelta::from_hours(0, 0.25),
        Err(GridError::InvalidDelta(0.25))
    );
    assert!(MoveDelta::from_hours(0, f64::NAN).is_err());
}

#[test]
fn move_delta_serializes_hours_as_a_real_number() {
    let json = serde_json::to_string(&MoveDelta::new(-1, 3)).unwrap();
    assert_eq!(json, r#"{"day_delta":-1,"hour_delta":1.5}"#);

    let back: MoveDelta = serde_json::from_str(&json).unwrap();
    assert_eq!(back, MoveDelta::new(-1, 3));

    let bad = serde_json::from_str::<MoveDelta>(r#"{"day_delta":0,"hour_delta":0.3}"#);
    assert!(bad.is_err());
}
