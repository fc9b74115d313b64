//! Tests for stacking order/size and overlap groups.

use chrono::{NaiveDate, NaiveDateTime};
use timegrid::overlap::{overlap_groups, resolve, StackSlot};
use timegrid::splitter::{split_event, DaySegment};
use timegrid::Event;

fn at(s: &str) -> NaiveDateTime {
    s.parse().unwrap()
}

const DAY: &str = "2026-03-16";

fn day() -> NaiveDate {
    DAY.parse().unwrap()
}

/// Events on 2026-03-16 from `HH:MM` ranges.
fn events(ranges: &[(&str, &str)]) -> Vec<Event> {
    ranges
        .iter()
        .enumerate()
        .map(|(i, (start, end))| {
            Event::new(
                format!("e{}", i),
                format!("Event {}", i),
                at(&format!("{}T{}:00", DAY, start)),
                at(&format!("{}T{}:00", DAY, end)),
            )
            .unwrap()
        })
        .collect()
}

fn segments(events: &[Event]) -> Vec<DaySegment<'_>> {
    events
        .iter()
        .flat_map(|e| split_event(e, &[day()]).unwrap())
        .collect()
}

fn slot(order: usize, size: usize) -> StackSlot {
    StackSlot { order, size }
}

#[test]
fn lone_segment_has_order_zero_and_size_one() {
    let evs = events(&[("09:00", "10:00")]);
    assert_eq!(resolve(&segments(&evs)), vec![slot(0, 1)]);
}

#[test]
fn empty_day_resolves_to_nothing() {
    assert!(resolve(&[]).is_empty());
    assert!(overlap_groups(&[]).is_empty());
}

#[test]
fn two_overlapping_segments_stack() {
    let evs = events(&[("09:00", "10:00"), ("09:30", "10:30")]);
    assert_eq!(resolve(&segments(&evs)), vec![slot(0, 2), slot(1, 2)]);
}

#[test]
fn adjacent_segments_do_not_overlap() {
    let evs = events(&[("09:00", "10:00"), ("10:00", "11:00")]);
    assert_eq!(resolve(&segments(&evs)), vec![slot(0, 1), slot(0, 1)]);
}

#[test]
fn order_follows_arrival_not_start_time() {
    // The later-starting event arrives first, so it keeps rank 0.
    let evs = events(&[("11:00", "12:00"), ("10:00", "13:00")]);
    assert_eq!(resolve(&segments(&evs)), vec![slot(0, 2), slot(1, 2)]);
}

#[test]
fn mutually_overlapping_segments_get_a_permutation_of_orders() {
    let evs = events(&[
        ("09:00", "12:00"),
        ("09:15", "11:00"),
        ("10:00", "10:30"),
        ("09:45", "11:45"),
    ]);
    let slots = resolve(&segments(&evs));

    let mut orders: Vec<usize> = slots.iter().map(|s| s.order).collect();
    orders.sort_unstable();
    assert_eq!(orders, vec![0, 1, 2, 3]);
    assert!(slots.iter().all(|s| s.size == 4));
}

#[test]
fn size_is_a_pairwise_count() {
    // A and C do not overlap; both overlap B.
    let evs = events(&[("09:00", "10:00"), ("09:30", "10:30"), ("10:00", "11:00")]);
    let slots = resolve(&segments(&evs));

    assert_eq!(slots, vec![slot(0, 2), slot(1, 3), slot(1, 2)]);
}

#[test]
fn zero_length_segment_inside_another_overlaps_it() {
    let evs = events(&[("09:00", "10:00"), ("09:30", "09:30")]);
    assert_eq!(resolve(&segments(&evs)), vec![slot(0, 2), slot(1, 2)]);
}

#[test]
fn resolve_is_deterministic() {
    let evs = events(&[
        ("08:00", "09:30"),
        ("09:00", "10:00"),
        ("09:00", "10:00"),
        ("13:00", "14:00"),
    ]);
    let segs = segments(&evs);
    let first = resolve(&segs);
    for _ in 0..10 {
        assert_eq!(resolve(&segs), first);
    }
}

#[test]
fn groups_follow_transitive_overlap() {
    let evs = events(&[
        ("09:00", "10:00"),
        ("13:00", "14:00"),
        ("09:30", "10:30"),
        ("10:15", "11:00"),
    ]);
    let groups = overlap_groups(&segments(&evs));

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].members, vec![0, 2, 3]);
    assert_eq!(groups[1].members, vec![1]);
}

#[test]
fn every_segment_belongs_to_exactly_one_group() {
    let evs = events(&[
        ("08:00", "09:00"),
        ("08:30", "08:45"),
        ("12:00", "12:30"),
        ("12:15", "13:00"),
        ("18:00", "18:00"),
    ]);
    let groups = overlap_groups(&segments(&evs));

    let mut all: Vec<usize> = groups.iter().flat_map(|g| g.members.clone()).collect();
    all.sort_unstable();
    assert_eq!(all, vec![0, 1, 2, 3, 4]);
    assert_eq!(groups.iter().map(|g| g.len()).sum::<usize>(), 5);
}
