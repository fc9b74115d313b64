//! Stacking order for concurrent segments on one day.
//!
//! Each segment gets an `order` (how many earlier segments in render order it
//! overlaps) and a `size` (how many segments, itself included, it overlaps).
//! Both are pairwise counts from the segment's own point of view: if A and C
//! do not overlap each other but both overlap B, each of them still has size 2.
//!
//! Render order is the order of the input slice, i.e. event arrival order.
//! Start times play no part in ranking, so the result is reproducible for a
//! given input order.

use serde::Serialize;

use crate::splitter::DaySegment;

/// Stacking position of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StackSlot {
    pub order: usize,
    pub size: usize,
}

/// Resolve stacking slots for one day's segments.
///
/// The returned vector is parallel to `segments`. Within any set of k
/// mutually overlapping segments the orders are exactly `0..k`.
pub fn resolve(segments: &[DaySegment<'_>]) -> Vec<StackSlot> {
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let mut slot = StackSlot { order: 0, size: 1 };
            for (j, other) in segments.iter().enumerate() {
                if i == j || !segment.overlaps(other) {
                    continue;
                }
                slot.size += 1;
                if j < i {
                    slot.order += 1;
                }
            }
            slot
        })
        .collect()
}

/// A set of segments connected through overlaps, as indices into the day's
/// segment list in render order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapGroup {
    pub members: Vec<usize>,
}

impl OverlapGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Partition one day's segments into transitive overlap groups.
///
/// Unlike [`resolve`], two segments that only share a neighbour land in the
/// same group. Groups are ordered by their first member; a segment that
/// overlaps nothing forms a group of one.
pub fn overlap_groups(segments: &[DaySegment<'_>]) -> Vec<OverlapGroup> {
    let mut assigned = vec![false; segments.len()];
    let mut groups = Vec::new();

    for root in 0..segments.len() {
        if assigned[root] {
            continue;
        }
        assigned[root] = true;
        let mut members = vec![root];
        let mut cursor = 0;

        while cursor < members.len() {
            let current = &segments[members[cursor]];
            cursor += 1;
            for (j, other) in segments.iter().enumerate() {
                if !assigned[j] && current.overlaps(other) {
                    assigned[j] = true;
                    members.push(j);
                }
            }
        }

        members.sort_unstable();
        groups.push(OverlapGroup { members });
    }

    groups
}
