//! Greedy lane assignment for overlapping motif occurrences.
//!
//! Occurrences are visited by start, then end, then motif order. Each one goes into the
//! lowest-indexed lane whose last occurrence ends at or before its start, and a new lane is
//! opened only when no such lane exists. The number of lanes is then the largest number of
//! occurrences covering any single position, which no assignment can go below.

use serde::Serialize;

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::search::MotifOccurrence;

/// An occurrence together with the display lane it was assigned to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlacedOccurrence {
    pub motif_idx: usize,
    pub start: usize,
    pub end: usize,
    pub lane: usize,
}

impl PlacedOccurrence {
    pub fn overlaps(&self, other: &PlacedOccurrence) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// The lane of every occurrence of one sequence, in assignment order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneAssignment {
    pub placed: Vec<PlacedOccurrence>,
    pub lane_count: usize,
}

pub fn assign_lanes(mut occurrences: Vec<MotifOccurrence>) -> LaneAssignment {
    // `MotifOccurrence` orders by (start, end, motif_idx)
    occurrences.sort_unstable();

    // lanes that are still occupied, keyed by the end of their last occurrence
    let mut busy: BinaryHeap<Reverse<(usize, usize)>> = BinaryHeap::new();
    // lanes whose last occurrence has ended
    let mut free: BinaryHeap<Reverse<usize>> = BinaryHeap::new();
    let mut lane_count = 0;

    let placed = occurrences
        .into_iter()
        .map(|o| {
            while let Some(&Reverse((end, lane))) = busy.peek() {
                if end > o.start {
                    break;
                }
                busy.pop();
                free.push(Reverse(lane));
            }

            let lane = match free.pop() {
                Some(Reverse(lane)) => lane,
                None => {
                    lane_count += 1;
                    lane_count - 1
                }
            };
            busy.push(Reverse((o.end, lane)));

            PlacedOccurrence {
                motif_idx: o.motif_idx,
                start: o.start,
                end: o.end,
                lane,
            }
        })
        .collect();

    LaneAssignment { placed, lane_count }
}

/// The largest number of occurrences that cover one position.
pub fn max_overlap_depth(occurrences: &[MotifOccurrence]) -> usize {
    let mut events = occurrences
        .iter()
        .filter(|o| !o.is_empty())
        .flat_map(|o| [(o.start, 1isize), (o.end, -1isize)])
        .collect::<Vec<_>>();
    // ends sort before starts at the same coordinate since intervals are half-open
    events.sort_unstable();

    let mut depth = 0isize;
    let mut max_depth = 0isize;
    for (_, delta) in events {
        depth += delta;
        max_depth = max_depth.max(depth);
    }

    max_depth as usize
}
