//! Least-travel-cost search from the start stop.
//!
//! A Dijkstra search over the stop graph. Travel cost is the only distance
//! metric; visit cost plays no part here. Each stop is finalized exactly
//! once, on the first pop of an entry for it, which is sound because every
//! edge weight is a non-negative [`Cost`].

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::domain::{Cost, StopId};

use super::graph::StopGraph;

/// A stop whose least travel cost from the start has been fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedStop {
    /// Index of the stop in the graph.
    pub index: usize,

    /// Least accumulated travel cost from the start.
    pub distance: Cost,

    /// Stop indices from the start to this stop, inclusive.
    pub path: Vec<usize>,
}

/// Best-path table produced by [`shortest_paths`].
///
/// Entries are kept in finalization order, which is non-decreasing in
/// distance.
#[derive(Debug, Clone, Default)]
pub struct ShortestPaths {
    finalized: Vec<FinalizedStop>,
    position: Vec<Option<usize>>,
}

impl ShortestPaths {
    /// Finalized stops in the order they were finalized.
    pub fn in_order(&self) -> &[FinalizedStop] {
        &self.finalized
    }

    /// The best-path entry for a stop, if it was reachable.
    pub fn get(&self, index: usize) -> Option<&FinalizedStop> {
        self.position
            .get(index)
            .copied()
            .flatten()
            .map(|pos| &self.finalized[pos])
    }

    /// Whether the stop was reached from the start.
    pub fn is_reachable(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Number of finalized stops.
    pub fn len(&self) -> usize {
        self.finalized.len()
    }

    /// Whether no stop was finalized.
    pub fn is_empty(&self) -> bool {
        self.finalized.is_empty()
    }
}

/// Entry in the search frontier.
///
/// `BinaryHeap` is a max-heap, so the ordering is reversed: the entry with
/// the smallest distance compares greatest. Ties on distance go to the
/// lexicographically smaller stop id, then to the earlier push.
struct FrontierEntry<'a> {
    distance: Cost,
    stop: usize,
    id: &'a StopId,
    seq: u64,
    path: Vec<usize>,
}

impl Ord for FrontierEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.id.cmp(self.id))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry<'_> {}

/// Run the search from `start`.
///
/// Stops with no path from `start` never appear in the result.
///
/// # Panics
///
/// Panics if `start` is not a valid index into `graph`.
pub fn shortest_paths(graph: &StopGraph<'_>, start: usize) -> ShortestPaths {
    let mut visited = vec![false; graph.len()];
    let mut position = vec![None; graph.len()];
    let mut finalized = Vec::new();

    let mut seq = 0u64;
    let mut frontier = BinaryHeap::new();
    frontier.push(FrontierEntry {
        distance: Cost::ZERO,
        stop: start,
        id: graph.id(start),
        seq,
        path: vec![start],
    });

    while let Some(entry) = frontier.pop() {
        if visited[entry.stop] {
            continue;
        }
        visited[entry.stop] = true;

        trace!(
            stop = %entry.id,
            distance = %entry.distance,
            "finalized stop"
        );

        for &(next, travel_cost) in graph.neighbors(entry.stop) {
            if visited[next] {
                continue;
            }
            seq += 1;
            let mut path = entry.path.clone();
            path.push(next);
            frontier.push(FrontierEntry {
                distance: entry.distance.saturating_add(travel_cost),
                stop: next,
                id: graph.id(next),
                seq,
                path,
            });
        }

        position[entry.stop] = Some(finalized.len());
        finalized.push(FinalizedStop {
            index: entry.stop,
            distance: entry.distance,
            path: entry.path,
        });
    }

    ShortestPaths {
        finalized,
        position,
    }
}
