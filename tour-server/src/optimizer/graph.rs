//! Itinerary graph construction and validation.

use std::collections::HashMap;

use crate::domain::{Cost, StopId};

use super::error::OptimizeError;
use super::stop::Stop;

/// A validated, index-based view over a slice of stops.
///
/// Stops are addressed by their position in the input slice. Construction
/// fails if an identifier repeats or a neighbor edge names a stop that is
/// not in the slice, so every index held by the graph is resolvable.
#[derive(Debug)]
pub struct StopGraph<'a> {
    stops: &'a [Stop],
    index: HashMap<&'a str, usize>,
    adjacency: Vec<Vec<(usize, Cost)>>,
}

impl<'a> StopGraph<'a> {
    /// Build and validate a graph over `stops`.
    pub fn build(stops: &'a [Stop]) -> Result<Self, OptimizeError> {
        let mut index: HashMap<&'a str, usize> = HashMap::with_capacity(stops.len());
        for (i, stop) in stops.iter().enumerate() {
            if index.insert(stop.id.as_str(), i).is_some() {
                return Err(OptimizeError::DuplicateStop(stop.id.clone()));
            }
        }

        let adjacency = stops
            .iter()
            .map(|stop| {
                stop.neighbors
                    .iter()
                    .map(|(neighbor, travel_cost)| {
                        index
                            .get(neighbor.as_str())
                            .map(|&j| (j, *travel_cost))
                            .ok_or_else(|| OptimizeError::UnknownNeighbor {
                                stop: stop.id.clone(),
                                neighbor: neighbor.clone(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            stops,
            index,
            adjacency,
        })
    }

    /// Number of stops in the graph.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the graph has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// The stop at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn stop(&self, index: usize) -> &'a Stop {
        &self.stops[index]
    }

    /// The identifier of the stop at `index`.
    pub fn id(&self, index: usize) -> &'a StopId {
        &self.stops[index].id
    }

    /// Look up a stop's index by identifier.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Outgoing edges of the stop at `index`, ordered by neighbor id.
    pub fn neighbors(&self, index: usize) -> &[(usize, Cost)] {
        &self.adjacency[index]
    }

    /// The underlying stops, in input order.
    pub fn stops(&self) -> &'a [Stop] {
        self.stops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, cost: f64, neighbors: &[(&str, f64)]) -> Stop {
        Stop::from_raw(id, cost, neighbors.iter().copied()).unwrap()
    }

    #[test]
    fn build_indexes_stops() {
        let stops = vec![
            stop("A", 0.0, &[("B", 15.0)]),
            stop("B", 12.0, &[("A", 15.0)]),
        ];
        let graph = StopGraph::build(&stops).unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.index_of("A"), Some(0));
        assert_eq!(graph.index_of("B"), Some(1));
        assert_eq!(graph.index_of("C"), None);
        assert_eq!(graph.neighbors(0), &[(1, Cost::new(15.0).unwrap())]);
        assert_eq!(graph.id(1).as_str(), "B");
    }

    #[test]
    fn empty_graph() {
        let stops: Vec<Stop> = Vec::new();
        let graph = StopGraph::build(&stops).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let stops = vec![stop("A", 0.0, &[]), stop("A", 5.0, &[])];
        let err = StopGraph::build(&stops).unwrap_err();
        assert_eq!(err, OptimizeError::DuplicateStop(StopId::parse("A").unwrap()));
    }

    #[test]
    fn rejects_dangling_neighbor() {
        let stops = vec![stop("A", 0.0, &[("Nowhere", 3.0)])];
        let err = StopGraph::build(&stops).unwrap_err();
        assert_eq!(
            err,
            OptimizeError::UnknownNeighbor {
                stop: StopId::parse("A").unwrap(),
                neighbor: StopId::parse("Nowhere").unwrap(),
            }
        );
    }

    #[test]
    fn self_loops_are_allowed() {
        let stops = vec![stop("A", 0.0, &[("A", 0.0)])];
        let graph = StopGraph::build(&stops).unwrap();
        assert_eq!(graph.neighbors(0), &[(0, Cost::ZERO)]);
    }

    #[test]
    fn neighbors_follow_id_order() {
        let stops = vec![
            stop("A", 0.0, &[("C", 1.0), ("B", 2.0)]),
            stop("C", 0.0, &[]),
            stop("B", 0.0, &[]),
        ];
        let graph = StopGraph::build(&stops).unwrap();
        // B is at index 2, C at index 1; edges come back sorted by id.
        assert_eq!(
            graph.neighbors(0),
            &[(2, Cost::new(2.0).unwrap()), (1, Cost::new(1.0).unwrap())]
        );
    }
}
