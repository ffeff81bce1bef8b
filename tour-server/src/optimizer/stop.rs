//! Stops: the nodes of the itinerary graph.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Cost, StopId};

use super::error::OptimizeError;

/// A visitable location with a visit cost and travel edges to other stops.
///
/// Neighbors are kept in a `BTreeMap` so edge iteration order is the
/// lexicographic order of neighbor ids, independent of how the input was
/// assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Unique identifier within one optimization call.
    pub id: StopId,

    /// Cost charged against the budget when the stop is admitted.
    pub visit_cost: Cost,

    /// Travel cost to each directly reachable stop.
    #[serde(default)]
    pub neighbors: BTreeMap<StopId, Cost>,
}

impl Stop {
    /// Create a stop with no neighbors.
    pub fn new(id: StopId, visit_cost: Cost) -> Self {
        Self {
            id,
            visit_cost,
            neighbors: BTreeMap::new(),
        }
    }

    /// Add (or replace) a travel edge to `neighbor`.
    pub fn with_neighbor(mut self, neighbor: StopId, travel_cost: Cost) -> Self {
        self.neighbors.insert(neighbor, travel_cost);
        self
    }

    /// Build a stop from unvalidated values.
    ///
    /// Rejects bad identifiers and negative or non-finite costs, naming the
    /// offending stop in the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tour_server::optimizer::Stop;
    ///
    /// let stop = Stop::from_raw("Museum Island", 12.0, [("Brandenburg Gate", 15.0)]).unwrap();
    /// assert_eq!(stop.neighbors.len(), 1);
    ///
    /// assert!(Stop::from_raw("Museum Island", -12.0, Vec::<(&str, f64)>::new()).is_err());
    /// ```
    pub fn from_raw<I, S>(id: &str, visit_cost: f64, neighbors: I) -> Result<Self, OptimizeError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let invalid = |source| OptimizeError::InvalidStop {
            stop: id.to_string(),
            source,
        };

        let stop_id = StopId::parse(id).map_err(invalid)?;
        let visit_cost = Cost::new(visit_cost).map_err(invalid)?;

        let mut stop = Stop::new(stop_id, visit_cost);
        for (neighbor, travel_cost) in neighbors {
            let neighbor = StopId::parse(neighbor.as_ref()).map_err(invalid)?;
            let travel_cost = Cost::new(travel_cost).map_err(invalid)?;
            stop = stop.with_neighbor(neighbor, travel_cost);
        }
        Ok(stop)
    }
}
