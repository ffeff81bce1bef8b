//! Itinerary optimizer.
//!
//! Given the stops of a city (each with a visit cost and travel costs to its
//! neighbors) and a budget, this module answers: "starting from the first
//! stop, which stops can I afford, visiting the closest ones first?"
//!
//! The work happens in three steps:
//!
//! 1. [`StopGraph::build`] validates the input (no duplicate ids, no
//!    dangling neighbor references).
//! 2. [`shortest_paths`] runs a Dijkstra search on travel cost from the
//!    start stop, finalizing reachable stops in order of distance.
//! 3. [`admit`] walks the finalized stops and greedily admits each one
//!    whose visit cost fits the remaining budget.
//!
//! The result keeps the original input order. Every call builds its own
//! graph, so the optimizer holds no state between calls.

mod budget;
mod error;
mod graph;
mod search;
mod stop;


pub use budget::{Admission, admit};
pub use error::OptimizeError;
pub use graph::StopGraph;
pub use search::{FinalizedStop, ShortestPaths, shortest_paths};
pub use stop::Stop;

use tracing::debug;

use crate::domain::{Cost, StopId};

/// Result of a full optimization run.
#[derive(Debug)]
pub struct Optimization<'a> {
    graph: StopGraph<'a>,
    paths: ShortestPaths,
    admission: Admission,
}

impl<'a> Optimization<'a> {
    /// Admitted stops in original input order.
    pub fn admitted(&self) -> Vec<&'a Stop> {
        self.graph
            .stops()
            .iter()
            .zip(&self.admission.admitted)
            .filter(|(_, admitted)| **admitted)
            .map(|(stop, _)| stop)
            .collect()
    }

    /// Identifiers of reachable stops in finalization order.
    pub fn visit_order(&self) -> Vec<&'a StopId> {
        self.paths
            .in_order()
            .iter()
            .map(|f| self.graph.id(f.index))
            .collect()
    }

    /// Least travel cost from the start to `id`, if reachable.
    pub fn distance_to(&self, id: &str) -> Option<Cost> {
        let index = self.graph.index_of(id)?;
        self.paths.get(index).map(|f| f.distance)
    }

    /// Cheapest route from the start to `id`, if reachable.
    pub fn path_to(&self, id: &str) -> Option<Vec<&'a StopId>> {
        let index = self.graph.index_of(id)?;
        let entry = self.paths.get(index)?;
        Some(entry.path.iter().map(|&i| self.graph.id(i)).collect())
    }

    /// Total visit cost of the admitted stops.
    pub fn spent(&self) -> Cost {
        self.admission.spent
    }

    /// Budget left after admission.
    pub fn remaining(&self) -> Cost {
        self.admission.remaining
    }

    /// Number of stops reachable from the start.
    pub fn reachable_count(&self) -> usize {
        self.paths.len()
    }
}

/// Run the optimizer and keep the intermediate results.
///
/// The start stop is the first element of `stops`. An empty input yields an
/// empty optimization.
pub fn plan(stops: &[Stop], budget: Cost) -> Result<Optimization<'_>, OptimizeError> {
    let graph = StopGraph::build(stops)?;

    let paths = if graph.is_empty() {
        ShortestPaths::default()
    } else {
        shortest_paths(&graph, 0)
    };

    let admission = admit(&graph, paths.in_order(), budget);

    debug!(
        stops = graph.len(),
        reachable = paths.len(),
        admitted = admission.count(),
        spent = %admission.spent,
        budget = %budget,
        "optimized itinerary"
    );

    Ok(Optimization {
        graph,
        paths,
        admission,
    })
}

/// Select the stops affordable under `budget`, closest first, returned in
/// input order.
///
/// # Examples
///
/// ```
/// use tour_server::domain::Cost;
/// use tour_server::optimizer::{Stop, optimize};
///
/// let stops = vec![
///     Stop::from_raw("Brandenburg Gate", 0.0, [("Museum Island", 15.0)]).unwrap(),
///     Stop::from_raw("Museum Island", 12.0, [("Brandenburg Gate", 15.0)]).unwrap(),
/// ];
///
/// let all = optimize(&stops, Cost::new(100.0).unwrap()).unwrap();
/// assert_eq!(all.len(), 2);
///
/// let cheap = optimize(&stops, Cost::new(5.0).unwrap()).unwrap();
/// assert_eq!(cheap.len(), 1);
/// assert_eq!(cheap[0].id.as_str(), "Brandenburg Gate");
/// ```
pub fn optimize(stops: &[Stop], budget: Cost) -> Result<Vec<Stop>, OptimizeError> {
    let optimization = plan(stops, budget)?;
    Ok(optimization.admitted().into_iter().cloned().collect())
}

/// [`optimize`] over an unvalidated budget value.
///
/// Negative or non-finite budgets are rejected with
/// [`OptimizeError::InvalidBudget`].
pub fn optimize_with_budget(stops: &[Stop], budget: f64) -> Result<Vec<Stop>, OptimizeError> {
    let budget = Cost::new(budget).map_err(OptimizeError::InvalidBudget)?;
    optimize(stops, budget)
}
