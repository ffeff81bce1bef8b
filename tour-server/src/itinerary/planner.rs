//! Turning a validated request into a scheduled itinerary.

use std::collections::{HashMap, HashSet};

use chrono::NaiveTime;
use tracing::{debug, info};

use super::schedule::{schedule, visit_window};
use super::{ItineraryError, ItineraryRequest, Mode};
use crate::catalog::{Catalog, CatalogStop, City, TravelMethod};
use crate::domain::{Cost, StopId, UserId};
use crate::optimizer;

/// One scheduled stop of an itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryItem {
    pub stop_name: String,
    pub activity: String,
    pub cost: Cost,
    pub travel_method: TravelMethod,
    pub travel_time_mins: u32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ItineraryItem {
    /// Travel time as shown to users, e.g. "15 min".
    pub fn travel_time(&self) -> String {
        format!("{} min", self.travel_time_mins)
    }
}

/// A generated one-day plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub user_id: UserId,

    /// City display name from the catalog.
    pub city: String,

    pub mode: Mode,
    pub items: Vec<ItineraryItem>,
    pub starting_point: Option<String>,
}

impl Itinerary {
    /// Total visit cost of all items.
    pub fn total_cost(&self) -> Cost {
        self.items
            .iter()
            .fold(Cost::ZERO, |acc, item| acc.saturating_add(item.cost))
    }
}

/// Itinerary generator over a read-only catalog.
pub struct ItineraryPlanner<'a> {
    catalog: &'a Catalog,
}

impl<'a> ItineraryPlanner<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Generate an itinerary.
    ///
    /// Stops are filtered by interest, then chosen by `mode` within both the
    /// budget and the request's time window, then scheduled from the start
    /// time.
    pub fn generate(
        &self,
        request: &ItineraryRequest,
        mode: Mode,
    ) -> Result<Itinerary, ItineraryError> {
        let city = self
            .catalog
            .city(&request.city)
            .ok_or_else(|| ItineraryError::UnsupportedCity(request.city.clone()))?;

        let matching = city.stops_matching(&request.interests);
        let mut day = DayBudget::new(
            request.effective_budget(),
            request.start_time,
            request.end_time,
        );

        let chosen = match mode {
            Mode::Filter => admit_in_order(&matching, &mut day),
            Mode::Optimize => optimize_stops(&matching, &mut day)?,
        };

        let scheduled = schedule(&chosen, request.start_time, request.end_time);
        debug!(
            city = %city.name,
            mode = mode.as_str(),
            matching = matching.len(),
            chosen = chosen.len(),
            scheduled = scheduled.len(),
            "Filtered stops"
        );

        if scheduled.is_empty() {
            return Err(ItineraryError::NothingMatches);
        }

        let items = scheduled
            .into_iter()
            .map(|s| ItineraryItem {
                stop_name: s.stop.name.to_string(),
                activity: s.stop.activity.clone(),
                cost: s.stop.cost,
                travel_method: s.stop.travel_method,
                travel_time_mins: s.stop.travel_time_mins,
                start_time: s.start_time,
                end_time: s.end_time,
            })
            .collect::<Vec<_>>();

        info!(
            user = %request.user_id,
            city = %city.name,
            mode = mode.as_str(),
            items = items.len(),
            "Generated itinerary"
        );

        Ok(Itinerary {
            user_id: request.user_id.clone(),
            city: city.name.clone(),
            mode,
            items,
            starting_point: request.starting_point.clone(),
        })
    }
}

/// Money and time left while stops are being admitted.
///
/// The time a set of stops takes is the sum of each stop's travel and visit
/// minutes, whatever order they are walked in, so a set admitted here always
/// fits when scheduled in catalog order.
struct DayBudget {
    remaining: Cost,
    clock: NaiveTime,
    end: Option<NaiveTime>,
}

impl DayBudget {
    fn new(budget: Cost, start: NaiveTime, end: Option<NaiveTime>) -> Self {
        Self {
            remaining: budget,
            clock: start,
            end,
        }
    }

    /// Charge `stop` if it fits both the remaining budget and the day.
    /// Nothing is charged for a stop that does not fit.
    fn try_admit(&mut self, stop: &CatalogStop) -> bool {
        let Some(left) = self.remaining.checked_sub(stop.cost) else {
            return false;
        };
        let Some((_, leave)) = visit_window(self.clock, stop, self.end) else {
            debug!(stop = %stop.name, "Stop does not fit the day");
            return false;
        };
        self.remaining = left;
        self.clock = leave;
        true
    }
}

/// Greedy admission in catalog order.
fn admit_in_order<'c>(stops: &[&'c CatalogStop], day: &mut DayBudget) -> Vec<&'c CatalogStop> {
    stops
        .iter()
        .copied()
        .filter(|stop| day.try_admit(stop))
        .collect()
}

/// Run the optimizer over the induced subgraph of `stops`, starting from the
/// first one, and admit reachable stops closest first.
fn optimize_stops<'c>(
    stops: &[&'c CatalogStop],
    day: &mut DayBudget,
) -> Result<Vec<&'c CatalogStop>, ItineraryError> {
    let graph_stops = City::optimizer_stops(stops);
    let optimization = optimizer::plan(&graph_stops, day.remaining)?;

    let by_id: HashMap<&StopId, &'c CatalogStop> =
        stops.iter().map(|&stop| (&stop.name, stop)).collect();
    let admitted: HashSet<&StopId> = optimization
        .visit_order()
        .into_iter()
        .filter(|id| by_id.get(id).is_some_and(|stop| day.try_admit(stop)))
        .collect();

    Ok(stops
        .iter()
        .filter(|s| admitted.contains(&s.name))
        .copied()
        .collect())
}
