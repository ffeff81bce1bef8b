//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    Cost, DomainError, Interest, UserId, format_time_of_day, parse_date, parse_time_of_day,
};
use crate::itinerary::{Itinerary, ItineraryItem};
use crate::optimizer::{Optimization, OptimizeError, Stop};
use crate::preferences::Preferences;

/// Preferences as submitted by the form or an API client.
///
/// Used by `/collect_preferences`, `/generate_itinerary` and
/// `/optimize_itinerary`. Blank strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInput {
    /// Key for stored preferences
    pub user_id: String,

    /// City name (e.g. "Berlin")
    pub city: Option<String>,

    /// Date in YYYY-MM-DD format
    pub date: Option<String>,

    /// Start of the day, "HH:MM" or "H:MM AM/PM"
    pub start_time: Option<String>,

    /// End of the day, "HH:MM" or "H:MM AM/PM"
    pub end_time: Option<String>,

    /// Interest tags (e.g. ["history", "museums"])
    pub interests: Option<Vec<String>>,

    /// Maximum total visit cost
    pub budget: Option<f64>,

    /// Where the day begins (e.g. a hotel)
    pub starting_point: Option<String>,
}

impl UserInput {
    /// Validate the user id.
    pub fn user_id(&self) -> Result<UserId, DomainError> {
        UserId::parse(&self.user_id)
    }

    /// Validate every present field.
    pub fn to_preferences(&self) -> Result<Preferences, DomainError> {
        let date = non_blank(&self.date).map(parse_date).transpose()?;
        let start_time = non_blank(&self.start_time)
            .map(parse_time_of_day)
            .transpose()?;
        let end_time = non_blank(&self.end_time)
            .map(parse_time_of_day)
            .transpose()?;

        let interests = self
            .interests
            .as_ref()
            .map(|tags| {
                tags.iter()
                    .filter(|t| !t.trim().is_empty())
                    .map(|t| Interest::parse(t))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let budget = self.budget.map(Cost::new).transpose()?;

        Ok(Preferences {
            city: non_blank(&self.city).map(str::to_string),
            date,
            start_time,
            end_time,
            interests,
            budget,
            starting_point: non_blank(&self.starting_point).map(str::to_string),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Stored preferences as returned to clients.
#[derive(Debug, Serialize)]
pub struct PreferencesView {
    pub city: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub interests: Option<Vec<String>>,
    pub budget: Option<f64>,
    pub starting_point: Option<String>,
}

impl PreferencesView {
    pub fn from_preferences(preferences: &Preferences) -> Self {
        Self {
            city: preferences.city.clone(),
            date: preferences.date.map(|d| d.format("%Y-%m-%d").to_string()),
            start_time: preferences.start_time.map(format_time_of_day),
            end_time: preferences.end_time.map(format_time_of_day),
            interests: preferences
                .interests
                .as_ref()
                .map(|tags| tags.iter().map(|t| t.as_str().to_string()).collect()),
            budget: preferences.budget.map(Cost::value),
            starting_point: preferences.starting_point.clone(),
        }
    }
}

/// Response to `/collect_preferences`.
#[derive(Debug, Serialize)]
pub struct CollectPreferencesResponse {
    pub message: String,
    pub user_id: String,

    /// Stored preferences after merging
    pub preferences: PreferencesView,
}

/// Response to `/preferences/:user_id`.
#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub user_id: String,
    pub preferences: PreferencesView,
}

/// Welcome message for non-browser clients of `/`.
#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Supported cities and known interest tags.
#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub cities: Vec<String>,
    pub interests: Vec<String>,
}

/// A scheduled stop in an itinerary response.
#[derive(Debug, Serialize)]
pub struct ItineraryItemResult {
    pub stop_name: String,
    pub activity: String,
    pub cost: f64,

    /// e.g. "walk", "taxi"
    pub travel_method: String,

    /// e.g. "15 min"
    pub travel_time: String,

    /// Visit start, "HH:MM"
    pub start_time: String,

    /// Visit end, "HH:MM"
    pub end_time: String,
}

impl ItineraryItemResult {
    pub fn from_item(item: &ItineraryItem) -> Self {
        Self {
            stop_name: item.stop_name.clone(),
            activity: item.activity.clone(),
            cost: item.cost.value(),
            travel_method: item.travel_method.to_string(),
            travel_time: item.travel_time(),
            start_time: format_time_of_day(item.start_time),
            end_time: format_time_of_day(item.end_time),
        }
    }
}

/// Response to `/generate_itinerary` and `/optimize_itinerary`.
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    pub user_id: String,
    pub city: String,

    /// "filter" or "optimize"
    pub mode: String,

    pub starting_point: Option<String>,

    /// Sum of visit costs
    pub total_cost: f64,

    pub itinerary: Vec<ItineraryItemResult>,
}

impl ItineraryResponse {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            user_id: itinerary.user_id.to_string(),
            city: itinerary.city.clone(),
            mode: itinerary.mode.as_str().to_string(),
            starting_point: itinerary.starting_point.clone(),
            total_cost: itinerary.total_cost().value(),
            itinerary: itinerary
                .items
                .iter()
                .map(ItineraryItemResult::from_item)
                .collect(),
        }
    }
}

/// A stop in a raw optimization request.
#[derive(Debug, Deserialize)]
pub struct StopInput {
    pub id: String,
    pub visit_cost: f64,

    /// Neighbor id to travel cost
    #[serde(default)]
    pub neighbors: BTreeMap<String, f64>,
}

/// Request to `/api/optimize`. The first stop is the start.
#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub stops: Vec<StopInput>,
    pub budget: f64,
}

impl OptimizeRequest {
    /// Validate stops into optimizer input.
    pub fn to_stops(&self) -> Result<Vec<Stop>, OptimizeError> {
        self.stops
            .iter()
            .map(|s| {
                let neighbors = s.neighbors.iter().map(|(id, cost)| (id, *cost));
                Stop::from_raw(&s.id, s.visit_cost, neighbors)
            })
            .collect()
    }

    pub fn budget(&self) -> Result<Cost, OptimizeError> {
        Cost::new(self.budget).map_err(OptimizeError::InvalidBudget)
    }
}

/// An admitted stop in an optimization response.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub id: String,
    pub visit_cost: f64,

    /// Least travel cost from the start stop
    pub travel_cost: f64,
}

/// Response to `/api/optimize`.
#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    /// Admitted stops in input order
    pub stops: Vec<StopResult>,

    /// Reachable stop ids, closest first
    pub visit_order: Vec<String>,

    pub spent: f64,
    pub remaining: f64,
}

impl OptimizeResponse {
    pub fn from_optimization(optimization: &Optimization<'_>) -> Self {
        let stops = optimization
            .admitted()
            .into_iter()
            .map(|s| StopResult {
                id: s.id.to_string(),
                visit_cost: s.visit_cost.value(),
                travel_cost: optimization
                    .distance_to(s.id.as_str())
                    .map_or(0.0, Cost::value),
            })
            .collect();

        Self {
            stops,
            visit_order: optimization
                .visit_order()
                .into_iter()
                .map(|id| id.to_string())
                .collect(),
            spent: optimization.spent().value(),
            remaining: optimization.remaining().value(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::plan;

    fn input(json: serde_json::Value) -> UserInput {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn user_input_full() {
        let input = input(serde_json::json!({
            "user_id": "user123",
            "city": "Berlin",
            "date": "2024-03-15",
            "start_time": "9:00 AM",
            "end_time": "18:00",
            "interests": ["History", "museums"],
            "budget": 100,
            "starting_point": "Hotel Berlin Central"
        }));

        assert_eq!(input.user_id().unwrap().as_str(), "user123");
        let prefs = input.to_preferences().unwrap();
        let view = PreferencesView::from_preferences(&prefs);
        assert_eq!(view.city.as_deref(), Some("Berlin"));
        assert_eq!(view.date.as_deref(), Some("2024-03-15"));
        assert_eq!(view.start_time.as_deref(), Some("09:00"));
        assert_eq!(view.end_time.as_deref(), Some("18:00"));
        assert_eq!(
            view.interests,
            Some(vec!["history".to_string(), "museums".to_string()])
        );
        assert_eq!(view.budget, Some(100.0));
    }

    #[test]
    fn user_input_blank_fields_are_absent() {
        let input = input(serde_json::json!({
            "user_id": "user123",
            "city": "  ",
            "date": "",
            "interests": ["", "nature"]
        }));
        let prefs = input.to_preferences().unwrap();
        assert_eq!(prefs.city, None);
        assert_eq!(prefs.date, None);
        assert_eq!(prefs.interests.map(|i| i.len()), Some(1));
    }

    #[test]
    fn user_input_rejects_bad_values() {
        let bad_budget = input(serde_json::json!({"user_id": "u", "budget": -1}));
        assert!(bad_budget.to_preferences().is_err());

        let bad_time = input(serde_json::json!({"user_id": "u", "start_time": "25:00"}));
        assert!(bad_time.to_preferences().is_err());

        let bad_user = input(serde_json::json!({"user_id": " "}));
        assert!(bad_user.user_id().is_err());
    }

    #[test]
    fn optimize_request_round_trip() {
        let req: OptimizeRequest = serde_json::from_value(serde_json::json!({
            "stops": [
                {"id": "A", "visit_cost": 0, "neighbors": {"B": 1}},
                {"id": "B", "visit_cost": 5, "neighbors": {"A": 1, "C": 1}},
                {"id": "C", "visit_cost": 3}
            ],
            "budget": 4
        }))
        .unwrap();

        let stops = req.to_stops().unwrap();
        let optimization = plan(&stops, req.budget().unwrap()).unwrap();
        let resp = OptimizeResponse::from_optimization(&optimization);

        let ids: Vec<&str> = resp.stops.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["A", "C"]);
        assert_eq!(resp.visit_order, ["A", "B", "C"]);
        assert_eq!(resp.stops[1].travel_cost, 2.0);
        assert_eq!(resp.spent, 3.0);
        assert_eq!(resp.remaining, 1.0);
    }

    #[test]
    fn optimize_request_rejects_negative_budget() {
        let req = OptimizeRequest {
            stops: Vec::new(),
            budget: -5.0,
        };
        assert!(matches!(req.budget(), Err(OptimizeError::InvalidBudget(_))));
    }
}
