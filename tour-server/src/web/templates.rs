//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::format_time_of_day;
use crate::itinerary::{Itinerary, ItineraryItem};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the preference form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub cities: Vec<String>,
    pub interests: Vec<String>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Itinerary fragment.
#[derive(Template)]
#[template(path = "itinerary.html")]
pub struct ItineraryTemplate {
    pub itinerary: ItineraryView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Itinerary view model for templates.
#[derive(Debug, Clone)]
pub struct ItineraryView {
    pub city: String,
    pub mode: String,
    pub starting_point: Option<String>,
    pub total_cost: String,
    pub items: Vec<ItemView>,
}

impl ItineraryView {
    /// Create from a generated Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            city: itinerary.city.clone(),
            mode: itinerary.mode.as_str().to_string(),
            starting_point: itinerary.starting_point.clone(),
            total_cost: format_cost(itinerary.total_cost().value()),
            items: itinerary.items.iter().map(ItemView::from_item).collect(),
        }
    }
}

/// One row of the itinerary table.
#[derive(Debug, Clone)]
pub struct ItemView {
    pub stop_name: String,
    pub activity: String,
    pub cost: String,
    pub is_free: bool,
    pub travel: String,
    pub start_time: String,
    pub end_time: String,
}

impl ItemView {
    pub fn from_item(item: &ItineraryItem) -> Self {
        Self {
            stop_name: item.stop_name.clone(),
            activity: item.activity.clone(),
            cost: format_cost(item.cost.value()),
            is_free: item.cost.value() == 0.0,
            travel: format!("{} by {}", item.travel_time(), item.travel_method),
            start_time: format_time_of_day(item.start_time),
            end_time: format_time_of_day(item.end_time),
        }
    }
}

/// Two decimal places, e.g. "12.00".
fn format_cost(value: f64) -> String {
    format!("{value:.2}")
}
