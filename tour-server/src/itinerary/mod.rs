//! Itinerary generation.
//!
//! Combines a user's preferences with the catalog: pick the city's stops
//! that match the user's interests, keep the ones the budget allows (either
//! greedily in catalog order or via the travel-cost optimizer), and give
//! each a visit window during the day.

mod error;
mod planner;
mod request;
mod schedule;

pub use error::ItineraryError;
pub use planner::{Itinerary, ItineraryItem, ItineraryPlanner};
pub use request::{ItineraryRequest, Mode};
pub use schedule::{ScheduledStop, schedule};
