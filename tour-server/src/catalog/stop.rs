//! Catalog entries for a single stop.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Cost, Interest, StopId};
use crate::optimizer::Stop;

/// Default travel time to reach a stop, in minutes.
const DEFAULT_TRAVEL_MINS: u32 = 15;

/// Default time spent at a stop, in minutes.
const DEFAULT_VISIT_MINS: u32 = 60;

/// How a visitor gets to a stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMethod {
    #[default]
    Walk,
    Taxi,
    Subway,
    Bus,
    Tram,
    Bike,
}

impl TravelMethod {
    /// Lowercase name, as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMethod::Walk => "walk",
            TravelMethod::Taxi => "taxi",
            TravelMethod::Subway => "subway",
            TravelMethod::Bus => "bus",
            TravelMethod::Tram => "tram",
            TravelMethod::Bike => "bike",
        }
    }
}

impl fmt::Display for TravelMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stop as described by the reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStop {
    /// Stop name, unique within its city.
    pub name: StopId,

    /// What the visitor does there.
    pub activity: String,

    /// Admission or visit cost.
    pub cost: Cost,

    /// Travel time from the previous stop, in minutes.
    #[serde(default = "default_travel_mins")]
    pub travel_time_mins: u32,

    #[serde(default)]
    pub travel_method: TravelMethod,

    /// Time spent at the stop, in minutes.
    #[serde(default = "default_visit_mins")]
    pub visit_mins: u32,

    /// Interest tags this stop satisfies.
    #[serde(default)]
    pub interests: Vec<Interest>,

    /// Travel cost to nearby stops in the same city.
    #[serde(default)]
    pub neighbors: BTreeMap<StopId, Cost>,
}

fn default_travel_mins() -> u32 {
    DEFAULT_TRAVEL_MINS
}

fn default_visit_mins() -> u32 {
    DEFAULT_VISIT_MINS
}

impl CatalogStop {
    /// Whether this stop matches any of `interests`.
    pub fn matches_any(&self, interests: &[Interest]) -> bool {
        interests.iter().any(|i| self.interests.contains(i))
    }

    /// Convert to an optimizer stop, keeping only neighbor edges accepted
    /// by `keep`.
    pub fn to_optimizer_stop(&self, keep: impl Fn(&StopId) -> bool) -> Stop {
        self.neighbors
            .iter()
            .filter(|(neighbor, _)| keep(neighbor))
            .fold(Stop::new(self.name.clone(), self.cost), |stop, (neighbor, cost)| {
                stop.with_neighbor(neighbor.clone(), *cost)
            })
    }
}
