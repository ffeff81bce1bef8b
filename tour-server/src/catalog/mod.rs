//! Read-only city → stop reference data.
//!
//! The catalog is loaded once at startup, either from the built-in data or
//! from a JSON file, and shared read-only across requests. Every city's
//! stops are checked as an optimizer graph at load time, so a bad catalog
//! fails at startup rather than on the first request.

mod error;
mod stop;

pub use error::CatalogError;
pub use stop::{CatalogStop, TravelMethod};

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Interest, StopId};
use crate::optimizer::{Stop, StopGraph};

/// Demo reference data compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// The stops of one city, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Display name (e.g. "New York").
    pub name: String,

    /// Stops in catalog order. The first stop is the optimizer's start.
    pub stops: Vec<CatalogStop>,
}

impl City {
    /// Stops matching at least one of `interests`, in catalog order.
    ///
    /// An empty interest list matches nothing.
    pub fn stops_matching(&self, interests: &[Interest]) -> Vec<&CatalogStop> {
        self.stops
            .iter()
            .filter(|s| s.matches_any(interests))
            .collect()
    }

    /// Look up a stop by name.
    pub fn stop(&self, name: &str) -> Option<&CatalogStop> {
        self.stops.iter().find(|s| s.name.as_str() == name)
    }

    /// Optimizer input for a subset of this city's stops.
    ///
    /// Neighbor edges to stops outside `selected` are dropped, so the
    /// result is always a closed graph (the induced subgraph).
    pub fn optimizer_stops(selected: &[&CatalogStop]) -> Vec<Stop> {
        let names: HashSet<&StopId> = selected.iter().map(|s| &s.name).collect();
        selected
            .iter()
            .map(|s| s.to_optimizer_stop(|id| names.contains(id)))
            .collect()
    }

    /// Optimizer input for every stop in the city.
    pub fn all_optimizer_stops(&self) -> Vec<Stop> {
        self.stops.iter().map(|s| s.to_optimizer_stop(|_| true)).collect()
    }
}

/// On-disk catalog format.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    cities: Vec<City>,
}

/// Read-only lookup table of supported cities.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Keyed by normalised (trimmed, lowercased) city name.
    cities: BTreeMap<String, City>,
}

impl Catalog {
    /// Build a catalog from cities, validating each one.
    pub fn from_cities(cities: Vec<City>) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for city in cities {
            if city.stops.is_empty() {
                return Err(CatalogError::EmptyCity(city.name));
            }

            let stops = city.all_optimizer_stops();
            StopGraph::build(&stops).map_err(|source| CatalogError::InvalidCity {
                city: city.name.clone(),
                source,
            })?;

            let key = normalise(&city.name);
            if map.contains_key(&key) {
                return Err(CatalogError::DuplicateCity(city.name));
            }
            map.insert(key, city);
        }
        Ok(Self { cities: map })
    }

    /// Parse a catalog from JSON: `{"cities": [{"name": ..., "stops": [...]}]}`.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_cities(file.cities)
    }

    /// Load a catalog from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Look up a city by name, ignoring case and surrounding whitespace.
    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.get(&normalise(name))
    }

    /// Display names of all supported cities, sorted.
    pub fn city_names(&self) -> Vec<&str> {
        self.cities.values().map(|c| c.name.as_str()).collect()
    }

    /// Every interest tag used by any stop, sorted.
    pub fn interests(&self) -> BTreeSet<&Interest> {
        self.cities
            .values()
            .flat_map(|c| c.stops.iter())
            .flat_map(|s| s.interests.iter())
            .collect()
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Whether the catalog has no cities.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// The built-in demo catalog (Berlin and New York).
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }
}

fn normalise(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Cost;
    use std::io::Write;

    fn interests(tags: &[&str]) -> Vec<Interest> {
        tags.iter().map(|t| Interest::parse(t).unwrap()).collect()
    }

    #[test]
    fn builtin_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.city_names(), ["Berlin", "New York"]);
    }

    #[test]
    fn city_lookup_ignores_case() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.city("Berlin").is_some());
        assert!(catalog.city("  berlin ").is_some());
        assert!(catalog.city("NEW YORK").is_some());
        assert!(catalog.city("Paris").is_none());
    }

    #[test]
    fn builtin_berlin_matches_reference_data() {
        let catalog = Catalog::builtin().unwrap();
        let berlin = catalog.city("Berlin").unwrap();

        let gate = berlin.stop("Brandenburg Gate").unwrap();
        assert_eq!(gate.cost, Cost::ZERO);
        assert_eq!(gate.travel_method, TravelMethod::Walk);

        let museum = berlin.stop("Museum Island").unwrap();
        assert_eq!(museum.cost, Cost::new(12.0).unwrap());
        assert_eq!(museum.travel_method, TravelMethod::Taxi);
        assert_eq!(
            museum.neighbors.get("Brandenburg Gate"),
            Some(&Cost::new(15.0).unwrap())
        );
    }

    #[test]
    fn stops_matching_filters_by_any_interest() {
        let catalog = Catalog::builtin().unwrap();
        let berlin = catalog.city("Berlin").unwrap();

        let history = berlin.stops_matching(&interests(&["history"]));
        assert_eq!(history.len(), 2);

        let museums = berlin.stops_matching(&interests(&["museums", "food"]));
        assert_eq!(museums.len(), 1);
        assert_eq!(museums[0].name.as_str(), "Museum Island");

        assert!(berlin.stops_matching(&interests(&["food"])).is_empty());
        assert!(berlin.stops_matching(&[]).is_empty());
    }

    #[test]
    fn optimizer_stops_prune_edges_to_excluded_stops() {
        let catalog = Catalog::builtin().unwrap();
        let berlin = catalog.city("Berlin").unwrap();

        let museums = berlin.stops_matching(&interests(&["museums"]));
        let stops = City::optimizer_stops(&museums);
        assert_eq!(stops.len(), 1);
        assert!(stops[0].neighbors.is_empty());
        assert!(StopGraph::build(&stops).is_ok());
    }

    #[test]
    fn interests_are_collected() {
        let catalog = Catalog::builtin().unwrap();
        let tags: Vec<&str> = catalog.interests().iter().map(|i| i.as_str()).collect();
        assert_eq!(
            tags,
            ["history", "landmarks", "museums", "nature", "relaxation"]
        );
    }

    #[test]
    fn from_json_str_parses_cities() {
        let json = r#"{
            "cities": [{
                "name": "Paris",
                "stops": [
                    {"name": "Louvre", "activity": "Art", "cost": 17,
                     "interests": ["museums"], "neighbors": {"Eiffel Tower": 20}},
                    {"name": "Eiffel Tower", "activity": "Views", "cost": 26,
                     "travel_method": "subway", "interests": ["landmarks"],
                     "neighbors": {"Louvre": 20}}
                ]
            }]
        }"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        let paris = catalog.city("paris").unwrap();
        assert_eq!(paris.stops.len(), 2);
        assert_eq!(paris.stops[1].travel_method, TravelMethod::Subway);
    }

    #[test]
    fn from_json_rejects_dangling_neighbor() {
        let json = r#"{"cities": [{"name": "Rome", "stops": [
            {"name": "Colosseum", "activity": "Ruins", "cost": 16, "neighbors": {"Forum": 5}}
        ]}]}"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCity { ref city, .. } if city == "Rome"));
    }

    #[test]
    fn from_json_rejects_duplicate_stop() {
        let json = r#"{"cities": [{"name": "Rome", "stops": [
            {"name": "Colosseum", "activity": "Ruins", "cost": 16},
            {"name": "Colosseum", "activity": "Again", "cost": 16}
        ]}]}"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(CatalogError::InvalidCity { .. })
        ));
    }

    #[test]
    fn from_json_rejects_duplicate_and_empty_cities() {
        let json = r#"{"cities": [
            {"name": "Rome", "stops": [{"name": "A", "activity": "x", "cost": 0}]},
            {"name": "ROME", "stops": [{"name": "B", "activity": "y", "cost": 0}]}
        ]}"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(CatalogError::DuplicateCity(ref c)) if c == "ROME"
        ));

        let json = r#"{"cities": [{"name": "Rome", "stops": []}]}"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(CatalogError::EmptyCity(_))
        ));
    }

    #[test]
    fn from_json_rejects_malformed_json() {
        assert!(matches!(
            Catalog::from_json_str("{not json"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn from_json_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"cities": [{{"name": "Oslo", "stops": [
                {{"name": "Opera House", "activity": "Walk the roof", "cost": 0}}
            ]}}]}}"#
        )
        .unwrap();

        let catalog = Catalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.city_names(), ["Oslo"]);
    }

    #[test]
    fn from_json_file_missing() {
        let err = Catalog::from_json_file("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
