//! User preference storage.
//!
//! Preferences are a small bag of optional fields keyed by user id. The
//! request handlers talk to a [`PreferenceStore`] trait object, so the
//! backing store (in-process cache or Neo4j) is chosen at startup and the
//! itinerary code never sees it.

mod error;
mod memory;
mod neo4j;

pub use error::PreferenceError;
pub use memory::{MemoryPreferenceStore, MemoryStoreConfig};
pub use neo4j::{Neo4jConfig, Neo4jPreferenceStore};

use chrono::{NaiveDate, NaiveTime};
use futures::future::BoxFuture;

use crate::domain::{
    Cost, Interest, UserId, format_time_of_day, parse_date, parse_time_of_day,
};

/// Stored planning preferences for one user.
///
/// Every field is optional. Saving merges into what is already stored:
/// fields present in the new value overwrite, absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    pub city: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub interests: Option<Vec<Interest>>,
    pub budget: Option<Cost>,
    pub starting_point: Option<String>,
}

impl Preferences {
    /// Overlay the fields set in `newer`.
    pub fn merge(&mut self, newer: Preferences) {
        let Preferences {
            city,
            date,
            start_time,
            end_time,
            interests,
            budget,
            starting_point,
        } = newer;

        if city.is_some() {
            self.city = city;
        }
        if date.is_some() {
            self.date = date;
        }
        if start_time.is_some() {
            self.start_time = start_time;
        }
        if end_time.is_some() {
            self.end_time = end_time;
        }
        if interests.is_some() {
            self.interests = interests;
        }
        if budget.is_some() {
            self.budget = budget;
        }
        if starting_point.is_some() {
            self.starting_point = starting_point;
        }
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Preferences::default()
    }

    /// Flatten to `(key, value)` string pairs for key-value backends.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(city) = &self.city {
            pairs.push(("city", city.clone()));
        }
        if let Some(date) = self.date {
            pairs.push(("date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(t) = self.start_time {
            pairs.push(("start_time", format_time_of_day(t)));
        }
        if let Some(t) = self.end_time {
            pairs.push(("end_time", format_time_of_day(t)));
        }
        if let Some(interests) = &self.interests {
            let joined = interests
                .iter()
                .map(Interest::as_str)
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("interests", joined));
        }
        if let Some(budget) = self.budget {
            pairs.push(("budget", budget.to_string()));
        }
        if let Some(point) = &self.starting_point {
            pairs.push(("starting_point", point.clone()));
        }
        pairs
    }

    /// Rebuild from `(key, value)` string pairs. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, PreferenceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut prefs = Preferences::default();
        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.as_ref();
            let invalid = |message: String| PreferenceError::InvalidValue {
                key: key.to_string(),
                message,
            };

            match key {
                "city" => prefs.city = Some(value.to_string()),
                "date" => {
                    prefs.date = Some(parse_date(value).map_err(|e| invalid(e.to_string()))?)
                }
                "start_time" => {
                    prefs.start_time =
                        Some(parse_time_of_day(value).map_err(|e| invalid(e.to_string()))?)
                }
                "end_time" => {
                    prefs.end_time =
                        Some(parse_time_of_day(value).map_err(|e| invalid(e.to_string()))?)
                }
                "interests" => {
                    let interests = value
                        .split(',')
                        .filter(|s| !s.trim().is_empty())
                        .map(Interest::parse)
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(|e| invalid(e.to_string()))?;
                    prefs.interests = Some(interests);
                }
                "budget" => {
                    let raw: f64 = value.trim().parse().map_err(|e| {
                        invalid(format!("not a number: {e}"))
                    })?;
                    prefs.budget = Some(Cost::new(raw).map_err(|e| invalid(e.to_string()))?);
                }
                "starting_point" => prefs.starting_point = Some(value.to_string()),
                _ => {}
            }
        }
        Ok(prefs)
    }
}

/// Key-value store for user preferences.
///
/// Implementations must be safe to share across request handlers.
pub trait PreferenceStore: Send + Sync {
    /// Merge `preferences` into the stored value for `user` and return the
    /// merged result.
    fn save<'a>(
        &'a self,
        user: &'a UserId,
        preferences: Preferences,
    ) -> BoxFuture<'a, Result<Preferences, PreferenceError>>;

    /// Fetch the stored preferences for `user`, if any.
    fn get<'a>(&'a self, user: &'a UserId)
    -> BoxFuture<'a, Result<Option<Preferences>, PreferenceError>>;

    /// Short backend name for logging.
    fn backend(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Preferences {
        Preferences {
            city: Some("Berlin".into()),
            date: NaiveDate::from_ymd_opt(2024, 3, 15),
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: NaiveTime::from_hms_opt(18, 0, 0),
            interests: Some(vec![
                Interest::parse("history").unwrap(),
                Interest::parse("museums").unwrap(),
            ]),
            budget: Some(Cost::new(100.0).unwrap()),
            starting_point: Some("Hotel Berlin Central".into()),
        }
    }

    #[test]
    fn merge_overlays_present_fields() {
        let mut stored = sample();
        stored.merge(Preferences {
            budget: Some(Cost::new(40.0).unwrap()),
            city: Some("New York".into()),
            ..Default::default()
        });

        assert_eq!(stored.budget, Some(Cost::new(40.0).unwrap()));
        assert_eq!(stored.city.as_deref(), Some("New York"));
        // Untouched fields survive.
        assert_eq!(stored.starting_point.as_deref(), Some("Hotel Berlin Central"));
        assert_eq!(stored.interests.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn merge_with_empty_is_noop() {
        let mut stored = sample();
        stored.merge(Preferences::default());
        assert_eq!(stored, sample());
    }

    #[test]
    fn is_empty() {
        assert!(Preferences::default().is_empty());
        assert!(!sample().is_empty());
    }

    #[test]
    fn pairs_round_trip() {
        let prefs = sample();
        let pairs = prefs.to_pairs();

        assert!(pairs.contains(&("budget", "100".to_string())));
        assert!(pairs.contains(&("interests", "history,museums".to_string())));
        assert!(pairs.contains(&("start_time", "09:00".to_string())));
        assert!(pairs.contains(&("date", "2024-03-15".to_string())));

        let rebuilt = Preferences::from_pairs(pairs).unwrap();
        assert_eq!(rebuilt, prefs);
    }

    #[test]
    fn from_pairs_ignores_unknown_keys() {
        let prefs = Preferences::from_pairs([("colour", "blue"), ("city", "Berlin")]).unwrap();
        assert_eq!(prefs.city.as_deref(), Some("Berlin"));
    }

    #[test]
    fn from_pairs_rejects_bad_values() {
        let err = Preferences::from_pairs([("budget", "lots")]).unwrap_err();
        assert!(matches!(err, PreferenceError::InvalidValue { ref key, .. } if key == "budget"));

        assert!(Preferences::from_pairs([("budget", "-5")]).is_err());
        assert!(Preferences::from_pairs([("start_time", "noon")]).is_err());
        assert!(Preferences::from_pairs([("date", "yesterday")]).is_err());
    }

    #[test]
    fn from_pairs_accepts_empty_interest_list() {
        let prefs = Preferences::from_pairs([("interests", "")]).unwrap();
        assert_eq!(prefs.interests, Some(Vec::new()));
    }
}
