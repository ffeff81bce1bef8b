//! Validated itinerary requests.

use chrono::{NaiveDate, NaiveTime};

use super::ItineraryError;
use crate::domain::{Cost, Interest, UserId, validate_window};
use crate::preferences::Preferences;

/// How stops are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Interest filter, then greedy budget admission in catalog order.
    #[default]
    Filter,
    /// Interest filter, then the travel-cost optimizer.
    Optimize,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Filter => "filter",
            Mode::Optimize => "optimize",
        }
    }
}

/// Everything needed to generate one itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryRequest {
    pub user_id: UserId,
    pub city: String,
    pub date: Option<NaiveDate>,

    /// When the day starts. Defaults to 09:00.
    pub start_time: NaiveTime,

    /// Latest time a visit may end. No limit when absent.
    pub end_time: Option<NaiveTime>,

    pub interests: Vec<Interest>,

    /// Ceiling on total visit cost. Unlimited when absent.
    pub budget: Option<Cost>,

    pub starting_point: Option<String>,
}

impl ItineraryRequest {
    /// Build a request from fully merged preferences.
    ///
    /// City and interests are required. The time window, if both ends are
    /// given, must be non-empty.
    pub fn from_preferences(
        user_id: UserId,
        preferences: Preferences,
    ) -> Result<Self, ItineraryError> {
        let city = preferences
            .city
            .filter(|c| !c.trim().is_empty())
            .ok_or(ItineraryError::MissingField("city"))?;
        let interests = preferences
            .interests
            .ok_or(ItineraryError::MissingField("interests"))?;

        let start_time = preferences.start_time.unwrap_or_else(default_start);
        if let Some(end) = preferences.end_time {
            validate_window(start_time, end)?;
        }

        Ok(Self {
            user_id,
            city,
            date: preferences.date,
            start_time,
            end_time: preferences.end_time,
            interests,
            budget: preferences.budget,
            starting_point: preferences.starting_point,
        })
    }

    /// The budget, with "absent" mapped to no limit.
    pub fn effective_budget(&self) -> Cost {
        self.budget.unwrap_or(Cost::MAX)
    }
}

fn default_start() -> NaiveTime {
    NaiveTime::default() + chrono::Duration::hours(9)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::parse("user123").unwrap()
    }

    fn base() -> Preferences {
        Preferences {
            city: Some("Berlin".into()),
            interests: Some(vec![Interest::parse("history").unwrap()]),
            ..Default::default()
        }
    }

    #[test]
    fn defaults() {
        let req = ItineraryRequest::from_preferences(user(), base()).unwrap();
        assert_eq!(req.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(req.end_time, None);
        assert_eq!(req.effective_budget(), Cost::MAX);
    }

    #[test]
    fn missing_city_or_interests() {
        let prefs = Preferences {
            city: None,
            ..base()
        };
        assert_eq!(
            ItineraryRequest::from_preferences(user(), prefs),
            Err(ItineraryError::MissingField("city"))
        );

        let prefs = Preferences {
            city: Some("  ".into()),
            ..base()
        };
        assert!(ItineraryRequest::from_preferences(user(), prefs).is_err());

        let prefs = Preferences {
            interests: None,
            ..base()
        };
        assert_eq!(
            ItineraryRequest::from_preferences(user(), prefs),
            Err(ItineraryError::MissingField("interests"))
        );
    }

    #[test]
    fn empty_window_rejected() {
        let prefs = Preferences {
            start_time: NaiveTime::from_hms_opt(18, 0, 0),
            end_time: NaiveTime::from_hms_opt(9, 0, 0),
            ..base()
        };
        assert!(matches!(
            ItineraryRequest::from_preferences(user(), prefs),
            Err(ItineraryError::Invalid(_))
        ));
    }

    #[test]
    fn end_before_default_start_rejected() {
        let prefs = Preferences {
            end_time: NaiveTime::from_hms_opt(8, 0, 0),
            ..base()
        };
        assert!(ItineraryRequest::from_preferences(user(), prefs).is_err());
    }
}
