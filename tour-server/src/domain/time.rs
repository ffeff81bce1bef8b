//! Time-of-day and date parsing for the planning window.
//!
//! User input arrives in whatever shape the form sends: "09:00", "9:00 AM",
//! "6:00pm". Everything is normalised to [`NaiveTime`] here and formatted
//! back as 24-hour "HH:MM".

use chrono::{NaiveDate, NaiveTime};

use super::DomainError;

/// Formats accepted for a time of day, tried in order.
const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"];

/// Parse a time of day.
///
/// Accepts 24-hour "HH:MM" (optionally with seconds) and 12-hour
/// "H:MM AM/PM" forms, case-insensitively.
///
/// # Examples
///
/// ```
/// use tour_server::domain::{format_time_of_day, parse_time_of_day};
///
/// let t = parse_time_of_day("6:00 PM").unwrap();
/// assert_eq!(format_time_of_day(t), "18:00");
///
/// assert!(parse_time_of_day("25:00").is_err());
/// ```
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime, DomainError> {
    let trimmed = s.trim();
    let upper = trimmed.to_uppercase();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&upper, fmt).ok())
        .ok_or_else(|| DomainError::InvalidTimeOfDay(trimmed.to_string()))
}

/// Format a time of day as 24-hour "HH:MM".
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parse an ISO "YYYY-MM-DD" date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DomainError> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(trimmed.to_string()))
}

/// Check that `end` is strictly after `start`.
pub fn validate_window(start: NaiveTime, end: NaiveTime) -> Result<(), DomainError> {
    if end <= start {
        return Err(DomainError::InvalidTimeWindow {
            start: format_time_of_day(start),
            end: format_time_of_day(end),
        });
    }
    Ok(())
}
