//! Domain types for the tour planner.
//!
//! This module contains the value types that represent validated user and
//! catalog input. All types enforce their invariants at construction time,
//! so code that receives these types can trust their validity.

mod cost;
mod error;
mod interest;
mod stop_id;
mod time;
mod user_id;

pub use cost::Cost;
pub use error::DomainError;
pub use interest::Interest;
pub use stop_id::StopId;
pub use time::{format_time_of_day, parse_date, parse_time_of_day, validate_window};
pub use user_id::UserId;
