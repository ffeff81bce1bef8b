//! Web layer for the tour planner.
//!
//! Provides HTTP endpoints for saving preferences and generating itineraries.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
