//! One-day tour planner server.
//!
//! A web application that answers: "I have a day in this city, these
//! interests and this much money. Where should I go?"

pub mod catalog;
pub mod config;
pub mod domain;
pub mod itinerary;
pub mod optimizer;
pub mod preferences;
pub mod web;
