//! Plated
//!
//! Plated is a recipe and menu costing engine for restaurant back offices: it rolls
//! supplier delivery prices up through ingredients, nested recipes and dishes.

pub mod catalog;
pub mod costing;
pub mod fixtures;
pub mod prelude;
pub mod report;
pub mod units;
pub mod utils;
