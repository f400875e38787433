//! Test fixtures for load-planner.
//!
//! Provides realistic test data including:
//! - Real US Southwest city and freight-yard locations
//! - Builders for drivers, trucks, trailers and loads

pub mod builders;
pub mod southwest_locations;

pub use builders::*;
pub use southwest_locations::*;
