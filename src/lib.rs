//! load-planner core
//!
//! Assigns freight loads to driver/truck/trailer groups and builds a costed
//! route per group. Pure in-memory computation: no I/O, no persistence.

pub mod traits;
pub mod model;
pub mod haversine;
pub mod pairing;
pub mod feasibility;
pub mod combinations;
pub mod route_tree;
pub mod selection;
pub mod planner;
pub mod chains;
pub mod chronological;
pub mod hours;
