//! Resource records supplied by the surrounding dispatch system.
//!
//! The planner only reads these. Coordinates are optional because upstream
//! geocoding is not guaranteed; records without them silently drop out of
//! pairing and feasibility checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::traits::Positioned;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    /// Home base label, e.g. "Los Angeles, CA".
    pub home_base: String,
    pub home_coordinates: Option<GeoPoint>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    pub id: String,
    pub current_location: String,
    pub current_coordinates: Option<GeoPoint>,
    pub capacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trailer {
    pub id: String,
    pub current_location: String,
    pub current_coordinates: Option<GeoPoint>,
    pub capacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub origin_coordinates: Option<GeoPoint>,
    pub destination_coordinates: Option<GeoPoint>,
    pub pick_up_by: Option<DateTime<Utc>>,
    pub due_by: Option<DateTime<Utc>>,
    pub weight: f64,
    pub status: String,
}

impl Load {
    /// True when both ends of the load are geocoded.
    pub fn is_geocoded(&self) -> bool {
        self.origin_coordinates.is_some() && self.destination_coordinates.is_some()
    }
}

impl Positioned for Driver {
    fn id(&self) -> &str {
        &self.id
    }

    fn location_label(&self) -> &str {
        &self.home_base
    }

    fn coordinates(&self) -> Option<GeoPoint> {
        self.home_coordinates
    }
}

impl Positioned for Truck {
    fn id(&self) -> &str {
        &self.id
    }

    fn location_label(&self) -> &str {
        &self.current_location
    }

    fn coordinates(&self) -> Option<GeoPoint> {
        self.current_coordinates
    }
}

impl Positioned for Trailer {
    fn id(&self) -> &str {
        &self.id
    }

    fn location_label(&self) -> &str {
        &self.current_location
    }

    fn coordinates(&self) -> Option<GeoPoint> {
        self.current_coordinates
    }
}
