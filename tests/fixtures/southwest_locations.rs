//! US Southwest locations for realistic planning fixtures.
//!
//! City-centre coordinates rounded to two decimals, freight yards to four.

use load_planner::model::GeoPoint;

/// A named location with coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

// ============================================================================
// Cities (home bases and load ends)
// ============================================================================

pub const LOS_ANGELES: Location = Location::new("Los Angeles, CA", 34.05, -118.24);
pub const LONG_BEACH: Location = Location::new("Long Beach, CA", 33.77, -118.19);
pub const ONTARIO: Location = Location::new("Ontario, CA", 34.06, -117.65);
pub const BAKERSFIELD: Location = Location::new("Bakersfield, CA", 35.37, -119.02);
pub const FRESNO: Location = Location::new("Fresno, CA", 36.74, -119.79);
pub const SAN_DIEGO: Location = Location::new("San Diego, CA", 32.72, -117.16);
pub const BARSTOW: Location = Location::new("Barstow, CA", 34.90, -117.02);
pub const LAS_VEGAS: Location = Location::new("Las Vegas, NV", 36.17, -115.14);
pub const PHOENIX: Location = Location::new("Phoenix, AZ", 33.45, -112.07);
pub const TUCSON: Location = Location::new("Tucson, AZ", 32.22, -110.97);
pub const FLAGSTAFF: Location = Location::new("Flagstaff, AZ", 35.20, -111.65);
pub const ALBUQUERQUE: Location = Location::new("Albuquerque, NM", 35.08, -106.65);
pub const SALT_LAKE_CITY: Location = Location::new("Salt Lake City, UT", 40.76, -111.89);

/// 100 km due north of Los Angeles (0.8993 degrees of latitude).
pub const NORTH_OF_LOS_ANGELES: Location = Location::new("Santa Clarita area", 34.9493, -118.24);

// ============================================================================
// Freight yards
// ============================================================================

pub const YARDS: &[Location] = &[
    Location::new("Vernon Rail Yard", 33.9975, -118.2198),
    Location::new("Port of Long Beach Pier T", 33.7545, -118.2394),
    Location::new("Ontario Distribution Park", 34.0531, -117.5998),
    Location::new("Phoenix Sky Harbor Cargo", 33.4281, -111.9990),
    Location::new("North Las Vegas Logistics", 36.2441, -115.1173),
];
