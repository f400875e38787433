//! Great-circle distance helpers.
//!
//! Every distance inside the planning pipeline is a haversine estimate in
//! kilometres; there is no road network. The miles variant exists only for
//! the advisory calculator and is never mixed into the pipeline.

use crate::model::GeoPoint;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth radius in miles, used by the advisory calculator only.
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Calculate haversine distance between two points in kilometers.
///
/// Non-finite coordinates propagate as NaN; callers that compare against a
/// threshold must treat NaN as "out of range".
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    central_angle(from, to) * EARTH_RADIUS_KM
}

/// Calculate haversine distance between two points in miles.
pub fn haversine_miles(from: GeoPoint, to: GeoPoint) -> f64 {
    central_angle(from, to) * EARTH_RADIUS_MILES
}

/// Advisory point-to-point distance in miles, rounded to two decimals.
///
/// Standalone helper for planning assistants; planning itself works in km.
pub fn advisory_distance_miles(from: GeoPoint, to: GeoPoint) -> f64 {
    (haversine_miles(from, to) * 100.0).round() / 100.0
}

fn central_angle(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);

    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Distance in km between two optional points, `None` if either is missing.
pub(crate) fn distance_between(from: Option<GeoPoint>, to: Option<GeoPoint>) -> Option<f64> {
    Some(haversine_km(from?, to?))
}
