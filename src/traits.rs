//! Core domain traits for the load planner.
//!
//! Kept deliberately small: pairing and feasibility only need to know where a
//! record is and what its location is called.

use crate::haversine::haversine_km;
use crate::model::GeoPoint;

/// Something with an identifier and a (possibly un-geocoded) position.
pub trait Positioned {
    fn id(&self) -> &str;

    /// Human-readable location label, compared verbatim.
    fn location_label(&self) -> &str;

    /// Location coordinates, if geocoded.
    fn coordinates(&self) -> Option<GeoPoint>;

    /// Distance in km to another record.
    ///
    /// Zero when both labels match (even without coordinates), `None` when
    /// either side lacks coordinates and the labels differ. Empty labels never
    /// match.
    fn distance_to<O: Positioned + ?Sized>(&self, other: &O) -> Option<f64> {
        if labels_match(self.location_label(), other.location_label()) {
            return Some(0.0);
        }
        Some(haversine_km(self.coordinates()?, other.coordinates()?))
    }
}

/// Exact label comparison, ignoring blank labels.
pub(crate) fn labels_match(a: &str, b: &str) -> bool {
    !a.is_empty() && a == b
}
