//! Which loads a resource group can reasonably pick up.

use crate::haversine::haversine_km;
use crate::model::{GeoPoint, Load};
use crate::pairing::ResourceGroup;
use crate::traits::labels_match;

/// Loads from `pool` whose origin is within range of the group's driver home.
///
/// A load qualifies when its origin is within `max_distance_km` of the home
/// coordinates or its origin label equals the home base label. Loads that are
/// not fully geocoded never qualify, and neither does anything for a driver
/// without home coordinates. Pool order is preserved.
pub fn feasible_loads<'a>(group: &ResourceGroup, pool: &[&'a Load], max_distance_km: f64) -> Vec<&'a Load> {
    let Some(home) = group.driver.home_coordinates else {
        return Vec::new();
    };
    pool.iter()
        .copied()
        .filter(|load| {
            load.is_geocoded()
                && (labels_match(&load.origin, &group.driver.home_base) || origin_within(home, load, max_distance_km))
        })
        .collect()
}

/// Fully geocoded loads whose origin is within `max_distance_km` of `anchor`.
///
/// Labels play no part here. Pool order is preserved.
pub(crate) fn loads_within<'a>(anchor: GeoPoint, pool: &[&'a Load], max_distance_km: f64) -> Vec<&'a Load> {
    pool.iter()
        .copied()
        .filter(|load| load.is_geocoded() && origin_within(anchor, load, max_distance_km))
        .collect()
}

fn origin_within(anchor: GeoPoint, load: &Load, max_distance_km: f64) -> bool {
    load.origin_coordinates
        .is_some_and(|origin| haversine_km(anchor, origin) <= max_distance_km)
}
