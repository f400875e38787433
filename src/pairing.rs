//! Greedy driver/truck/trailer pairing.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::{Driver, Trailer, Truck};
use crate::traits::Positioned;

/// One driver with the truck and trailer they will run with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceGroup {
    pub driver: Driver,
    pub truck: Truck,
    pub trailer: Trailer,
}

/// Pair each driver, in input order, with the nearest unused truck and the
/// nearest unused trailer within `max_distance_km` of their home base.
///
/// Drivers for whom either a truck or a trailer cannot be found are left out;
/// nothing is reserved for them. This is first-come-first-served and can
/// starve a later driver of a closer truck.
pub fn pair_resources(
    drivers: &[Driver],
    trucks: &[Truck],
    trailers: &[Trailer],
    max_distance_km: f64,
) -> Vec<ResourceGroup> {
    let mut groups = Vec::new();
    let mut used_trucks: HashSet<&str> = HashSet::new();
    let mut used_trailers: HashSet<&str> = HashSet::new();

    for driver in drivers {
        let Some(truck) = nearest_available(driver, trucks, &used_trucks, max_distance_km) else {
            debug!(driver = %driver.id, "no truck within range");
            continue;
        };
        let Some(trailer) = nearest_available(driver, trailers, &used_trailers, max_distance_km) else {
            debug!(driver = %driver.id, truck = %truck.id, "no trailer within range");
            continue;
        };

        used_trucks.insert(&truck.id);
        used_trailers.insert(&trailer.id);
        groups.push(ResourceGroup {
            driver: driver.clone(),
            truck: truck.clone(),
            trailer: trailer.clone(),
        });
    }

    info!(
        drivers = drivers.len(),
        groups = groups.len(),
        "paired drivers with equipment"
    );

    groups
}

/// Closest unused candidate within range; the first one wins on ties.
fn nearest_available<'a, E: Positioned>(
    driver: &Driver,
    candidates: &'a [E],
    used: &HashSet<&str>,
    max_distance_km: f64,
) -> Option<&'a E> {
    let mut best: Option<(&'a E, f64)> = None;

    for candidate in candidates {
        if used.contains(candidate.id()) {
            continue;
        }
        let Some(distance) = driver.distance_to(candidate) else {
            continue;
        };
        // NaN never qualifies.
        if !(distance <= max_distance_km) {
            continue;
        }
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((candidate, distance));
        }
    }

    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GeoPoint;

    fn driver(id: &str, lat: f64, lng: f64) -> Driver {
        Driver {
            id: id.to_string(),
            home_base: format!("home-{id}"),
            home_coordinates: Some(GeoPoint::new(lat, lng)),
            status: "available".to_string(),
        }
    }

    fn truck(id: &str, lat: f64, lng: f64) -> Truck {
        Truck {
            id: id.to_string(),
            current_location: format!("yard-{id}"),
            current_coordinates: Some(GeoPoint::new(lat, lng)),
            capacity: 40_000.0,
        }
    }

    fn trailer(id: &str, lat: f64, lng: f64) -> Trailer {
        Trailer {
            id: id.to_string(),
            current_location: format!("yard-{id}"),
            current_coordinates: Some(GeoPoint::new(lat, lng)),
            capacity: 45_000.0,
        }
    }

    #[test]
    fn test_picks_nearest_truck_and_trailer() {
        let drivers = vec![driver("d1", 34.0, -118.0)];
        let trucks = vec![truck("far", 34.5, -118.0), truck("near", 34.1, -118.0)];
        let trailers = vec![trailer("near", 34.05, -118.0), trailer("far", 34.9, -118.0)];

        let groups = pair_resources(&drivers, &trucks, &trailers, 200.0);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].truck.id, "near");
        assert_eq!(groups[0].trailer.id, "near");
    }

    #[test]
    fn test_greedy_order_starves_later_driver() {
        // d1 takes the only truck even though d2 is right next to it.
        let drivers = vec![driver("d1", 34.0, -118.0), driver("d2", 34.2, -118.0)];
        let trucks = vec![truck("t1", 34.2, -118.0)];
        let trailers = vec![trailer("r1", 34.1, -118.0), trailer("r2", 34.1, -118.0)];

        let groups = pair_resources(&drivers, &trucks, &trailers, 100.0);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].driver.id, "d1");
    }

    #[test]
    fn test_driver_without_trailer_does_not_consume_truck() {
        let drivers = vec![driver("d1", 10.0, 10.0), driver("d2", 34.0, -118.0)];
        let trucks = vec![truck("t1", 10.0, 10.0), truck("t2", 34.0, -118.0)];
        let trailers = vec![trailer("r1", 34.0, -118.0)];

        let groups = pair_resources(&drivers, &trucks, &trailers, 50.0);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].driver.id, "d2");
        assert_eq!(groups[0].truck.id, "t2");
    }

    #[test]
    fn test_label_match_pairs_without_coordinates() {
        let mut d = driver("d1", 0.0, 0.0);
        d.home_coordinates = None;
        d.home_base = "Fresno, CA".to_string();
        let mut t = truck("t1", 0.0, 0.0);
        t.current_coordinates = None;
        t.current_location = "Fresno, CA".to_string();
        let mut r = trailer("r1", 0.0, 0.0);
        r.current_coordinates = None;
        r.current_location = "Fresno, CA".to_string();

        let groups = pair_resources(&[d], &[t], &[r], 10.0);
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn test_out_of_range_equipment_is_ignored() {
        let drivers = vec![driver("d1", 34.0, -118.0)];
        let trucks = vec![truck("t1", 40.0, -118.0)];
        let trailers = vec![trailer("r1", 34.0, -118.0)];

        assert!(pair_resources(&drivers, &trucks, &trailers, 100.0).is_empty());
    }

    #[test]
    fn test_tie_goes_to_first_candidate() {
        let drivers = vec![driver("d1", 34.0, -118.0)];
        let trucks = vec![truck("first", 34.1, -118.0), truck("second", 34.1, -118.0)];
        let trailers = vec![trailer("r1", 34.0, -118.0)];

        let groups = pair_resources(&drivers, &trucks, &trailers, 100.0);
        assert_eq!(groups[0].truck.id, "first");
    }
}
