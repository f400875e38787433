//! Candidate load subsets for a single resource group.
//!
//! Every feasible load is tried on its own. Multi-load candidates come from a
//! cheap proximity heuristic: sort by destination latitude and slide a window
//! over the sorted list, so loads ending up in the same band travel together.
//! Longitude is ignored.

use tracing::debug;

use crate::model::Load;

/// Largest multi-load combination size, regardless of the route cap.
pub const MAX_COMBINATION_SIZE: usize = 4;

/// Windows generated per combination size before truncation.
pub const MAX_GENERATED_PER_SIZE: usize = 300;

/// Windows kept per combination size.
pub const MAX_KEPT_PER_SIZE: usize = 200;

/// Singletons first (in input order), then windows of size 2, 3 and 4.
///
/// `max_loads_per_route` below 1 is treated as 1.
pub fn generate_combinations<'a>(loads: &[&'a Load], max_loads_per_route: usize) -> Vec<Vec<&'a Load>> {
    let mut combinations: Vec<Vec<&'a Load>> = loads.iter().map(|load| vec![*load]).collect();

    let largest = max_loads_per_route.max(1).min(MAX_COMBINATION_SIZE);
    if largest < 2 || loads.len() < 2 {
        return combinations;
    }

    let sorted = sort_by_destination_latitude(loads);
    for size in 2..=largest {
        let mut windows = smart_combinations(&sorted, size);
        windows.truncate(MAX_KEPT_PER_SIZE);
        debug!(size, count = windows.len(), "generated load combinations");
        combinations.extend(windows);
    }

    combinations
}

/// Consecutive windows of `size` over `sorted`, at most
/// [`MAX_GENERATED_PER_SIZE`] of them.
fn smart_combinations<'a>(sorted: &[&'a Load], size: usize) -> Vec<Vec<&'a Load>> {
    if size == 0 || sorted.len() < size {
        return Vec::new();
    }
    sorted
        .windows(size)
        .take(MAX_GENERATED_PER_SIZE)
        .map(|window| window.to_vec())
        .collect()
}

/// Stable sort on destination latitude; ungeocoded destinations sort as 0.0.
fn sort_by_destination_latitude<'a>(loads: &[&'a Load]) -> Vec<&'a Load> {
    let mut sorted = loads.to_vec();
    sorted.sort_by(|a, b| destination_latitude(a).total_cmp(&destination_latitude(b)));
    sorted
}

fn destination_latitude(load: &Load) -> f64 {
    load.destination_coordinates.map_or(0.0, |point| point.lat)
}
