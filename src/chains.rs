//! Load chains: loads strung together so each pickup is near the previous
//! delivery. Used by the chronological planner.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::haversine::{distance_between, haversine_km};
use crate::model::{GeoPoint, Load};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainOptions {
    /// Most loads in one chain.
    pub max_chain_length: usize,
    /// Starting loads tried per driver, closest first.
    pub max_starting_loads: usize,
    /// Stop exploring new starting loads once this many chains exist.
    pub max_chains: usize,
    /// Expansion budget per starting load.
    pub max_chain_iterations: usize,
    /// Nearest follow-up loads tried when extending a chain.
    pub branching: usize,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            max_chain_length: 6,
            max_starting_loads: 10,
            max_chains: 1000,
            max_chain_iterations: 10_000,
            branching: 2,
        }
    }
}

impl ChainOptions {
    pub(crate) fn normalized(mut self) -> Self {
        self.max_chain_length = self.max_chain_length.max(1);
        self.max_starting_loads = self.max_starting_loads.max(1);
        self.max_chain_iterations = self.max_chain_iterations.max(1);
        self.max_chains = self.max_chains.max(1);
        self.branching = self.branching.max(1);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadChain<'a> {
    pub loads: Vec<&'a Load>,
    /// Empty running distance: each delivery to the next pickup.
    pub deadhead_km: f64,
}

impl LoadChain<'_> {
    /// Longer chains first, then less deadhead.
    pub fn efficiency(&self) -> f64 {
        self.loads.len() as f64 * 1000.0 - self.deadhead_km
    }
}

/// Every chain reachable from `start` by breadth-first extension.
///
/// A chain grows by the `branching` closest unused loads whose origin lies
/// within `max_distance_km` of its last destination. Each visited chain,
/// including the single-load one, is returned.
pub fn build_load_chains<'a>(
    start: &'a Load,
    available: &[&'a Load],
    max_distance_km: f64,
    options: &ChainOptions,
) -> Vec<LoadChain<'a>> {
    let mut chains = Vec::new();
    let mut queue: VecDeque<Vec<&'a Load>> = VecDeque::from([vec![start]]);
    let mut iterations = 0;

    while iterations < options.max_chain_iterations {
        let Some(chain) = queue.pop_front() else {
            break;
        };
        iterations += 1;

        if chain.len() < options.max_chain_length {
            let used: HashSet<&str> = chain.iter().map(|load| load.id.as_str()).collect();
            let last = chain[chain.len() - 1];
            if let Some(from) = last.destination_coordinates {
                for next in next_candidates(from, available, &used, max_distance_km, options.branching) {
                    let mut extended = chain.clone();
                    extended.push(next);
                    queue.push_back(extended);
                }
            }
        }

        chains.push(LoadChain {
            deadhead_km: deadhead_km(&chain),
            loads: chain,
        });
    }

    if !queue.is_empty() {
        warn!(load = %start.id, iterations, "chain building hit iteration limit");
    }

    chains
}

/// Chains for several starting loads, nearest starting load first.
pub fn generate_chains<'a>(
    from: GeoPoint,
    starting: &[&'a Load],
    available: &[&'a Load],
    max_distance_km: f64,
    options: &ChainOptions,
) -> Vec<LoadChain<'a>> {
    let mut ranked: Vec<(&'a Load, f64)> = starting
        .iter()
        .map(|load| {
            let distance = load
                .origin_coordinates
                .map_or(f64::INFINITY, |origin| haversine_km(from, origin));
            (*load, distance)
        })
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut chains = Vec::new();
    for (load, _) in ranked.into_iter().take(options.max_starting_loads) {
        chains.extend(build_load_chains(load, available, max_distance_km, options));
        if chains.len() > options.max_chains {
            debug!(chains = chains.len(), "chain limit reached");
            break;
        }
    }

    chains
}

/// Sort chains best first; equal chains keep their generation order.
pub fn rank_chains(chains: &mut [LoadChain<'_>]) {
    chains.sort_by(|a, b| b.efficiency().total_cmp(&a.efficiency()));
}

fn next_candidates<'a>(
    from: GeoPoint,
    available: &[&'a Load],
    used: &HashSet<&str>,
    max_distance_km: f64,
    branching: usize,
) -> Vec<&'a Load> {
    let mut candidates: Vec<(&'a Load, f64)> = available
        .iter()
        .filter(|load| !used.contains(load.id.as_str()))
        .filter_map(|load| {
            let distance = haversine_km(from, load.origin_coordinates?);
            (distance <= max_distance_km).then_some((*load, distance))
        })
        .collect();
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
    candidates.into_iter().take(branching).map(|(load, _)| load).collect()
}

fn deadhead_km(chain: &[&Load]) -> f64 {
    chain
        .windows(2)
        .filter_map(|pair| distance_between(pair[0].destination_coordinates, pair[1].origin_coordinates))
        .sum()
}
