//! Load assignment planner.
//!
//! Pairs drivers with equipment, then walks the resulting groups in order,
//! giving each one the best route it can build from the loads still in the
//! pool. Assigned loads leave the pool before the next group is considered.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::chains::ChainOptions;
use crate::combinations::generate_combinations;
use crate::feasibility::feasible_loads;
use crate::model::{Driver, Load, Trailer, Truck};
use crate::pairing::{ResourceGroup, pair_resources};
use crate::route_tree::{NodeOrdering, RouteAnchor, RouteTree, build_route_tree};
use crate::selection::{RouteComparison, SelectionCriteria, compare_routes, select_best_route};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningOptions {
    /// Pairing and pickup radius around a driver, in km.
    pub max_distance_km: f64,
    /// Largest number of loads on one route.
    pub max_loads_per_route: usize,
    /// Candidate routes actually built per group.
    pub max_alternatives: usize,
    pub selection_criteria: SelectionCriteria,
    /// Chain exploration limits for the chronological planner.
    pub chain: ChainOptions,
    /// Stop starting new groups once this instant has passed.
    #[serde(skip)]
    pub deadline: Option<Instant>,
}

impl Default for PlanningOptions {
    fn default() -> Self {
        Self {
            max_distance_km: 400.0,
            max_loads_per_route: 4,
            max_alternatives: 20,
            selection_criteria: SelectionCriteria::HighestFeasibility,
            chain: ChainOptions::default(),
            deadline: None,
        }
    }
}

impl PlanningOptions {
    /// Clamp tunables into their usable range.
    ///
    /// `max_loads_per_route` and `max_alternatives` are at least 1; a negative
    /// or non-finite `max_distance_km` becomes 0.
    pub fn normalized(mut self) -> Self {
        if self.max_loads_per_route < 1 {
            warn!(value = self.max_loads_per_route, "max_loads_per_route clamped to 1");
            self.max_loads_per_route = 1;
        }
        if self.max_alternatives < 1 {
            warn!(value = self.max_alternatives, "max_alternatives clamped to 1");
            self.max_alternatives = 1;
        }
        if !self.max_distance_km.is_finite() || self.max_distance_km < 0.0 {
            warn!(value = self.max_distance_km, "max_distance_km clamped to 0");
            self.max_distance_km = 0.0;
        }
        self.chain = self.chain.normalized();
        self
    }

    pub(crate) fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Criterion used and the raw score of every candidate, keyed by route id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSummary {
    pub criteria_used: SelectionCriteria,
    pub scores: HashMap<String, f64>,
}

/// The route chosen for one resource group, with the runners-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeBasedAssignment {
    pub group: ResourceGroup,
    pub primary_route: RouteTree,
    pub alternative_routes: Vec<RouteTree>,
    pub selection: SelectionSummary,
    pub total_loads_handled: usize,
    pub route_comparison: RouteComparison,
}

impl TreeBasedAssignment {
    /// Ids of the loads this assignment takes out of the pool.
    pub fn assigned_load_ids(&self) -> impl Iterator<Item = &str> {
        self.primary_route.picked_up_load_ids()
    }
}

/// Plan routes for every resource group that can get one.
///
/// Output follows pairing order and only contains groups that received a
/// route. Given the same inputs and options the result is identical, unless
/// `options.deadline` cuts the run short.
#[instrument(skip_all, fields(drivers = drivers.len(), loads = loads.len()))]
pub fn plan_assignments(
    drivers: &[Driver],
    trucks: &[Truck],
    trailers: &[Trailer],
    loads: &[Load],
    options: PlanningOptions,
) -> Vec<TreeBasedAssignment> {
    let options = options.normalized();
    let groups = pair_resources(drivers, trucks, trailers, options.max_distance_km);

    let mut remaining: Vec<&Load> = loads.iter().collect();
    let mut assignments = Vec::new();

    for group in groups {
        if options.deadline_passed() {
            warn!(assigned = assignments.len(), "planning deadline passed, stopping early");
            break;
        }

        let feasible = feasible_loads(&group, &remaining, options.max_distance_km);
        if feasible.is_empty() {
            debug!(driver = %group.driver.id, "no feasible loads");
            continue;
        }
        let Some(home) = RouteAnchor::home(&group.driver) else {
            continue;
        };

        let mut combinations = generate_combinations(&feasible, options.max_loads_per_route);
        combinations.truncate(options.max_alternatives);
        debug!(
            driver = %group.driver.id,
            feasible = feasible.len(),
            candidates = combinations.len(),
            "building candidate routes"
        );

        let trees: Vec<RouteTree> = combinations
            .par_iter()
            .enumerate()
            .map(|(index, subset)| {
                build_route_tree(&group.driver.id, index, &home, subset, NodeOrdering::NearestNeighbor)
            })
            .filter(|tree| tree.is_valid)
            .collect();

        let Some(assignment) = assemble_assignment(group, trees, options.selection_criteria) else {
            continue;
        };
        release_from_pool(&mut remaining, &assignment);
        assignments.push(assignment);
    }

    info!(
        assignments = assignments.len(),
        unassigned_loads = remaining.len(),
        "planning finished"
    );

    assignments
}

/// Select the primary route among `trees` and package the result.
///
/// `None` when there is nothing to choose from.
pub(crate) fn assemble_assignment(
    group: ResourceGroup,
    mut trees: Vec<RouteTree>,
    criteria: SelectionCriteria,
) -> Option<TreeBasedAssignment> {
    let (primary_id, scores) = {
        let selection = select_best_route(&trees, criteria)?;
        (selection.best.id.clone(), selection.scores)
    };
    let route_comparison = compare_routes(&trees)?;
    let primary_index = trees.iter().position(|tree| tree.id == primary_id)?;
    let primary_route = trees.remove(primary_index);
    let total_loads_handled = primary_route.pickup_count();

    info!(
        driver = %group.driver.id,
        route = %primary_route.id,
        loads = total_loads_handled,
        distance_km = primary_route.total_distance_km,
        alternatives = trees.len(),
        "selected primary route"
    );

    Some(TreeBasedAssignment {
        group,
        primary_route,
        alternative_routes: trees,
        selection: SelectionSummary {
            criteria_used: criteria,
            scores,
        },
        total_loads_handled,
        route_comparison,
    })
}

/// Drop every load picked up by `assignment` from the pool, matched by load id.
pub(crate) fn release_from_pool(pool: &mut Vec<&Load>, assignment: &TreeBasedAssignment) {
    let assigned: HashSet<&str> = assignment.assigned_load_ids().collect();
    pool.retain(|load| !assigned.contains(load.id.as_str()));
    debug!(
        driver = %assignment.group.driver.id,
        removed = assigned.len(),
        remaining = pool.len(),
        "removed assigned loads from pool"
    );
}
