//! Date-ordered planning.
//!
//! Loads are bucketed by calendar day and handed out day by day. Each
//! resource group keeps a current position: after a route is assigned the
//! driver is considered to be at its last delivery, and the next route for
//! that driver starts (and ends) there.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::chains::{generate_chains, rank_chains};
use crate::feasibility::loads_within;
use crate::model::{Driver, Load, Trailer, Truck};
use crate::pairing::{ResourceGroup, pair_resources};
use crate::planner::{PlanningOptions, TreeBasedAssignment, assemble_assignment, release_from_pool};
use crate::route_tree::{NodeOrdering, RouteAnchor, RouteTree, build_route_tree};

/// Which load timestamp drives the day buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateField {
    #[default]
    PickUpBy,
    DueBy,
}

impl DateField {
    pub fn of(self, load: &Load) -> Option<DateTime<Utc>> {
        match self {
            DateField::PickUpBy => load.pick_up_by,
            DateField::DueBy => load.due_by,
        }
    }

    fn day_of(self, load: &Load) -> Option<NaiveDate> {
        self.of(load).map(|timestamp| timestamp.date_naive())
    }
}

struct DriverState {
    group: ResourceGroup,
    position: RouteAnchor,
    routes: usize,
}

/// Plan day by day, moving each driver along as routes are assigned.
///
/// Loads without the chosen date are left out. Groups whose driver has no
/// home coordinates cannot be tracked and are skipped.
#[instrument(skip_all, fields(drivers = drivers.len(), loads = loads.len(), date_field = ?date_field))]
pub fn plan_chronological_assignments(
    drivers: &[Driver],
    trucks: &[Truck],
    trailers: &[Trailer],
    loads: &[Load],
    options: PlanningOptions,
    date_field: DateField,
) -> Vec<TreeBasedAssignment> {
    let options = options.normalized();
    let mut states: Vec<DriverState> = pair_resources(drivers, trucks, trailers, options.max_distance_km)
        .into_iter()
        .filter_map(|group| {
            let Some(position) = RouteAnchor::home(&group.driver) else {
                warn!(driver = %group.driver.id, "driver has no home coordinates, skipping");
                return None;
            };
            Some(DriverState { group, position, routes: 0 })
        })
        .collect();

    let buckets = bucket_by_day(loads, date_field);
    let mut available: Vec<&Load> = buckets.values().flatten().copied().collect();
    let mut assignments = Vec::new();
    info!(days = buckets.len(), "processing loads in date order");

    'days: for (day, day_loads) in &buckets {
        debug!(%day, loads = day_loads.len(), "processing day");

        for state in states.iter_mut() {
            if options.deadline_passed() {
                warn!(assigned = assignments.len(), "planning deadline passed, stopping early");
                break 'days;
            }

            let open_today: Vec<&Load> = day_loads
                .iter()
                .copied()
                .filter(|load| is_available(&available, load))
                .collect();
            if open_today.is_empty() {
                debug!(%day, "all loads for day assigned");
                break;
            }

            let starting = loads_within(state.position.point, &open_today, options.max_distance_km);
            if starting.is_empty() {
                debug!(driver = %state.group.driver.id, position = %state.position.label, "no feasible loads");
                continue;
            }

            let chain_pool: Vec<&Load> = available
                .iter()
                .copied()
                .filter(|load| load.is_geocoded() && date_field.day_of(load).is_some_and(|d| d >= *day))
                .collect();

            let trees = routes_for_day(state, *day, &starting, &chain_pool, &options);
            let Some(assignment) = assemble_assignment(state.group.clone(), trees, options.selection_criteria)
            else {
                continue;
            };

            release_from_pool(&mut available, &assignment);
            state.routes += 1;
            if let Some(last) = assignment.primary_route.last_delivery() {
                state.position = RouteAnchor {
                    id: format!("current_{}_{}", state.group.driver.id, state.routes),
                    label: last.address.clone(),
                    point: last.location,
                };
                debug!(driver = %state.group.driver.id, position = %state.position.label, "driver moved");
            }
            assignments.push(assignment);
        }
    }

    info!(
        assignments = assignments.len(),
        unassigned_loads = available.len(),
        "chronological planning finished"
    );

    assignments
}

fn routes_for_day(
    state: &DriverState,
    day: NaiveDate,
    starting: &[&Load],
    chain_pool: &[&Load],
    options: &PlanningOptions,
) -> Vec<RouteTree> {
    let mut chains = generate_chains(
        state.position.point,
        starting,
        chain_pool,
        options.max_distance_km,
        &options.chain,
    );
    rank_chains(&mut chains);
    debug!(driver = %state.group.driver.id, chains = chains.len(), "generated load chains");

    let owner = format!("{}_{}", state.group.driver.id, day);
    chains
        .iter()
        .take(options.max_alternatives)
        .enumerate()
        .map(|(index, chain)| build_route_tree(&owner, index, &state.position, &chain.loads, NodeOrdering::LoadOrder))
        .filter(|tree| tree.is_valid)
        .collect()
}

fn bucket_by_day(loads: &[Load], date_field: DateField) -> BTreeMap<NaiveDate, Vec<&Load>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&Load>> = BTreeMap::new();
    for load in loads {
        match date_field.day_of(load) {
            Some(day) => buckets.entry(day).or_default().push(load),
            None => warn!(load = %load.id, ?date_field, "skipping load without date"),
        }
    }
    buckets
}

fn is_available(pool: &[&Load], load: &Load) -> bool {
    pool.iter().any(|candidate| candidate.id == load.id)
}
