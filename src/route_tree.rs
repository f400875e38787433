//! Route tree construction for one candidate load subset.
//!
//! A "tree" here is a single materialized path: START, a pickup and a delivery
//! per load, END. Nodes live in an arena (`RouteTree::nodes`) and refer to
//! their neighbours by index; `RouteTree::path` is the visiting order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::haversine::haversine_km;
use crate::hours::{ScheduleError, TripSchedule, trip_schedule};
use crate::model::{Driver, GeoPoint, Load};

/// Service time at a pickup, in minutes.
pub const PICKUP_SERVICE_MINUTES: f64 = 30.0;

/// Service time at a delivery, in minutes.
pub const DELIVERY_SERVICE_MINUTES: f64 = 20.0;

/// Assumed average road speed. At 60 km/h, km and driving minutes coincide.
pub const AVERAGE_SPEED_KMH: f64 = 60.0;

/// Cost per km driven.
pub const COST_PER_KM: f64 = 2.5;

/// Cost per minute of driving.
pub const COST_PER_DRIVING_MINUTE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Start,
    Pickup,
    Delivery,
    End,
}

impl NodeKind {
    pub fn service_minutes(self) -> f64 {
        match self {
            NodeKind::Pickup => PICKUP_SERVICE_MINUTES,
            NodeKind::Delivery => DELIVERY_SERVICE_MINUTES,
            NodeKind::Start | NodeKind::End => 0.0,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::Pickup => "pickup",
            NodeKind::Delivery => "delivery",
            NodeKind::End => "end",
        }
    }
}

/// A stop on a candidate route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteNode {
    /// Unique within its tree; derived from tree index, kind, load and sequence.
    pub id: String,
    /// Originating load, or the anchor id for START/END.
    pub load_id: String,
    pub kind: NodeKind,
    pub location: GeoPoint,
    pub address: String,
    pub service_minutes: f64,
    /// Position along the path, START = 0.
    pub sequence: usize,
    /// Arena index of the previous node on the path.
    pub parent: Option<usize>,
    /// Arena index of the next node on the path.
    pub child: Option<usize>,
}

/// Directed leg between two consecutive nodes (arena indices).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub from: usize,
    pub to: usize,
    pub distance_km: f64,
    pub driving_minutes: f64,
    /// Driving time plus the service time at `from`.
    pub duration_minutes: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTree {
    pub id: String,
    pub nodes: Vec<RouteNode>,
    /// Arena indices in visiting order; `path[0]` is the root.
    pub path: Vec<usize>,
    pub segments: Vec<RouteSegment>,
    pub total_distance_km: f64,
    pub total_duration_minutes: f64,
    pub total_cost: f64,
    /// True iff the route carries at least one load.
    pub is_valid: bool,
    pub feasibility_score: f64,
}

impl RouteTree {
    pub fn root(&self) -> &RouteNode {
        &self.nodes[self.path[0]]
    }

    /// Nodes in visiting order.
    pub fn path_nodes(&self) -> impl Iterator<Item = &RouteNode> {
        self.path.iter().map(|&index| &self.nodes[index])
    }

    pub fn parent_of(&self, node: &RouteNode) -> Option<&RouteNode> {
        node.parent.map(|index| &self.nodes[index])
    }

    pub fn child_of(&self, node: &RouteNode) -> Option<&RouteNode> {
        node.child.map(|index| &self.nodes[index])
    }

    pub fn pickup_count(&self) -> usize {
        self.path_nodes().filter(|node| node.kind == NodeKind::Pickup).count()
    }

    /// Ids of the loads picked up on this route, in visiting order.
    pub fn picked_up_load_ids(&self) -> impl Iterator<Item = &str> {
        self.path_nodes()
            .filter(|node| node.kind == NodeKind::Pickup)
            .map(|node| node.load_id.as_str())
    }

    pub fn last_delivery(&self) -> Option<&RouteNode> {
        self.path_nodes().filter(|node| node.kind == NodeKind::Delivery).last()
    }

    /// Drive legs and mandatory breaks needed to cover this route's distance.
    pub fn trip_schedule(&self, start: DateTime<Utc>, average_speed_kmh: f64) -> Result<TripSchedule, ScheduleError> {
        trip_schedule(start, self.total_distance_km, average_speed_kmh)
    }
}

/// Where a route starts and ends: the driver's home, or wherever the driver
/// currently is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAnchor {
    pub id: String,
    pub label: String,
    pub point: GeoPoint,
}

impl RouteAnchor {
    /// Home base anchor, `None` if the driver is not geocoded.
    pub fn home(driver: &Driver) -> Option<Self> {
        Some(Self {
            id: format!("home_{}", driver.id),
            label: driver.home_base.clone(),
            point: driver.home_coordinates?,
        })
    }
}

/// How the stops between START and END are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeOrdering {
    /// Repeatedly visit the closest unplaced stop. Does not enforce that a
    /// load is picked up before it is delivered.
    NearestNeighbor,
    /// Pickup then delivery for each load, in the order given.
    LoadOrder,
}

/// Build the route for `loads` anchored at `anchor`.
///
/// Ungeocoded load ends fall back to (0, 0).
pub fn build_route_tree(
    owner_id: &str,
    tree_index: usize,
    anchor: &RouteAnchor,
    loads: &[&Load],
    ordering: NodeOrdering,
) -> RouteTree {
    let mut nodes = Vec::with_capacity(loads.len() * 2 + 2);
    nodes.push(anchor_node(anchor, NodeKind::Start));
    for load in loads {
        nodes.push(load_node(load, NodeKind::Pickup));
        nodes.push(load_node(load, NodeKind::Delivery));
    }
    nodes.push(anchor_node(anchor, NodeKind::End));

    let path = match ordering {
        NodeOrdering::NearestNeighbor => nearest_neighbor_order(&nodes),
        NodeOrdering::LoadOrder => (0..nodes.len()).collect(),
    };

    let mut segments = Vec::with_capacity(path.len().saturating_sub(1));
    for (sequence, &index) in path.iter().enumerate() {
        let node = &mut nodes[index];
        node.sequence = sequence;
        node.parent = sequence.checked_sub(1).map(|prev| path[prev]);
        node.child = path.get(sequence + 1).copied();
        node.id = format!("{}:{}:{}:{}", tree_index, node.kind.tag(), node.load_id, sequence);
    }
    for pair in path.windows(2) {
        segments.push(segment(&nodes, pair[0], pair[1]));
    }

    let total_distance_km = segments.iter().map(|s| s.distance_km).sum();
    let total_duration_minutes = segments.iter().map(|s| s.duration_minutes).sum();
    let total_cost = segments.iter().map(|s| s.cost).sum();

    let mut tree = RouteTree {
        id: format!("route_tree_{}_{}", owner_id, tree_index),
        nodes,
        path,
        segments,
        total_distance_km,
        total_duration_minutes,
        total_cost,
        is_valid: false,
        feasibility_score: 0.0,
    };
    let pickups = tree.pickup_count();
    tree.is_valid = pickups > 0;
    tree.feasibility_score = feasibility_score(pickups, total_distance_km, total_duration_minutes);
    tree
}

/// Reward carried loads; penalise (without capping) distance and duration.
pub fn feasibility_score(pickups: usize, total_distance_km: f64, total_duration_minutes: f64) -> f64 {
    pickups as f64 * 100.0
        + (1000.0 - total_distance_km).max(0.0) * 0.5
        + (600.0 - total_duration_minutes).max(0.0) * 0.3
}

fn anchor_node(anchor: &RouteAnchor, kind: NodeKind) -> RouteNode {
    RouteNode {
        id: String::new(),
        load_id: anchor.id.clone(),
        kind,
        location: anchor.point,
        address: anchor.label.clone(),
        service_minutes: kind.service_minutes(),
        sequence: 0,
        parent: None,
        child: None,
    }
}

fn load_node(load: &Load, kind: NodeKind) -> RouteNode {
    let (point, address) = match kind {
        NodeKind::Delivery | NodeKind::End => (load.destination_coordinates, &load.destination),
        NodeKind::Pickup | NodeKind::Start => (load.origin_coordinates, &load.origin),
    };
    RouteNode {
        id: String::new(),
        load_id: load.id.clone(),
        kind,
        location: point.unwrap_or(GeoPoint::new(0.0, 0.0)),
        address: address.clone(),
        service_minutes: kind.service_minutes(),
        sequence: 0,
        parent: None,
        child: None,
    }
}

/// START fixed first and END fixed last; everything in between is visited
/// closest-first. The first remaining node wins ties.
fn nearest_neighbor_order(nodes: &[RouteNode]) -> Vec<usize> {
    let end = nodes.len() - 1;
    let mut remaining: Vec<usize> = (1..end).collect();
    let mut order = Vec::with_capacity(nodes.len());
    let mut current = 0;
    order.push(current);

    while !remaining.is_empty() {
        let mut best = 0;
        let mut best_distance = haversine_km(nodes[current].location, nodes[remaining[0]].location);
        for (position, &candidate) in remaining.iter().enumerate().skip(1) {
            let distance = haversine_km(nodes[current].location, nodes[candidate].location);
            if distance.total_cmp(&best_distance).is_lt() {
                best = position;
                best_distance = distance;
            }
        }
        current = remaining.remove(best);
        order.push(current);
    }

    order.push(end);
    order
}

fn segment(nodes: &[RouteNode], from: usize, to: usize) -> RouteSegment {
    let distance_km = haversine_km(nodes[from].location, nodes[to].location);
    let driving_minutes = distance_km / AVERAGE_SPEED_KMH * 60.0;
    RouteSegment {
        from,
        to,
        distance_km,
        driving_minutes,
        duration_minutes: driving_minutes + nodes[from].service_minutes,
        cost: distance_km * COST_PER_KM + driving_minutes * COST_PER_DRIVING_MINUTE,
    }
}
