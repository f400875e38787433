//! Scoring and picking among candidate routes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::route_tree::RouteTree;

/// What "best" means when choosing a primary route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionCriteria {
    ShortestDistance,
    ShortestTime,
    LowestCost,
    #[default]
    HighestFeasibility,
    HighestLoadCount,
}

impl SelectionCriteria {
    /// Score where higher is always better; minimising metrics are negated.
    pub fn score(self, tree: &RouteTree) -> f64 {
        match self {
            SelectionCriteria::ShortestDistance => -tree.total_distance_km,
            SelectionCriteria::ShortestTime => -tree.total_duration_minutes,
            SelectionCriteria::LowestCost => -tree.total_cost,
            SelectionCriteria::HighestFeasibility => tree.feasibility_score,
            SelectionCriteria::HighestLoadCount => tree.pickup_count() as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMetric {
    pub route_id: String,
    pub value: f64,
}

/// Per-metric winners across all candidates of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteComparison {
    pub best_distance: RouteMetric,
    pub best_time: RouteMetric,
    pub best_cost: RouteMetric,
    pub most_loads: RouteMetric,
}

#[derive(Debug)]
pub struct Selection<'a> {
    pub best: &'a RouteTree,
    /// Raw score for every candidate, keyed by tree id.
    pub scores: HashMap<String, f64>,
}

/// The highest-scoring tree under `criteria`; the earliest wins ties.
///
/// Returns `None` for an empty candidate list.
pub fn select_best_route(trees: &[RouteTree], criteria: SelectionCriteria) -> Option<Selection<'_>> {
    let mut scores = HashMap::with_capacity(trees.len());
    let mut best: Option<(&RouteTree, f64)> = None;

    for tree in trees {
        let score = criteria.score(tree);
        scores.insert(tree.id.clone(), score);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((tree, score));
        }
    }

    best.map(|(best, _)| Selection { best, scores })
}

/// Minimum distance, duration and cost, and maximum load count, each reported
/// independently of which route gets selected.
pub fn compare_routes(trees: &[RouteTree]) -> Option<RouteComparison> {
    let first = trees.first()?;
    let metric = |tree: &RouteTree, value: f64| RouteMetric {
        route_id: tree.id.clone(),
        value,
    };

    let mut comparison = RouteComparison {
        best_distance: metric(first, first.total_distance_km),
        best_time: metric(first, first.total_duration_minutes),
        best_cost: metric(first, first.total_cost),
        most_loads: metric(first, first.pickup_count() as f64),
    };

    for tree in &trees[1..] {
        if tree.total_distance_km < comparison.best_distance.value {
            comparison.best_distance = metric(tree, tree.total_distance_km);
        }
        if tree.total_duration_minutes < comparison.best_time.value {
            comparison.best_time = metric(tree, tree.total_duration_minutes);
        }
        if tree.total_cost < comparison.best_cost.value {
            comparison.best_cost = metric(tree, tree.total_cost);
        }
        let loads = tree.pickup_count() as f64;
        if loads > comparison.most_loads.value {
            comparison.most_loads = metric(tree, loads);
        }
    }

    Some(comparison)
}
