//! Nearest-facility search: route to every instance of a category and keep the cheapest.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::FloorPoint;
use crate::graph::{Graph, NodeId};
use crate::locate::nearest_node;
use crate::path::{find_route, RouteResult};

/// Facility categories mapped to the room-name prefixes that belong to them.
///
/// Membership is declared by the building data; the router never guesses it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityCatalog {
    categories: BTreeMap<String, Vec<String>>,
}

impl FacilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category, or extend an existing one, with a name prefix.
    pub fn with_prefix(mut self, category: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.categories
            .entry(category.into())
            .or_default()
            .push(prefix.into());
        self
    }

    /// Look up a category, ignoring ASCII case.
    pub fn prefixes(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(category))
            .map(|(_, prefixes)| prefixes.as_slice())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// True when `name` belongs to any category.
    pub fn is_facility(&self, name: &str) -> bool {
        self.categories
            .values()
            .flatten()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// One candidate destination of a facility search.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityInstance<T> {
    pub location: FloorPoint,
    pub anchor: T,
}

/// Cheapest reachable facility instance.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityMatch<T> {
    pub route: RouteResult,
    pub anchor: T,
    /// Graph node the facility door was anchored to.
    pub node: NodeId,
}

/// Route from `start` to every instance and return the cheapest route found.
///
/// Instances on floors without graph nodes, and instances that cannot be
/// reached, are skipped. Ties keep the earlier instance.
pub fn route_to_nearest_facility<T, I>(
    graph: &Graph,
    start: NodeId,
    instances: I,
) -> Result<Option<FacilityMatch<T>>>
where
    I: IntoIterator<Item = FacilityInstance<T>>,
{
    let mut best: Option<FacilityMatch<T>> = None;

    for instance in instances {
        let location = instance.location;
        let Some(target) = nearest_node(graph, location.point, location.floor) else {
            warn!(
                floor = location.floor,
                "no graph node near facility; skipping instance"
            );
            continue;
        };
        let target = target.id;

        let Some(route) = find_route(graph, start, target)? else {
            debug!(start, target, "facility instance unreachable");
            continue;
        };

        let improves = best
            .as_ref()
            .map_or(true, |current| route.cost < current.route.cost);
        if improves {
            debug!(target, cost = route.cost, "new nearest facility");
            best = Some(FacilityMatch {
                route,
                anchor: instance.anchor,
                node: target,
            });
        }
    }

    Ok(best)
}
