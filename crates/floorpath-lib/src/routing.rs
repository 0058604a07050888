//! Route planning between rooms of a loaded building.
//!
//! This module provides:
//! - [`Destination`] - a named room or the nearest room of a facility category
//! - [`RouteRequest`] - high-level route planning request
//! - [`RoutePlan`] - planned route result, including per-floor polylines
//! - [`plan_route`] - main entry point for computing routes
//!
//! # Example
//!
//! ```ignore
//! use floorpath_lib::{load_building, plan_route, RouteRequest};
//!
//! let building = load_building("path/to/building".as_ref())?;
//! let graph = building.build_graph();
//! let request = RouteRequest::to_facility("1-d12", "restroom");
//! let plan = plan_route(&building, &graph, &request)?;
//! println!("Route: {} hops over {} floors", plan.hop_count(), plan.floors_visited().len());
//! ```

use serde::Serialize;
use tracing::debug;

use crate::building::Building;
use crate::error::{Error, Result};
use crate::facility::route_to_nearest_facility;
use crate::floor::RoomAnchor;
use crate::geometry::FloorNumber;
use crate::graph::{Graph, NodeId};
use crate::locate::nearest_node;
use crate::path::find_route;
use crate::segment::{segment_path, PathSegmentMap};

/// Where a route should end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// A room key (`{floor}-{id}`) or display name.
    Room(String),
    /// The cheapest-to-reach room of a facility category.
    NearestFacility(String),
}

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub start: String,
    pub destination: Destination,
}

impl RouteRequest {
    pub fn to_room(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            destination: Destination::Room(goal.into()),
        }
    }

    pub fn to_facility(start: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            destination: Destination::NearestFacility(category.into()),
        }
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub start: RoomAnchor,
    pub goal: RoomAnchor,
    /// Facility category searched, for nearest-facility requests.
    pub facility: Option<String>,
    pub steps: Vec<NodeId>,
    pub cost: f64,
    pub floor_changes: usize,
    pub segments: PathSegmentMap,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Floors the route passes through, by first visit.
    pub fn floors_visited(&self) -> &[FloorNumber] {
        self.segments.floors()
    }
}

/// Plan a route according to the provided request.
pub fn plan_route(building: &Building, graph: &Graph, request: &RouteRequest) -> Result<RoutePlan> {
    let start = building.resolve_room(&request.start)?;
    let start_node = anchor_node(graph, start)?;

    let (goal, steps, cost, facility) = match &request.destination {
        Destination::Room(name) => {
            let goal = building.resolve_room(name)?;
            if goal.key == start.key {
                return Err(Error::SameEndpoints {
                    room: start.key.to_string(),
                });
            }
            let goal_node = anchor_node(graph, goal)?;
            let route = find_route(graph, start_node, goal_node)?.ok_or_else(|| {
                Error::RouteNotFound {
                    start: start.name.clone(),
                    goal: goal.name.clone(),
                }
            })?;
            (goal.clone(), route.steps, route.cost, None)
        }
        Destination::NearestFacility(category) => {
            let instances = building.facility_instances(category)?;
            debug!(category = %category, candidates = instances.len(), "searching facilities");
            let found = route_to_nearest_facility(graph, start_node, instances)?.ok_or_else(
                || Error::NoFacilityRoute {
                    category: category.clone(),
                },
            )?;
            (
                found.anchor,
                found.route.steps,
                found.route.cost,
                Some(category.clone()),
            )
        }
    };

    let floor_changes = count_floor_changes(graph, &steps)?;
    let segments = segment_path(graph, &steps, start.floor_point(), goal.floor_point())?;

    debug!(
        start = %start.key,
        goal = %goal.key,
        hops = steps.len().saturating_sub(1),
        cost,
        floor_changes,
        "route planned"
    );

    Ok(RoutePlan {
        start: start.clone(),
        goal,
        facility,
        steps,
        cost,
        floor_changes,
        segments,
    })
}

/// Graph node a room's door is attached to.
fn anchor_node(graph: &Graph, room: &RoomAnchor) -> Result<NodeId> {
    nearest_node(graph, room.point, room.floor())
        .map(|node| node.id)
        .ok_or(Error::NoNearbyNode {
            floor: room.floor(),
        })
}

fn count_floor_changes(graph: &Graph, steps: &[NodeId]) -> Result<usize> {
    let mut changes = 0usize;
    for pair in steps.windows(2) {
        let from = graph.node(pair[0]).ok_or(Error::NodeNotFound { id: pair[0] })?;
        let to = graph.node(pair[1]).ok_or(Error::NodeNotFound { id: pair[1] })?;
        if from.floor != to.floor {
            changes += 1;
        }
    }
    Ok(changes)
}
