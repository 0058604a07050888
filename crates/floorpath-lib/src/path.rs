use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::frontier::PriorityFrontier;
use crate::graph::{Graph, GraphNode, NodeId};

/// Ordered node path returned by the router together with its total cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub steps: Vec<NodeId>,
    pub cost: f64,
}

impl RouteResult {
    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// A* estimate of the remaining cost from `node` to `goal`.
///
/// Straight-line distance plus the floor-change cost for every floor between
/// the two nodes. Stair edges already carry that cost, so the estimate can
/// exceed the true remaining cost and is not admissible in general.
pub fn heuristic(node: &GraphNode, goal: &GraphNode, floor_change_cost: f64) -> f64 {
    let spatial = node.point.distance_to(&goal.point);
    let floors = f64::from(node.floor.abs_diff(goal.floor));
    spatial + floors * floor_change_cost
}

/// Run A* from `start` to `goal`.
///
/// Returns `Err(NodeNotFound)` when either id is not part of the graph and
/// `Ok(None)` when the goal cannot be reached.
pub fn find_route(graph: &Graph, start: NodeId, goal: NodeId) -> Result<Option<RouteResult>> {
    if graph.node(start).is_none() {
        return Err(Error::NodeNotFound { id: start });
    }
    let goal_node = graph.node(goal).ok_or(Error::NodeNotFound { id: goal })?;
    let floor_change_cost = graph.config().floor_change_cost;

    let mut cost_so_far = vec![f64::INFINITY; graph.len()];
    let mut came_from: Vec<Option<NodeId>> = vec![None; graph.len()];
    let mut frontier = PriorityFrontier::new();

    cost_so_far[start] = 0.0;
    frontier.insert(0.0, start);

    let mut expanded = 0usize;
    let mut found = false;
    while let Some(current) = frontier.extract_min() {
        if current == goal {
            found = true;
            break;
        }
        expanded += 1;

        let current_cost = cost_so_far[current];
        for edge in graph.neighbours(current) {
            let next = edge.target;
            let Some(next_node) = graph.node(next) else {
                continue;
            };

            let new_cost = current_cost + edge.weight;
            if new_cost < cost_so_far[next] {
                cost_so_far[next] = new_cost;
                came_from[next] = Some(current);
                let priority = new_cost + heuristic(next_node, goal_node, floor_change_cost);
                frontier.insert(priority, next);
            }
        }
    }

    if !found {
        debug!(start, goal, expanded, "no route between nodes");
        return Ok(None);
    }

    let steps = reconstruct_path(&came_from, start, goal);
    let cost = cost_so_far[goal];
    debug!(start, goal, expanded, hops = steps.len().saturating_sub(1), cost, "route found");
    Ok(Some(RouteResult { steps, cost }))
}

fn reconstruct_path(came_from: &[Option<NodeId>], start: NodeId, goal: NodeId) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start || path.len() > came_from.len() {
            break;
        }
        current = came_from[node];
    }
    path.reverse();
    path
}
