use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::floor::RoomAnchor;
use crate::geometry::{FloorNumber, Point};
use crate::graph::{Graph, NodeId};
use crate::routing::RoutePlan;

/// Classifies the kind of request that produced a route summary.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteOutputKind {
    Route,
    Facility,
}

impl RouteOutputKind {
    /// Human-readable label shown in textual renderings.
    pub fn label(self) -> &'static str {
        match self {
            RouteOutputKind::Route => "Route",
            RouteOutputKind::Facility => "Nearest facility",
        }
    }
}

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Header plus one line per step.
    Plain,
    /// Header plus a single arrow-joined line of floors.
    Compact,
}

/// Start or goal room of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub key: String,
    pub name: String,
    pub floor: FloorNumber,
}

impl From<&RoomAnchor> for RouteEndpoint {
    fn from(room: &RoomAnchor) -> Self {
        Self {
            key: room.key.to_string(),
            name: room.name.clone(),
            floor: room.floor(),
        }
    }
}

/// Graph node visited by a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteStep {
    pub index: usize,
    pub node: NodeId,
    pub original_id: String,
    pub floor: FloorNumber,
    pub stair: bool,
}

/// Drawable route segment on one floor.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FloorPolyline {
    pub floor: FloorNumber,
    pub points: Vec<Point>,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub kind: RouteOutputKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility: Option<String>,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub cost: f64,
    pub hops: usize,
    pub floor_changes: usize,
    pub steps: Vec<RouteStep>,
    pub polylines: Vec<FloorPolyline>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a structured summary with resolved node details.
    pub fn from_plan(graph: &Graph, plan: &RoutePlan) -> Result<Self> {
        let steps = plan
            .steps
            .iter()
            .enumerate()
            .map(|(index, &id)| {
                let node = graph.node(id).ok_or(Error::NodeNotFound { id })?;
                Ok(RouteStep {
                    index,
                    node: id,
                    original_id: node.original_id.clone(),
                    floor: node.floor,
                    stair: node.is_stair,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let polylines = plan
            .segments
            .polylines()
            .map(|(floor, points)| FloorPolyline {
                floor,
                points: points.to_vec(),
            })
            .collect();

        let kind = if plan.facility.is_some() {
            RouteOutputKind::Facility
        } else {
            RouteOutputKind::Route
        };

        Ok(Self {
            kind,
            facility: plan.facility.clone(),
            start: RouteEndpoint::from(&plan.start),
            goal: RouteEndpoint::from(&plan.goal),
            cost: plan.cost,
            hops: plan.hop_count(),
            floor_changes: plan.floor_changes,
            steps,
            polylines,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::Plain => self.render_plain(),
            RenderMode::Compact => self.render_compact(),
        }
    }

    fn header(&self) -> String {
        let label = match &self.facility {
            Some(category) => format!("{} ({category})", self.kind.label()),
            None => self.kind.label().to_string(),
        };
        format!(
            "{label}: {} [{}] -> {} [{}] ({} hops, {} floor changes, cost {:.1})",
            self.start.name,
            self.start.key,
            self.goal.name,
            self.goal.key,
            self.hops,
            self.floor_changes,
            self.cost
        )
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "{}", self.header());
        for step in &self.steps {
            let marker = if step.stair { " (stairs)" } else { "" };
            let _ = writeln!(
                buffer,
                "{:>3}: floor {} {}{}",
                step.index, step.floor, step.original_id, marker
            );
        }
        buffer
    }

    fn render_compact(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "{}", self.header());
        let floors = self
            .polylines
            .iter()
            .map(|line| format!("floor {} ({} points)", line.floor, line.points.len()))
            .collect::<Vec<_>>()
            .join(" -> ");
        let _ = writeln!(buffer, "{floors}");
        buffer
    }
}
