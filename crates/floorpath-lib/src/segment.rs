//! Split a node path into one polyline per floor for rendering.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::geometry::{FloorNumber, FloorPoint, Point};
use crate::graph::{Graph, NodeId};

/// Per-floor polylines of a route.
///
/// Points of every visit to a floor are concatenated under that floor in the
/// order they were walked; `floor_order` records floors by first visit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathSegmentMap {
    segments: BTreeMap<FloorNumber, Vec<Point>>,
    floor_order: Vec<FloorNumber>,
}

impl PathSegmentMap {
    pub fn get(&self, floor: FloorNumber) -> Option<&[Point]> {
        self.segments.get(&floor).map(Vec::as_slice)
    }

    /// Floors in first-visit order.
    pub fn floors(&self) -> &[FloorNumber] {
        &self.floor_order
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments in first-visit order.
    pub fn iter(&self) -> impl Iterator<Item = (FloorNumber, &[Point])> + '_ {
        self.floor_order
            .iter()
            .filter_map(|floor| self.get(*floor).map(|points| (*floor, points)))
    }

    /// Segments that can be drawn as lines (at least two points).
    pub fn polylines(&self) -> impl Iterator<Item = (FloorNumber, &[Point])> + '_ {
        self.iter().filter(|(_, points)| points.len() >= 2)
    }

    fn close(&mut self, floor: FloorNumber, segment: Vec<Point>) {
        if segment.is_empty() {
            return;
        }
        if !self.floor_order.contains(&floor) {
            self.floor_order.push(floor);
        }
        self.segments.entry(floor).or_default().extend(segment);
    }
}

/// Build per-floor polylines from `start`, through the node path, to `end`.
///
/// An empty path yields an empty map.
pub fn segment_path(
    graph: &Graph,
    steps: &[NodeId],
    start: FloorPoint,
    end: FloorPoint,
) -> Result<PathSegmentMap> {
    let mut map = PathSegmentMap::default();
    let Some(&last) = steps.last() else {
        return Ok(map);
    };

    let mut floor = start.floor;
    let mut running = vec![start.point];

    for &id in steps {
        let node = graph.node(id).ok_or(Error::NodeNotFound { id })?;
        if node.floor != floor {
            map.close(floor, std::mem::take(&mut running));
            floor = node.floor;
        }
        running.push(node.point);
    }

    if end.floor != floor {
        map.close(floor, std::mem::take(&mut running));
        let last_point = graph.node(last).ok_or(Error::NodeNotFound { id: last })?.point;
        running = vec![last_point, end.point];
        floor = end.floor;
    } else {
        running.push(end.point);
    }
    map.close(floor, running);

    Ok(map)
}
