use crate::geometry::{FloorNumber, Point};
use crate::graph::{Graph, GraphNode};

/// Closest graph node to `point` on `floor`.
///
/// Scans every node on the floor; the first node at the minimum distance wins.
/// There is no distance cutoff. Returns `None` only when the floor has no nodes.
pub fn nearest_node(graph: &Graph, point: Point, floor: FloorNumber) -> Option<&GraphNode> {
    let mut nearest: Option<(&GraphNode, f64)> = None;
    for node in graph.nodes_on_floor(floor) {
        let distance = point.distance_to(&node.point);
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((node, distance)),
        }
    }
    nearest.map(|(node, _)| node)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::config::RoutingConfig;
    use crate::floor::{FeaturePoint, FloorFeatureSet};
    use crate::graph::build_graph;

    fn graph() -> Graph {
        let mut first = FloorFeatureSet::empty(1);
        for (i, (x, y)) in [(0.0, 0.0), (100.0, 0.0), (50.0, 0.0)].iter().enumerate() {
            first
                .path_nodes
                .push(FeaturePoint::new(format!("p1-{i}"), Point::new(*x, *y)));
        }
        let mut second = FloorFeatureSet::empty(2);
        second
            .path_nodes
            .push(FeaturePoint::new("p2-0", Point::new(1.0, 1.0)));
        build_graph(
            &BTreeMap::from([(1, first), (2, second)]),
            &RoutingConfig::default(),
        )
    }

    #[test]
    fn picks_closest_node_on_floor() {
        let graph = graph();
        let node = nearest_node(&graph, Point::new(90.0, 5.0), 1).expect("node");
        assert_eq!(node.id, 1);

        let node = nearest_node(&graph, Point::new(90.0, 5.0), 2).expect("node");
        assert_eq!(node.id, 3, "only the floor's own nodes are considered");
    }

    #[test]
    fn ties_go_to_the_first_node() {
        let graph = graph();
        let node = nearest_node(&graph, Point::new(25.0, 0.0), 1).expect("node");
        assert_eq!(node.id, 0);
    }

    #[test]
    fn far_points_still_resolve() {
        let graph = graph();
        let node = nearest_node(&graph, Point::new(10_000.0, 10_000.0), 2).expect("node");
        assert_eq!(node.id, 3);
    }

    #[test]
    fn empty_floor_has_no_nearest_node() {
        let graph = graph();
        assert!(nearest_node(&graph, Point::new(0.0, 0.0), 4).is_none());
    }
}
