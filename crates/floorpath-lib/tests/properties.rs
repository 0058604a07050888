mod common;

use common::synthetic_floors;
use floorpath_lib::{
    build_graph, find_route, segment_path, FloorPoint, Graph, NodeId, Point, RoutingConfig,
};

fn synthetic_graph() -> Graph {
    let config = RoutingConfig {
        floor_count: 3,
        ..RoutingConfig::default()
    };
    build_graph(&synthetic_floors(3, 150), &config)
}

/// Spread of start and goal pairs across every floor.
fn node_pairs(graph: &Graph) -> impl Iterator<Item = (NodeId, NodeId)> {
    let n = graph.len();
    (0..n)
        .step_by(7)
        .map(move |start| (start, (start * 37 + 11) % n))
        .filter(|(start, goal)| start != goal)
}

fn anchor(graph: &Graph, id: NodeId) -> FloorPoint {
    let node = &graph.nodes()[id];
    FloorPoint::new(node.floor, node.point)
}

#[test]
fn rebuilding_gives_the_same_graph() {
    let first = synthetic_graph();
    let second = synthetic_graph();

    assert_eq!(first.nodes(), second.nodes());
    for node in first.nodes() {
        assert_eq!(
            first.neighbours(node.id),
            second.neighbours(node.id),
            "adjacency differs for {}",
            node.original_id
        );
    }
}

#[test]
fn route_costs_are_the_sum_of_their_edges() {
    let graph = synthetic_graph();
    let mut found = 0;

    for (start, goal) in node_pairs(&graph) {
        let Some(route) = find_route(&graph, start, goal).unwrap() else {
            continue;
        };
        found += 1;
        assert_eq!(route.steps.first(), Some(&start));
        assert_eq!(route.steps.last(), Some(&goal));

        let mut total = 0.0;
        for pair in route.steps.windows(2) {
            let edge = graph
                .edge(pair[0], pair[1])
                .unwrap_or_else(|| panic!("no edge {} -> {}", pair[0], pair[1]));
            total += edge.weight;
        }
        assert!(
            (total - route.cost).abs() < 1e-6,
            "route {start} -> {goal} costs {} but its edges sum to {total}",
            route.cost
        );
    }
    assert!(found > 10, "only {found} routes found");
}

#[test]
fn segments_cover_every_route_point_once() {
    let graph = synthetic_graph();
    let mut checked_in_order = 0;

    for (start, goal) in node_pairs(&graph) {
        let Some(route) = find_route(&graph, start, goal).unwrap() else {
            continue;
        };
        let from = anchor(&graph, start);
        let to = anchor(&graph, goal);
        let segments = segment_path(&graph, &route.steps, from, to).unwrap();

        let mut expected = vec![from.point];
        expected.extend(route.steps.iter().map(|&id| graph.nodes()[id].point));
        expected.push(to.point);

        let flattened: Vec<Point> = segments
            .iter()
            .flat_map(|(_, points)| points.iter().copied())
            .collect();
        assert_eq!(flattened.len(), expected.len(), "route {start} -> {goal}");

        // Revisited floors are merged into their first segment, so order
        // only lines up when every floor is entered once.
        let mut entered: Vec<_> = route.steps.iter().map(|&id| graph.nodes()[id].floor).collect();
        entered.dedup();
        if entered.len() == segments.len() {
            assert_eq!(flattened, expected, "route {start} -> {goal}");
            assert_eq!(segments.floors(), entered.as_slice());
            checked_in_order += 1;
        }
    }
    assert!(checked_in_order > 10, "only {checked_in_order} routes checked");
}
