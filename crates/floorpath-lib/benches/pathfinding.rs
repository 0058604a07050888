use std::collections::BTreeMap;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use floorpath_lib::{
    build_graph_with_options, find_route, route_to_nearest_facility, FacilityInstance,
    FeaturePoint, FloorFeatureSet, FloorNumber, FloorPoint, Graph, GraphBuildOptions, Point,
    RoutingConfig, SpatialIndexMode,
};
use once_cell::sync::Lazy;

const FLOORS: FloorNumber = 5;
const GRID: usize = 30;
const SPACING: f64 = 25.0;

/// Square waypoint grids with a staircase in each corner of every floor.
fn synthetic_floors() -> BTreeMap<FloorNumber, FloorFeatureSet> {
    let far = SPACING * (GRID - 1) as f64;
    let corners = [(0.0, 0.0), (far, 0.0), (0.0, far), (far, far)];

    (1..=FLOORS)
        .map(|floor| {
            let mut set = FloorFeatureSet::empty(floor);
            for row in 0..GRID {
                for col in 0..GRID {
                    let point = Point::new(col as f64 * SPACING, row as f64 * SPACING);
                    set.path_nodes
                        .push(FeaturePoint::new(format!("w{floor}-{row}-{col}"), point));
                }
            }
            for (i, (x, y)) in corners.iter().enumerate() {
                set.stairs.push(FeaturePoint::new(
                    format!("stair-marker-{floor}-{i}"),
                    Point::new(x + 5.0, y + 5.0),
                ));
            }
            (floor, set)
        })
        .collect()
}

static FLOOR_DATA: Lazy<BTreeMap<FloorNumber, FloorFeatureSet>> = Lazy::new(synthetic_floors);
static GRAPH: Lazy<Graph> = Lazy::new(|| build(SpatialIndexMode::Auto));

fn build(spatial_index: SpatialIndexMode) -> Graph {
    build_graph_with_options(
        &FLOOR_DATA,
        &RoutingConfig::default(),
        &GraphBuildOptions { spatial_index },
    )
}

fn benchmark_graph_build(c: &mut Criterion) {
    c.bench_function("build_pairwise", |b| {
        b.iter(|| black_box(build(SpatialIndexMode::Never).edge_count()))
    });

    c.bench_function("build_indexed", |b| {
        b.iter(|| black_box(build(SpatialIndexMode::Always).edge_count()))
    });
}

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = &*GRAPH;
    let start = 0;
    let goal = graph.len() - 1;

    c.bench_function("astar_ground_to_top", |b| {
        b.iter(|| {
            let route = find_route(graph, start, goal)
                .expect("valid ids")
                .expect("route exists");
            black_box(route.cost)
        });
    });

    let far = SPACING * (GRID - 1) as f64;
    let instances: Vec<FacilityInstance<usize>> = (1..=FLOORS)
        .enumerate()
        .map(|(i, floor)| FacilityInstance {
            location: FloorPoint::new(floor, Point::new(far, far)),
            anchor: i,
        })
        .collect();

    c.bench_function("nearest_facility_all_floors", |b| {
        b.iter(|| {
            let found = route_to_nearest_facility(graph, start, instances.clone())
                .expect("valid ids")
                .expect("facility reachable");
            black_box(found.anchor)
        });
    });
}

criterion_group!(benches, benchmark_graph_build, benchmark_pathfinding);
criterion_main!(benches);
