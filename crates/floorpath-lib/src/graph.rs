use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::RoutingConfig;
use crate::floor::{FeaturePoint, FloorFeatureSet};
use crate::geometry::{FloorNumber, Point};
use crate::spatial::FloorIndex;

/// Dense graph node identifier, valid for the lifetime of one built [`Graph`].
pub type NodeId = usize;

/// Floors holding more nodes than this switch [`SpatialIndexMode::Auto`] to the KD-tree.
pub const SPATIAL_INDEX_MIN_NODES: usize = 256;

/// Routing node created from a waypoint or stair marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub original_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    pub point: Point,
    pub floor: FloorNumber,
    pub is_stair: bool,
}

/// Classification for the edge used in the routing graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Same-floor link weighted by distance.
    Walk,
    /// Cross-floor stair link with the fixed floor-change cost.
    Stair,
}

/// Edge within the routing graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub weight: f64,
    pub kind: EdgeKind,
}

/// How candidate node pairs are found while building.
///
/// When any floor is one the KD-tree cannot hold (see
/// [`crate::spatial::FloorIndex::build`]), every pair is compared directly,
/// whatever the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpatialIndexMode {
    /// Use the KD-tree once a floor exceeds [`SPATIAL_INDEX_MIN_NODES`].
    #[default]
    Auto,
    Always,
    /// Compare every pair of nodes.
    Never,
}

/// Options that influence graph construction but never its result.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuildOptions {
    pub spatial_index: SpatialIndexMode,
}

/// Multi-floor routing graph. Immutable once built and cheap to clone.
#[derive(Debug, Clone)]
pub struct Graph {
    config: RoutingConfig,
    nodes: Arc<Vec<GraphNode>>,
    adjacency: Arc<Vec<Vec<Edge>>>,
}

impl Graph {
    /// Configuration the graph was built with.
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Return the neighbours for a given node, ordered by neighbour id.
    pub fn neighbours(&self, id: NodeId) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edge from `from` to `to`, if the two nodes are linked.
    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.neighbours(from).iter().find(|edge| edge.target == to)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes_on_floor(&self, floor: FloorNumber) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |node| node.floor == floor)
    }

    /// Number of undirected connections.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats::default();
        for node in self.nodes.iter() {
            let floor = stats.per_floor.entry(node.floor).or_default();
            floor.nodes += 1;
            stats.nodes += 1;
            if node.is_stair {
                floor.stairs += 1;
                stats.stairs += 1;
            }
            for edge in self.neighbours(node.id) {
                // Count each undirected link once, from its lower endpoint.
                if edge.target < node.id {
                    continue;
                }
                match edge.kind {
                    EdgeKind::Walk => {
                        floor.walk_edges += 1;
                        stats.walk_edges += 1;
                    }
                    EdgeKind::Stair => stats.stair_edges += 1,
                }
            }
        }
        stats
    }
}

/// Summary counts for a built graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub stairs: usize,
    pub walk_edges: usize,
    pub stair_edges: usize,
    pub per_floor: BTreeMap<FloorNumber, FloorStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FloorStats {
    pub nodes: usize,
    pub stairs: usize,
    pub walk_edges: usize,
}

/// Build the routing graph with default options.
pub fn build_graph(floors: &BTreeMap<FloorNumber, FloorFeatureSet>, config: &RoutingConfig) -> Graph {
    build_graph_with_options(floors, config, &GraphBuildOptions::default())
}

/// Build the routing graph.
///
/// Nodes are numbered floor by floor, waypoints before stairs, in source
/// order. Floors above `config.floor_count` or without data are skipped.
pub fn build_graph_with_options(
    floors: &BTreeMap<FloorNumber, FloorFeatureSet>,
    config: &RoutingConfig,
    options: &GraphBuildOptions,
) -> Graph {
    let nodes = collect_nodes(floors, config);

    let use_index = match options.spatial_index {
        SpatialIndexMode::Always => true,
        SpatialIndexMode::Never => false,
        SpatialIndexMode::Auto => largest_floor(&nodes) > SPATIAL_INDEX_MIN_NODES,
    };

    let indexed = if use_index {
        indexed_links(&nodes, config)
    } else {
        None
    };
    let use_index = indexed.is_some();
    let links = indexed.unwrap_or_else(|| pairwise_links(&nodes, config));
    let adjacency = assemble_adjacency(nodes.len(), &links);

    info!(
        node_count = nodes.len(),
        edge_count = links.len(),
        spatial_index = use_index,
        "built routing graph"
    );

    Graph {
        config: *config,
        nodes: Arc::new(nodes),
        adjacency: Arc::new(adjacency),
    }
}

fn collect_nodes(
    floors: &BTreeMap<FloorNumber, FloorFeatureSet>,
    config: &RoutingConfig,
) -> Vec<GraphNode> {
    let mut nodes = Vec::new();
    for floor in config.floors() {
        let Some(set) = floors.get(&floor) else {
            debug!(floor, "no feature data for floor; skipping");
            continue;
        };
        push_nodes(&mut nodes, floor, &set.path_nodes, false);
        push_nodes(&mut nodes, floor, &set.stairs, true);
    }
    nodes
}

fn push_nodes(nodes: &mut Vec<GraphNode>, floor: FloorNumber, features: &[FeaturePoint], is_stair: bool) {
    for feature in features {
        nodes.push(GraphNode {
            id: nodes.len(),
            original_id: feature.id.clone(),
            source_id: feature.source_id.clone(),
            point: feature.point,
            floor,
            is_stair,
        });
    }
}

fn largest_floor(nodes: &[GraphNode]) -> usize {
    let mut counts: BTreeMap<FloorNumber, usize> = BTreeMap::new();
    for node in nodes {
        *counts.entry(node.floor).or_default() += 1;
    }
    counts.into_values().max().unwrap_or(0)
}

/// Undirected link between `a < b`.
#[derive(Debug, Clone, Copy)]
struct Link {
    a: NodeId,
    b: NodeId,
    weight: f64,
    kind: EdgeKind,
}

/// Decide whether two distinct nodes are linked, and how.
fn link_between(a: &GraphNode, b: &GraphNode, config: &RoutingConfig) -> Option<(f64, EdgeKind)> {
    let dist = a.point.distance_to(&b.point);

    if a.floor == b.floor
        && dist < config.node_connection_threshold
        && !(a.is_stair && b.is_stair)
    {
        return Some((dist, EdgeKind::Walk));
    }

    if a.is_stair
        && b.is_stair
        && a.floor.abs_diff(b.floor) == 1
        && dist < config.stair_proximity_threshold
    {
        debug!(
            from = %a.original_id,
            from_floor = a.floor,
            to = %b.original_id,
            to_floor = b.floor,
            distance = dist,
            "linking stairs"
        );
        return Some((config.floor_change_cost, EdgeKind::Stair));
    }

    None
}

fn pairwise_links(nodes: &[GraphNode], config: &RoutingConfig) -> Vec<Link> {
    let mut links = Vec::new();
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            if let Some((weight, kind)) = link_between(a, b, config) {
                links.push(Link {
                    a: a.id,
                    b: b.id,
                    weight,
                    kind,
                });
            }
        }
    }
    links
}

/// Links found through the floor index, or `None` when the nodes cannot be indexed.
fn indexed_links(nodes: &[GraphNode], config: &RoutingConfig) -> Option<Vec<Link>> {
    let all = FloorIndex::build(nodes.iter())?;
    let stairs = FloorIndex::build(nodes.iter().filter(|node| node.is_stair))?;

    let mut links = Vec::new();
    for a in nodes {
        let mut candidates = all.within(a.floor, a.point, config.node_connection_threshold);
        if a.is_stair {
            for floor in [a.floor.checked_sub(1), a.floor.checked_add(1)]
                .into_iter()
                .flatten()
            {
                candidates.extend(stairs.within(floor, a.point, config.stair_proximity_threshold));
            }
        }
        candidates.retain(|&id| id > a.id);
        candidates.sort_unstable();
        candidates.dedup();

        for id in candidates {
            let b = &nodes[id];
            if let Some((weight, kind)) = link_between(a, b, config) {
                links.push(Link {
                    a: a.id,
                    b: b.id,
                    weight,
                    kind,
                });
            }
        }
    }
    Some(links)
}

/// Expand links into symmetric adjacency lists, dropping repeated neighbours.
///
/// Links arrive ordered by `(a, b)`, which leaves every list sorted by
/// neighbour id.
fn assemble_adjacency(node_count: usize, links: &[Link]) -> Vec<Vec<Edge>> {
    let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); node_count];
    for link in links {
        adjacency[link.a].push(Edge {
            target: link.b,
            weight: link.weight,
            kind: link.kind,
        });
        adjacency[link.b].push(Edge {
            target: link.a,
            weight: link.weight,
            kind: link.kind,
        });
    }

    for edges in &mut adjacency {
        let mut seen = Vec::with_capacity(edges.len());
        edges.retain(|edge| {
            if seen.contains(&edge.target) {
                false
            } else {
                seen.push(edge.target);
                true
            }
        });
    }
    adjacency
}
