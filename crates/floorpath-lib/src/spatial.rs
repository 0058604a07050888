//! Per-floor KD-tree used to find candidate node pairs during graph builds.
//!
//! The index only narrows the search. Every candidate it returns is checked
//! again with the exact strict-threshold rule by the graph builder, so a graph
//! built with the index is identical to one built by comparing every pair.

use std::collections::HashMap;

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use tracing::debug;

use crate::geometry::{FloorNumber, Point};
use crate::graph::{GraphNode, NodeId};

/// KD-tree bucket size. kiddo cannot split a full bucket whose items all share
/// the split value, so a floor with this many nodes on one x or y value is not
/// indexed at all.
pub const BUCKET_SIZE: usize = 256;

/// Slack added to query radii so boundary points survive floating point rounding
/// inside the tree; the exact comparison happens afterwards.
const RADIUS_SLACK: f64 = 1e-9;

type FloorTree = KdTree<f64, usize, 2, BUCKET_SIZE, u32>;

/// One KD-tree per floor over a subset of graph nodes.
pub struct FloorIndex {
    trees: HashMap<FloorNumber, FloorTree>,
}

impl FloorIndex {
    /// Index the given nodes, grouped by floor.
    ///
    /// Returns `None` when some floor has [`BUCKET_SIZE`] or more nodes sharing
    /// one coordinate value on either axis.
    pub fn build<'a>(nodes: impl Iterator<Item = &'a GraphNode> + Clone) -> Option<Self> {
        if let Some((floor, axis)) = crowded_axis(nodes.clone()) {
            debug!(floor, axis, "too many nodes share one coordinate; not indexing");
            return None;
        }

        let mut trees: HashMap<FloorNumber, FloorTree> = HashMap::new();
        let mut count = 0usize;
        for node in nodes {
            trees
                .entry(node.floor)
                .or_insert_with(KdTree::new)
                .add(&[node.point.x, node.point.y], node.id);
            count += 1;
        }

        debug!(floors = trees.len(), node_count = count, "built floor index");
        Some(Self { trees })
    }

    /// Number of indexed floors.
    pub fn floor_count(&self) -> usize {
        self.trees.len()
    }

    /// Ids of nodes on `floor` that may lie within `radius` of `point`, in no particular order.
    pub fn within(&self, floor: FloorNumber, point: Point, radius: f64) -> Vec<NodeId> {
        let Some(tree) = self.trees.get(&floor) else {
            return Vec::new();
        };
        if radius <= 0.0 {
            return Vec::new();
        }

        let padded = radius * (1.0 + RADIUS_SLACK);
        tree.within::<SquaredEuclidean>(&[point.x, point.y], padded * padded)
            .into_iter()
            .map(|neighbour| neighbour.item)
            .collect()
    }
}

/// First floor and axis (`"x"` or `"y"`) on which a single coordinate value
/// is shared by at least [`BUCKET_SIZE`] nodes.
fn crowded_axis<'a>(
    nodes: impl Iterator<Item = &'a GraphNode>,
) -> Option<(FloorNumber, &'static str)> {
    let mut counts: HashMap<(FloorNumber, u8, u64), usize> = HashMap::new();
    for node in nodes {
        for (axis, value) in [(0u8, node.point.x), (1u8, node.point.y)] {
            // Adding zero folds -0.0 into 0.0 so equal values share a key.
            let count = counts
                .entry((node.floor, axis, (value + 0.0).to_bits()))
                .or_default();
            *count += 1;
            if *count >= BUCKET_SIZE {
                return Some((node.floor, if axis == 0 { "x" } else { "y" }));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: NodeId, floor: FloorNumber, x: f64, y: f64) -> GraphNode {
        GraphNode {
            id,
            original_id: format!("n{id}"),
            source_id: None,
            point: Point::new(x, y),
            floor,
            is_stair: false,
        }
    }

    #[test]
    fn queries_stay_on_their_floor() {
        let nodes = vec![node(0, 1, 0.0, 0.0), node(1, 1, 5.0, 0.0), node(2, 2, 0.0, 0.0)];
        let index = FloorIndex::build(nodes.iter()).expect("indexable");
        assert_eq!(index.floor_count(), 2);

        let mut found = index.within(1, Point::new(0.0, 0.0), 10.0);
        found.sort_unstable();
        assert_eq!(found, vec![0, 1]);

        assert_eq!(index.within(2, Point::new(0.0, 0.0), 10.0), vec![2]);
        assert!(index.within(3, Point::new(0.0, 0.0), 10.0).is_empty());
    }

    #[test]
    fn boundary_points_are_returned_as_candidates() {
        let nodes = vec![node(0, 1, 0.0, 0.0), node(1, 1, 40.0, 0.0)];
        let index = FloorIndex::build(nodes.iter()).expect("indexable");

        let mut found = index.within(1, Point::new(0.0, 0.0), 40.0);
        found.sort_unstable();
        assert_eq!(found, vec![0, 1]);
    }

    #[test]
    fn aligned_points_fit_in_one_bucket() {
        let nodes: Vec<_> = (0..100).map(|i| node(i, 1, 10.0, i as f64)).collect();
        let index = FloorIndex::build(nodes.iter()).expect("indexable");
        let found = index.within(1, Point::new(10.0, 50.0), 1.5);
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn crowded_axis_is_not_indexed() {
        let column: Vec<_> = (0..BUCKET_SIZE)
            .map(|i| node(i, 1, 50.0, i as f64 * 10.0))
            .collect();
        assert!(FloorIndex::build(column.iter()).is_none());

        let stacked: Vec<_> = (0..300).map(|i| node(i, 2, 7.0, 7.0)).collect();
        assert!(FloorIndex::build(stacked.iter()).is_none());

        let row: Vec<_> = (0..BUCKET_SIZE - 1)
            .map(|i| node(i, 1, i as f64, -0.0))
            .chain(std::iter::once(node(BUCKET_SIZE - 1, 1, 999.0, 0.0)))
            .collect();
        assert!(FloorIndex::build(row.iter()).is_none(), "-0.0 and 0.0 are one value");
    }

    #[test]
    fn shared_values_on_separate_floors_are_fine() {
        let nodes: Vec<_> = (0..300)
            .map(|i| node(i, (i % 2) as FloorNumber + 1, 50.0, i as f64))
            .collect();
        assert!(FloorIndex::build(nodes.iter()).is_some());
    }
}
