//! Floorpath library entry points.
//!
//! This crate loads a multi-floor building from normalized floor files,
//! builds the weighted proximity graph over its waypoints and stairs, and
//! plans walking routes between rooms, including "nearest facility" routes
//! and per-floor polylines for drawing the result. Higher-level consumers
//! (the CLI) should only depend on the functions exported here instead of
//! reimplementing behavior.

#![deny(warnings)]

pub mod building;
pub mod config;
pub mod dataset;
pub mod error;
pub mod facility;
pub mod floor;
pub mod frontier;
pub mod geometry;
pub mod graph;
pub mod locate;
pub mod output;
pub mod path;
pub mod routing;
pub mod segment;
pub mod spatial;

pub use building::Building;
pub use config::RoutingConfig;
pub use dataset::{default_data_dir, load_building, load_building_from, resolve_data_dir};
pub use error::{Error, Result};
pub use facility::{route_to_nearest_facility, FacilityCatalog, FacilityInstance, FacilityMatch};
pub use floor::{FeaturePoint, FloorFeatureSet, RoomAnchor, RoomKey};
pub use geometry::{FloorNumber, FloorPoint, Point};
pub use graph::{
    build_graph, build_graph_with_options, Edge, EdgeKind, Graph, GraphBuildOptions, GraphNode,
    GraphStats, NodeId, SpatialIndexMode,
};
pub use locate::nearest_node;
pub use output::{RenderMode, RouteOutputKind, RouteSummary};
pub use path::{find_route, RouteResult};
pub use routing::{plan_route, Destination, RoutePlan, RouteRequest};
pub use segment::{segment_path, PathSegmentMap};
