//! Routing constants shared by the graph builder and the router.
//!
//! The defaults mirror the reference building: five floors, waypoints joined
//! when closer than 40 map units, stairs joined across adjacent floors when
//! closer than 30 units, and a flat cost of 1000 per floor transition. A
//! building manifest may override any subset of them.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::FloorNumber;

/// Number of floors loaded when the manifest does not say otherwise.
pub const FLOOR_COUNT: FloorNumber = 5;

/// Same-floor nodes are linked when strictly closer than this distance.
pub const NODE_CONNECTION_THRESHOLD: f64 = 40.0;

/// Stair markers on adjacent floors are linked when strictly closer than this distance.
pub const STAIR_PROXIMITY_THRESHOLD: f64 = 30.0;

/// Fixed weight of a cross-floor stair edge.
pub const FLOOR_CHANGE_COST: f64 = 1000.0;

/// Tunable routing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub floor_count: FloorNumber,
    pub node_connection_threshold: f64,
    pub stair_proximity_threshold: f64,
    pub floor_change_cost: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            floor_count: FLOOR_COUNT,
            node_connection_threshold: NODE_CONNECTION_THRESHOLD,
            stair_proximity_threshold: STAIR_PROXIMITY_THRESHOLD,
            floor_change_cost: FLOOR_CHANGE_COST,
        }
    }
}

impl RoutingConfig {
    /// Reject configurations the builder and router cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.floor_count == 0 {
            return Err(invalid("floor_count must be at least 1"));
        }
        check_positive("node_connection_threshold", self.node_connection_threshold)?;
        check_positive("stair_proximity_threshold", self.stair_proximity_threshold)?;
        check_positive("floor_change_cost", self.floor_change_cost)?;
        Ok(())
    }

    /// Floors `1..=floor_count` in ascending order.
    pub fn floors(&self) -> impl Iterator<Item = FloorNumber> {
        1..=self.floor_count
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(&format!("{name} must be a positive number, got {value}")))
    }
}

fn invalid(message: &str) -> Error {
    Error::InvalidConfig {
        message: message.to_string(),
    }
}
