use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;
use crate::geometry::{FloorNumber, FloorPoint, Point};

/// Id prefix that marks a waypoint as a stair marker.
pub const STAIR_MARKER_PREFIX: &str = "stair-marker";

/// A routing waypoint or stair marker as it appears in the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturePoint {
    pub id: String,
    /// Marker id from the source drawing, when it carried one.
    pub source_id: Option<String>,
    pub point: Point,
}

impl FeaturePoint {
    pub fn new(id: impl Into<String>, point: Point) -> Self {
        let id = id.into();
        Self {
            source_id: Some(id.clone()),
            id,
            point,
        }
    }
}

/// Stable identifier of a room: its floor plus the door id on that floor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RoomKey {
    pub floor: FloorNumber,
    pub id: String,
}

impl RoomKey {
    pub fn new(floor: FloorNumber, id: impl Into<String>) -> Self {
        Self {
            floor,
            id: id.into(),
        }
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.floor, self.id)
    }
}

impl FromStr for RoomKey {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidRoomKey {
            value: value.to_string(),
        };
        let (floor, id) = value.split_once('-').ok_or_else(invalid)?;
        let floor = floor.trim().parse::<FloorNumber>().map_err(|_| invalid())?;
        if id.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(floor, id))
    }
}

/// Destination room, represented by the midpoint of its door.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomAnchor {
    pub key: RoomKey,
    pub name: String,
    pub point: Point,
}

impl RoomAnchor {
    pub fn floor(&self) -> FloorNumber {
        self.key.floor
    }

    pub fn floor_point(&self) -> FloorPoint {
        FloorPoint::new(self.key.floor, self.point)
    }
}

/// Normalized geometry of one floor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FloorFeatureSet {
    pub floor: FloorNumber,
    pub path_nodes: Vec<FeaturePoint>,
    pub stairs: Vec<FeaturePoint>,
    /// Rooms keyed by door id, in door id order.
    pub rooms: BTreeMap<String, RoomAnchor>,
}

impl FloorFeatureSet {
    pub fn empty(floor: FloorNumber) -> Self {
        Self {
            floor,
            ..Self::default()
        }
    }

    /// Split a raw waypoint list into path nodes and stair markers.
    ///
    /// Waypoints without an id are named `p{floor}-{index}`.
    pub fn from_waypoints<I>(floor: FloorNumber, waypoints: I) -> Self
    where
        I: IntoIterator<Item = (Option<String>, Point)>,
    {
        let mut set = Self::empty(floor);
        for (index, (id, point)) in waypoints.into_iter().enumerate() {
            match id {
                Some(id) if id.starts_with(STAIR_MARKER_PREFIX) => {
                    set.stairs.push(FeaturePoint::new(id, point));
                }
                Some(id) => set.path_nodes.push(FeaturePoint::new(id, point)),
                None => set.path_nodes.push(FeaturePoint {
                    id: format!("p{floor}-{index}"),
                    source_id: None,
                    point,
                }),
            }
        }
        set
    }

    /// Register a room anchor; a later door with the same id replaces the earlier one.
    pub fn add_room(&mut self, id: impl Into<String>, name: impl Into<String>, point: Point) {
        let id = id.into();
        let anchor = RoomAnchor {
            key: RoomKey::new(self.floor, id.clone()),
            name: name.into(),
            point,
        };
        self.rooms.insert(id, anchor);
    }

    pub fn is_empty(&self) -> bool {
        self.path_nodes.is_empty() && self.stairs.is_empty() && self.rooms.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.path_nodes.len() + self.stairs.len()
    }
}
