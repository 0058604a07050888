use serde::{Deserialize, Serialize};

/// Floor number, starting at 1 for the ground floor.
pub type FloorNumber = u8;

/// Position in the planar coordinate system shared by every floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the Euclidean distance to another point.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A point pinned to a floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorPoint {
    pub floor: FloorNumber,
    pub point: Point,
}

impl FloorPoint {
    pub const fn new(floor: FloorNumber, point: Point) -> Self {
        Self { floor, point }
    }
}

/// Maps floor-plan source units into the shared map plane.
///
/// The source y axis points down while the map y axis points up, so the
/// vertical coordinate is flipped before scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinateTransform {
    pub map_width: f64,
    pub map_height: f64,
    pub source_width: f64,
    pub source_height: f64,
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        Self {
            map_width: 842.0,
            map_height: 595.0,
            source_width: 771.0,
            source_height: 539.0,
        }
    }
}

impl CoordinateTransform {
    pub fn apply(&self, x: f64, y: f64) -> Point {
        Point {
            x: x * (self.map_width / self.source_width),
            y: (self.source_height - y) * (self.map_height / self.source_height),
        }
    }
}

/// Door drawn as a line segment on the floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl DoorLine {
    /// Midpoint of the door, in source units.
    pub fn midpoint(&self) -> (f64, f64) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
}
