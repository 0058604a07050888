//! Common test utilities and fixture helpers.
//!
//! Integration tests load the building under `docs/fixtures/minimal_building`
//! or generate synthetic floors when they need many nodes.

use std::collections::BTreeMap;
use std::path::PathBuf;

use floorpath_lib::{load_building, Building, FeaturePoint, FloorFeatureSet, FloorNumber, Point};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Directory of the three-floor fixture building.
#[allow(dead_code)]
pub fn building_dir() -> PathBuf {
    fixtures_dir().join("minimal_building")
}

#[allow(dead_code)]
pub fn fixture_building() -> Building {
    load_building(&building_dir()).expect("fixture building loads")
}

/// Deterministic pseudo-random floors with `per_floor` waypoints and eight
/// stair markers each, spread over a 400x400 square.
#[allow(dead_code)]
pub fn synthetic_floors(
    floors: FloorNumber,
    per_floor: usize,
) -> BTreeMap<FloorNumber, FloorFeatureSet> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 4000) as f64 / 10.0
    };

    let mut result = BTreeMap::new();
    for floor in 1..=floors {
        let mut set = FloorFeatureSet::empty(floor);
        for i in 0..per_floor {
            let point = Point::new(next(), next());
            set.path_nodes
                .push(FeaturePoint::new(format!("w{floor}-{i}"), point));
        }
        for i in 0..8u8 {
            // Stairs sit on a shared grid so adjacent floors line up.
            let point = Point::new(50.0 * f64::from(i) + 5.0, 200.0 + f64::from(floor));
            set.stairs
                .push(FeaturePoint::new(format!("stair-marker-{floor}-{i}"), point));
        }
        result.insert(floor, set);
    }
    result
}
