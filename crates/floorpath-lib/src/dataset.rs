use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::building::Building;
use crate::config::RoutingConfig;
use crate::error::{Error, Result};
use crate::facility::FacilityCatalog;
use crate::floor::{FeaturePoint, FloorFeatureSet};
use crate::geometry::{CoordinateTransform, DoorLine, FloorNumber, Point};

/// Environment variable overriding the building data directory.
pub const DATA_DIR_ENV: &str = "FLOORPATH_DATA_DIR";

/// Filename of the building manifest inside the data directory.
pub const MANIFEST_FILENAME: &str = "building.json";

/// Filename of a floor's feature file inside the data directory.
pub fn floor_filename(floor: FloorNumber) -> String {
    format!("floor{floor}.json")
}

/// Resolve the default data directory using platform-specific project directories.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "floorpath").ok_or(Error::DataDirUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Resolve the building data directory.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `FLOORPATH_DATA_DIR` environment variable.
/// 3. Platform-specific project data directory.
///
/// A path pointing at the manifest file itself resolves to its parent directory.
pub fn resolve_data_dir(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(canonical_data_dir(explicit));
    }

    if let Some(env_path) = env::var_os(DATA_DIR_ENV) {
        return Ok(canonical_data_dir(Path::new(&env_path)));
    }

    default_data_dir()
}

fn canonical_data_dir(path: &Path) -> PathBuf {
    if path.file_name().is_some_and(|name| name == MANIFEST_FILENAME) {
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    } else {
        path.to_path_buf()
    }
}

/// Source units of the coordinates stored in floor files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Units {
    /// Already in the shared map plane.
    #[default]
    Map,
    /// Floor-plan drawing units; converted with the manifest transform.
    Source,
}

#[derive(Debug, Deserialize)]
struct BuildingManifest {
    name: String,
    #[serde(default)]
    floor_count: Option<FloorNumber>,
    #[serde(default)]
    routing: RoutingConfig,
    #[serde(default)]
    units: Units,
    #[serde(default)]
    transform: CoordinateTransform,
    #[serde(default)]
    facilities: FacilityCatalog,
}

#[derive(Debug, Default, Deserialize)]
struct RawFloor {
    #[serde(default)]
    waypoints: Vec<RawWaypoint>,
    #[serde(default)]
    stairs: Vec<RawWaypoint>,
    #[serde(default)]
    doors: Vec<RawDoor>,
}

#[derive(Debug, Deserialize)]
struct RawWaypoint {
    #[serde(default)]
    id: Option<String>,
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct RawDoor {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(flatten)]
    geometry: DoorGeometry,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DoorGeometry {
    Line(DoorLine),
    Point { x: f64, y: f64 },
}

impl DoorGeometry {
    fn anchor(&self) -> (f64, f64) {
        match self {
            DoorGeometry::Line(line) => line.midpoint(),
            DoorGeometry::Point { x, y } => (*x, *y),
        }
    }
}

/// Converts raw coordinates into the shared plane.
#[derive(Debug, Clone, Copy)]
struct Projection(Option<CoordinateTransform>);

impl Projection {
    fn point(self, x: f64, y: f64) -> Point {
        match self.0 {
            Some(transform) => transform.apply(x, y),
            None => Point::new(x, y),
        }
    }
}

/// Load a building from its data directory.
///
/// Floors are read in parallel. A floor file that is missing or malformed is
/// logged and replaced with an empty feature set; the other floors still load.
pub fn load_building(dir: &Path) -> Result<Building> {
    let dir = canonical_data_dir(dir);
    let manifest_path = dir.join(MANIFEST_FILENAME);
    if !manifest_path.is_file() {
        return Err(Error::BuildingNotFound {
            path: manifest_path,
        });
    }
    let manifest: BuildingManifest = read_json(&manifest_path)?;

    let mut config = manifest.routing;
    if let Some(floor_count) = manifest.floor_count {
        config.floor_count = floor_count;
    }
    config.validate()?;

    let projection = Projection(match manifest.units {
        Units::Map => None,
        Units::Source => Some(manifest.transform),
    });

    let floors: BTreeMap<FloorNumber, FloorFeatureSet> = thread::scope(|scope| {
        let handles: Vec<_> = config
            .floors()
            .map(|floor| {
                let path = dir.join(floor_filename(floor));
                (floor, scope.spawn(move || load_floor(&path, floor, projection)))
            })
            .collect();

        handles
            .into_iter()
            .map(|(floor, handle)| {
                let set = match handle.join() {
                    Ok(Ok(set)) => set,
                    Ok(Err(err)) => {
                        warn!(floor, error = %err, "failed to load floor; continuing without it");
                        FloorFeatureSet::empty(floor)
                    }
                    Err(_) => {
                        warn!(floor, "floor loader panicked; continuing without it");
                        FloorFeatureSet::empty(floor)
                    }
                };
                (floor, set)
            })
            .collect()
    });

    let building = Building::new(manifest.name, config, manifest.facilities, floors);
    info!(
        name = %building.name,
        floors = building.floors.len(),
        rooms = building.rooms().count(),
        "loaded building"
    );
    Ok(building)
}

/// Resolve the data directory and load the building found there.
pub fn load_building_from(target: Option<&Path>) -> Result<Building> {
    let dir = resolve_data_dir(target)?;
    load_building(&dir)
}

fn load_floor(path: &Path, floor: FloorNumber, projection: Projection) -> Result<FloorFeatureSet> {
    let raw: RawFloor = read_json(path)?;

    let waypoints = raw
        .waypoints
        .into_iter()
        .map(|waypoint| (waypoint.id, projection.point(waypoint.x, waypoint.y)));
    let mut set = FloorFeatureSet::from_waypoints(floor, waypoints);

    for (index, stair) in raw.stairs.into_iter().enumerate() {
        let point = projection.point(stair.x, stair.y);
        let feature = match stair.id {
            Some(id) => FeaturePoint::new(id, point),
            None => FeaturePoint {
                id: format!("s{floor}-{index}"),
                source_id: None,
                point,
            },
        };
        set.stairs.push(feature);
    }

    for door in raw.doors {
        let (Some(id), Some(name)) = (door.id, door.name) else {
            debug!(floor, "skipping door without id or name");
            continue;
        };
        let (x, y) = door.geometry.anchor();
        set.add_room(id, name, projection.point(x, y));
    }

    debug!(
        floor,
        path_nodes = set.path_nodes.len(),
        stairs = set.stairs.len(),
        rooms = set.rooms.len(),
        "loaded floor"
    );
    Ok(set)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}
