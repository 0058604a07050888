use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::config::RoutingConfig;
use crate::error::{Error, Result};
use crate::facility::{FacilityCatalog, FacilityInstance};
use crate::floor::{FloorFeatureSet, RoomAnchor, RoomKey};
use crate::geometry::FloorNumber;
use crate::graph::{build_graph_with_options, Graph, GraphBuildOptions};

/// Minimum Jaro-Winkler similarity for a room name to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Maximum number of suggestions attached to an unknown-room error.
const MAX_SUGGESTIONS: usize = 3;

/// All floors of one building plus the settings needed to route through it.
#[derive(Debug, Clone, Default)]
pub struct Building {
    pub name: String,
    pub config: RoutingConfig,
    pub facilities: FacilityCatalog,
    pub floors: BTreeMap<FloorNumber, FloorFeatureSet>,
}

impl Building {
    pub fn new(
        name: impl Into<String>,
        config: RoutingConfig,
        facilities: FacilityCatalog,
        floors: BTreeMap<FloorNumber, FloorFeatureSet>,
    ) -> Self {
        Self {
            name: name.into(),
            config,
            facilities,
            floors,
        }
    }

    /// Build the routing graph for the current floor data.
    pub fn build_graph(&self) -> Graph {
        self.build_graph_with_options(&GraphBuildOptions::default())
    }

    pub fn build_graph_with_options(&self, options: &GraphBuildOptions) -> Graph {
        build_graph_with_options(&self.floors, &self.config, options)
    }

    pub fn room(&self, key: &RoomKey) -> Option<&RoomAnchor> {
        self.floors.get(&key.floor)?.rooms.get(&key.id)
    }

    /// Every room, by floor and then by door id.
    pub fn rooms(&self) -> impl Iterator<Item = &RoomAnchor> {
        self.floors.values().flat_map(|floor| floor.rooms.values())
    }

    /// Resolve a `{floor}-{id}` key or a display name to a room.
    ///
    /// Names match ignoring case and must be unambiguous.
    pub fn resolve_room(&self, query: &str) -> Result<&RoomAnchor> {
        let query = query.trim();
        if let Ok(key) = query.parse::<RoomKey>() {
            if let Some(room) = self.room(&key) {
                return Ok(room);
            }
        }

        let matches: Vec<&RoomAnchor> = self
            .rooms()
            .filter(|room| room.name.eq_ignore_ascii_case(query))
            .collect();
        match matches.as_slice() {
            [room] => Ok(*room),
            [] => Err(Error::UnknownRoom {
                name: query.to_string(),
                suggestions: self.suggest_rooms(query),
            }),
            ambiguous => Err(Error::UnknownRoom {
                name: query.to_string(),
                suggestions: ambiguous.iter().map(|room| room.key.to_string()).collect(),
            }),
        }
    }

    /// Room names closest to `query`, best first.
    pub fn suggest_rooms(&self, query: &str) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .rooms()
            .map(|room| {
                let score = strsim::jaro_winkler(&needle, &room.name.to_lowercase());
                (score, room.name.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));

        let mut suggestions: Vec<String> = Vec::new();
        for (_, name) in scored {
            if suggestions.iter().any(|existing| existing == name) {
                continue;
            }
            suggestions.push(name.to_string());
            if suggestions.len() == MAX_SUGGESTIONS {
                break;
            }
        }
        suggestions
    }

    /// Rooms offered as start or destination choices.
    ///
    /// Facility rooms are left out since they are reached through the
    /// nearest-facility search. Rooms are ordered by floor, then by room
    /// number when both names start with one, then by name.
    pub fn selectable_rooms(&self) -> Vec<&RoomAnchor> {
        let mut rooms: Vec<&RoomAnchor> = self
            .rooms()
            .filter(|room| !self.facilities.is_facility(&room.name))
            .collect();
        rooms.sort_by(|a, b| a.floor().cmp(&b.floor()).then_with(|| compare_names(&a.name, &b.name)));
        rooms
    }

    /// Every room that belongs to `category`, ready for the facility router.
    pub fn facility_instances(&self, category: &str) -> Result<Vec<FacilityInstance<RoomAnchor>>> {
        let prefixes = self
            .facilities
            .prefixes(category)
            .ok_or_else(|| Error::UnknownFacility {
                category: category.to_string(),
                known: self.facilities.categories().map(str::to_string).collect(),
            })?;

        Ok(self
            .rooms()
            .filter(|room| prefixes.iter().any(|prefix| room.name.starts_with(prefix.as_str())))
            .map(|room| FacilityInstance {
                location: room.floor_point(),
                anchor: room.clone(),
            })
            .collect())
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    match (leading_number(a), leading_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

/// Integer formed by the leading ASCII digits of `name`, if any.
fn leading_number(name: &str) -> Option<u64> {
    let digits: &str = &name[..name
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(name.len())];
    digits.parse().ok()
}
