//! Output formatting for rooms, routes and graph statistics.
//!
//! Every renderer returns the full text so `main` decides where it goes and
//! tests can inspect it directly.

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use floorpath_lib::{FloorNumber, GraphStats, RenderMode, RoomAnchor, RouteSummary};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per step.
    #[default]
    Text,
    /// Header plus the floors walked.
    Compact,
    /// Serialized summary for other programs.
    Json,
}

/// Room shown by the `rooms` command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RoomEntry {
    pub key: String,
    pub name: String,
    pub floor: FloorNumber,
}

impl From<&RoomAnchor> for RoomEntry {
    fn from(room: &RoomAnchor) -> Self {
        Self {
            key: room.key.to_string(),
            name: room.name.clone(),
            floor: room.floor(),
        }
    }
}

impl OutputFormat {
    pub fn render_route(self, summary: &RouteSummary) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(summary.render(RenderMode::Plain)),
            OutputFormat::Compact => Ok(summary.render(RenderMode::Compact)),
            OutputFormat::Json => to_json(summary),
        }
    }

    /// Rooms grouped under one heading per floor.
    pub fn render_rooms(self, rooms: &[RoomEntry]) -> Result<String> {
        if self == OutputFormat::Json {
            return to_json(rooms);
        }

        let mut buffer = String::new();
        let mut current: Option<FloorNumber> = None;
        for room in rooms {
            if current != Some(room.floor) {
                let _ = writeln!(buffer, "Floor {}:", room.floor);
                current = Some(room.floor);
            }
            match self {
                OutputFormat::Compact => {
                    let _ = writeln!(buffer, "  {}", room.name);
                }
                _ => {
                    let _ = writeln!(buffer, "  {:<12} {}", room.key, room.name);
                }
            }
        }
        if rooms.is_empty() {
            buffer.push_str("No rooms found.\n");
        }
        Ok(buffer)
    }

    pub fn render_stats(self, stats: &GraphStats) -> Result<String> {
        if self == OutputFormat::Json {
            return to_json(stats);
        }

        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Graph: {} nodes ({} stairs), {} walk edges, {} stair edges",
            stats.nodes, stats.stairs, stats.walk_edges, stats.stair_edges
        );
        if self == OutputFormat::Text {
            for (floor, floor_stats) in &stats.per_floor {
                let _ = writeln!(
                    buffer,
                    "  floor {}: {} nodes, {} stairs, {} walk edges",
                    floor, floor_stats.nodes, floor_stats.stairs, floor_stats.walk_edges
                );
            }
        }
        Ok(buffer)
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use floorpath_lib::graph::FloorStats;

    use super::*;

    fn rooms() -> Vec<RoomEntry> {
        vec![
            RoomEntry {
                key: "1-d101".to_string(),
                name: "101".to_string(),
                floor: 1,
            },
            RoomEntry {
                key: "2-d201".to_string(),
                name: "201".to_string(),
                floor: 2,
            },
        ]
    }

    #[test]
    fn rooms_are_grouped_by_floor() {
        let text = OutputFormat::Text.render_rooms(&rooms()).unwrap();
        assert_eq!(
            text,
            "Floor 1:\n  1-d101       101\nFloor 2:\n  2-d201       201\n"
        );

        let compact = OutputFormat::Compact.render_rooms(&rooms()).unwrap();
        assert_eq!(compact, "Floor 1:\n  101\nFloor 2:\n  201\n");
    }

    #[test]
    fn rooms_render_as_json_array() {
        let json = OutputFormat::Json.render_rooms(&rooms()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["key"], "2-d201");
        assert_eq!(value[1]["floor"], 2);
    }

    #[test]
    fn empty_room_list_says_so() {
        let text = OutputFormat::Text.render_rooms(&[]).unwrap();
        assert_eq!(text, "No rooms found.\n");
    }

    #[test]
    fn stats_list_floors_in_text_mode() {
        let stats = GraphStats {
            nodes: 3,
            stairs: 1,
            walk_edges: 2,
            stair_edges: 0,
            per_floor: BTreeMap::from([(
                1,
                FloorStats {
                    nodes: 3,
                    stairs: 1,
                    walk_edges: 2,
                },
            )]),
        };
        let text = OutputFormat::Text.render_stats(&stats).unwrap();
        assert!(text.starts_with("Graph: 3 nodes (1 stairs), 2 walk edges, 0 stair edges\n"));
        assert!(text.contains("floor 1: 3 nodes, 1 stairs, 2 walk edges"));

        let compact = OutputFormat::Compact.render_stats(&stats).unwrap();
        assert_eq!(compact.lines().count(), 1);
    }
}
