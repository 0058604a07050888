use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::FloorNumber;
use crate::graph::NodeId;

/// Convenient result alias for the floorpath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A node identifier passed to the router does not exist in the graph.
    #[error("graph node {id} not found")]
    NodeNotFound { id: NodeId },

    /// Raised when no route could be found between two rooms.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when no instance of a facility category could be reached.
    #[error("no reachable {category} found")]
    NoFacilityRoute { category: String },

    /// Raised when a floor holds no graph node to anchor a door onto.
    #[error("floor {floor} has no routing nodes")]
    NoNearbyNode { floor: FloorNumber },

    /// Raised when a room could not be resolved from a key or display name.
    #[error("unknown room: {name}{}", with_hint(.suggestions))]
    UnknownRoom {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a room key is not of the `{floor}-{id}` form.
    #[error("invalid room key '{value}'; expected <floor>-<id>")]
    InvalidRoomKey { value: String },

    /// Raised when a facility category is not declared by the building.
    #[error("unknown facility category '{category}' (known: {})", format_known(.known))]
    UnknownFacility {
        category: String,
        known: Vec<String>,
    },

    /// Raised when a room-to-room request names the same room twice.
    #[error("start and destination are the same room ({room})")]
    SameEndpoints { room: String },

    /// Raised when routing configuration values are unusable.
    #[error("invalid routing configuration: {message}")]
    InvalidConfig { message: String },

    /// The building manifest could not be found.
    #[error("building manifest not found at {}", .path.display())]
    BuildingNotFound { path: PathBuf },

    /// No suitable data directory could be resolved for this platform.
    #[error("failed to resolve a data directory for building files")]
    DataDirUnavailable,

    /// A JSON document could not be parsed.
    #[error("failed to parse {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A "Did you mean" question naming the suggested rooms, if there are any.
///
/// `["a"]` reads `Did you mean 'a'?` and `["a", "b", "c"]` reads
/// `Did you mean 'a', 'b' or 'c'?`.
pub fn suggestion_hint(suggestions: &[String]) -> Option<String> {
    let (last, rest) = suggestions.split_last()?;
    let mut hint = String::from("Did you mean ");
    if !rest.is_empty() {
        let quoted: Vec<String> = rest.iter().map(|name| format!("'{name}'")).collect();
        hint.push_str(&quoted.join(", "));
        hint.push_str(" or ");
    }
    hint.push_str(&format!("'{last}'?"));
    Some(hint)
}

fn with_hint(suggestions: &[String]) -> String {
    suggestion_hint(suggestions)
        .map(|hint| format!(". {hint}"))
        .unwrap_or_default()
}

fn format_known(known: &[String]) -> String {
    if known.is_empty() {
        "none".to_string()
    } else {
        known.join(", ")
    }
}
