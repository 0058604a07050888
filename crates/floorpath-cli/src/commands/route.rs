//! Route command handler for room-to-room and nearest-facility routes.

use std::path::Path;

use anyhow::{Context, Result};

use floorpath_lib::error::suggestion_hint;
use floorpath_lib::{plan_route, Error as RouteError, RouteRequest, RouteSummary};

use floorpath_cli::output::OutputFormat;

/// Handle the `route` and `nearest` subcommands.
pub fn handle_route_command(
    target: Option<&Path>,
    format: OutputFormat,
    request: &RouteRequest,
) -> Result<()> {
    let building = super::load(target)?;
    let graph = building.build_graph();

    let plan = match plan_route(&building, &graph, request) {
        Ok(plan) => plan,
        Err(err) => return Err(handle_route_failure(request, err)),
    };

    let summary = RouteSummary::from_plan(&graph, &plan)
        .context("failed to build route summary for display")?;
    print!("{}", format.render_route(&summary)?);
    Ok(())
}

fn handle_route_failure(request: &RouteRequest, err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownRoom { name, suggestions } => {
            anyhow::anyhow!(format_unknown_room_message(&name, &suggestions))
        }
        RouteError::RouteNotFound { start, goal } => anyhow::anyhow!(
            "No route found between {start} and {goal}. The rooms are not connected by any \
             walkway or staircase; check the waypoints near both doors."
        ),
        RouteError::NoFacilityRoute { category } => anyhow::anyhow!(
            "No {category} can be reached from {}. Try another starting room.",
            request.start
        ),
        RouteError::SameEndpoints { room } => {
            anyhow::anyhow!("Start and destination are both {room}; pick two different rooms.")
        }
        RouteError::UnknownFacility { category, known } => {
            let known = if known.is_empty() {
                "none declared".to_string()
            } else {
                known.join(", ")
            };
            anyhow::anyhow!("Unknown facility category '{category}'. Known categories: {known}.")
        }
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_room_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown room '{name}'.");
    if let Some(hint) = suggestion_hint(suggestions) {
        message.push(' ');
        message.push_str(&hint);
    }
    message.push_str(" Run `floorpath-cli rooms` to list rooms.");
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_room_message_lists_suggestions() {
        assert_eq!(
            format_unknown_room_message("Lobbi", &["Lobby".to_string()]),
            "Unknown room 'Lobbi'. Did you mean 'Lobby'? Run `floorpath-cli rooms` to list rooms."
        );
        let message =
            format_unknown_room_message("10", &["101".to_string(), "102".to_string()]);
        assert!(message.contains("Did you mean '101' or '102'?"));
        assert!(format_unknown_room_message("x", &[]).starts_with("Unknown room 'x'. Run"));
    }

    #[test]
    fn other_errors_pass_through() {
        let request = RouteRequest::to_room("a", "b");
        let err = handle_route_failure(&request, RouteError::NodeNotFound { id: 7 });
        assert_eq!(err.to_string(), "graph node 7 not found");
    }
}
