mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use floorpath_cli::output::OutputFormat;
use floorpath_lib::RouteRequest;

use crate::commands::graph::handle_graph_command;
use crate::commands::rooms::handle_rooms_command;
use crate::commands::route::handle_route_command;

#[derive(Parser, Debug)]
#[command(author, version, about = "Indoor routing across building floors")]
struct Cli {
    /// Override the building data directory (or the path to its building.json).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the rooms that can be used as route endpoints.
    Rooms,
    /// Compute a route between two rooms.
    Route {
        /// Starting room key (`<floor>-<id>`) or name.
        #[arg(long = "from")]
        from: String,
        /// Destination room key or name.
        #[arg(long = "to")]
        to: String,
    },
    /// Compute a route to the nearest room of a facility category.
    Nearest {
        /// Starting room key (`<floor>-<id>`) or name.
        #[arg(long = "from")]
        from: String,
        /// Facility category declared by the building (for example `restroom`).
        #[arg(long)]
        category: String,
    },
    /// Print routing graph statistics.
    Graph,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let target = cli.data_dir.as_deref();

    match cli.command {
        Command::Rooms => handle_rooms_command(target, cli.format),
        Command::Route { from, to } => {
            handle_route_command(target, cli.format, &RouteRequest::to_room(from, to))
        }
        Command::Nearest { from, category } => handle_route_command(
            target,
            cli.format,
            &RouteRequest::to_facility(from, category),
        ),
        Command::Graph => handle_graph_command(target, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
