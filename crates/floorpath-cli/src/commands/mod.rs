// Module exports for CLI subcommands
//
// Each module handles one subcommand; main.rs parses arguments and dispatches.

pub mod graph;
pub mod rooms;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use floorpath_lib::{load_building, resolve_data_dir, Building};

/// Resolve the data directory and load the building stored there.
pub fn load(target: Option<&Path>) -> Result<Building> {
    let dir = resolve_data_dir(target).context("failed to resolve the building data directory")?;
    load_building(&dir)
        .with_context(|| format!("failed to load building from {}", dir.display()))
}
