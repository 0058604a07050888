//! Rooms command handler listing the rooms a route can start or end at.

use std::path::Path;

use anyhow::Result;

use floorpath_cli::output::{OutputFormat, RoomEntry};

pub fn handle_rooms_command(target: Option<&Path>, format: OutputFormat) -> Result<()> {
    let building = super::load(target)?;
    let rooms: Vec<RoomEntry> = building
        .selectable_rooms()
        .into_iter()
        .map(RoomEntry::from)
        .collect();
    print!("{}", format.render_rooms(&rooms)?);
    Ok(())
}
