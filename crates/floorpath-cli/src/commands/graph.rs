//! Graph command handler printing routing graph statistics.

use std::path::Path;

use anyhow::Result;

use floorpath_cli::output::OutputFormat;

pub fn handle_graph_command(target: Option<&Path>, format: OutputFormat) -> Result<()> {
    let building = super::load(target)?;
    let graph = building.build_graph();
    print!("{}", format.render_stats(&graph.stats())?);
    Ok(())
}
