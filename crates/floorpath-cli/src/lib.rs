//! Floorpath CLI library.
//!
//! Output formatting shared by the `floorpath-cli` subcommands.

pub mod output;
