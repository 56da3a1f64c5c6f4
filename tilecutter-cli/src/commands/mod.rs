//! CLI subcommand implementations.

pub mod common;
pub mod image;
pub mod wms;
