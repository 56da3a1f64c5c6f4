//! TileCutter CLI - generate slippy-map tile pyramids.
//!
//! Two subcommands cover the two tile sources: `image` slices local
//! pre-georegistered rasters, `wms` fetches rendered tiles from a Web Map
//! Service. Both share the projection and grid logic of the `tilecutter`
//! library.

mod commands;
mod error;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tilecutter",
    version,
    about = "Tile pyramid generator for slippy-map viewers",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Slice pre-georegistered raster images into map tiles
    Image(commands::image::ImageArgs),
    /// Fetch map tiles from a WMS server by bounding box
    Wms(commands::wms::WmsArgs),
}

fn main() {
    tilecutter::telemetry::init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Image(args) => commands::image::run(args),
        Commands::Wms(args) => commands::wms::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
