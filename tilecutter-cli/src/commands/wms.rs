//! Wms subcommand - fetch map tiles from a WMS server.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use clap::Args;
use tilecutter::grid::FurthestZoom;
use tilecutter::wms::{ReqwestClient, WmsConfig, WmsFetcher, DEFAULT_SRS};

use super::common::{parse_grid_setting, parse_zoom_range};
use crate::error::CliError;

/// Arguments for the wms subcommand.
#[derive(Args, Debug)]
pub struct WmsArgs {
    /// Directory where the tiles will be created
    #[arg(short, long = "output")]
    pub output_dir: PathBuf,

    /// URL of the WMS server
    #[arg(short, long)]
    pub url: String,

    /// Comma-separated layer names
    #[arg(short, long)]
    pub layers: String,

    /// Comma-separated style names
    #[arg(short, long, default_value = "")]
    pub styles: String,

    /// Image format to request (gif, jpeg, png, ...)
    #[arg(short, long, default_value = "png")]
    pub format: String,

    /// Inclusive range of zoom levels to generate
    #[arg(short, long = "zooms", value_name = "START..END", value_parser = parse_zoom_range, default_value = "0..17")]
    pub zoom_range: RangeInclusive<u8>,

    /// Corner tile indices, furthest zoom, grid width and height in tiles
    #[arg(short, long = "grid-setting", value_name = "X,Y,ZOOM,WIDTH,HEIGHT", value_parser = parse_grid_setting)]
    pub grid_setting: FurthestZoom,

    /// Query with geographic (EPSG:4326) bounding boxes instead of
    /// Mercator meters
    #[arg(short = 'w', long)]
    pub geographic: bool,

    /// SRS id of a Simple Mercator projection understood by the server
    /// (MapServer: 54004, GeoServer: 41001)
    #[arg(short = 'e', long = "epsg", value_name = "SRS", default_value_t = DEFAULT_SRS)]
    pub srs: u32,
}

/// Run the wms subcommand.
pub fn run(args: WmsArgs) -> Result<(), CliError> {
    tracing::debug!(?args, "wms subcommand arguments");
    let config = WmsConfig::new(&args.url, &args.layers)
        .with_styles(&args.styles)
        .with_format(&args.format)
        .with_geographic(args.geographic)
        .with_srs(args.srs);

    println!("TileCutter WMS Tiler v{}", tilecutter::VERSION);
    println!("Server:  {}", args.url);
    println!("Layers:  {}", args.layers);
    println!("Zooms:   {}..{}", args.zoom_range.start(), args.zoom_range.end());
    println!(
        "BBoxes:  {}",
        if args.geographic {
            "geographic (EPSG:4326)".to_string()
        } else {
            format!("Mercator meters (EPSG:{})", args.srs)
        }
    );
    println!();

    let client = ReqwestClient::new()?;
    let fetcher = WmsFetcher::new(client, config);
    let report = fetcher.run(&args.grid_setting, args.zoom_range.clone(), &args.output_dir)?;

    println!(
        "Fetched {} tiles across {} zoom level(s)",
        report.tiles_written,
        report.zooms.len()
    );
    Ok(())
}
