//! Image subcommand - slice raster images into a tile pyramid.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use clap::Args;
use image::Rgba;
use tilecutter::raster::{ImageTiler, TileParam};

use super::common::{parse_background, parse_tile_param, parse_zoom_range};
use crate::error::CliError;

/// Arguments for the image subcommand.
#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Directory where the tiles will be created
    #[arg(short, long = "output")]
    pub output_dir: PathBuf,

    /// Corner tile indices, furthest zoom, padding in X and Y, scale
    #[arg(short = 'p', long = "tile-param", value_name = "X,Y,ZOOM,PAD_X,PAD_Y,SCALE", value_parser = parse_tile_param)]
    pub tile_param: TileParam,

    /// Image format of the generated tiles (gif, jpeg, png, ...)
    #[arg(short, long, default_value = "png")]
    pub format: String,

    /// Inclusive range of zoom levels to generate
    #[arg(short, long = "zooms", value_name = "START..END", value_parser = parse_zoom_range, default_value = "0..17")]
    pub zoom_range: RangeInclusive<u8>,

    /// Background color components
    #[arg(short, long, value_name = "R,G,B,A", value_parser = parse_background, default_value = "255,255,255,255")]
    pub background: [u8; 4],

    /// Input images, one per zoom level in ascending zoom order
    #[arg(required = true, value_name = "IMAGE")]
    pub input_files: Vec<PathBuf>,
}

/// Run the image subcommand.
pub fn run(args: ImageArgs) -> Result<(), CliError> {
    tracing::debug!(?args, "image subcommand arguments");
    let tiler = ImageTiler::new(&args.output_dir, args.tile_param)
        .with_format(&args.format)?
        .with_background(Rgba(args.background));

    println!("TileCutter Image Tiler v{}", tilecutter::VERSION);
    println!("Output:  {}", args.output_dir.display());
    println!("Zooms:   {}..{}", args.zoom_range.start(), args.zoom_range.end());
    println!("Inputs:  {} file(s)", args.input_files.len());
    println!();

    let report = tiler.run(&args.input_files, args.zoom_range.clone())?;

    println!(
        "Wrote {} tiles across {} zoom level(s)",
        report.tiles_written,
        report.zooms.len()
    );
    Ok(())
}
