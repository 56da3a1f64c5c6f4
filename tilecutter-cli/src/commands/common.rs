//! Shared value parsers for CLI arguments.
//!
//! The structured options (zoom range, tile placement, grid setting,
//! background color) arrive as small comma- or dot-separated tuples; each
//! parser here maps one flag to a typed value and a clear error message for
//! clap to report.

use std::ops::RangeInclusive;

use tilecutter::geom::Point;
use tilecutter::grid::FurthestZoom;
use tilecutter::raster::TileParam;

/// Parses an inclusive zoom range written as `start..end`.
pub fn parse_zoom_range(s: &str) -> Result<RangeInclusive<u8>, String> {
    let (start, end) = s
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got '{}'", s))?;
    let start: u8 = start
        .parse()
        .map_err(|_| format!("invalid zoom '{}'", start))?;
    let end: u8 = end.parse().map_err(|_| format!("invalid zoom '{}'", end))?;
    if start > end {
        return Err(format!("zoom range {}..{} is reversed", start, end));
    }
    Ok(start..=end)
}

/// Parses `corner_x,corner_y,zoom,padding_x,padding_y,scale`.
pub fn parse_tile_param(s: &str) -> Result<TileParam, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 6 {
        return Err(format!(
            "expected X,Y,ZOOM,PAD_X,PAD_Y,SCALE (6 values), got {}",
            parts.len()
        ));
    }
    let corner_x = parse_index(parts[0], "corner x")?;
    let corner_y = parse_index(parts[1], "corner y")?;
    let zoom = parse_zoom(parts[2])?;
    let pad_x = parse_index(parts[3], "padding x")?;
    let pad_y = parse_index(parts[4], "padding y")?;
    let scale: f64 = parts[5]
        .parse()
        .map_err(|_| format!("invalid scale '{}'", parts[5]))?;
    if !(scale.is_finite() && scale > 0.0) {
        return Err(format!("scale must be positive, got {}", scale));
    }
    Ok(TileParam::new(
        Point::new(corner_x, corner_y),
        zoom,
        Point::new(pad_x, pad_y),
        scale,
    ))
}

/// Parses `corner_x,corner_y,zoom,width_tiles,height_tiles`.
pub fn parse_grid_setting(s: &str) -> Result<FurthestZoom, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 5 {
        return Err(format!(
            "expected X,Y,ZOOM,WIDTH,HEIGHT (5 values), got {}",
            parts.len()
        ));
    }
    let corner_x = parse_index(parts[0], "corner x")?;
    let corner_y = parse_index(parts[1], "corner y")?;
    let zoom = parse_zoom(parts[2])?;
    let width = parse_index(parts[3], "width")?;
    let height = parse_index(parts[4], "height")?;
    Ok(FurthestZoom::new(
        Point::new(corner_x, corner_y),
        zoom,
        Point::new(width, height),
    ))
}

/// Parses a background color written as `r,g,b,a` with 0-255 components.
pub fn parse_background(s: &str) -> Result<[u8; 4], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 4 {
        return Err(format!("expected R,G,B,A (4 values), got {}", parts.len()));
    }
    let mut color = [0u8; 4];
    for (slot, part) in color.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("invalid color component '{}'", part))?;
    }
    Ok(color)
}

fn parse_index(s: &str, what: &str) -> Result<i64, String> {
    let value: i64 = s.parse().map_err(|_| format!("invalid {} '{}'", what, s))?;
    if value < 0 {
        return Err(format!("{} must be non-negative, got {}", what, value));
    }
    Ok(value)
}

fn parse_zoom(s: &str) -> Result<u8, String> {
    s.parse().map_err(|_| format!("invalid zoom '{}'", s))
}
