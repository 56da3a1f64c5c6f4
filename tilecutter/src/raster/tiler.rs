//! Slices pre-georegistered source images into a tile pyramid.

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use tracing::{debug, info, warn};

use crate::geom::Point;
use crate::grid::{FurthestZoom, GridLevel};
use crate::mercator::TILE_SIZE;

use super::SliceError;

/// Default background: opaque white.
pub const DEFAULT_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Placement of the source imagery on the tile grid at the furthest zoom.
///
/// `ul_corner` is the absolute index of the upper-left tile the imagery
/// touches, `padding` the pixel offset of the imagery within that tile, and
/// `scale` a uniform factor applied to every source image before slicing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileParam {
    /// Upper-left tile index covered by the imagery.
    pub ul_corner: Point,
    /// Furthest (coarsest) zoom level of the pyramid.
    pub zoom: u8,
    /// Pixel offset of the imagery from the grid corner, at the furthest zoom.
    pub padding: Point,
    /// Uniform scale applied to every source image.
    pub scale: f64,
}

impl TileParam {
    /// Creates a placement descriptor.
    pub const fn new(ul_corner: Point, zoom: u8, padding: Point, scale: f64) -> Self {
        Self {
            ul_corner,
            zoom,
            padding,
            scale,
        }
    }
}

/// Summary of one slicing run.
#[derive(Debug, Clone, Default)]
pub struct TilingReport {
    /// Zoom levels actually processed.
    pub zooms: Vec<u8>,
    /// Number of 256×256 tiles written.
    pub tiles_written: u64,
}

/// Slices a sorted sequence of per-zoom source images into map tiles.
///
/// Input files are consumed in lexicographic order, one per requested zoom
/// level from the furthest zoom upward; the first file fixes the tile
/// footprint that every level covers. Output tiles are named
/// `tile_{zoom}_{x}_{y}.{ext}` with absolute tile indices, and each level's
/// full padded canvas is kept alongside as `tile_glob_{zoom}.png`.
pub struct ImageTiler {
    output_dir: PathBuf,
    param: TileParam,
    format: ImageFormat,
    extension: String,
    background: Rgba<u8>,
}

impl ImageTiler {
    /// Creates a tiler writing PNG tiles on an opaque white background.
    pub fn new(output_dir: impl Into<PathBuf>, param: TileParam) -> Self {
        Self {
            output_dir: output_dir.into(),
            param,
            format: ImageFormat::Png,
            extension: "png".to_string(),
            background: DEFAULT_BACKGROUND,
        }
    }

    /// Selects the output format by file extension (png, jpeg, gif, ...).
    pub fn with_format(mut self, extension: &str) -> Result<Self, SliceError> {
        self.format = ImageFormat::from_extension(extension)
            .ok_or_else(|| SliceError::UnsupportedFormat(extension.to_string()))?;
        self.extension = extension.to_lowercase();
        Ok(self)
    }

    /// Replaces the background fill color.
    pub fn with_background(mut self, background: Rgba<u8>) -> Self {
        self.background = background;
        self
    }

    /// Slices the input images across the requested zoom range.
    ///
    /// Zoom levels below the furthest zoom are skipped. If the input
    /// sequence runs out before the zoom range does, the run stops early and
    /// reports what was produced; that is a normal termination, not an
    /// error.
    pub fn run(
        &self,
        input_files: &[PathBuf],
        zooms: RangeInclusive<u8>,
    ) -> Result<TilingReport, SliceError> {
        if input_files.is_empty() {
            return Err(SliceError::NoInput);
        }
        fs::create_dir_all(&self.output_dir).map_err(|e| SliceError::Io {
            path: self.output_dir.clone(),
            source: e,
        })?;

        let mut sorted = input_files.to_vec();
        sorted.sort();

        // Whatever the zoom, the tiles must cover the same surface: the
        // furthest zoom's image fixes the grid extent for every level.
        let furthest = FurthestZoom::new(
            self.param.ul_corner,
            self.param.zoom,
            self.dimension_tiles(&sorted[0])?,
        );

        let mut inputs = sorted.iter();
        let mut report = TilingReport::default();

        for zoom in zooms {
            let Some(level) = GridLevel::from_furthest(&furthest, zoom) else {
                debug!(zoom, "zoom level below the furthest zoom, skipping");
                continue;
            };
            let Some(input) = inputs.next() else {
                warn!(zoom, "input images exhausted, stopping early");
                break;
            };
            info!(
                zoom,
                input = %input.display(),
                tiles = level.total_tiles(),
                "slicing zoom level"
            );
            let canvas = self.compose_canvas(input, &level)?;
            report.tiles_written += self.write_tiles(&canvas, &level)?;
            report.zooms.push(zoom);
        }
        Ok(report)
    }

    /// Tile extent needed to cover the scaled first image plus its padding.
    fn dimension_tiles(&self, first: &Path) -> Result<Point, SliceError> {
        let (width, height) = image::image_dimensions(first)?;
        let ending = self.param.padding + scaled_size(width, height, self.param.scale);
        let tile = i64::from(TILE_SIZE);
        Ok(Point::new(
            (ending.x + tile - 1) / tile,
            (ending.y + tile - 1) / tile,
        ))
    }

    /// Decodes the source image and applies the configured uniform scale.
    fn load_scaled(&self, path: &Path) -> Result<RgbaImage, SliceError> {
        let image = image::open(path)?.to_rgba8();
        if (self.param.scale - 1.0).abs() < f64::EPSILON {
            return Ok(image);
        }
        let size = scaled_size(image.width(), image.height(), self.param.scale);
        Ok(imageops::resize(
            &image,
            size.x as u32,
            size.y as u32,
            FilterType::Lanczos3,
        ))
    }

    /// Builds the level's padded canvas with the scaled image composited in.
    fn compose_canvas(&self, input: &Path, level: &GridLevel) -> Result<RgbaImage, SliceError> {
        let scaled = self.load_scaled(input)?;
        let padding = self.param.padding * level.factor();
        let size_px = level.extent() * i64::from(TILE_SIZE);
        let mut canvas =
            RgbaImage::from_pixel(size_px.x as u32, size_px.y as u32, self.background);
        // Straight pixel replacement: the source is authoritative wherever
        // it covers the canvas, the background shows everywhere else.
        imageops::replace(&mut canvas, &scaled, padding.x, padding.y);
        Ok(canvas)
    }

    /// Writes the per-zoom canvas and cuts it into 256×256 tiles.
    fn write_tiles(&self, canvas: &RgbaImage, level: &GridLevel) -> Result<u64, SliceError> {
        let glob_path = self
            .output_dir
            .join(format!("tile_glob_{}.png", level.zoom()));
        canvas.save_with_format(&glob_path, ImageFormat::Png)?;

        let tile = i64::from(TILE_SIZE);
        let mut written = 0;
        for t in level.tiles() {
            let px = t.offset * tile;
            let view = imageops::crop_imm(canvas, px.x as u32, px.y as u32, TILE_SIZE, TILE_SIZE)
                .to_image();
            let path = self.output_dir.join(format!(
                "tile_{}_{}_{}.{}",
                level.zoom(),
                t.index.x,
                t.index.y,
                self.extension
            ));
            debug!(path = %path.display(), "writing tile");
            view.save_with_format(&path, self.format)?;
            written += 1;
        }
        Ok(written)
    }
}

/// Image dimensions after the uniform scale, never collapsing below 1 pixel.
fn scaled_size(width: u32, height: u32, scale: f64) -> Point {
    let w = (f64::from(width) * scale).round().max(1.0);
    let h = (f64::from(height) * scale).round().max(1.0);
    Point::new(w as i64, h as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let image = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        image.save_with_format(&path, ImageFormat::Png).unwrap();
        path
    }

    fn param(padding: (i64, i64), scale: f64) -> TileParam {
        TileParam::new(Point::new(0, 0), 10, Point::new(padding.0, padding.1), scale)
    }

    #[test]
    fn test_scaled_size_rounds_to_nearest() {
        assert_eq!(scaled_size(512, 512, 1.0), Point::new(512, 512));
        assert_eq!(scaled_size(100, 100, 1.918), Point::new(192, 192));
        assert_eq!(scaled_size(3, 3, 0.1), Point::new(1, 1));
    }

    #[test]
    fn test_dimension_tiles_rounds_up_to_whole_tiles() {
        let dir = TempDir::new().unwrap();
        let input = write_test_image(dir.path(), "src.png", 300, 200);

        let tiler = ImageTiler::new(dir.path().join("out"), param((10, 10), 1.0));
        assert_eq!(tiler.dimension_tiles(&input).unwrap(), Point::new(2, 1));

        let tiler = ImageTiler::new(dir.path().join("out"), param((10, 10), 2.0));
        assert_eq!(tiler.dimension_tiles(&input).unwrap(), Point::new(3, 2));
    }

    #[test]
    fn test_dimension_tiles_exact_multiple() {
        let dir = TempDir::new().unwrap();
        let input = write_test_image(dir.path(), "src.png", 512, 256);
        let tiler = ImageTiler::new(dir.path().join("out"), param((0, 0), 1.0));
        assert_eq!(tiler.dimension_tiles(&input).unwrap(), Point::new(2, 1));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let dir = TempDir::new().unwrap();
        let tiler = ImageTiler::new(dir.path().join("out"), param((0, 0), 1.0));
        let result = tiler.run(&[], 10..=10);
        assert!(matches!(result, Err(SliceError::NoInput)));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let dir = TempDir::new().unwrap();
        let result = ImageTiler::new(dir.path(), param((0, 0), 1.0)).with_format("not-a-format");
        assert!(matches!(result, Err(SliceError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_run_skips_zooms_below_reference() {
        let dir = TempDir::new().unwrap();
        let input = write_test_image(dir.path(), "src.png", 256, 256);
        let out = dir.path().join("out");
        let tiler = ImageTiler::new(&out, param((0, 0), 1.0));

        // Zoom range entirely below the furthest zoom: nothing happens.
        let report = tiler.run(&[input], 0..=9).unwrap();
        assert!(report.zooms.is_empty());
        assert_eq!(report.tiles_written, 0);
    }

    #[test]
    fn test_run_stops_when_inputs_run_out() {
        let dir = TempDir::new().unwrap();
        let input = write_test_image(dir.path(), "src.png", 256, 256);
        let out = dir.path().join("out");
        let tiler = ImageTiler::new(&out, param((0, 0), 1.0));

        // One input, three requested levels: only the first is produced.
        let report = tiler.run(&[input], 10..=12).unwrap();
        assert_eq!(report.zooms, vec![10]);
        assert_eq!(report.tiles_written, 1);
        assert!(out.join("tile_10_0_0.png").exists());
        assert!(!out.join("tile_11_0_0.png").exists());
    }

    #[test]
    fn test_padding_scales_with_zoom() {
        let dir = TempDir::new().unwrap();
        // 200x200 at the grid corner: fits one tile at the furthest zoom.
        let coarse = write_test_image(dir.path(), "a.png", 200, 200);
        let fine = write_test_image(dir.path(), "b.png", 400, 400);
        let out = dir.path().join("out");
        let tiler = ImageTiler::new(&out, param((0, 0), 1.0))
            .with_background(Rgba([0, 0, 0, 255]));

        let report = tiler
            .run(&[coarse, fine], 10..=11)
            .unwrap();
        assert_eq!(report.zooms, vec![10, 11]);
        // 1x1 tiles at zoom 10, 2x2 at zoom 11.
        assert_eq!(report.tiles_written, 1 + 4);

        // At zoom 11 the canvas is 512x512 with the image at (0,0); the
        // south-east tile is pure background beyond pixel (400,400).
        let se = image::open(out.join("tile_11_1_1.png")).unwrap().to_rgba8();
        assert_eq!(se.dimensions(), (256, 256));
        assert_eq!(*se.get_pixel(200, 200), Rgba([0, 0, 0, 255]));
        assert_eq!(*se.get_pixel(100, 100), Rgba([10, 20, 30, 255]));
    }
}
