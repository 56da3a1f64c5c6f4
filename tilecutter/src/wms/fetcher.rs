//! Walks the tile grid and requests one map image per tile.

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use tracing::{debug, info};

use crate::geom::Point;
use crate::grid::{FurthestZoom, GridLevel};
use crate::mercator::{self, MercatorProjection, TILE_SIZE};

use super::{FetchError, HttpClient};

/// EPSG code for geographic WGS84 coordinates.
const EPSG_GEOGRAPHIC: u32 = 4326;

/// Default SRS: Simple Mercator as understood by MapServer.
///
/// The right code varies between servers; GeoServer wants 41001.
pub const DEFAULT_SRS: u32 = 54004;

/// Fixed request parameters for one tiling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WmsConfig {
    /// Base URL of the WMS endpoint.
    pub base_url: String,
    /// Comma-separated layer names.
    pub layers: String,
    /// Comma-separated style names.
    pub styles: String,
    /// Image format requested from the service; also the tile file extension.
    pub format: String,
    /// Encode bounding boxes as geographic degrees instead of Mercator meters.
    pub geographic: bool,
    /// Spatial reference system for meter-mode requests.
    pub srs: u32,
}

impl WmsConfig {
    /// Creates a configuration with the usual defaults: PNG tiles, no
    /// styles, meter-mode bounding boxes against [`DEFAULT_SRS`].
    pub fn new(base_url: impl Into<String>, layers: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            layers: layers.into(),
            styles: String::new(),
            format: "png".to_string(),
            geographic: false,
            srs: DEFAULT_SRS,
        }
    }

    /// Sets the comma-separated style list.
    pub fn with_styles(mut self, styles: impl Into<String>) -> Self {
        self.styles = styles.into();
        self
    }

    /// Sets the requested image format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Switches bounding boxes to geographic (EPSG:4326) degrees.
    pub fn with_geographic(mut self, geographic: bool) -> Self {
        self.geographic = geographic;
        self
    }

    /// Sets the SRS code used in meter mode.
    pub fn with_srs(mut self, srs: u32) -> Self {
        self.srs = srs;
        self
    }

    /// The request template shared by every tile: everything but BBOX.
    fn request_template(&self) -> String {
        let srs = if self.geographic {
            EPSG_GEOGRAPHIC
        } else {
            self.srs
        };
        format!(
            "{}?REQUEST=GetMap&SERVICE=WMS&VERSION=1.1&LAYERS={}&STYLES={}\
             &BGCOLOR=0xFFFFFF&FORMAT=image/{}&TRANSPARENT=TRUE\
             &WIDTH={}&HEIGHT={}&SRS=EPSG:{}&reaspect=false",
            self.base_url, self.layers, self.styles, self.format, TILE_SIZE, TILE_SIZE, srs
        )
    }
}

/// Summary of one fetching run.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Zoom levels actually processed.
    pub zooms: Vec<u8>,
    /// Number of tile files written.
    pub tiles_written: u64,
}

/// Fetches a tile pyramid from a WMS service, one blocking request per tile.
///
/// Tiles are requested in the grid's column-major order and written as
/// `tile_{zoom}_{x}_{y}.{format}` with absolute tile indices. The first
/// failing request or file write aborts the run; partially produced output
/// must be regenerated by re-running.
pub struct WmsFetcher<C: HttpClient> {
    http_client: C,
    config: WmsConfig,
}

impl<C: HttpClient> WmsFetcher<C> {
    /// Creates a fetcher from a transport client and a request configuration.
    pub fn new(http_client: C, config: WmsConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Fetches every tile of every requested zoom level into `output_dir`.
    ///
    /// Zoom levels below the furthest zoom are skipped.
    pub fn run(
        &self,
        furthest: &FurthestZoom,
        zooms: RangeInclusive<u8>,
        output_dir: &Path,
    ) -> Result<FetchReport, FetchError> {
        fs::create_dir_all(output_dir).map_err(|e| FetchError::Io {
            path: output_dir.to_path_buf(),
            source: e,
        })?;

        let template = self.config.request_template();
        let mut report = FetchReport::default();

        for zoom in zooms {
            let Some(level) = GridLevel::from_furthest(furthest, zoom) else {
                debug!(zoom, "zoom level below the furthest zoom, skipping");
                continue;
            };
            let projection = MercatorProjection::new(zoom);
            info!(zoom, tiles = level.total_tiles(), "fetching zoom level");

            for tile in level.tiles() {
                let bbox = self.tile_bbox(&projection, tile.index);
                let url = format!("{}&BBOX={}", template, bbox);
                debug!(%url, "requesting tile");

                let body = self.http_client.get(&url)?;
                let path = output_dir.join(format!(
                    "tile_{}_{}_{}.{}",
                    zoom, tile.index.x, tile.index.y, self.config.format
                ));
                fs::write(&path, &body).map_err(|e| FetchError::Io {
                    path: path.clone(),
                    source: e,
                })?;
                report.tiles_written += 1;
            }
            report.zooms.push(zoom);
        }
        Ok(report)
    }

    /// Bounding box of one absolute tile index: south-west then north-east.
    fn tile_bbox(&self, projection: &MercatorProjection, index: Point) -> String {
        let tile = i64::from(TILE_SIZE);
        // Pixel Y grows southward, so the south edge is the larger pixel row.
        let sw_px = Point::new(index.x * tile, (index.y + 1) * tile);
        let ne_px = Point::new((index.x + 1) * tile, index.y * tile);

        let sw = projection.pixel_to_latlng(sw_px);
        let ne = projection.pixel_to_latlng(ne_px);

        if self.config.geographic {
            format!("{},{},{},{}", sw.lng, sw.lat, ne.lng, ne.lat)
        } else {
            let (sw_x, sw_y) = mercator::latlng_to_meters(sw);
            let (ne_x, ne_y) = mercator::latlng_to_meters(ne);
            format!("{},{},{},{}", sw_x, sw_y, ne_x, ne_y)
        }
    }
}
