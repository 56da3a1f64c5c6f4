//! TileCutter - Tile pyramid generation for slippy-map viewers
//!
//! This library produces the fixed-size square tiles consumed by slippy-map
//! viewers using the standard spherical-Mercator tiling scheme (256-pixel
//! tiles, tile counts doubling per zoom level). Tiles come from one of two
//! sources sharing the same projection and grid logic:
//!
//! - [`raster::ImageTiler`] slices pre-georegistered source images into tiles
//! - [`wms::WmsFetcher`] requests each tile from a WMS server by bounding box
//!
//! The building blocks are exposed directly: [`geom`] for point arithmetic,
//! [`mercator`] for the projection math, and [`grid`] for enumerating the
//! tile rectangle of each zoom level.

pub mod geom;
pub mod grid;
pub mod mercator;
pub mod raster;
pub mod telemetry;
pub mod wms;

pub use geom::{LatLng, Point};
pub use grid::{FurthestZoom, GridLevel, GridTile};
pub use mercator::{MercatorProjection, TILE_SIZE};
pub use raster::{ImageTiler, SliceError, TileParam};
pub use wms::{FetchError, HttpClient, ReqwestClient, WmsConfig, WmsFetcher};

/// Crate version, surfaced for CLI banners.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
