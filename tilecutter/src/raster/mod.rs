//! Raster tile slicer.
//!
//! Consumes one pre-georegistered source image per zoom level and slices it
//! into the 256×256 tiles of the pyramid. The source image is scaled,
//! composited onto a background canvas sized to a whole number of tiles, and
//! cut along the tile grid. Decoding, scaling and encoding are delegated to
//! the `image` crate.

mod error;
mod tiler;

pub use error::SliceError;
pub use tiler::{ImageTiler, TileParam, TilingReport, DEFAULT_BACKGROUND};
