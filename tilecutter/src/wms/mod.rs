//! WMS tile fetcher.
//!
//! Requests each tile of the pyramid from a Web Map Service by bounding box
//! and writes the response bodies as tile files. The grid walk and the
//! projection math are shared with the raster slicer; only the tile source
//! differs. Transport goes through the [`HttpClient`] trait so tests can
//! substitute a mock for the real blocking client.

mod error;
mod fetcher;
mod http;

pub use error::FetchError;
pub use fetcher::{FetchReport, WmsConfig, WmsFetcher, DEFAULT_SRS};
pub use http::{HttpClient, ReqwestClient};

#[cfg(test)]
pub use http::tests::MockHttpClient;
