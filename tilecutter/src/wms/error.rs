//! Error types for the WMS tile fetcher.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while fetching tiles from a WMS service.
///
/// Any of these aborts the whole run: a tile set with holes is useless to a
/// map viewer, so there is no skip-and-continue.
#[derive(Debug)]
pub enum FetchError {
    /// The HTTP client could not be built or the request failed outright.
    Http(String),

    /// The service answered with a non-success status.
    Status { url: String, status: u16 },

    /// Writing a tile file or creating the output directory failed.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Http(msg) => write!(f, "HTTP error: {}", msg),
            FetchError::Status { url, status } => {
                write!(f, "HTTP {} from {}", status, url)
            }
            FetchError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
