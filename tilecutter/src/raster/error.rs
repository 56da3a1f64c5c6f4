//! Error types for the raster tile slicer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while slicing source images into tiles.
#[derive(Debug, Error)]
pub enum SliceError {
    /// Decoding, scaling or encoding a raster failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Reading or writing a file or directory failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No input images were supplied.
    #[error("no input images to tile")]
    NoInput,

    /// The requested output format is not a known image file extension.
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
}
