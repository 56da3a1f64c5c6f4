//! CLI error type.

use std::fmt;

use tilecutter::raster::SliceError;
use tilecutter::wms::FetchError;

/// Errors surfaced to the operator by the CLI.
#[derive(Debug)]
pub enum CliError {
    /// Invalid or inconsistent command-line configuration.
    Config(String),

    /// The raster slicer failed.
    Slice(SliceError),

    /// The WMS fetcher failed.
    Fetch(FetchError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Slice(e) => write!(f, "Tiling failed: {}", e),
            CliError::Fetch(e) => write!(f, "Fetching failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(_) => None,
            CliError::Slice(e) => Some(e),
            CliError::Fetch(e) => Some(e),
        }
    }
}

impl From<SliceError> for CliError {
    fn from(e: SliceError) -> Self {
        CliError::Slice(e)
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::Fetch(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CliError::Config("unknown zoom range".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("unknown zoom range"));
    }

    #[test]
    fn test_from_slice_error() {
        let err: CliError = SliceError::NoInput.into();
        assert!(matches!(err, CliError::Slice(_)));
    }
}
