//! Structured error types for dlprof
//!
//! Using thiserror for automatic Display implementation and error chaining.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Failed to read trace file {path}")]
    TraceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read symbol file {path}")]
    SymbolsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write heatmap {path}")]
    HeatmapWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Nested-list reconstruction failure (non-fatal, the directive is dropped)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("malformed display list: no open list at depth {depth} ({open} open)")]
    Malformed { depth: usize, open: usize },
}

#[derive(Error, Debug)]
pub enum BitmapError {
    #[error("Bitmap truncated: need {needed} bytes, have {actual}")]
    Truncated { needed: usize, actual: usize },

    #[error("Not a bitmap (missing 'BM' signature)")]
    BadMagic,

    #[error("Unsupported bitmap header size {0}")]
    UnsupportedHeader(u32),

    #[error("Unsupported bitmap depth {0} bpp")]
    UnsupportedDepth(u16),

    #[error("Pixel buffer holds {actual} bytes, expected {expected} for {width}x{height}")]
    DimensionMismatch { width: usize, height: usize, expected: usize, actual: usize },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_list_display() {
        let err = ListError::Malformed { depth: 2, open: 1 };
        assert_eq!(err.to_string(), "malformed display list: no open list at depth 2 (1 open)");
    }

    #[test]
    fn test_trace_read_error_names_path() {
        let err = AnalyzerError::TraceRead {
            path: PathBuf::from("missing.log"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("missing.log"));
    }

    #[test]
    fn test_heatmap_write_error_keeps_io_source() {
        let err = AnalyzerError::HeatmapWrite {
            path: PathBuf::from("out/pixel_cost.bmp"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(err.to_string(), "Failed to write heatmap out/pixel_cost.bmp");
        assert!(std::error::Error::source(&err).is_some());
    }
}
