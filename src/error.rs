use std::path::PathBuf;

use thiserror::Error;

/// The capture source could not be opened. Fatal for the loop, never retried.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture source {source_name} is unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },
    #[error("failed to list frames in {path}: {source}")]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("threshold step must be greater than zero")]
    ZeroDelta,
    #[error("area bounds must be finite and non-negative (min {min}, max {max})")]
    InvalidAreaBound { min: f64, max: f64 },
    #[error("min_area {min} must be strictly below max_area {max}")]
    EmptyAreaRange { min: f64, max: f64 },
}

#[derive(Debug, Error)]
pub enum PresentError {
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write frame {path}: {source}")]
    WriteFrame {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Error)]
pub enum LoopError {
    #[error(transparent)]
    Acquisition(#[from] CaptureError),
    #[error(transparent)]
    Presentation(#[from] PresentError),
}
