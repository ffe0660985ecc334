//! Typed failures for the prediction pipeline.
//!
//! `Service` and `Transport` are displayed identically to the user; the
//! distinction only matters for diagnostics. `UnknownModel` is a
//! configuration error and is raised before any network I/O happens.

use thiserror::Error;

/// Failures raised by the prediction client.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The requested model name is not in the fixed model table.
    #[error("unknown model '{0}'")]
    UnknownModel(String),

    /// The service reported an unsuccessful response. The description
    /// is service-supplied and surfaced verbatim.
    #[error("prediction service error: {description}")]
    Service { description: String },

    /// Frame encoding or network failure.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl From<ureq::Error> for PredictError {
    fn from(err: ureq::Error) -> Self {
        PredictError::Transport(err.to_string())
    }
}

impl From<image::ImageError> for PredictError {
    fn from(err: image::ImageError) -> Self {
        PredictError::Transport(format!("frame encoding failed: {err}"))
    }
}

impl From<std::io::Error> for PredictError {
    fn from(err: std::io::Error) -> Self {
        PredictError::Transport(format!("response read failed: {err}"))
    }
}

/// Failures in the pure coordinate mapper.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// Callers must never pass zero or non-finite dimensions.
    #[error("camera and viewport dimensions must be positive and finite")]
    DegenerateDimensions,
}

/// Failures that abort the capture loop before it starts.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The frame source could not be acquired. The loop never runs.
    #[error("camera device unavailable: {0}")]
    DeviceUnavailable(String),
}
