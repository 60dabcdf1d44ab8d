//! Error types for caller contract violations.
//!
//! Malformed *data* never produces an error anywhere in this crate; bad rows
//! are skipped or defaulted per the tolerant-input policy. `CoreError` exists
//! only for misuse of the API surface itself, which should fail fast.

use thiserror::Error;

/// Result type for fallible core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Caller contract violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Grid dimensions must both be at least 1.
    #[error("invalid grid dimensions: {width}x{height} (both must be >= 1)")]
    InvalidGridDimensions { width: usize, height: usize },

    /// Bounding box must have min < max on both axes.
    #[error("invalid bounds: lat [{lat_min}, {lat_max}], lon [{lon_min}, {lon_max}]")]
    InvalidBounds {
        lat_min: f64,
        lat_max: f64,
        lon_min: f64,
        lon_max: f64,
    },

    /// The ingest envelope was not valid JSON or not an array of records.
    /// Carries the path to the offending element when known.
    #[error("invalid record payload at `{path}`: {message}")]
    InvalidRecordJson { path: String, message: String },
}
