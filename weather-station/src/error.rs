//! Errors raised while acquiring station traffic

use thiserror::Error;

/// Failures of the transport or output sink.
///
/// Decoding problems are not errors here; they travel inside
/// [`sen0186::Reading`].
#[derive(Error, Debug)]
pub enum StationError {
    /// Read or write failure on the line source or output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serial port could not be opened or configured.
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// Reading could not be encoded as JSON.
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for station operations.
pub type StationResult<T> = Result<T, StationError>;
