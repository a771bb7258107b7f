//! Error types for the motion coach library.

use thiserror::Error;

/// Main error type for the library
///
/// Per-frame problems (missing landmarks, degenerate geometry) never surface
/// here; they are skipped where they are detected.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filter initialization error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Detector profile is inconsistent
    #[error("Detector error: {0}")]
    DetectorError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Landmark trace could not be parsed
    #[error("Trace error: {0}")]
    TraceError(String),

    /// Generic I/O error with description
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
