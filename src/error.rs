//! Error types for the mouth-breathing monitor.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input data (malformed replay lines, non-finite coordinates)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error (window size, threshold ordering, frame rate)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Frame source could not be started
    #[error("Frame source unavailable: {0}")]
    SourceUnavailable(String),

    /// A single-subscriber frame source was subscribed to twice
    #[error("Frame source already has a subscriber")]
    AlreadySubscribed,

    /// Generic I/O error with description
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
