//! Top-level error types for the packager binary.
//!
//! Wraps CLI argument errors and packaging errors into a single type that the
//! process boundary can print as one diagnostic line.

use thiserror::Error;

/// Result type alias for top-level operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Main error type for the packager binary
#[derive(Error, Debug)]
pub enum PackagerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Packaging errors
    #[error("{0}")]
    Packaging(#[from] crate::packager::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}
