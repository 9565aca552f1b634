//! Error types for packaging operations.
//!
//! Provides contextual error chaining, filesystem-specific errors, and the
//! fatal error kinds of the packaging pipeline. Every error is fatal at its
//! point of origin: it propagates through the recipe to the orchestrator,
//! which cleans up the output directory and surfaces the error unchanged.
//!
//! # Features
//!
//! - **Context trait**: Add context to errors similar to anyhow
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//! - **bail! macro**: Early return with formatted error messages

use std::{
    fmt::Display,
    io,
    path::{self, PathBuf},
    process::ExitStatus,
};
use thiserror::Error as DeriveError;

/// Errors returned by the packager.
///
/// This enum covers all error conditions that can occur during packaging,
/// including I/O errors, reserved-slot patching errors, and failures of
/// external collaborator tools.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Automatically includes the path that caused the error for better
    /// diagnostics. Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "reading config file")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// Reserved config slot marker not found in a target binary.
    ///
    /// The binary was built without an embedded config slot, or the wrong
    /// file was handed to the patcher. Always a logic error upstream.
    #[error("config marker not found in {path}")]
    MarkerNotFound {
        /// Binary that was searched
        path: PathBuf,
    },

    /// Sanitized config does not fit the reserved slot.
    ///
    /// The slot capacity is fixed when the binary is built; the config must
    /// be shrunk or the binary rebuilt with a larger slot.
    #[error(
        "sanitized config is {len} bytes but the reserved slot in {path} holds only {capacity}"
    )]
    ConfigTooLarge {
        /// Binary containing the slot
        path: PathBuf,
        /// Sanitized config length in bytes
        len: usize,
        /// Declared slot capacity in bytes
        capacity: usize,
    },

    /// Build target tag is not one of the supported platforms.
    #[error("unsupported build target: {0}")]
    UnsupportedTarget(String),

    /// Child process could not be spawned.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command that failed to execute
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// External tool exited with a non-zero status.
    #[error("{tool} failed with exit status {status}")]
    ToolFailed {
        /// Tool that was invoked
        tool: String,
        /// Exit status reported by the OS
        status: ExitStatus,
    },

    /// Generic I/O error.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// Error walking a directory tree (copy and archive steps).
    #[error("{0}")]
    Walkdir(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripPrefix(#[from] path::StripPrefixError),

    /// ZIP archive creation error.
    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),

    /// Generic error with custom message.
    #[error("{0}")]
    Generic(String),
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with the packager's [`Error`]
/// type. Works with both `Result<T>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::Generic(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::Generic(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
///
/// Wraps I/O errors with the path that caused them. The `context` should be a
/// present-tense verb phrase describing the operation, e.g. "reading config
/// file", "creating output directory", "copying binary".
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Macro for early return with an error.
///
/// Converts the message into a [`Error::Generic`] and returns immediately.
///
/// # Examples
///
/// ```ignore
/// bail!("operation failed");
/// bail!("invalid value: {}", value);
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::packager::error::Error::Generic($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::packager::error::Error::Generic($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::packager::error::Error::Generic(format!($fmt, $($arg)*)))
    };
}
