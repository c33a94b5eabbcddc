//! Unified error type for surgistream.
//!
//! Resolution, range parsing, and file reads all funnel their failures into
//! [`Error`], which maps onto an HTTP status via [`Error::http_status`].

use std::path::PathBuf;

/// Every way a media request can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The identifier is empty or unsafe (traversal, absolute path, NUL).
    #[error("Invalid path '{identifier}': {reason}")]
    InvalidPath {
        /// The identifier as supplied by the caller.
        identifier: String,
        /// Why it was rejected.
        reason: String,
    },

    /// No candidate storage root holds a usable file for the identifier.
    #[error("Media not found: {identifier} (searched {} locations)", .searched.len())]
    NotFound {
        /// The identifier as supplied by the caller.
        identifier: String,
        /// Every candidate path that was probed, in search order.
        searched: Vec<PathBuf>,
    },

    /// The Range header cannot be satisfied for a file of this size.
    #[error("Range not satisfiable: '{range}' for {size} bytes")]
    UnsatisfiableRange {
        /// The raw header value.
        range: String,
        /// Size of the resolved file.
        size: u64,
    },

    /// Reading a resolved file failed.
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal failures.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::InvalidPath { .. } => 400,
            Error::NotFound { .. } => 404,
            Error::UnsatisfiableRange { .. } => 416,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Short machine-readable code for API payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidPath { .. } => "invalid_path",
            Error::NotFound { .. } => "not_found",
            Error::UnsatisfiableRange { .. } => "range_not_satisfiable",
            Error::Io { .. } => "io_error",
            Error::Internal(_) => "internal_error",
        }
    }

    /// Convenience constructor for [`Error::InvalidPath`].
    pub fn invalid_path(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(identifier: impl Into<String>, searched: Vec<PathBuf>) -> Self {
        Error::NotFound {
            identifier: identifier.into(),
            searched,
        }
    }

    /// Convenience constructor for [`Error::UnsatisfiableRange`].
    pub fn unsatisfiable(range: impl Into<String>, size: u64) -> Self {
        Error::UnsatisfiableRange {
            range: range.into(),
            size,
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
