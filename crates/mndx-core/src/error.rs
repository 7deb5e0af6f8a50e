//! Error types for root-file enumeration

use std::collections::TryReserveError;
use thiserror::Error;

/// Result type alias for enumeration operations
pub type MndxResult<T> = Result<T, MndxError>;

/// Error type for enumeration operations
///
/// Every variant maps to a stable, nonzero status code that identifies the
/// failing stage at the C ABI. `0` is reserved for success.
#[derive(Error, Debug)]
pub enum MndxError {
    /// The root file failed header/version validation or is malformed
    #[error("format error: {0}")]
    Format(String),

    /// A heap allocation (session, cursor, result array, entry name) failed
    #[error("allocation failed: {0}")]
    Allocation(String),

    /// The root handler reported a fault while the search was running
    #[error("search error: {0}")]
    Search(String),

    /// A pointer or length passed across the C ABI was invalid
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An entry name cannot be represented as a C string
    #[error("invalid entry name: {0}")]
    InvalidEntryName(String),

    /// The search yielded a different number of entries than the handler declared
    #[error("entry count mismatch: declared {declared}, yielded {yielded}")]
    EntryCountMismatch { declared: u32, yielded: u32 },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl MndxError {
    /// Returns a status code suitable for FFI
    pub fn status_code(&self) -> i32 {
        match self {
            MndxError::Format(_) => 1,
            MndxError::Allocation(_) => 2,
            MndxError::Search(_) => 3,
            MndxError::InvalidArgument(_) => 4,
            MndxError::InvalidEntryName(_) => 5,
            MndxError::EntryCountMismatch { .. } => 6,
            MndxError::Config(_) => 7,
            MndxError::Internal(_) => 8,
        }
    }

    /// Create an error from a status code and message (for host-side decoding)
    pub fn from_code(code: i32, message: String) -> Self {
        match code {
            1 => MndxError::Format(message),
            2 => MndxError::Allocation(message),
            3 => MndxError::Search(message),
            4 => MndxError::InvalidArgument(message),
            5 => MndxError::InvalidEntryName(message),
            6 => MndxError::EntryCountMismatch {
                declared: 0,
                yielded: 0,
            },
            7 => MndxError::Config(message),
            _ => MndxError::Internal(message),
        }
    }
}

impl From<serde_json::Error> for MndxError {
    fn from(err: serde_json::Error) -> Self {
        MndxError::Config(err.to_string())
    }
}

impl From<TryReserveError> for MndxError {
    fn from(err: TryReserveError) -> Self {
        MndxError::Allocation(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
