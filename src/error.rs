//! Common error types for creativity-sync

use thiserror::Error;

/// Common result type for creativity-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the resource client and session operations
///
/// Every transport and backend failure is returned as a typed value so
/// callers can decide whether to retry the user action; no failure is
/// fatal or swallowed below the call site.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure (connection refused, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend returned a non-2xx status
    #[error("Backend error {0}: {1}")]
    Backend(u16, String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation is gated behind admin mode
    #[error("Admin mode required")]
    AdminRequired,
}
