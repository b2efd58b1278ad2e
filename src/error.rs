//! Error types for the civic portal.

use civic_search::SearchError;

/// Top-level error type for the portal composition layer.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// Search core error (validation or pipeline failure).
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Unknown search scope requested.
    #[error("unknown search scope: {0}")]
    Scope(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, PortalError>;
