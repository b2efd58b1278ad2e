//! Error types for the civic-search crate.
//!
//! Provider-level and upstream-level variants are absorbed into response
//! telemetry by the aggregator and the live-API service. Only
//! [`SearchError::Validation`] and [`SearchError::Aggregation`] ever reach a
//! caller of a search entry point. No API keys appear in error messages.

/// Errors that can occur during federated or region-scoped search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A provider did not settle within its timeout window.
    #[error("Provider timeout")]
    ProviderTimeout,

    /// A provider rejected the request.
    #[error("{0}")]
    Provider(String),

    /// The external search API failed (network, status, timeout, payload).
    #[error("upstream API error: {0}")]
    Upstream(String),

    /// The merge/sort/paginate pipeline itself failed.
    #[error("aggregation failed: {0}")]
    Aggregation(String),

    /// The request is malformed (e.g. empty query).
    #[error("invalid request: {0}")]
    Validation(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for civic-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
