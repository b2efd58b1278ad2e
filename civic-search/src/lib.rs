//! # civic-search
//!
//! Federated search aggregation for the civic information portal.
//!
//! This crate merges results from several independent content providers into
//! one ranked, paginated answer for a single query. It also offers two
//! single-source region services that share the same response shape.
//!
//! ## Design
//!
//! - Providers implement the async [`Provider`] trait and are registered with
//!   the [`Aggregator`] as an explicit, ordered list of `(name, provider)`
//! - Every provider is queried concurrently under its own timeout; failures
//!   and timeouts are recorded in `providerStats` and never fail the search
//! - Results are filtered by category, deduplicated by normalised URL (or
//!   title), stable-sorted, and paginated under a hard ceiling
//! - [`LocalCorpusService`] scores a fixed regional corpus by keyword matches
//! - [`LiveApiService`] calls an external search API when credentials are
//!   configured and falls back to a mock corpus per request on any failure
//!
//! ## Security
//!
//! - The live-API key is redacted from `Debug` output and never logged
//! - Search queries are logged only at trace level
//! - Upstream titles and snippets are reduced to plain text before returning
//!
//! ## Example
//!
//! ```no_run
//! # async fn example() -> civic_search::Result<()> {
//! use civic_search::{Aggregator, AggregatorConfig, ProviderSettings, SearchRequest};
//!
//! let aggregator = Aggregator::with_settings(AggregatorConfig::default(), &ProviderSettings::default())?;
//! let response = aggregator
//!     .search(&SearchRequest::new("bogota transporte").with_limit(5))
//!     .await?;
//! for item in &response.results {
//!     println!("{} [{}] {}", item.relevance_score, item.provider, item.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod config;
pub mod error;
pub mod html;
pub mod http;
pub mod provider;
pub mod providers;
pub mod region;
pub mod text;
pub mod types;

pub use aggregator::Aggregator;
pub use config::{AggregatorConfig, LiveApiConfig, ProviderSettings};
pub use error::{Result, SearchError};
pub use provider::Provider;
pub use region::{LiveApiService, LocalCorpusService};
pub use types::{
    ProviderKind, ProviderStats, ProviderStatus, ResponseMetadata, ResponseSource, ResultItem,
    SearchRequest, SearchResponse, SortBy,
};
