//! Trait definition for pluggable content providers.
//!
//! Each provider (official documents, social posts, reference articles, or a
//! real upstream integration substituted later) implements [`Provider`] so
//! the aggregator can fan out to it without knowing where its data comes from.

use async_trait::async_trait;

use crate::error::SearchError;
use crate::types::ResultItem;

/// A pluggable source of normalised [`ResultItem`]s.
///
/// Both operations are best-effort. Implementations should resolve their own
/// internal failures to an empty list; an `Err` is still tolerated and is
/// recorded by the aggregator as a provider error rather than propagated.
///
/// Category filtering inside `search` is an optional optimisation. The
/// aggregator re-applies the filter after merging.
///
/// All implementations must be `Send + Sync` for concurrent fan-out.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Return at most `max_results` items for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Provider`] if the provider cannot serve the
    /// request at all.
    async fn search(
        &self,
        query: &str,
        category: Option<&str>,
        max_results: usize,
    ) -> Result<Vec<ResultItem>, SearchError>;

    /// Return up to eight alternate query expansions.
    async fn suggestions(&self, query: &str) -> Result<Vec<String>, SearchError>;
}
