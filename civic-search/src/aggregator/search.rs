//! Core aggregator: concurrent provider fan-out, filter, dedup, sort, paginate.
//!
//! Every registered provider is queried concurrently, each racing its own
//! timeout. The join is all-settled: a provider that fails or times out
//! contributes nothing and is recorded in `providerStats`, and never delays
//! or aborts the others. Merge, filter, dedup, sort and pagination then run
//! on the single task that awaited the join, so no state is shared between
//! provider calls.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{AggregatorConfig, ProviderSettings};
use crate::error::SearchError;
use crate::provider::Provider;
use crate::providers::build_providers;
use crate::text::query_terms;
use crate::types::{
    ProviderStats, ResponseMetadata, ResponseSource, ResultItem, SearchRequest, SearchResponse,
};

use super::dedup::deduplicate;
use super::paginate::paginate;
use super::ranking::{distinct_categories, filter_by_category, sort_results};

/// Query terms reported in response metadata.
const MAX_QUERY_TERMS: usize = 10;

/// Federated search over an explicit, ordered list of providers.
///
/// Constructed once at process start and shared by reference; it holds only
/// read-only configuration.
pub struct Aggregator {
    config: AggregatorConfig,
    providers: Vec<(String, Arc<dyn Provider>)>,
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("config", &self.config)
            .field("providers", &self.provider_names().collect::<Vec<_>>())
            .finish()
    }
}

impl Aggregator {
    /// Build an aggregator over `providers`, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the config is invalid, the list is
    /// empty, or two providers share a name.
    pub fn new(
        config: AggregatorConfig,
        providers: Vec<(String, Arc<dyn Provider>)>,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        if providers.is_empty() {
            return Err(SearchError::Config(
                "at least one provider must be registered".into(),
            ));
        }
        let mut names = HashSet::new();
        for (name, _) in &providers {
            if !names.insert(name.as_str()) {
                return Err(SearchError::Config(format!(
                    "provider name '{name}' registered twice"
                )));
            }
        }
        Ok(Self { config, providers })
    }

    /// Build an aggregator over the built-in synthetic providers.
    ///
    /// # Errors
    ///
    /// Same as [`Aggregator::new`], plus invalid provider settings.
    pub fn with_settings(
        config: AggregatorConfig,
        settings: &ProviderSettings,
    ) -> Result<Self, SearchError> {
        settings.validate()?;
        Self::new(config, build_providers(settings))
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Registered provider names, in registration order.
    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|(name, _)| name.as_str())
    }

    /// Run one federated search.
    ///
    /// # Pipeline
    ///
    /// 1. Re-normalise the request (trim, clamp page/limit, category sentinel)
    /// 2. Fan out to every provider, each under its own timeout
    /// 3. Merge successful lists in registration order
    /// 4. Apply the category filter (exact, case-insensitive)
    /// 5. Deduplicate by URL, else normalised title (first occurrence wins)
    /// 6. Stable sort by the requested key
    /// 7. Cap at the hard ceiling and slice the requested page
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Validation`] for an empty query and
    /// [`SearchError::Aggregation`] if the pipeline itself fails. Provider
    /// failures and timeouts never produce an error here.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let request = request.normalized(self.config.max_limit)?;
        tracing::trace!(query = %request.query, page = request.page, "federated search");

        let (merged, provider_stats) = self.fan_out(&request).await;
        self.rank_and_page(&request, merged, provider_stats)
    }

    async fn fan_out(
        &self,
        request: &SearchRequest,
    ) -> (Vec<ResultItem>, BTreeMap<String, ProviderStats>) {
        let timeout = Duration::from_millis(self.config.provider_timeout_ms);
        let max_results = self.config.max_results_per_provider;

        let calls: Vec<_> = self
            .providers
            .iter()
            .map(|(name, provider)| {
                let provider = Arc::clone(provider);
                let query = request.query.clone();
                let category = request.category.clone();
                async move {
                    let started = Instant::now();
                    let task = tokio::spawn(async move {
                        provider
                            .search(&query, category.as_deref(), max_results)
                            .await
                    });
                    let outcome = settle(task, timeout).await;
                    (name.as_str(), outcome, started.elapsed())
                }
            })
            .collect();

        let outcomes = futures::future::join_all(calls).await;

        let mut merged: Vec<ResultItem> = Vec::new();
        let mut stats: BTreeMap<String, ProviderStats> = BTreeMap::new();
        for (name, outcome, elapsed) in outcomes {
            match outcome {
                Ok(items) => {
                    let count = items.len();
                    tracing::debug!(provider = name, count, "provider returned results");
                    stats.insert(
                        name.to_owned(),
                        ProviderStats::success(count, elapsed_ms(elapsed)),
                    );
                    merged.extend(items);
                }
                Err(err) => {
                    tracing::warn!(provider = name, error = %err, "provider query failed");
                    stats.insert(name.to_owned(), ProviderStats::failure(&err));
                }
            }
        }
        (merged, stats)
    }

    fn rank_and_page(
        &self,
        request: &SearchRequest,
        merged: Vec<ResultItem>,
        provider_stats: BTreeMap<String, ProviderStats>,
    ) -> Result<SearchResponse, SearchError> {
        let filtered = filter_by_category(merged, request.category.as_deref());
        let total_before_dedup = filtered.len();

        let mut ranked = deduplicate(filtered);
        sort_results(&mut ranked, request.sort_by);
        let categories = distinct_categories(&ranked);

        let page = paginate(
            ranked,
            request.page,
            request.limit,
            self.config.max_total_results,
        )?;
        if page.items.len() > request.limit {
            return Err(SearchError::Aggregation(format!(
                "page holds {} results for limit {}",
                page.items.len(),
                request.limit
            )));
        }

        tracing::debug!(
            total = page.total_results,
            before_dedup = total_before_dedup,
            returned = page.items.len(),
            "federated search complete"
        );

        Ok(SearchResponse {
            query: request.query.clone(),
            results: page.items,
            total_results: page.total_results,
            page: request.page,
            total_pages: page.total_pages,
            has_more: page.has_more,
            provider_stats,
            metadata: ResponseMetadata {
                total_before_dedup,
                categories,
                query_terms: query_terms(&request.query, 2, MAX_QUERY_TERMS),
            },
            source: ResponseSource::Federated,
        })
    }

    /// Merge query suggestions from every provider.
    ///
    /// Fans out under the same per-provider timeout, drops blanks and exact
    /// duplicates (first seen wins), and caps the list at
    /// `max_suggestions`. Failing providers contribute nothing.
    pub async fn suggestions(&self, query: &str) -> Vec<String> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let timeout = Duration::from_millis(self.config.provider_timeout_ms);

        let calls: Vec<_> = self
            .providers
            .iter()
            .map(|(name, provider)| {
                let provider = Arc::clone(provider);
                let query = query.to_owned();
                async move {
                    let task = tokio::spawn(async move { provider.suggestions(&query).await });
                    (name.as_str(), settle(task, timeout).await)
                }
            })
            .collect();

        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        for (name, outcome) in futures::future::join_all(calls).await {
            let list = match outcome {
                Ok(list) => list,
                Err(err) => {
                    tracing::warn!(provider = name, error = %err, "provider suggestions failed");
                    continue;
                }
            };
            for suggestion in list {
                let suggestion = suggestion.trim().to_owned();
                if !suggestion.is_empty() && seen.insert(suggestion.clone()) {
                    merged.push(suggestion);
                }
            }
        }
        merged.truncate(self.config.max_suggestions);
        merged
    }
}

/// Race a spawned provider task against its deadline.
///
/// On timeout the join handle is dropped, which detaches the task rather
/// than aborting it; its eventual result is ignored.
async fn settle<T>(
    task: tokio::task::JoinHandle<Result<T, SearchError>>,
    timeout: Duration,
) -> Result<T, SearchError> {
    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(SearchError::Provider(format!(
            "provider task failed: {join_err}"
        ))),
        Err(_) => Err(SearchError::ProviderTimeout),
    }
}

fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
