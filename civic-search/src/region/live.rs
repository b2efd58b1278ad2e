//! Live search API with per-request fallback to a mock corpus.
//!
//! The service decides once, at construction, whether it is configured
//! (both credentials present). A configured service calls the upstream on
//! every request; if that call fails for any reason the same request is
//! answered from the international mock corpus and marked
//! [`ResponseSource::MockFallback`]. The next request tries the live path
//! again.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::aggregator::ranking::{distinct_categories, filter_by_category};
use crate::config::{AggregatorConfig, LiveApiConfig};
use crate::error::SearchError;
use crate::html::strip_html;
use crate::http::build_client;
use crate::text::query_terms;
use crate::types::{
    ProviderStats, ResponseMetadata, ResponseSource, ResultItem, SearchRequest, SearchResponse,
};

use super::classify::{classify_category, classify_country};
use super::corpus::{materialize, CorpusEntry, INTERNATIONAL_CORPUS};
use super::scoring::{ScoringProfile, INTERNATIONAL_PROFILE};
use super::{corpus_suggestions, keyword_match, match_terms, rank_corpus, CorpusOrigin};

/// Provider tag and stats key for upstream hits.
pub const LIVE_PROVIDER: &str = "live_api";

/// Provider tag and stats key for mock-corpus results.
pub const MOCK_PROVIDER: &str = "mock";

/// Partial-response selector sent upstream.
const RESPONSE_FIELDS: &str =
    "items(title,link,snippet,displayLink,pagemap(cse_thumbnail)),searchInformation(totalResults,searchTime)";

/// Position-decay relevance for upstream hits: `98 - 3 * (position - 1)`,
/// floored at 40.
const POSITION_BASE: i64 = 98;
const POSITION_DECAY: i64 = 3;
const POSITION_FLOOR: i64 = 40;

// ── Upstream wire format ───────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    items: Vec<ApiItem>,
    #[serde(default)]
    search_information: Option<SearchInformation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    display_link: Option<String>,
    #[serde(default)]
    pagemap: Option<PageMap>,
}

#[derive(Debug, Default, Deserialize)]
struct PageMap {
    #[serde(default)]
    cse_thumbnail: Vec<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    src: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchInformation {
    /// Sent as a decimal string; numbers are accepted too.
    #[serde(default, deserialize_with = "lenient_count")]
    total_results: Option<u64>,
    #[serde(default)]
    search_time: Option<f64>,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => n.as_u64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

// ── Upstream client ────────────────────────────────────────────────────

struct LiveClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    engine_id: String,
    max_page_size: usize,
    max_results: usize,
    safe_search: bool,
}

impl std::fmt::Debug for LiveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("engine_id", &self.engine_id)
            .field("max_page_size", &self.max_page_size)
            .finish_non_exhaustive()
    }
}

impl LiveClient {
    /// 1-based upstream offset of the first hit on `page`.
    fn start_offset(page: usize, limit: usize) -> Result<usize, SearchError> {
        page.checked_sub(1)
            .and_then(|p| p.checked_mul(limit))
            .and_then(|offset| offset.checked_add(1))
            .ok_or_else(|| SearchError::Upstream(format!("page {page} out of range")))
    }

    /// Hits per upstream page for `limit`: never above the upstream maximum.
    fn page_size(&self, limit: usize) -> usize {
        limit.min(self.max_page_size)
    }

    async fn fetch(
        &self,
        request: &SearchRequest,
        page_size: usize,
    ) -> Result<(ApiResponse, usize), SearchError> {
        let start = Self::start_offset(request.page, page_size)?;
        let start_param = start.to_string();
        let num_param = page_size.to_string();
        let safe = if self.safe_search { "active" } else { "off" };

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", request.query.as_str()),
                ("start", start_param.as_str()),
                ("num", num_param.as_str()),
                ("safe", safe),
                ("fields", RESPONSE_FIELDS),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Upstream("request timed out".into())
                } else {
                    SearchError::Upstream(format!("request failed: {}", e.without_url()))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Upstream(format!("HTTP {status}")));
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Upstream(format!("malformed response: {}", e.without_url())))?;
        Ok((body, start))
    }
}

enum Mode {
    Unconfigured,
    Configured(Box<LiveClient>),
}

// ── Service ────────────────────────────────────────────────────────────

/// Search backed by an external API, with a mock corpus behind it.
pub struct LiveApiService {
    mode: Mode,
    mock_entries: &'static [CorpusEntry],
    profile: ScoringProfile,
    max_limit: usize,
    max_total_results: usize,
}

impl std::fmt::Debug for LiveApiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("LiveApiService");
        match &self.mode {
            Mode::Unconfigured => s.field("mode", &"unconfigured"),
            Mode::Configured(client) => s.field("mode", client),
        };
        s.field("max_limit", &self.max_limit).finish()
    }
}

impl LiveApiService {
    /// Build the service. Configured when `live` carries both credentials.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `live` is invalid or the HTTP
    /// client cannot be built.
    pub fn new(live: &LiveApiConfig, limits: &AggregatorConfig) -> Result<Self, SearchError> {
        live.validate()?;
        let mode = match live.credentials() {
            Some((key, engine)) => {
                let endpoint = Url::parse(&live.base_url).map_err(|e| {
                    SearchError::Config(format!("invalid live_api base_url: {e}"))
                })?;
                tracing::info!(endpoint = %endpoint, "live search API configured");
                Mode::Configured(Box::new(LiveClient {
                    http: build_client(live)?,
                    endpoint,
                    api_key: key.to_owned(),
                    engine_id: engine.to_owned(),
                    max_page_size: live.max_page_size,
                    max_results: live.max_results,
                    safe_search: live.safe_search,
                }))
            }
            None => {
                tracing::info!("live search API credentials missing, serving mock corpus");
                Mode::Unconfigured
            }
        };
        Ok(Self {
            mode,
            mock_entries: INTERNATIONAL_CORPUS,
            profile: INTERNATIONAL_PROFILE,
            max_limit: limits.max_limit,
            max_total_results: limits.max_total_results,
        })
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.mode, Mode::Configured(_))
    }

    /// Search the live API, or the mock corpus when unconfigured or when the
    /// live call fails.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Validation`] for an empty query. Upstream
    /// failures never surface; they trigger the fallback.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let started = Instant::now();
        let request = request.normalized(self.max_limit)?;
        tracing::trace!(query = %request.query, "live search");

        let client = match &self.mode {
            Mode::Unconfigured => {
                return self.mock_search(&request, ResponseSource::Mock, started);
            }
            Mode::Configured(client) => client,
        };

        let page_size = client.page_size(request.limit);
        match client.fetch(&request, page_size).await {
            Ok((body, start)) => Ok(map_response(
                &request,
                body,
                start,
                page_size,
                client.max_results.min(self.max_total_results),
                started,
            )),
            Err(err) => {
                tracing::warn!(error = %err, "live search API failed, falling back to mock corpus");
                self.mock_search(&request, ResponseSource::MockFallback, started)
            }
        }
    }

    /// Suggestions from the mock corpus tags and titles.
    pub fn suggestions(&self, query: &str) -> Vec<String> {
        let items = materialize(self.mock_entries, MOCK_PROVIDER, Utc::now());
        corpus_suggestions(query, &items)
    }

    fn mock_search(
        &self,
        request: &SearchRequest,
        source: ResponseSource,
        started: Instant,
    ) -> Result<SearchResponse, SearchError> {
        let now = Utc::now();
        let terms = match_terms(&request.query);
        let corpus = materialize(self.mock_entries, MOCK_PROVIDER, now);
        let matching: Vec<ResultItem> = corpus
            .iter()
            .filter(|item| keyword_match(item, &terms))
            .cloned()
            .collect();
        // No keyword match: serve the whole corpus.
        let candidates = if matching.is_empty() { corpus } else { matching };

        rank_corpus(
            request,
            candidates,
            &self.profile,
            CorpusOrigin {
                provider: MOCK_PROVIDER,
                source,
                ceiling: self.max_total_results,
                started,
            },
            now,
        )
    }
}

fn position_score(position: usize) -> i64 {
    let steps = i64::try_from(position.saturating_sub(1)).unwrap_or(i64::MAX / POSITION_DECAY);
    POSITION_BASE
        .saturating_sub(steps.saturating_mul(POSITION_DECAY))
        .max(POSITION_FLOOR)
}

fn map_hit(hit: ApiItem, position: usize) -> ResultItem {
    let title = strip_html(&hit.title);
    let summary = strip_html(&hit.snippet);
    let combined = format!("{title} {summary}");
    let category = classify_category(&combined);
    let country = classify_country(&combined);

    let source = hit
        .display_link
        .clone()
        .filter(|d| !d.trim().is_empty())
        .or_else(|| {
            hit.link
                .as_deref()
                .and_then(|l| Url::parse(l).ok())
                .and_then(|u| u.host_str().map(str::to_owned))
        })
        .unwrap_or_else(|| "web".to_owned());

    let mut item = ResultItem::new(format!("live-{position}"), title, summary, source, LIVE_PROVIDER)
        .with_category(category)
        .with_relevance(position_score(position))
        .with_tags([category])
        .with_extra("country", country);
    if let Some(link) = hit.link.filter(|l| !l.trim().is_empty()) {
        item = item.with_url(link);
    }
    if let Some(display) = hit.display_link {
        item = item.with_extra("displayLink", display);
    }
    let thumbnail = hit
        .pagemap
        .and_then(|p| p.cse_thumbnail.into_iter().next())
        .map(|t| t.src);
    if let Some(src) = thumbnail {
        item = item.with_extra("thumbnail", src);
    }
    item
}

/// Builds the response for one upstream page of `page_size` hits starting
/// at the 1-based offset `start`.
///
/// With a category filter the upstream total no longer describes the
/// result set, so the total counts only the hits kept up to this page.
fn map_response(
    request: &SearchRequest,
    body: ApiResponse,
    start: usize,
    page_size: usize,
    ceiling: usize,
    started: Instant,
) -> SearchResponse {
    let returned = body.items.len();
    let mapped: Vec<ResultItem> = body
        .items
        .into_iter()
        .take(page_size)
        .enumerate()
        .map(|(i, hit)| map_hit(hit, start + i))
        .collect();
    let mut results = filter_by_category(mapped, request.category.as_deref());
    let preceding = start.saturating_sub(1);
    let seen = preceding.saturating_add(results.len());

    let (reported, search_time) = match body.search_information {
        Some(info) => (info.total_results, info.search_time),
        None => (None, None),
    };
    let total = match reported {
        Some(r) if request.category.is_none() => {
            usize::try_from(r).unwrap_or(usize::MAX).max(seen)
        }
        _ => seen,
    };
    let total_results = total.min(ceiling);
    results.truncate(total_results.saturating_sub(preceding));
    let total_pages = total_results.div_ceil(page_size);

    tracing::debug!(returned, total_results, upstream_search_time = ?search_time, "live search API answered");

    let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut provider_stats = BTreeMap::new();
    provider_stats.insert(
        LIVE_PROVIDER.to_owned(),
        ProviderStats::success(results.len(), elapsed),
    );

    SearchResponse {
        query: request.query.clone(),
        metadata: ResponseMetadata {
            total_before_dedup: results.len(),
            categories: distinct_categories(&results),
            query_terms: query_terms(&request.query, 2, 10),
        },
        results,
        total_results,
        page: request.page,
        total_pages,
        has_more: request.page < total_pages,
        provider_stats,
        source: ResponseSource::LiveApi,
    }
}
