//! Core types shared by every provider, the aggregator, and the region services.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::SearchError;

/// Category value that callers send to mean "no category filter".
pub const NO_CATEGORY_FILTER: &str = "all";

/// Lowest relevance score a result can carry.
pub const MIN_RELEVANCE: u8 = 1;

/// Highest relevance score a result can carry.
pub const MAX_RELEVANCE: u8 = 100;

/// Clamp a raw heuristic score into `[MIN_RELEVANCE, MAX_RELEVANCE]`.
pub fn clamp_relevance(raw: i64) -> u8 {
    raw.clamp(i64::from(MIN_RELEVANCE), i64::from(MAX_RELEVANCE)) as u8
}

/// A normalised search hit. Every provider produces these.
///
/// Provider-specific extension fields (engagement counts, country, thumbnail
/// and so on) live in [`ResultItem::extra`] and are ignored by the ranking
/// pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    /// Identifier, unique within one response.
    pub id: String,
    pub title: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Human-readable source identity (agency, account, publication).
    pub source: String,
    /// Open-vocabulary category. Empty means "missing".
    #[serde(default)]
    pub category: String,
    /// Publication time. Unparsable input deserialises to `None`.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    /// Heuristic relevance, always within `[1, 100]`.
    #[serde(default = "min_relevance", deserialize_with = "clamped_relevance")]
    pub relevance_score: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Name of the provider that produced this item.
    pub provider: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn min_relevance() -> u8 {
    MIN_RELEVANCE
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }))
}

fn clamped_relevance<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(clamp_relevance(raw.round() as i64))
}

impl ResultItem {
    /// Create a result with the required fields. Category is empty, the
    /// timestamp is missing and the score starts at [`MIN_RELEVANCE`].
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        summary: impl Into<String>,
        source: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: summary.into(),
            url: None,
            source: source.into(),
            category: String::new(),
            timestamp: None,
            relevance_score: MIN_RELEVANCE,
            tags: Vec::new(),
            provider: provider.into(),
            extra: Map::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the relevance score, clamping into `[1, 100]`.
    pub fn with_relevance(mut self, raw: i64) -> Self {
        self.relevance_score = clamp_relevance(raw);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a provider-specific extension field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Exact, case-insensitive category comparison.
    pub fn category_matches(&self, filter: &str) -> bool {
        !self.category.is_empty() && self.category.to_lowercase() == filter.to_lowercase()
    }
}

/// Ordering applied to the merged result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Descending relevance score.
    #[default]
    Relevance,
    /// Newest first; missing timestamps last.
    Date,
    /// Ascending category name; missing categories last.
    Category,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Date => "date",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "date" => Ok(Self::Date),
            "category" => Ok(Self::Category),
            other => Err(SearchError::Validation(format!(
                "unknown sort order '{other}'"
            ))),
        }
    }
}

/// A single search request as handed over by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    /// 1-based page number.
    #[serde(default = "first_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Exact category to keep. `None` (or the `"all"` sentinel) means no filter.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sort_by: SortBy,
}

/// Page size used when a caller does not specify one.
pub const DEFAULT_LIMIT: usize = 10;

fn first_page() -> usize {
    1
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl SearchRequest {
    /// First page, default page size, no filter, relevance order.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            limit: DEFAULT_LIMIT,
            category: None,
            sort_by: SortBy::Relevance,
        }
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Re-validate and clamp a request without trusting the caller.
    ///
    /// Trims the query (rejecting it if empty), clamps `page` to at least 1,
    /// clamps `limit` into `1..=max_limit`, and collapses an empty category
    /// or the [`NO_CATEGORY_FILTER`] sentinel to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Validation`] if the trimmed query is empty.
    pub fn normalized(&self, max_limit: usize) -> Result<Self, SearchError> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(SearchError::Validation("query must not be empty".into()));
        }
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(NO_CATEGORY_FILTER))
            .map(str::to_owned);
        Ok(Self {
            query: query.to_owned(),
            page: self.page.max(1),
            limit: self.limit.clamp(1, max_limit.max(1)),
            category,
            sort_by: self.sort_by,
        })
    }
}

/// Outcome of one provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatus {
    Success,
    Error,
}

/// Per-provider execution telemetry attached to each response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStats {
    pub count: usize,
    pub status: ProviderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProviderStats {
    pub fn success(count: usize, response_time_ms: u64) -> Self {
        Self {
            count,
            status: ProviderStatus::Success,
            response_time_ms: Some(response_time_ms),
            error: None,
        }
    }

    pub fn failure(error: &SearchError) -> Self {
        Self {
            count: 0,
            status: ProviderStatus::Error,
            response_time_ms: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ProviderStatus::Success
    }
}

/// Aggregate facts about a response, computed before pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    /// Number of results entering deduplication.
    pub total_before_dedup: usize,
    /// Distinct non-empty categories among the deduplicated results, sorted.
    pub categories: Vec<String>,
    /// Up to ten lowercase query terms longer than two characters.
    pub query_terms: Vec<String>,
}

/// Which path produced a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    /// Fan-out across the registered providers.
    #[default]
    Federated,
    /// The in-memory regional corpus.
    LocalCorpus,
    /// The external search API.
    LiveApi,
    /// The built-in mock corpus (live API not configured).
    Mock,
    /// The mock corpus after a failed live API call.
    MockFallback,
}

/// One page of ranked results plus telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<ResultItem>,
    /// Merged result count, capped at the configured hard ceiling.
    pub total_results: usize,
    pub page: usize,
    pub total_pages: usize,
    pub has_more: bool,
    pub provider_stats: BTreeMap<String, ProviderStats>,
    pub metadata: ResponseMetadata,
    #[serde(default)]
    pub source: ResponseSource,
}

/// The built-in synthetic providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Government and official documents.
    Official,
    /// Social-media posts.
    Social,
    /// Reference and encyclopedic articles.
    Reference,
}

impl ProviderKind {
    /// Stable name used as the `provider` tag and the stats key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Official => "official",
            Self::Social => "social",
            Self::Reference => "reference",
        }
    }

    /// Returns all available provider variants.
    pub fn all() -> &'static [ProviderKind] {
        &[Self::Official, Self::Social, Self::Reference]
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_relevance_bounds() {
        assert_eq!(clamp_relevance(-5), 1);
        assert_eq!(clamp_relevance(0), 1);
        assert_eq!(clamp_relevance(57), 57);
        assert_eq!(clamp_relevance(250), 100);
    }

    #[test]
    fn builder_clamps_relevance() {
        let item = ResultItem::new("a", "T", "S", "src", "official").with_relevance(140);
        assert_eq!(item.relevance_score, 100);
    }

    #[test]
    fn category_match_is_case_insensitive_and_exact() {
        let item = ResultItem::new("a", "T", "S", "src", "official").with_category("Politica");
        assert!(item.category_matches("politica"));
        assert!(item.category_matches("POLITICA"));
        assert!(!item.category_matches("economia"));
        assert!(!item.category_matches("polit"));
    }

    #[test]
    fn missing_category_never_matches() {
        let item = ResultItem::new("a", "T", "S", "src", "official");
        assert!(!item.category_matches(""));
    }

    #[test]
    fn result_item_serialises_camel_case_with_extras() {
        let item = ResultItem::new("a", "T", "S", "src", "social")
            .with_relevance(60)
            .with_extra("likes", 12);
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["relevanceScore"], 60);
        assert_eq!(json["likes"], 12);
        assert!(json.get("url").is_none());
    }

    #[test]
    fn invalid_timestamp_deserialises_as_missing() {
        let json = r#"{"id":"x","title":"T","summary":"S","source":"s","provider":"p",
            "timestamp":"yesterday-ish","relevanceScore":500}"#;
        let item: ResultItem = serde_json::from_str(json).expect("deserialize");
        assert!(item.timestamp.is_none());
        assert_eq!(item.relevance_score, 100);
    }

    #[test]
    fn unknown_fields_land_in_extra() {
        let json = r#"{"id":"x","title":"T","summary":"S","source":"s","provider":"p",
            "country":"Colombia"}"#;
        let item: ResultItem = serde_json::from_str(json).expect("deserialize");
        assert_eq!(item.extra.get("country"), Some(&Value::from("Colombia")));
        assert_eq!(item.relevance_score, MIN_RELEVANCE);
    }

    #[test]
    fn sort_by_parses_and_displays() {
        assert_eq!("Date".parse::<SortBy>().ok(), Some(SortBy::Date));
        assert_eq!(" category ".parse::<SortBy>().ok(), Some(SortBy::Category));
        assert!("popularity".parse::<SortBy>().is_err());
        assert_eq!(SortBy::Relevance.to_string(), "relevance");
        assert_eq!(SortBy::default(), SortBy::Relevance);
    }

    #[test]
    fn normalized_trims_and_clamps() {
        let request = SearchRequest::new("  bogota transporte ")
            .with_page(0)
            .with_limit(500)
            .with_category("ALL");
        let normalized = request.normalized(50).expect("valid");
        assert_eq!(normalized.query, "bogota transporte");
        assert_eq!(normalized.page, 1);
        assert_eq!(normalized.limit, 50);
        assert!(normalized.category.is_none());
    }

    #[test]
    fn normalized_keeps_concrete_category() {
        let request = SearchRequest::new("q").with_category(" Salud ").with_limit(0);
        let normalized = request.normalized(50).expect("valid");
        assert_eq!(normalized.category.as_deref(), Some("Salud"));
        assert_eq!(normalized.limit, 1);
    }

    #[test]
    fn normalized_rejects_blank_query() {
        let err = SearchRequest::new("   ").normalized(50).unwrap_err();
        assert!(matches!(err, SearchError::Validation(_)));
    }

    #[test]
    fn request_defaults_from_json() {
        let request: SearchRequest = serde_json::from_str(r#"{"query":"agua"}"#).expect("json");
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, DEFAULT_LIMIT);
        assert_eq!(request.sort_by, SortBy::Relevance);
    }

    #[test]
    fn provider_stats_failure_carries_message() {
        let stats = ProviderStats::failure(&SearchError::ProviderTimeout);
        assert_eq!(stats.status, ProviderStatus::Error);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.error.as_deref(), Some("Provider timeout"));
        assert!(stats.response_time_ms.is_none());
    }

    #[test]
    fn provider_kind_names() {
        assert_eq!(ProviderKind::Official.to_string(), "official");
        assert_eq!(ProviderKind::all().len(), 3);
        let json = serde_json::to_string(&ProviderKind::Reference).expect("serialize");
        assert_eq!(json, "\"reference\"");
    }

    #[test]
    fn response_source_serialises_snake_case() {
        let json = serde_json::to_string(&ResponseSource::MockFallback).expect("serialize");
        assert_eq!(json, "\"mock_fallback\"");
    }
}
