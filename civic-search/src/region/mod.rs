//! Region-scoped search services.
//!
//! Two single-source alternatives to the federated [`Aggregator`]: a
//! local-corpus service with keyword relevance scoring, and a live-API
//! service that falls back to a mock corpus. Both return the same
//! [`SearchResponse`] shape, tagged with their own [`ResponseSource`].
//!
//! [`Aggregator`]: crate::aggregator::Aggregator

pub mod classify;
pub mod corpus;
pub mod live;
pub mod local;
pub mod scoring;

pub use live::LiveApiService;
pub use local::LocalCorpusService;
pub use scoring::ScoringProfile;

use std::collections::{BTreeMap, HashSet};
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::aggregator::paginate::paginate;
use crate::aggregator::ranking::{distinct_categories, filter_by_category, sort_results};
use crate::error::SearchError;
use crate::text::query_terms;
use crate::types::{
    ProviderStats, ResponseMetadata, ResponseSource, ResultItem, SearchRequest, SearchResponse,
    SortBy,
};

/// Most suggestions a region service returns.
pub const MAX_SUGGESTIONS: usize = 8;

/// Lowercase query terms longer than one character, used for matching.
pub(crate) fn match_terms(query: &str) -> Vec<String> {
    query_terms(query, 1, usize::MAX)
}

/// True when any term occurs in the item's title, summary or tags.
pub(crate) fn keyword_match(item: &ResultItem, terms: &[String]) -> bool {
    let haystack = format!("{} {} {}", item.title, item.summary, item.tags.join(" ")).to_lowercase();
    terms.iter().any(|term| haystack.contains(term.as_str()))
}

/// Where a corpus response comes from and how it is capped.
pub(crate) struct CorpusOrigin<'a> {
    pub provider: &'a str,
    pub source: ResponseSource,
    pub ceiling: usize,
    pub started: Instant,
}

/// Filter, rescore, sort and paginate corpus candidates into a response.
///
/// `request` must already be normalised.
pub(crate) fn rank_corpus(
    request: &SearchRequest,
    candidates: Vec<ResultItem>,
    profile: &ScoringProfile,
    origin: CorpusOrigin<'_>,
    now: DateTime<Utc>,
) -> Result<SearchResponse, SearchError> {
    let terms = match_terms(&request.query);
    let mut ranked = filter_by_category(candidates, request.category.as_deref());
    let total_before_dedup = ranked.len();

    for item in &mut ranked {
        item.relevance_score = profile.score(item, &terms, now);
    }
    sort_results(&mut ranked, SortBy::Relevance);
    let categories = distinct_categories(&ranked);

    let page = paginate(ranked, request.page, request.limit, origin.ceiling)?;

    let elapsed = u64::try_from(origin.started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut provider_stats = BTreeMap::new();
    provider_stats.insert(
        origin.provider.to_owned(),
        ProviderStats::success(total_before_dedup, elapsed),
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
            query_terms: query_terms(&request.query, 2, 10),
        },
        source: origin.source,
    })
}

/// Suggestions drawn from corpus items matching `query`: their titles first,
/// then `"{query} {tag}"` expansions. Deduplicated, capped.
pub(crate) fn corpus_suggestions(query: &str, items: &[ResultItem]) -> Vec<String> {
    let query = query.trim();
    let terms = match_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }
    let lowered = query.to_lowercase();
    let matching: Vec<&ResultItem> = items.iter().filter(|i| keyword_match(i, &terms)).collect();

    let titles = matching.iter().map(|item| item.title.clone());
    let expansions = matching.iter().flat_map(|item| {
        item.tags
            .iter()
            .filter(|tag| !terms.contains(&tag.to_lowercase()))
            .map(|tag| format!("{lowered} {tag}"))
    });

    let mut seen = HashSet::new();
    titles
        .chain(expansions)
        .filter(|s| seen.insert(s.clone()))
        .take(MAX_SUGGESTIONS)
        .collect()
}
