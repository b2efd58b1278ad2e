//! Local-corpus search for the Bogotá region. No network calls.

use std::collections::BTreeSet;
use std::time::Instant;

use chrono::Utc;

use crate::config::AggregatorConfig;
use crate::error::SearchError;
use crate::types::{ResponseSource, ResultItem, SearchRequest, SearchResponse};

use super::corpus::{materialize, CorpusEntry, LOCAL_CORPUS};
use super::scoring::{ScoringProfile, LOCAL_PROFILE};
use super::{corpus_suggestions, keyword_match, match_terms, rank_corpus, CorpusOrigin};

/// Provider tag and stats key for local results.
pub const LOCAL_PROVIDER: &str = "local";

/// Tag or location values that mark a document as about the region.
const REGION_HINTS: &[&str] = &["bogota", "bogotá"];

/// Keyword search over the fixed regional corpus.
#[derive(Debug, Clone)]
pub struct LocalCorpusService {
    entries: &'static [CorpusEntry],
    profile: ScoringProfile,
    max_limit: usize,
    max_total_results: usize,
}

impl Default for LocalCorpusService {
    fn default() -> Self {
        Self::new(&AggregatorConfig::default())
    }
}

impl LocalCorpusService {
    /// Service over the built-in corpus, with page limits from `config`.
    pub fn new(config: &AggregatorConfig) -> Self {
        Self {
            entries: LOCAL_CORPUS,
            profile: LOCAL_PROFILE,
            max_limit: config.max_limit,
            max_total_results: config.max_total_results,
        }
    }

    /// Search the corpus.
    ///
    /// An item survives when any query term longer than one character
    /// appears in its title, summary or tags, and it comes from a regional
    /// source. Survivors are rescored, sorted by score and paginated.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Validation`] for an empty query.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let started = Instant::now();
        let request = request.normalized(self.max_limit)?;
        tracing::trace!(query = %request.query, "local corpus search");

        let now = Utc::now();
        let terms = match_terms(&request.query);
        let candidates: Vec<ResultItem> = materialize(self.entries, LOCAL_PROVIDER, now)
            .into_iter()
            .filter(|item| keyword_match(item, &terms) && self.is_local(item))
            .collect();
        tracing::debug!(matched = candidates.len(), "local corpus matches");

        rank_corpus(
            &request,
            candidates,
            &self.profile,
            CorpusOrigin {
                provider: LOCAL_PROVIDER,
                source: ResponseSource::LocalCorpus,
                ceiling: self.max_total_results,
                started,
            },
            now,
        )
    }

    pub fn suggestions(&self, query: &str) -> Vec<String> {
        let items: Vec<ResultItem> = materialize(self.entries, LOCAL_PROVIDER, Utc::now())
            .into_iter()
            .filter(|item| self.is_local(item))
            .collect();
        corpus_suggestions(query, &items)
    }

    /// Distinct categories present in the corpus, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.category.to_owned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Source on the authority allowlist, or a tag or location naming the region.
    fn is_local(&self, item: &ResultItem) -> bool {
        if self
            .profile
            .authority_sources
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&item.source))
        {
            return true;
        }
        let hinted = |value: &str| REGION_HINTS.contains(&value.to_lowercase().as_str());
        item.tags.iter().any(|t| hinted(t))
            || item
                .extra
                .get("location")
                .and_then(|v| v.as_str())
                .is_some_and(hinted)
    }
}
