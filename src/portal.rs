//! Process-start composition of the search services.
//!
//! [`Portal`] owns the federated [`Aggregator`] and both region services,
//! built once from [`PortalConfig`], and routes each request to one of them
//! by [`SearchScope`]. Every answer is wrapped in a [`PortalResponse`]
//! carrying the request-scoped fields: request id, measured search time,
//! and response timestamp.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use chrono::{DateTime, Utc};
use civic_search::{
    Aggregator, LiveApiService, LocalCorpusService, SearchRequest, SearchResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::PortalConfig;
use crate::error::{PortalError, Result};

/// Which search service answers a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    /// All registered providers through the aggregator.
    #[default]
    Federated,
    /// The regional in-memory corpus.
    Local,
    /// The live search API (or its mock fallback).
    Live,
}

impl SearchScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Federated => "federated",
            Self::Local => "local",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchScope {
    type Err = PortalError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "federated" | "all" => Ok(Self::Federated),
            "local" => Ok(Self::Local),
            "live" => Ok(Self::Live),
            other => Err(PortalError::Scope(other.to_owned())),
        }
    }
}

/// A search response plus request-scoped metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalResponse {
    #[serde(flatten)]
    pub response: SearchResponse,
    pub scope: SearchScope,
    pub request_id: String,
    pub search_time_ms: u64,
    pub timestamp: DateTime<Utc>,
}

/// The portal's search services, constructed once and shared.
#[derive(Debug)]
pub struct Portal {
    aggregator: Aggregator,
    local: LocalCorpusService,
    live: LiveApiService,
}

impl Portal {
    /// Build every service from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if any section of the configuration is invalid.
    pub fn new(config: &PortalConfig) -> Result<Self> {
        config.validate()?;
        let aggregator = Aggregator::with_settings(config.aggregator.clone(), &config.providers)?;
        let local = LocalCorpusService::new(&config.aggregator);
        let live = LiveApiService::new(&config.live_api, &config.aggregator)?;
        tracing::info!(
            providers = ?aggregator.provider_names().collect::<Vec<_>>(),
            live_configured = live.is_configured(),
            "portal search services ready"
        );
        Ok(Self::from_parts(aggregator, local, live))
    }

    /// Assemble a portal from already-built services.
    pub fn from_parts(
        aggregator: Aggregator,
        local: LocalCorpusService,
        live: LiveApiService,
    ) -> Self {
        Self {
            aggregator,
            local,
            live,
        }
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn local(&self) -> &LocalCorpusService {
        &self.local
    }

    pub fn live(&self) -> &LiveApiService {
        &self.live
    }

    /// Run `request` against the service for `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Search`] for an invalid request or a pipeline
    /// failure. Provider and upstream failures are reported inside the
    /// response instead.
    pub async fn search(&self, scope: SearchScope, request: &SearchRequest) -> Result<PortalResponse> {
        let request_id = Uuid::new_v4().to_string();
        let started = Instant::now();
        tracing::trace!(%request_id, %scope, query = %request.query, "portal search");

        let outcome = match scope {
            SearchScope::Federated => self.aggregator.search(request).await,
            SearchScope::Local => self.local.search(request),
            SearchScope::Live => self.live.search(request).await,
        };
        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%request_id, %scope, error = %err, "portal search failed");
                return Err(err.into());
            }
        };

        let search_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            %request_id,
            %scope,
            source = ?response.source,
            total = response.total_results,
            returned = response.results.len(),
            search_time_ms,
            "portal search complete"
        );

        Ok(PortalResponse {
            response,
            scope,
            request_id,
            search_time_ms,
            timestamp: Utc::now(),
        })
    }

    /// Query suggestions from the service for `scope`.
    pub async fn suggestions(&self, scope: SearchScope, query: &str) -> Vec<String> {
        match scope {
            SearchScope::Federated => self.aggregator.suggestions(query).await,
            SearchScope::Local => self.local.suggestions(query),
            SearchScope::Live => self.live.suggestions(query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_search::{ProviderSettings, ResponseSource, SearchError};

    fn quick_config() -> PortalConfig {
        PortalConfig {
            providers: ProviderSettings {
                simulated_latency_ms: (0, 0),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn scope_parses_case_insensitively() {
        assert_eq!("LOCAL".parse::<SearchScope>().expect("ok"), SearchScope::Local);
        assert_eq!("all".parse::<SearchScope>().expect("ok"), SearchScope::Federated);
        assert!(matches!(
            "regional".parse::<SearchScope>(),
            Err(PortalError::Scope(_))
        ));
    }

    #[tokio::test]
    async fn each_scope_tags_its_source() {
        let portal = Portal::new(&quick_config()).expect("valid portal");
        let request = SearchRequest::new("bogota transporte").with_limit(5);

        let federated = portal.search(SearchScope::Federated, &request).await.expect("ok");
        assert_eq!(federated.response.source, ResponseSource::Federated);

        let local = portal.search(SearchScope::Local, &request).await.expect("ok");
        assert_eq!(local.response.source, ResponseSource::LocalCorpus);

        let live = portal.search(SearchScope::Live, &request).await.expect("ok");
        assert_eq!(live.response.source, ResponseSource::Mock);
    }

    #[tokio::test]
    async fn envelope_carries_request_metadata() {
        let portal = Portal::new(&quick_config()).expect("valid portal");
        let first = portal
            .search(SearchScope::Local, &SearchRequest::new("metro"))
            .await
            .expect("ok");
        let second = portal
            .search(SearchScope::Local, &SearchRequest::new("metro"))
            .await
            .expect("ok");
        assert_ne!(first.request_id, second.request_id);
        assert!(Uuid::parse_str(&first.request_id).is_ok());
        assert_eq!(first.scope, SearchScope::Local);

        let json = serde_json::to_value(&first).expect("serializes");
        assert!(json.get("requestId").is_some());
        assert!(json.get("searchTimeMs").is_some());
        assert!(json.get("totalResults").is_some());
        assert_eq!(json["source"], "local_corpus");
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let portal = Portal::new(&quick_config()).expect("valid portal");
        let err = portal
            .search(SearchScope::Federated, &SearchRequest::new(" "))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Search(SearchError::Validation(_))));
    }

    #[test]
    fn services_carry_loaded_limits() {
        let mut config = quick_config();
        config.aggregator.max_limit = 20;
        config.aggregator.provider_timeout_ms = 750;
        let portal = Portal::new(&config).expect("valid portal");
        assert_eq!(portal.aggregator().config(), &config.aggregator);

        let categories = portal.local().categories();
        assert!(!categories.is_empty());
        assert!(categories.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn suggestions_route_by_scope() {
        let portal = Portal::new(&quick_config()).expect("valid portal");
        for scope in [SearchScope::Federated, SearchScope::Local, SearchScope::Live] {
            let suggestions = portal.suggestions(scope, "metro").await;
            assert!(suggestions.len() <= 8, "{scope}");
        }
        assert!(!portal.suggestions(SearchScope::Local, "metro").await.is_empty());
    }
}
