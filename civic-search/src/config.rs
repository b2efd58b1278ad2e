//! Search configuration with sensible defaults.
//!
//! [`AggregatorConfig`] bounds the federated pipeline, [`ProviderSettings`]
//! picks and tunes the synthetic providers, and [`LiveApiConfig`] carries the
//! external search API credentials. All three deserialise from TOML sections
//! with missing fields falling back to defaults.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::ProviderKind;

/// Bounds for the federated aggregation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Independent per-provider timeout in milliseconds.
    pub provider_timeout_ms: u64,
    /// Hard ceiling for `totalResults`, regardless of merged size.
    pub max_total_results: usize,
    /// Largest page size a caller may request.
    pub max_limit: usize,
    /// Largest result list requested from any single provider.
    pub max_results_per_provider: usize,
    /// Cap on merged query suggestions.
    pub max_suggestions: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            provider_timeout_ms: 5_000,
            max_total_results: 2_000,
            max_limit: 50,
            max_results_per_provider: 50,
            max_suggestions: 8,
        }
    }
}

impl AggregatorConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.provider_timeout_ms == 0 {
            return Err(SearchError::Config(
                "provider_timeout_ms must be greater than 0".into(),
            ));
        }
        if self.max_limit == 0 {
            return Err(SearchError::Config(
                "max_limit must be greater than 0".into(),
            ));
        }
        if self.max_total_results == 0 {
            return Err(SearchError::Config(
                "max_total_results must be greater than 0".into(),
            ));
        }
        if self.max_results_per_provider == 0 {
            return Err(SearchError::Config(
                "max_results_per_provider must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Which synthetic providers to register, and how they behave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Providers to register, in registration order.
    pub enabled: Vec<ProviderKind>,
    /// Simulated I/O latency range in milliseconds `(min, max)`.
    pub simulated_latency_ms: (u64, u64),
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            enabled: ProviderKind::all().to_vec(),
            simulated_latency_ms: (50, 300),
        }
    }
}

impl ProviderSettings {
    /// Checks:
    /// - at least one provider is enabled
    /// - no provider is listed twice
    /// - `simulated_latency_ms.0` must be <= `simulated_latency_ms.1`
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.enabled.is_empty() {
            return Err(SearchError::Config(
                "at least one provider must be enabled".into(),
            ));
        }
        for (i, kind) in self.enabled.iter().enumerate() {
            if self.enabled[..i].contains(kind) {
                return Err(SearchError::Config(format!(
                    "provider '{kind}' is listed more than once"
                )));
            }
        }
        if self.simulated_latency_ms.0 > self.simulated_latency_ms.1 {
            return Err(SearchError::Config(
                "simulated_latency_ms min must be <= max".into(),
            ));
        }
        Ok(())
    }
}

/// Default endpoint for the live search API.
pub const DEFAULT_LIVE_API_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Credentials and limits for the live search API.
///
/// The live-API service is *configured* only when both `api_key` and
/// `engine_id` are present and non-blank.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveApiConfig {
    pub api_key: Option<String>,
    pub engine_id: Option<String>,
    pub base_url: String,
    /// Request timeout in milliseconds. The request is aborted on expiry.
    pub timeout_ms: u64,
    /// Largest page the upstream accepts per call.
    pub max_page_size: usize,
    /// Upstream result window; `totalResults` is capped here.
    pub max_results: usize,
    pub safe_search: bool,
    /// Custom User-Agent string. `None` uses the crate default.
    pub user_agent: Option<String>,
}

impl Default for LiveApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            engine_id: None,
            base_url: DEFAULT_LIVE_API_URL.to_owned(),
            timeout_ms: 5_000,
            max_page_size: 10,
            max_results: 100,
            safe_search: true,
            user_agent: None,
        }
    }
}

// Hand-written so the API key never reaches logs.
impl std::fmt::Debug for LiveApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveApiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("engine_id", &self.engine_id)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_page_size", &self.max_page_size)
            .field("max_results", &self.max_results)
            .field("safe_search", &self.safe_search)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl LiveApiConfig {
    /// Returns `(api_key, engine_id)` when both are present and non-blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let key = self.api_key.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let engine = self
            .engine_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?;
        Some((key, engine))
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_ms == 0 {
            return Err(SearchError::Config(
                "live_api timeout_ms must be greater than 0".into(),
            ));
        }
        if self.max_page_size == 0 {
            return Err(SearchError::Config(
                "live_api max_page_size must be greater than 0".into(),
            ));
        }
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "live_api max_results must be greater than 0".into(),
            ));
        }
        if self.credentials().is_some() && url::Url::parse(&self.base_url).is_err() {
            return Err(SearchError::Config(format!(
                "live_api base_url is not a valid URL: {}",
                self.base_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_aggregator_config_has_sensible_values() {
        let config = AggregatorConfig::default();
        assert_eq!(config.provider_timeout_ms, 5_000);
        assert_eq!(config.max_total_results, 2_000);
        assert_eq!(config.max_suggestions, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = AggregatorConfig {
            provider_timeout_ms: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("provider_timeout_ms"));
    }

    #[test]
    fn zero_max_limit_rejected() {
        let config = AggregatorConfig {
            max_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_providers_include_all_three() {
        let settings = ProviderSettings::default();
        assert_eq!(settings.enabled, ProviderKind::all().to_vec());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn empty_providers_rejected() {
        let settings = ProviderSettings {
            enabled: vec![],
            ..Default::default()
        };
        assert!(settings.validate().unwrap_err().to_string().contains("provider"));
    }

    #[test]
    fn duplicate_provider_rejected() {
        let settings = ProviderSettings {
            enabled: vec![ProviderKind::Social, ProviderKind::Social],
            ..Default::default()
        };
        assert!(settings
            .validate()
            .unwrap_err()
            .to_string()
            .contains("more than once"));
    }

    #[test]
    fn invalid_latency_range_rejected() {
        let settings = ProviderSettings {
            simulated_latency_ms: (500, 100),
            ..Default::default()
        };
        assert!(settings.validate().unwrap_err().to_string().contains("latency"));
    }

    #[test]
    fn live_credentials_require_both_fields() {
        let mut config = LiveApiConfig {
            api_key: Some("key".into()),
            ..Default::default()
        };
        assert!(config.credentials().is_none());
        config.engine_id = Some("   ".into());
        assert!(config.credentials().is_none());
        config.engine_id = Some("cx-1".into());
        assert_eq!(config.credentials(), Some(("key", "cx-1")));
    }

    #[test]
    fn live_zero_max_results_rejected() {
        let config = LiveApiConfig {
            max_results: 0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("max_results"));
    }

    #[test]
    fn live_debug_redacts_key() {
        let config = LiveApiConfig {
            api_key: Some("super-secret".into()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn live_invalid_base_url_rejected_when_configured() {
        let config = LiveApiConfig {
            api_key: Some("k".into()),
            engine_id: Some("e".into()),
            base_url: "not a url".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn sections_deserialise_with_defaults() {
        let settings: ProviderSettings =
            serde_json::from_str(r#"{"enabled":["reference","official"]}"#).expect("json");
        assert_eq!(
            settings.enabled,
            vec![ProviderKind::Reference, ProviderKind::Official]
        );
        assert_eq!(settings.simulated_latency_ms, (50, 300));
    }
}
