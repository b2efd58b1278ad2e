//! Shared HTTP client for the live search API.
//!
//! Provides a configured [`reqwest::Client`] whose request timeout is the
//! abort signal for the live path: on expiry the in-flight request is
//! cancelled rather than left running.

use crate::config::LiveApiConfig;
use crate::error::SearchError;
use rand::seq::SliceRandom;
use std::time::Duration;

/// Client identifiers, one picked per client when none is configured.
const USER_AGENTS: &[&str] = &[
    "civic-search/0.1 (+https://bogota.gov.co/portal)",
    "Mozilla/5.0 (X11; Linux x86_64) civic-search/0.1",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) civic-search/0.1",
];

/// Build a [`reqwest::Client`] for the live search API.
///
/// The client has:
/// - Timeout from config (aborts the request on expiry)
/// - User-Agent from config, or one from the built-in list
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the client cannot be constructed.
pub fn build_client(config: &LiveApiConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the built-in list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        .unwrap_or(USER_AGENTS[0])
}
