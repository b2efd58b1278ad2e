//! Shared building blocks for the synthetic providers: source identities,
//! authority-tier scoring, category selection, and simulated I/O latency.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::text::{capitalize, query_terms, slugify};

/// Category vocabulary used by the synthetic providers.
pub const CATEGORIES: &[&str] = &[
    "Politica",
    "Economia",
    "Transporte",
    "Salud",
    "Educacion",
    "Seguridad",
    "Medio Ambiente",
];

/// A fixed identity that results are attributed to.
#[derive(Debug, Clone, Copy)]
pub struct SourceIdentity {
    pub name: &'static str,
    pub domain: &'static str,
}

/// Relevance heuristic for one authority tier.
///
/// `score = base - position * decay + jitter`, clamped to `[floor, ceiling]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorityTier {
    pub base: i64,
    pub decay: i64,
    pub jitter: i64,
    pub floor: i64,
    pub ceiling: i64,
}

impl AuthorityTier {
    pub fn score<R: Rng + ?Sized>(&self, position: usize, rng: &mut R) -> i64 {
        let position = i64::try_from(position).unwrap_or(i64::MAX / 2);
        let jitter = if self.jitter > 0 {
            rng.gen_range(-self.jitter..=self.jitter)
        } else {
            0
        };
        self.base
            .saturating_sub(position.saturating_mul(self.decay))
            .saturating_add(jitter)
            .clamp(self.floor, self.ceiling)
    }
}

/// Pick the category for the result at `position`.
///
/// When the caller asked for a category the provider knows, every item uses
/// it (the optional pre-filter); otherwise categories rotate.
pub fn pick_category(requested: Option<&str>, position: usize) -> &'static str {
    if let Some(wanted) = requested {
        if let Some(known) = CATEGORIES.iter().find(|c| c.eq_ignore_ascii_case(wanted)) {
            return known;
        }
    }
    CATEGORIES[position % CATEGORIES.len()]
}

/// Timestamp `min..=max` minutes before `now`.
pub fn past_timestamp<R: Rng + ?Sized>(
    now: DateTime<Utc>,
    minutes: (i64, i64),
    rng: &mut R,
) -> DateTime<Utc> {
    let offset = rng.gen_range(minutes.0..=minutes.1.max(minutes.0));
    now - chrono::Duration::minutes(offset)
}

/// Fill `{query}`, `{Query}`, `{source}` and `{category}` placeholders.
pub fn fill(template: &str, query: &str, source: &str, category: &str) -> String {
    template
        .replace("{Query}", &capitalize(query))
        .replace("{query}", query)
        .replace("{source}", source)
        .replace("{category}", &category.to_lowercase())
}

/// Lowercase tags derived from the category and the query terms.
pub fn base_tags(query: &str, category: &str) -> Vec<String> {
    let mut tags = vec![slugify(category)];
    for term in query_terms(query, 2, 3) {
        if !tags.contains(&term) {
            tags.push(term);
        }
    }
    tags
}

/// Per-request nonce so ids stay unique across calls.
pub fn request_nonce() -> u32 {
    rand::thread_rng().gen()
}

/// Sleep for a random duration within `range_ms` to emulate network I/O.
pub async fn simulate_latency(range_ms: (u64, u64)) {
    let (min, max) = range_ms;
    if max == 0 {
        return;
    }
    // The RNG is not `Send`; draw before suspending.
    let delay = rand::thread_rng().gen_range(min..=max.max(min));
    tokio::time::sleep(Duration::from_millis(delay)).await;
}

/// Expand `query` through suggestion templates, dropping blanks.
pub fn expand_suggestions(query: &str, templates: &[&str]) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let lowered = query.to_lowercase();
    templates
        .iter()
        .map(|t| fill(t, &lowered, "", ""))
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .take(8)
        .collect()
}
