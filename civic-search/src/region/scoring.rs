//! Keyword relevance scoring for the corpus-backed region services.
//!
//! A result earns points for each query term found in its title, summary
//! and tags (title weighted highest, tags lowest), a freshness bonus tiered
//! by age, and an authority bonus when its source is on the profile's
//! allowlist. The sum is clamped into `[1, 100]`.

use chrono::{DateTime, Utc};

use crate::types::{clamp_relevance, ResultItem};

/// Weights and bonuses for one region's scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringProfile {
    pub base: i64,
    pub title_match: i64,
    pub summary_match: i64,
    pub tag_match: i64,
    /// Bonus for items younger than 24 hours.
    pub fresh_day_bonus: i64,
    /// Bonus for items younger than 6 hours. Replaces the day bonus.
    pub fresh_hours_bonus: i64,
    pub authority_bonus: i64,
    pub authority_sources: &'static [&'static str],
}

/// Scoring for the Bogotá local corpus.
pub const LOCAL_PROFILE: ScoringProfile = ScoringProfile {
    base: 30,
    title_match: 15,
    summary_match: 8,
    tag_match: 5,
    fresh_day_bonus: 8,
    fresh_hours_bonus: 15,
    authority_bonus: 12,
    authority_sources: &[
        "Alcaldía de Bogotá",
        "Concejo de Bogotá",
        "Secretaría Distrital de Movilidad",
        "Secretaría Distrital de Salud",
        "TransMilenio S.A.",
    ],
};

/// Scoring for the international mock corpus behind the live-API service.
pub const INTERNATIONAL_PROFILE: ScoringProfile = ScoringProfile {
    base: 35,
    title_match: 12,
    summary_match: 6,
    tag_match: 4,
    fresh_day_bonus: 6,
    fresh_hours_bonus: 12,
    authority_bonus: 15,
    authority_sources: &[
        "United Nations",
        "World Health Organization",
        "World Bank",
        "Reuters",
        "BBC News",
    ],
};

impl ScoringProfile {
    /// Score `item` against lowercase `terms` at time `now`.
    pub fn score(&self, item: &ResultItem, terms: &[String], now: DateTime<Utc>) -> u8 {
        let title = item.title.to_lowercase();
        let summary = item.summary.to_lowercase();
        let tags: Vec<String> = item.tags.iter().map(|t| t.to_lowercase()).collect();

        let mut score = self.base;
        for term in terms {
            if title.contains(term.as_str()) {
                score += self.title_match;
            }
            if summary.contains(term.as_str()) {
                score += self.summary_match;
            }
            if tags.iter().any(|t| t.contains(term.as_str())) {
                score += self.tag_match;
            }
        }

        score += self.freshness_bonus(item.timestamp, now);

        if self
            .authority_sources
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&item.source))
        {
            score += self.authority_bonus;
        }

        clamp_relevance(score)
    }

    fn freshness_bonus(&self, timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
        let Some(ts) = timestamp else {
            return 0;
        };
        let age = now.signed_duration_since(ts);
        if age < chrono::Duration::hours(6) {
            self.fresh_hours_bonus
        } else if age < chrono::Duration::hours(24) {
            self.fresh_day_bonus
        } else {
            0
        }
    }
}
