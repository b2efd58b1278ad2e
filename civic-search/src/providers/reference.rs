//! Reference provider: encyclopedic and background articles.

use async_trait::async_trait;
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SearchError;
use crate::provider::Provider;
use crate::text::slugify;
use crate::types::{ProviderKind, ResultItem};

use super::synth::{self, AuthorityTier, SourceIdentity};

const SOURCES: &[SourceIdentity] = &[
    SourceIdentity {
        name: "Wikipedia",
        domain: "es.wikipedia.org",
    },
    SourceIdentity {
        name: "Enciclopedia Banrepcultural",
        domain: "enciclopedia.banrepcultural.org",
    },
    SourceIdentity {
        name: "Observatorio de Desarrollo Económico",
        domain: "observatorio.desarrolloeconomico.gov.co",
    },
    SourceIdentity {
        name: "Biblioteca Digital de Bogotá",
        domain: "bibliotecadigitaldebogota.gov.co",
    },
];

const TIER: AuthorityTier = AuthorityTier {
    base: 90,
    decay: 2,
    jitter: 4,
    floor: 65,
    ceiling: 95,
};

/// Most results this provider returns per call.
pub const MAX_RESULTS: usize = 20;

const TITLE_TEMPLATES: &[&str] = &[
    "{Query}",
    "Historia de {query}",
    "{Query}: contexto y antecedentes",
    "Glosario ciudadano: {query}",
    "{Query} en cifras",
];

const SUMMARY_TEMPLATES: &[&str] = &[
    "Artículo de referencia de {source} que explica {query} y su relación con {category}.",
    "Antecedentes, marco legal y datos históricos sobre {query}.",
    "Resumen enciclopédico con fuentes y bibliografía sobre {query}.",
];

const SUGGESTION_TEMPLATES: &[&str] = &[
    "historia de {query}",
    "{query} definición",
    "{query} estadísticas",
];

/// Synthetic provider for reference and encyclopedic articles.
#[derive(Debug, Clone)]
pub struct ReferenceProvider {
    latency_ms: (u64, u64),
}

impl ReferenceProvider {
    pub fn new(latency_ms: (u64, u64)) -> Self {
        Self { latency_ms }
    }

    fn generate(&self, query: &str, category: Option<&str>, count: usize) -> Vec<ResultItem> {
        let mut rng = rand::thread_rng();
        let now = Utc::now();
        let nonce = synth::request_nonce();
        let provider = ProviderKind::Reference.name();
        let query_slug = slugify(query);

        (0..count)
            .map(|position| {
                let source = SOURCES[position % SOURCES.len()];
                let category = synth::pick_category(category, position);
                let title_template = TITLE_TEMPLATES
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or("{Query}");
                let summary_template = SUMMARY_TEMPLATES[position % SUMMARY_TEMPLATES.len()];
                let reading_minutes: u32 = rng.gen_range(3..=25);

                ResultItem::new(
                    format!("{provider}-{nonce:08x}-{position}"),
                    synth::fill(title_template, query, source.name, category),
                    synth::fill(summary_template, query, source.name, category),
                    source.name,
                    provider,
                )
                .with_url(format!(
                    "https://{}/wiki/{query_slug}-{}-{position}",
                    source.domain,
                    slugify(category)
                ))
                .with_category(category)
                .with_timestamp(synth::past_timestamp(
                    now,
                    (30 * 24 * 60, 365 * 24 * 60),
                    &mut rng,
                ))
                .with_relevance(TIER.score(position, &mut rng))
                .with_tags(
                    synth::base_tags(query, category)
                        .into_iter()
                        .chain(["referencia".to_owned()]),
                )
                .with_extra("readingTimeMinutes", reading_minutes)
            })
            .collect()
    }
}

#[async_trait]
impl Provider for ReferenceProvider {
    async fn search(
        &self,
        query: &str,
        category: Option<&str>,
        max_results: usize,
    ) -> Result<Vec<ResultItem>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        tracing::trace!(query, "reference provider search");
        synth::simulate_latency(self.latency_ms).await;
        Ok(self.generate(query, category, max_results.min(MAX_RESULTS)))
    }

    async fn suggestions(&self, query: &str) -> Result<Vec<String>, SearchError> {
        Ok(synth::expand_suggestions(query, SUGGESTION_TEMPLATES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> ReferenceProvider {
        ReferenceProvider::new((0, 0))
    }

    #[tokio::test]
    async fn ceiling_caps_result_count() {
        let results = provider().search("humedales", None, 100).await.expect("ok");
        assert_eq!(results.len(), MAX_RESULTS);
    }

    #[tokio::test]
    async fn scores_stay_in_reference_tier() {
        let results = provider().search("humedales", None, MAX_RESULTS).await.expect("ok");
        for item in &results {
            assert!((65..=95).contains(&item.relevance_score));
        }
    }

    #[tokio::test]
    async fn articles_are_older_than_a_month() {
        let now = Utc::now();
        let results = provider().search("humedales", None, 5).await.expect("ok");
        for item in &results {
            let age = now - item.timestamp.expect("timestamp");
            assert!(age.num_days() >= 29);
        }
    }

    #[tokio::test]
    async fn zero_max_results_is_empty() {
        let results = provider().search("humedales", None, 0).await.expect("ok");
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn suggestions_mention_query() {
        let suggestions = provider().suggestions("Humedales").await.expect("ok");
        assert!(suggestions.iter().all(|s| s.contains("humedales")));
    }
}
