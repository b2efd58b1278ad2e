//! Social-media provider: short public posts from civic accounts.

use async_trait::async_trait;
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SearchError;
use crate::provider::Provider;
use crate::types::{ProviderKind, ResultItem};

use super::synth::{self, AuthorityTier, SourceIdentity};

const SOURCES: &[SourceIdentity] = &[
    SourceIdentity {
        name: "@BogotaTransito",
        domain: "x.com",
    },
    SourceIdentity {
        name: "@ConcejoBogota",
        domain: "x.com",
    },
    SourceIdentity {
        name: "Veeduría Ciudadana",
        domain: "facebook.com",
    },
    SourceIdentity {
        name: "@RedCiudadanaBog",
        domain: "x.com",
    },
    SourceIdentity {
        name: "Noticias de Barrio",
        domain: "instagram.com",
    },
];

const TIER: AuthorityTier = AuthorityTier {
    base: 86,
    decay: 3,
    jitter: 5,
    floor: 55,
    ceiling: 92,
};

/// Most results this provider returns per call.
pub const MAX_RESULTS: usize = 40;

const TITLE_TEMPLATES: &[&str] = &[
    "{source}: ¿qué opinan de {query}?",
    "Hilo: lo que debe saber sobre {query}",
    "Ciudadanos reportan novedades en {query}",
    "En vivo: debate sobre {query}",
    "{source} comparte actualización de {query}",
];

const SUMMARY_TEMPLATES: &[&str] = &[
    "Publicación de {source} con reacciones ciudadanas sobre {query} ({category}).",
    "Conversación en redes sobre {query}: usuarios comparten experiencias y denuncias.",
    "Tendencia local: {query} gana atención en la categoría {category}.",
];

const SUGGESTION_TEMPLATES: &[&str] = &[
    "{query} tendencias",
    "{query} opiniones ciudadanas",
    "{query} denuncias",
    "{query} en vivo",
];

/// Synthetic provider for social-media posts.
#[derive(Debug, Clone)]
pub struct SocialProvider {
    latency_ms: (u64, u64),
}

impl SocialProvider {
    pub fn new(latency_ms: (u64, u64)) -> Self {
        Self { latency_ms }
    }

    fn generate(&self, query: &str, category: Option<&str>, count: usize) -> Vec<ResultItem> {
        let mut rng = rand::thread_rng();
        let now = Utc::now();
        let nonce = synth::request_nonce();
        let provider = ProviderKind::Social.name();
        let hashtag = format!("#{}", query.split_whitespace().collect::<String>());

        (0..count)
            .map(|position| {
                let source = SOURCES[position % SOURCES.len()];
                let category = synth::pick_category(category, position);
                let title_template = TITLE_TEMPLATES
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or("{Query}");
                let summary_template = SUMMARY_TEMPLATES[position % SUMMARY_TEMPLATES.len()];
                let post_id = u64::from(nonce) * 1_000 + position as u64;
                let handle = source.name.trim_start_matches('@').replace(' ', "");
                let likes: u32 = rng.gen_range(0..=5_000);
                let shares: u32 = rng.gen_range(0..=likes / 4 + 1);

                ResultItem::new(
                    format!("{provider}-{nonce:08x}-{position}"),
                    synth::fill(title_template, query, source.name, category),
                    synth::fill(summary_template, query, source.name, category),
                    source.name,
                    provider,
                )
                .with_url(format!("https://{}/{handle}/status/{post_id}", source.domain))
                .with_category(category)
                .with_timestamp(synth::past_timestamp(now, (5, 48 * 60), &mut rng))
                .with_relevance(TIER.score(position, &mut rng))
                .with_tags(
                    synth::base_tags(query, category)
                        .into_iter()
                        .chain([hashtag.to_lowercase(), "redes".to_owned()]),
                )
                .with_extra("platform", source.domain)
                .with_extra("likes", likes)
                .with_extra("shares", shares)
            })
            .collect()
    }
}

#[async_trait]
impl Provider for SocialProvider {
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
        tracing::trace!(query, "social provider search");
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

    fn provider() -> SocialProvider {
        SocialProvider::new((0, 0))
    }

    #[tokio::test]
    async fn scores_stay_in_social_tier() {
        let results = provider().search("ciclovia", None, MAX_RESULTS).await.expect("ok");
        assert_eq!(results.len(), MAX_RESULTS);
        for item in &results {
            assert!((55..=92).contains(&item.relevance_score));
        }
    }

    #[tokio::test]
    async fn posts_carry_engagement_extras() {
        let results = provider().search("ciclovia", None, 3).await.expect("ok");
        for item in &results {
            assert!(item.extra.contains_key("likes"));
            assert!(item.extra.contains_key("shares"));
            assert!(item.tags.contains(&"#ciclovia".to_string()));
        }
    }

    #[tokio::test]
    async fn posts_are_recent() {
        let now = Utc::now();
        let results = provider().search("ciclovia", None, 10).await.expect("ok");
        for item in &results {
            let ts = item.timestamp.expect("timestamp");
            assert!((now - ts).num_hours() <= 48);
        }
    }

    #[tokio::test]
    async fn urls_are_distinct_within_a_call() {
        let results = provider().search("ciclovia", None, 20).await.expect("ok");
        let mut urls: Vec<_> = results.iter().filter_map(|r| r.url.clone()).collect();
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), 20);
    }

    #[tokio::test]
    async fn suggestions_are_bounded() {
        let suggestions = provider().suggestions("ciclovia").await.expect("ok");
        assert!(suggestions.len() <= 8);
        assert!(suggestions.contains(&"ciclovia tendencias".to_string()));
    }
}
