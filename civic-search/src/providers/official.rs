//! Official documents provider: decrees, agreements, reports and bulletins
//! attributed to government entities.
//!
//! Content is synthetic. The provider sits behind [`Provider`] so an open-data
//! integration can replace it without touching the aggregator.

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
        name: "Alcaldía Mayor de Bogotá",
        domain: "bogota.gov.co",
    },
    SourceIdentity {
        name: "Secretaría Distrital de Movilidad",
        domain: "movilidadbogota.gov.co",
    },
    SourceIdentity {
        name: "Concejo de Bogotá",
        domain: "concejodebogota.gov.co",
    },
    SourceIdentity {
        name: "Departamento Nacional de Planeación",
        domain: "dnp.gov.co",
    },
    SourceIdentity {
        name: "Secretaría Distrital de Salud",
        domain: "saludcapital.gov.co",
    },
];

/// Official documents sit in the highest authority tier.
const TIER: AuthorityTier = AuthorityTier {
    base: 96,
    decay: 2,
    jitter: 3,
    floor: 70,
    ceiling: 100,
};

/// Most results this provider returns per call.
pub const MAX_RESULTS: usize = 30;

const DOCUMENT_TYPES: &[&str] = &["decreto", "resolución", "acuerdo", "informe", "boletín"];

fn title_templates(category: &str) -> &'static [&'static str] {
    match category {
        "Politica" => &[
            "Acuerdo distrital sobre {query}",
            "{source} presenta lineamientos de {query}",
        ],
        "Economia" => &[
            "Presupuesto asignado a {query} para la vigencia",
            "Informe fiscal: impacto económico de {query}",
        ],
        "Transporte" => &[
            "Resolución de movilidad: {query}",
            "{source} actualiza el plan de {query}",
        ],
        "Salud" => &[
            "Circular de salud pública sobre {query}",
            "Lineamientos sanitarios para {query}",
        ],
        "Educacion" => &[
            "Programa educativo distrital: {query}",
            "Convocatoria oficial relacionada con {query}",
        ],
        "Seguridad" => &[
            "Decreto de convivencia y seguridad: {query}",
            "Balance oficial de seguridad en {query}",
        ],
        _ => &[
            "Informe ambiental sobre {query}",
            "{source} regula {query} en el territorio",
        ],
    }
}

const SUMMARY_TEMPLATES: &[&str] = &[
    "Documento oficial de {source} que establece disposiciones sobre {query} en el ámbito de {category}.",
    "{source} publica el texto completo y los anexos técnicos relacionados con {query}.",
    "Acto administrativo vigente en materia de {category} con referencias a {query}.",
];

const SUGGESTION_TEMPLATES: &[&str] = &[
    "{query} decreto",
    "{query} normativa vigente",
    "{query} presupuesto distrital",
    "{query} rendición de cuentas",
];

/// Synthetic provider for government and official documents.
#[derive(Debug, Clone)]
pub struct OfficialProvider {
    latency_ms: (u64, u64),
}

impl OfficialProvider {
    pub fn new(latency_ms: (u64, u64)) -> Self {
        Self { latency_ms }
    }

    fn generate(&self, query: &str, category: Option<&str>, count: usize) -> Vec<ResultItem> {
        let mut rng = rand::thread_rng();
        let now = Utc::now();
        let nonce = synth::request_nonce();
        let provider = ProviderKind::Official.name();

        (0..count)
            .map(|position| {
                let source = SOURCES[position % SOURCES.len()];
                let category = synth::pick_category(category, position);
                let title_template = title_templates(category)
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or("{Query}");
                let summary_template = SUMMARY_TEMPLATES[position % SUMMARY_TEMPLATES.len()];
                let document_type = DOCUMENT_TYPES
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or("informe");
                let number = rng.gen_range(100..=999);
                let title = synth::fill(title_template, query, source.name, category);

                ResultItem::new(
                    format!("{provider}-{nonce:08x}-{position}"),
                    format!("{title} ({document_type} {number})"),
                    synth::fill(summary_template, query, source.name, category),
                    source.name,
                    provider,
                )
                .with_url(format!(
                    "https://{}/{}/{}-{number}",
                    source.domain,
                    slugify(category),
                    slugify(query)
                ))
                .with_category(category)
                .with_timestamp(synth::past_timestamp(now, (60, 45 * 24 * 60), &mut rng))
                .with_relevance(TIER.score(position, &mut rng))
                .with_tags(synth::base_tags(query, category).into_iter().chain([
                    "oficial".to_owned(),
                    document_type.to_owned(),
                ]))
                .with_extra("documentType", document_type)
                .with_extra("documentNumber", number)
            })
            .collect()
    }
}

#[async_trait]
impl Provider for OfficialProvider {
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
        tracing::trace!(query, "official provider search");
        synth::simulate_latency(self.latency_ms).await;
        Ok(self.generate(query, category, max_results.min(MAX_RESULTS)))
    }

    async fn suggestions(&self, query: &str) -> Result<Vec<String>, SearchError> {
        Ok(synth::expand_suggestions(query, SUGGESTION_TEMPLATES))
    }
}
