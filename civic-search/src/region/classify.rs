//! Ordered keyword classification for upstream hits.
//!
//! Rules are tried in list order and the first whose keywords appear in the
//! text wins, so the order of [`CATEGORY_RULES`] and [`COUNTRY_RULES`] is the
//! classification priority. Keywords match whole words (or whole word
//! sequences) of the lowercased text.

use crate::text::tokenize;

/// Category assigned when no rule matches.
pub const GENERAL_CATEGORY: &str = "general";

/// Country assigned when no rule matches.
pub const GLOBAL_COUNTRY: &str = "Global";

/// One `(keywords, label)` rule.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

pub const CATEGORY_RULES: &[KeywordRule] = &[
    KeywordRule {
        label: "politics",
        keywords: &[
            "election",
            "elections",
            "elección",
            "elecciones",
            "congress",
            "congreso",
            "senate",
            "senado",
            "president",
            "presidente",
            "government",
            "gobierno",
            "parliament",
            "minister",
            "ministro",
            "mayor",
            "alcalde",
            "policy",
            "política",
        ],
    },
    KeywordRule {
        label: "economics",
        keywords: &[
            "economy",
            "economía",
            "inflation",
            "inflación",
            "market",
            "markets",
            "mercado",
            "gdp",
            "pib",
            "trade",
            "comercio",
            "bank",
            "banco",
            "employment",
            "empleo",
            "budget",
            "presupuesto",
            "tax",
            "impuestos",
        ],
    },
    KeywordRule {
        label: "international",
        keywords: &[
            "united nations",
            "naciones unidas",
            "onu",
            "international",
            "internacional",
            "foreign",
            "embassy",
            "embajada",
            "summit",
            "cumbre",
            "treaty",
            "tratado",
            "diplomatic",
            "diplomacia",
        ],
    },
    KeywordRule {
        label: "technology",
        keywords: &[
            "technology",
            "tecnología",
            "software",
            "internet",
            "digital",
            "artificial intelligence",
            "inteligencia artificial",
            "ai",
            "startup",
            "cybersecurity",
            "ciberseguridad",
        ],
    },
    KeywordRule {
        label: "health",
        keywords: &[
            "health",
            "salud",
            "hospital",
            "vaccine",
            "vacuna",
            "vacunación",
            "disease",
            "enfermedad",
            "medical",
            "médico",
            "pandemic",
            "pandemia",
        ],
    },
    KeywordRule {
        label: "education",
        keywords: &[
            "education",
            "educación",
            "school",
            "schools",
            "colegio",
            "colegios",
            "university",
            "universidad",
            "student",
            "students",
            "estudiantes",
        ],
    },
    KeywordRule {
        label: "environment",
        keywords: &[
            "environment",
            "ambiente",
            "ambiental",
            "climate",
            "clima",
            "pollution",
            "contaminación",
            "emissions",
            "emisiones",
            "forest",
            "bosque",
            "air quality",
            "calidad del aire",
        ],
    },
    KeywordRule {
        label: "sports",
        keywords: &[
            "football",
            "fútbol",
            "soccer",
            "olympic",
            "olympics",
            "olímpicos",
            "league",
            "liga",
            "tournament",
            "torneo",
            "sport",
            "sports",
            "deporte",
            "deportes",
        ],
    },
    KeywordRule {
        label: "culture",
        keywords: &[
            "culture",
            "cultura",
            "music",
            "música",
            "festival",
            "art",
            "arte",
            "museum",
            "museo",
            "film",
            "cine",
            "book",
            "libro",
            "theatre",
            "teatro",
        ],
    },
];

pub const COUNTRY_RULES: &[KeywordRule] = &[
    KeywordRule {
        label: "Colombia",
        keywords: &[
            "colombia",
            "colombian",
            "colombiano",
            "colombiana",
            "bogotá",
            "bogota",
            "medellín",
            "medellin",
            "cali",
            "barranquilla",
            "cartagena",
        ],
    },
    KeywordRule {
        label: "United States",
        keywords: &[
            "united states",
            "estados unidos",
            "usa",
            "washington",
            "new york",
        ],
    },
    KeywordRule {
        label: "Mexico",
        keywords: &["mexico", "méxico", "mexican", "mexicano"],
    },
    KeywordRule {
        label: "Brazil",
        keywords: &["brazil", "brasil", "brazilian", "brasileño"],
    },
    KeywordRule {
        label: "Argentina",
        keywords: &["argentina", "argentine", "argentino", "buenos aires"],
    },
    KeywordRule {
        label: "Venezuela",
        keywords: &["venezuela", "venezuelan", "venezolano", "caracas"],
    },
    KeywordRule {
        label: "Spain",
        keywords: &["spain", "españa", "spanish", "madrid"],
    },
    KeywordRule {
        label: "United Kingdom",
        keywords: &[
            "united kingdom",
            "reino unido",
            "uk",
            "britain",
            "london",
            "londres",
        ],
    },
    KeywordRule {
        label: "France",
        keywords: &["france", "francia", "french", "paris", "parís"],
    },
    KeywordRule {
        label: "Germany",
        keywords: &["germany", "alemania", "german", "berlin", "berlín"],
    },
    KeywordRule {
        label: "China",
        keywords: &["china", "chinese", "beijing", "pekín"],
    },
    KeywordRule {
        label: "Ukraine",
        keywords: &["ukraine", "ucrania", "kyiv", "kiev"],
    },
    KeywordRule {
        label: "Russia",
        keywords: &["russia", "rusia", "russian", "moscow", "moscú"],
    },
];

/// Label of the first rule matching `text`, or `fallback`.
pub fn classify(text: &str, rules: &[KeywordRule], fallback: &'static str) -> &'static str {
    let padded = format!(" {} ", tokenize(text).collect::<Vec<_>>().join(" "));
    rules
        .iter()
        .find(|rule| {
            rule.keywords
                .iter()
                .any(|kw| padded.contains(&format!(" {kw} ")))
        })
        .map_or(fallback, |rule| rule.label)
}

pub fn classify_category(text: &str) -> &'static str {
    classify(text, CATEGORY_RULES, GENERAL_CATEGORY)
}

pub fn classify_country(text: &str) -> &'static str {
    classify(text, COUNTRY_RULES, GLOBAL_COUNTRY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_rule_wins() {
        // Mentions both politics and economics; politics is listed first.
        assert_eq!(
            classify_category("Congress debates the new budget"),
            "politics"
        );
        assert_eq!(classify_category("Budget cuts hit the hospital"), "economics");
    }

    #[test]
    fn matches_whole_words_only() {
        // "art" must not match inside "party" or "start".
        assert_eq!(classify_category("Party start"), GENERAL_CATEGORY);
        assert_eq!(classify_category("Festival de arte en el parque"), "culture");
    }

    #[test]
    fn multi_word_keywords() {
        assert_eq!(
            classify_category("La calidad del aire empeora"),
            "environment"
        );
        assert_eq!(
            classify_country("Acuerdo firmado con Estados Unidos"),
            "United States"
        );
    }

    #[test]
    fn unmatched_text_gets_fallbacks() {
        assert_eq!(classify_category("lorem ipsum"), "general");
        assert_eq!(classify_country("lorem ipsum"), "Global");
        assert_eq!(classify_category(""), "general");
    }

    #[test]
    fn country_detection_is_case_insensitive() {
        assert_eq!(classify_country("Nueva línea del metro en BOGOTÁ"), "Colombia");
        assert_eq!(classify_country("Summit in London"), "United Kingdom");
    }

    #[test]
    fn punctuation_does_not_block_matches() {
        assert_eq!(classify_category("Vaccine, rollout: phase two"), "health");
    }
}
