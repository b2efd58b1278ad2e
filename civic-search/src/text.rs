//! Small text helpers shared by ranking, dedup, and the synthetic providers.

/// Split text into lowercase alphanumeric tokens.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Distinct lowercase terms of `query` longer than `min_chars` characters,
/// in first-seen order, at most `max_terms` of them.
pub fn query_terms(query: &str, min_chars: usize, max_terms: usize) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for token in tokenize(query) {
        if token.chars().count() > min_chars && !terms.contains(&token) {
            terms.push(token);
            if terms.len() == max_terms {
                break;
            }
        }
    }
    terms
}

/// Normalise a title for duplicate detection: lowercase, punctuation
/// stripped, whitespace collapsed.
pub fn normalize_title(title: &str) -> String {
    let stripped: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// URL-path-safe slug (ASCII lowercase, hyphen separated).
pub fn slugify(text: &str) -> String {
    let slug = tokenize(text)
        .map(|t| {
            t.chars()
                .map(fold_accent)
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
        })
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "item".to_owned()
    } else {
        slug
    }
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        other => other,
    }
}

/// Uppercase the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_terms_filters_short_and_duplicate_tokens() {
        let terms = query_terms("El Transporte de Bogotá, transporte!", 2, 10);
        assert_eq!(terms, vec!["transporte", "bogotá"]);
    }

    #[test]
    fn query_terms_caps_count() {
        let terms = query_terms("uno dos tres cuatro cinco seis", 2, 3);
        assert_eq!(terms, vec!["uno", "dos", "tres"]);
    }

    #[test]
    fn query_terms_length_counts_chars_not_bytes() {
        // "añó" is 3 chars but 5 bytes.
        assert_eq!(query_terms("añó", 2, 10), vec!["añó"]);
        assert!(query_terms("añ", 2, 10).is_empty());
    }

    #[test]
    fn normalize_title_strips_punctuation_and_whitespace() {
        assert_eq!(
            normalize_title("  Plan de   Movilidad: ¡Nuevo!  "),
            "plan de movilidad nuevo"
        );
        assert_eq!(normalize_title("A-B"), normalize_title("a b"));
    }

    #[test]
    fn slugify_folds_accents() {
        assert_eq!(slugify("Bogotá Transporte Público"), "bogota-transporte-publico");
        assert_eq!(slugify("¿?"), "item");
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("educacion"), "Educacion");
        assert_eq!(capitalize(""), "");
    }
}
