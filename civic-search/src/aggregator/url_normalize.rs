//! URL canonicalisation for the dedup key.
//!
//! Two links to the same page that differ only in host case, default port,
//! trailing slash, query-parameter order, tracking parameters, or fragment
//! produce the same key.

use url::form_urlencoded;
use url::Url;

/// Query parameters that never identify content.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "igshid",
    "ref",
    "si",
];

/// Canonicalise `raw` for comparison. Unparsable input is returned trimmed
/// but otherwise unchanged.
///
/// ```
/// use civic_search::aggregator::url_normalize::normalize_url;
///
/// let a = normalize_url("https://Bogota.GOV.co/movilidad/?b=2&a=1#anexo");
/// let b = normalize_url("https://bogota.gov.co/movilidad?a=1&b=2");
/// assert_eq!(a, b);
/// ```
pub fn normalize_url(raw: &str) -> String {
    let raw = raw.trim();
    let Ok(mut parsed) = Url::parse(raw) else {
        return raw.to_owned();
    };

    parsed.set_fragment(None);

    let default_port = matches!(
        (parsed.scheme(), parsed.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if default_port {
        let _ = parsed.set_port(None);
    }

    let mut params: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !TRACKING_PARAMS.contains(&key.to_lowercase().as_str()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    params.sort();
    if params.is_empty() {
        parsed.set_query(None);
    } else {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter())
            .finish();
        parsed.set_query(Some(&query));
    }

    let path = parsed.path().to_owned();
    if path.len() > 1 && path.ends_with('/') {
        parsed.set_path(path.trim_end_matches('/'));
    }

    // Url::parse lowercases scheme and host already.
    parsed.to_string()
}
