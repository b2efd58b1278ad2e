//! HTML-to-text for upstream titles and snippets.
//!
//! Upstream hits may carry inline markup (`<b>` highlights, line breaks) and
//! character entities. Parsing the fragment with `scraper` drops the tags and
//! decodes the entities in one pass; script and style bodies are skipped so
//! they never leak into a summary.

use scraper::{Html, Node};

/// Plain text of an HTML fragment with whitespace collapsed.
///
/// ```
/// use civic_search::html::strip_html;
///
/// assert_eq!(strip_html("<b>Plan</b> de&nbsp;Movilidad &amp; Obras"), "Plan de Movilidad & Obras");
/// ```
pub fn strip_html(fragment: &str) -> String {
    if !fragment.contains(['<', '&']) {
        return collapse_whitespace(fragment);
    }

    let parsed = Html::parse_fragment(fragment);
    let mut text = String::with_capacity(fragment.len());
    for node in parsed.tree.root().descendants() {
        match node.value() {
            Node::Element(el) if matches!(el.name(), "br" | "p" | "div" | "li") => text.push(' '),
            Node::Text(chunk) => {
                let hidden = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|el| matches!(el.name(), "script" | "style"))
                });
                if !hidden {
                    text.push_str(chunk);
                }
            }
            _ => {}
        }
    }
    collapse_whitespace(&text)
}

/// Collapse runs of whitespace (including non-breaking spaces) to one space.
fn collapse_whitespace(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
