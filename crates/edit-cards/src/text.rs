//! Markup to display-text helpers.

use scraper::Html;

const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "br", "li", "ul", "ol", "dl", "dd", "dt", "tr", "blockquote", "h1", "h2", "h3",
    "h4", "h5", "h6",
];

const SKIPPED_ELEMENTS: &[&str] = &["script", "style"];

/// Render an HTML fragment as plain text.
///
/// Entities are decoded and whitespace is collapsed. Block elements start a
/// new line; empty lines are dropped.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut raw = String::new();

    for node in fragment.root_element().descendants() {
        if let Some(element) = node.value().as_element() {
            if BLOCK_ELEMENTS.contains(&element.name()) {
                raw.push('\n');
            }
        } else if let Some(text) = node.value().as_text() {
            let skipped = node
                .parent()
                .and_then(|p| p.value().as_element().map(|e| e.name()))
                .is_some_and(|name| SKIPPED_ELEMENTS.contains(&name));
            if !skipped {
                // Source newlines are plain whitespace; only blocks break lines.
                raw.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
            }
        }
    }

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove markup from a short single-line value (artist, credit, license).
pub fn strip_markup(value: &str) -> String {
    html_to_text(value).replace('\n', " ")
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
