//! Allow-list HTML sanitization.
//!
//! Starts from ammonia's default safe tag set, adds images, headings and
//! table markup, and replaces the attribute lists with a fixed allow-list.
//! Event handlers and `javascript:` URLs never survive.

use std::collections::{HashMap, HashSet};

use ammonia::Builder;

/// Tags allowed on top of ammonia's defaults.
pub const EXTRA_TAGS: &[&str] = &[
    "img", "h1", "h2", "h3", "h4", "h5", "h6", "table", "thead", "tbody", "tfoot", "tr", "th",
    "td", "caption", "colgroup", "col",
];

/// Attributes allowed on any tag.
pub const GENERIC_ATTRIBUTES: &[&str] = &["class", "id", "style"];

const ANCHOR_ATTRIBUTES: &[&str] = &["href", "name", "target", "rel"];
const IMAGE_ATTRIBUTES: &[&str] = &["src", "alt", "title", "width", "height"];

fn builder() -> Builder<'static> {
    let tag_attributes: HashMap<&'static str, HashSet<&'static str>> = HashMap::from([
        ("a", ANCHOR_ATTRIBUTES.iter().copied().collect()),
        ("img", IMAGE_ATTRIBUTES.iter().copied().collect()),
    ]);

    let mut builder = Builder::default();
    builder
        .add_tags(EXTRA_TAGS)
        .tag_attributes(tag_attributes)
        .generic_attributes(GENERIC_ATTRIBUTES.iter().copied().collect())
        // `rel` is caller-controlled; ammonia refuses both at once.
        .link_rel(None);
    builder
}

/// Filter an HTML fragment through the allow-list.
#[must_use]
pub fn sanitize_html(fragment: &str) -> String {
    builder().clean(fragment).to_string()
}
