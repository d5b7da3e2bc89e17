//! Ad and tracker removal.
//!
//! Two sweeps run over the parsed document, in order:
//! - **structural**: a fixed selector list (scripts, frames, ad slots)
//! - **heuristic**: any element whose `id` or `class` hits an ad pattern
//!
//! Both remove whole subtrees.

use dom_query::{Document, NodeRef, Selection};
use tracing::debug;

use crate::patterns::{matching_ad_pattern, STRUCTURAL_AD_SELECTOR};

/// Remove every element matched by [`STRUCTURAL_AD_SELECTOR`].
///
/// Returns the number of elements matched.
pub fn remove_structural_ads(doc: &Document) -> usize {
    let matched = doc.select(STRUCTURAL_AD_SELECTOR);
    let count = matched.length();
    matched.remove();
    count
}

/// Remove every element whose `id` or `class` looks like an ad container.
///
/// Elements are visited in document order, so a parent can be removed before
/// its descendants are reached. Descendants of an already removed element are
/// skipped.
///
/// Returns the number of subtrees removed.
pub fn remove_heuristic_ads(doc: &Document) -> usize {
    let candidates = doc.select("[id], [class]").nodes().to_vec();
    let mut removed = 0;

    for node in candidates {
        if !is_attached(&node) {
            continue;
        }
        if let Some(pattern) = ad_pattern_hit(&node) {
            debug!(
                "Removing <{}> matched by {}",
                node.node_name().unwrap_or_default(),
                pattern
            );
            Selection::from(node).remove();
            removed += 1;
        }
    }

    removed
}

/// Run both sweeps. Returns `(structural, heuristic)` removal counts.
pub fn strip_ads(doc: &Document) -> (usize, usize) {
    let structural = remove_structural_ads(doc);
    let heuristic = remove_heuristic_ads(doc);
    debug!("Ad removal: {structural} structural, {heuristic} heuristic");
    (structural, heuristic)
}

/// First ad pattern hit by the node's `id`, then its `class`.
fn ad_pattern_hit(node: &NodeRef) -> Option<&'static str> {
    ["id", "class"]
        .iter()
        .filter_map(|name| node.attr(name))
        .find_map(|value| matching_ad_pattern(&value))
        .map(regex::Regex::as_str)
}

/// Whether the node still hangs off the document root.
fn is_attached(node: &NodeRef) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.is_document() {
            return true;
        }
        current = parent.parent();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_sweep_removes_known_tags() {
        let doc = Document::from(
            r#"<html><head>
                <link rel="preload" as="script" href="/ads.js">
                <link rel="preload" as="style" href="/site.css">
                <script>track()</script>
            </head><body>
                <iframe src="https://ads.example/frame"></iframe>
                <ins class="adsbygoogle"></ins>
                <amp-ad type="x"></amp-ad>
                <amp-analytics></amp-analytics>
                <p>Body</p>
            </body></html>"#,
        );

        assert_eq!(remove_structural_ads(&doc), 6);
        for sel in ["script", "iframe", "ins", "amp-ad", "amp-analytics", r#"link[as="script"]"#] {
            assert!(doc.select(sel).is_empty(), "{sel} should be gone");
        }
        assert!(doc.select(r#"link[as="style"]"#).exists());
        assert!(doc.select("p").exists());
    }

    #[test]
    fn test_heuristic_sweep_matches_id_and_class() {
        let doc = Document::from(
            r#"<body>
                <div id="AdvertTop">buy</div>
                <div class="Sponsored-Box">buy</div>
                <aside class="promoted">buy</aside>
                <section class="site-banner">buy</section>
                <p class="intro">keep</p>
            </body>"#,
        );

        assert_eq!(remove_heuristic_ads(&doc), 4);
        assert!(!doc.select("body").text().contains("buy"));
        assert!(doc.select("p.intro").exists());
    }

    #[test]
    fn test_heuristic_sweep_removes_subtrees_once() {
        let doc = Document::from(
            r#"<body>
                <div class="ad-wrapper">
                    <div class="ad-inner"><span id="ad-label">Ad</span></div>
                </div>
                <p>keep</p>
            </body>"#,
        );

        // Only the outermost match counts; its descendants are detached with it.
        assert_eq!(remove_heuristic_ads(&doc), 1);
        assert!(doc.select(".ad-inner, #ad-label").is_empty());
        assert!(doc.select("p").exists());
    }

    #[test]
    fn test_heuristic_sweep_keeps_false_positive_behaviour() {
        let doc = Document::from(r#"<body><div class="page-header">Title</div><p>x</p></body>"#);
        assert_eq!(remove_heuristic_ads(&doc), 1);
        assert!(doc.select(".page-header").is_empty());
    }

    #[test]
    fn test_strip_ads_runs_both_sweeps() {
        let doc = Document::from(
            r#"<body><script>bad()</script><p class="ad-banner">X</p><p>Real text</p></body>"#,
        );

        assert_eq!(strip_ads(&doc), (1, 1));
        let html = doc.html().to_string();
        assert!(!html.contains("<script"));
        assert!(!html.contains("ad-banner"));
        assert!(html.contains("Real text"));
    }
}
