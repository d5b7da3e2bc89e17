//! Compiled regex patterns and CSS selectors for ad removal.
//!
//! All patterns are compiled once at first use using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Structural Removal
// =============================================================================

/// Elements removed unconditionally before any heuristic runs.
///
/// Scripts, frames, AdSense `<ins>` slots, AMP ad/analytics components and
/// script preloads.
pub static STRUCTURAL_AD_SELECTOR: &str =
    r#"script, iframe, ins, amp-ad, amp-analytics, link[rel="preload"][as="script"]"#;

// =============================================================================
// Heuristic Removal
// =============================================================================

/// Case-insensitive substring patterns tested against `id` and `class`.
///
/// Checked in order; the first hit decides. These are plain substrings, so
/// `ads?` also hits "header", "shadow" and "loading". That imprecision is
/// accepted: the sweep is best-effort, not a guaranteed filter.
pub static AD_ATTRIBUTE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)advert",
        r"(?i)ads?",
        r"(?i)banner",
        r"(?i)sponsored",
        r"(?i)promoted",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("AD_ATTRIBUTE_PATTERNS regex"))
    .collect()
});

/// Returns the first ad pattern matching `value`, if any.
#[must_use]
pub fn matching_ad_pattern(value: &str) -> Option<&'static Regex> {
    AD_ATTRIBUTE_PATTERNS.iter().find(|re| re.is_match(value))
}

// =============================================================================
// Target Validation
// =============================================================================

/// Accepted target URL prefix.
pub static HTTP_URL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("HTTP_URL_PREFIX regex"));
