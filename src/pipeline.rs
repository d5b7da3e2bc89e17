//! The content cleaning pipeline.
//!
//! Validate → Fetch → Parse → strip ads → Extract (article or fallback) →
//! Sanitize → Render. Linear, no retries; the first error ends the request.

use dom_query::Document;
use tracing::{debug, error, info};
use url::Url;

use crate::clean::strip_ads;
use crate::extract::{extract_content, ExtractedContent};
use crate::fetch::Fetcher;
use crate::render::render_page;
use crate::sanitize::sanitize_html;
use crate::url_utils::validate_target;
use crate::{Error, Result};

/// Turn fetched HTML into the final viewer page.
///
/// Covers everything after the network: parse, ad removal, extraction,
/// sanitization and rendering. Pure and synchronous.
///
/// # Example
///
/// ```rust
/// use adfree_reader::clean_page;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/post").unwrap();
/// let page = clean_page("<body><script>x()</script><p>Hi</p></body>", &base);
/// assert!(!page.contains("<script>x()"));
/// assert!(page.contains("Hi"));
/// ```
#[must_use]
pub fn clean_page(html: &str, target: &Url) -> String {
    let doc = Document::from(html);

    strip_ads(&doc);

    let extracted = extract_content(&doc, target, html);
    render_content(extracted, target)
}

/// Sanitize the chosen content and wrap it in the viewer page.
#[must_use]
pub fn render_content(extracted: ExtractedContent, target: &Url) -> String {
    debug!(
        "Using {} content for {target}",
        if extracted.is_article() { "article" } else { "fallback" }
    );

    let sanitized = sanitize_html(&extracted.into_html());
    render_page(&sanitized, target.as_str())
}

/// Run the whole pipeline for one requested target.
///
/// The document work runs on the blocking pool; a panic there surfaces as
/// [`Error::Internal`] and no partial page is produced.
pub async fn process(fetcher: &Fetcher, raw_target: Option<&str>) -> Result<String> {
    let target = validate_target(raw_target)?;
    info!("Cleaning {target}");

    let html = fetcher.fetch(&target).await?;

    tokio::task::spawn_blocking(move || clean_page(&html, &target))
        .await
        .map_err(|e| {
            error!("Cleaning task failed: {e}");
            Error::Internal(e.to_string())
        })
}
