//! Article extraction with fallback.
//!
//! Readability runs first. When it yields no usable content the document body
//! is taken as-is, with links and images rewritten to absolute URLs.

use dom_query::Document;
use tracing::debug;
use url::Url;

use crate::url_utils::absolutize;

/// Content chosen for the response, before sanitization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedContent {
    /// Readability found an article.
    Article {
        /// Article title, empty if none was found.
        title: String,
        /// Article HTML fragment.
        content: String,
    },
    /// Whole body of the cleaned document (or the raw page if it had no body).
    Fallback {
        /// Body HTML fragment.
        body: String,
    },
}

impl ExtractedContent {
    /// HTML fragment handed to the sanitizer.
    ///
    /// Articles are prefixed with an `<h1>` of their (escaped) title.
    #[must_use]
    pub fn into_html(self) -> String {
        match self {
            Self::Article { title, content } => {
                format!("<h1>{}</h1>{content}", ammonia::clean_text(&title))
            }
            Self::Fallback { body } => body,
        }
    }

    /// `true` for the readability path.
    #[must_use]
    pub fn is_article(&self) -> bool {
        matches!(self, Self::Article { .. })
    }
}

/// Try readability extraction on a cleaned document.
///
/// Any extraction failure, and any result with blank content, is `None`.
#[cfg(feature = "readability")]
#[must_use]
pub fn extract_article(doc: &Document, base: &Url) -> Option<(String, String)> {
    use dom_smoothie::Readability;

    let mut reader = match Readability::with_document(doc.clone(), Some(base.as_str()), None) {
        Ok(reader) => reader,
        Err(e) => {
            debug!("Readability setup failed: {e}");
            return None;
        }
    };

    let article = match reader.parse() {
        Ok(article) => article,
        Err(e) => {
            debug!("Readability found no article: {e}");
            return None;
        }
    };

    let content = article.content.to_string();
    if content.trim().is_empty() {
        debug!("Readability returned empty content");
        return None;
    }

    Some((article.title.trim().to_string(), content))
}

/// Without the `readability` feature every page takes the fallback path.
#[cfg(not(feature = "readability"))]
#[must_use]
pub fn extract_article(_doc: &Document, _base: &Url) -> Option<(String, String)> {
    None
}

/// Rewrite anchors and images to absolute URLs, then return the body HTML.
///
/// Every anchor also gets `target="_blank"` and `rel="noopener noreferrer"`.
/// Values that cannot be resolved against `base` are left untouched. When the
/// document has no body, `raw_html` is returned unchanged.
#[must_use]
pub fn fallback_body(doc: &Document, base: &Url, raw_html: &str) -> String {
    for anchor in doc.select("a").nodes() {
        if let Some(href) = anchor.attr("href") {
            anchor.set_attr("href", &absolutize(&href, base));
        }
        anchor.set_attr("target", "_blank");
        anchor.set_attr("rel", "noopener noreferrer");
    }

    for image in doc.select("img[src]").nodes() {
        if let Some(src) = image.attr("src") {
            image.set_attr("src", &absolutize(&src, base));
        }
    }

    let body = doc.select("body");
    if body.exists() {
        body.inner_html().to_string()
    } else {
        raw_html.to_string()
    }
}

/// Extract the article, or fall back to the absolutized body.
#[must_use]
pub fn extract_content(doc: &Document, base: &Url, raw_html: &str) -> ExtractedContent {
    choose_content(extract_article(doc, base), doc, base, raw_html)
}

/// Settle on the article when there is one, else build the fallback body.
///
/// `doc` is only touched on the fallback path.
#[must_use]
pub fn choose_content(
    article: Option<(String, String)>,
    doc: &Document,
    base: &Url,
    raw_html: &str,
) -> ExtractedContent {
    if let Some((title, content)) = article {
        debug!("Extracted article {title:?} ({} bytes)", content.len());
        return ExtractedContent::Article { title, content };
    }

    debug!("No article extracted, using document body");
    ExtractedContent::Fallback {
        body: fallback_body(doc, base, raw_html),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/blog/post").expect("valid base")
    }

    #[test]
    fn article_html_starts_with_title_heading() {
        let content = ExtractedContent::Article {
            title: "Hello <World>".to_string(),
            content: "<p>Body</p>".to_string(),
        };
        let html = content.into_html();
        assert!(html.starts_with("<h1>"));
        assert!(!html.contains("<World>"));
        assert!(html.ends_with("</h1><p>Body</p>"));
    }

    #[test]
    fn article_with_empty_title_has_empty_heading() {
        let content = ExtractedContent::Article {
            title: String::new(),
            content: "<p>Body</p>".to_string(),
        };
        assert_eq!(content.into_html(), "<h1></h1><p>Body</p>");
    }

    #[test]
    fn fallback_absolutizes_links_and_images() {
        let doc = Document::from(
            r#"<html><body>
                <a href="/about">About</a>
                <a href="next">Next</a>
                <a href="https://other.org/">Other</a>
                <a name="anchor-only">Anchor</a>
                <img src="img/pic.png" alt="pic">
            </body></html>"#,
        );
        let base = base();

        let body = fallback_body(&doc, &base, "");

        assert!(body.contains(r#"href="https://example.com/about""#));
        assert!(body.contains(r#"href="https://example.com/blog/next""#));
        assert!(body.contains(r#"href="https://other.org/""#));
        assert!(body.contains(r#"src="https://example.com/blog/img/pic.png""#));
        assert_eq!(doc.select(r#"a[target="_blank"]"#).length(), 4);
        assert_eq!(doc.select(r#"a[rel="noopener noreferrer"]"#).length(), 4);
        assert!(!body.contains("<body"));
    }

    #[test]
    fn fallback_leaves_unresolvable_values() {
        let doc = Document::from(r#"<body><a href="http://host:99999/">bad</a></body>"#);
        let body = fallback_body(&doc, &base(), "");
        assert!(body.contains(r#"href="http://host:99999/""#));
    }

    #[test]
    fn fallback_variant_passes_body_through() {
        let content = ExtractedContent::Fallback {
            body: "<p>as-is</p>".to_string(),
        };
        assert!(!content.is_article());
        assert_eq!(content.into_html(), "<p>as-is</p>");
    }

    #[test]
    fn choose_content_without_article_takes_fallback() {
        let html = r#"<html><body>
            <p>Short note. <a href="/contact">Contact</a></p>
            <img src="logo.png" alt="logo">
        </body></html>"#;
        let doc = Document::from(html);

        let extracted = choose_content(None, &doc, &base(), html);
        assert!(!extracted.is_article());

        let sanitized = crate::sanitize::sanitize_html(&extracted.into_html());
        assert!(sanitized.contains(r#"href="https://example.com/contact""#));
        assert!(sanitized.contains(r#"target="_blank""#));
        assert!(sanitized.contains(r#"rel="noopener noreferrer""#));
        assert!(sanitized.contains(r#"src="https://example.com/blog/logo.png""#));
        assert!(!sanitized.contains("<h1>"));
    }

    #[test]
    fn choose_content_with_article_leaves_document_alone() {
        let doc = Document::from(r#"<body><a href="/rel">x</a></body>"#);

        let extracted = choose_content(
            Some(("Title".to_string(), "<p>Body</p>".to_string())),
            &doc,
            &base(),
            "",
        );

        assert!(extracted.is_article());
        assert_eq!(doc.select("a").attr("href").map(|h| h.to_string()).as_deref(), Some("/rel"));
        assert!(!doc.select("a[target]").exists());
    }

    #[cfg(not(feature = "readability"))]
    #[test]
    fn extract_content_without_readability_always_falls_back() {
        let html = r#"<html><body><p>Text <a href="page">link</a></p></body></html>"#;
        let doc = Document::from(html);

        let extracted = extract_content(&doc, &base(), html);
        assert!(!extracted.is_article());
        assert!(extracted.into_html().contains(r#"href="https://example.com/blog/page""#));
    }

    #[test]
    fn extract_content_keeps_text_either_way() {
        let paragraph = "Real text long enough to be an article body, repeated for length. ";
        let html = format!(
            "<html><head><title>Story</title></head><body><article><p>{}</p><p>{}</p></article></body></html>",
            paragraph.repeat(10),
            paragraph.repeat(10)
        );
        let doc = Document::from(html.as_str());

        let extracted = extract_content(&doc, &base(), &html);
        assert!(extracted.into_html().contains("Real text long enough"));
    }
}
