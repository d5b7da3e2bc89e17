//! Character encoding detection for fetched pages.
//!
//! Upstream bodies arrive as bytes. The charset comes from the response
//! `Content-Type` header when present, then from `<meta>` declarations in the
//! document head, and defaults to UTF-8.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// `charset=` parameter of a `Content-Type` header value.
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i);\s*charset\s*=\s*["']?([^"';\s]+)"#).expect("valid regex")
});

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>]+)"#).expect("valid regex")
});

/// Bytes of the document inspected for `<meta>` declarations.
const SNIFF_LEN: usize = 1024;

fn encoding_for(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Charset declared by a `Content-Type` header, if recognised.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    HEADER_CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .and_then(|m| encoding_for(m.as_str()))
}

/// Charset declared in the first kilobyte of the document, if recognised.
///
/// Covers both `<meta charset>` and the `http-equiv="Content-Type"` form,
/// which carries the same `charset=` token inside its `content` attribute.
#[must_use]
pub fn charset_from_meta(html: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    META_CHARSET_RE
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|m| encoding_for(m.as_str()))
}

/// Pick the encoding for a response body.
#[must_use]
pub fn detect_encoding(body: &[u8], content_type: Option<&str>) -> &'static Encoding {
    content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_meta(body))
        .unwrap_or(UTF_8)
}

/// Decode a response body to UTF-8.
///
/// Invalid sequences become U+FFFD; decoding never fails. A leading BOM
/// overrides any declared charset.
///
/// # Examples
///
/// ```
/// use adfree_reader::encoding::decode_body;
///
/// let body = b"<p>Caf\xE9</p>";
/// assert_eq!(decode_body(body, Some("text/html; charset=ISO-8859-1")), "<p>Café</p>");
/// ```
#[must_use]
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(body, content_type);
    let (decoded, _used, _had_errors) = encoding.decode(body);
    decoded.into_owned()
}
