//! URL Utility Functions
//!
//! Target validation and best-effort resolution of relative references
//! against the target page.

use url::Url;

use crate::patterns::HTTP_URL_PREFIX;
use crate::{Error, Result};

/// Validate a requested target and parse it as the document base.
///
/// The value must be present, start with `http://` or `https://`
/// (case-insensitive) and parse as an absolute URL with a host.
///
/// # Examples
/// ```
/// use adfree_reader::url_utils::validate_target;
///
/// assert!(validate_target(Some("https://example.com/a")).is_ok());
/// assert!(validate_target(Some("not-a-url")).is_err());
/// assert!(validate_target(None).is_err());
/// ```
pub fn validate_target(raw: Option<&str>) -> Result<Url> {
    let raw = raw.ok_or_else(|| Error::InvalidInput("missing target".to_string()))?;

    if !HTTP_URL_PREFIX.is_match(raw) {
        return Err(Error::InvalidInput(format!("not an http(s) URL: {raw}")));
    }

    let url = Url::parse(raw).map_err(|e| Error::InvalidInput(format!("{raw}: {e}")))?;
    if url.host().is_none() {
        return Err(Error::InvalidInput(format!("no host in {raw}")));
    }

    Ok(url)
}

/// Resolve a reference against `base`.
///
/// Returns `None` when the reference cannot be resolved; callers leave
/// the original value in place.
#[must_use]
pub fn resolve_against(reference: &str, base: &Url) -> Option<String> {
    base.join(reference.trim()).ok().map(String::from)
}

/// Absolute form of `reference`, or `reference` unchanged if resolution fails.
#[must_use]
pub fn absolutize(reference: &str, base: &Url) -> String {
    resolve_against(reference, base).unwrap_or_else(|| reference.to_string())
}
