//! Error types for adfree-reader.
//!
//! Every failure of the cleaning pipeline maps to exactly one of these
//! variants, and every variant maps to exactly one HTTP status.

/// Error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Target URL missing, not http(s), or not parseable.
    #[error("Invalid target URL: {0}")]
    InvalidInput(String),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned HTTP {0}")]
    UpstreamStatus(u16),

    /// Upstream request failed before a status was received (network, timeout, TLS).
    #[error("Upstream request failed: {0}")]
    UpstreamRequest(String),

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP status code reported to the client.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::UpstreamStatus(_) | Self::UpstreamRequest(_) => 502,
            Self::Internal(_) => 500,
        }
    }

    /// Message placed in the JSON error body.
    ///
    /// Fixed per kind. Variant payloads are never included.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "Invalid URL",
            Self::UpstreamStatus(_) | Self::UpstreamRequest(_) => "Failed to fetch target",
            Self::Internal(_) => "Server error",
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::UpstreamStatus(status.as_u16());
        }
        if err.is_builder() {
            return Self::Internal(err.to_string());
        }
        Self::UpstreamRequest(err.to_string())
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(Error::InvalidInput("x".into()).status_code(), 400);
        assert_eq!(Error::UpstreamStatus(404).status_code(), 502);
        assert_eq!(Error::UpstreamRequest("timeout".into()).status_code(), 502);
        assert_eq!(Error::Internal("boom".into()).status_code(), 500);
    }

    #[test]
    fn public_messages_hide_details() {
        let err = Error::Internal("stack trace with secrets".into());
        assert_eq!(err.public_message(), "Server error");
        assert_eq!(Error::UpstreamStatus(503).public_message(), "Failed to fetch target");
        assert_eq!(Error::InvalidInput(String::new()).public_message(), "Invalid URL");
    }
}
