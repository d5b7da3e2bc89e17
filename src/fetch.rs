//! Upstream page fetching.
//!
//! One shared `reqwest::Client` (connection pool) per process. Each fetch is a
//! single GET with no retries.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use tracing::{debug, warn};
use url::Url;

use crate::encoding::decode_body;
use crate::{Config, Error, Result};

/// HTTP client for target pages.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    max_body_bytes: usize,
}

impl Fetcher {
    /// Build a fetcher with the configured user agent, timeout and redirect limit.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// GET `url` and return the decoded HTML body.
    ///
    /// Non-2xx statuses become [`Error::UpstreamStatus`]; transport failures,
    /// timeouts and bodies larger than `max_body_bytes` become
    /// [`Error::UpstreamRequest`].
    pub async fn fetch(&self, url: &Url) -> Result<String> {
        debug!("Fetching {url}");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!("Upstream request to {url} failed: {e}");
            Error::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream {url} returned HTTP {}", status.as_u16());
            return Err(Error::UpstreamStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = self.read_body(url, response).await?;

        debug!("Fetched {} bytes from {url}", bytes.len());
        Ok(decode_body(&bytes, content_type.as_deref()))
    }

    /// Read the body chunk by chunk, stopping once it passes `max_body_bytes`.
    async fn read_body(&self, url: &Url, mut response: Response) -> Result<Vec<u8>> {
        let limit = self.max_body_bytes;
        let too_large = |size: u64| {
            warn!("Upstream {url} body of {size}+ bytes exceeds limit of {limit}");
            Error::UpstreamRequest(format!("body exceeds {limit} bytes"))
        };

        if let Some(declared) = response.content_length() {
            if declared > limit as u64 {
                return Err(too_large(declared));
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            warn!("Reading body from {url} failed: {e}");
            Error::from(e)
        })? {
            if body.len() + chunk.len() > limit {
                return Err(too_large((body.len() + chunk.len()) as u64));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }
}
