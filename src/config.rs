//! Runtime configuration for the reader proxy.
//!
//! The `Config` struct holds the listening port, static asset directory and
//! upstream fetch settings. It is built once at startup and never mutated.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

/// User-Agent header sent with every upstream request.
pub const DEFAULT_USER_AGENT: &str = "AdFreeProxy/1.0 (+https://example.com)";

/// Default listening port when `PORT` is unset or invalid.
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration for the server and its upstream client.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings, or [`Config::from_env`] to honor the environment.
///
/// # Example
///
/// ```rust
/// use adfree_reader::Config;
/// use std::time::Duration;
///
/// let config = Config {
///     port: 8080,
///     fetch_timeout: Duration::from_secs(5),
///     ..Config::default()
/// };
/// assert_eq!(config.max_redirects, 5);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port to listen on (all interfaces).
    ///
    /// Default: `3000`, overridden by `PORT`
    pub port: u16,

    /// Directory served as static files at `/`.
    ///
    /// Default: `public`, overridden by `PUBLIC_DIR`
    pub public_dir: PathBuf,

    /// User-Agent header for upstream requests.
    ///
    /// Default: `AdFreeProxy/1.0 (+https://example.com)`
    pub user_agent: String,

    /// Total timeout for one upstream fetch, including the body.
    ///
    /// Default: 15 seconds
    pub fetch_timeout: Duration,

    /// Maximum number of redirects followed for one fetch.
    ///
    /// Default: `5`
    pub max_redirects: usize,

    /// Largest upstream body accepted, in bytes.
    ///
    /// Default: `10485760` (10 MiB)
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            public_dir: PathBuf::from("public"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout: Duration::from_millis(15_000),
            max_redirects: 5,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Builds a config from the process environment (`PORT`, `PUBLIC_DIR`).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    ///
    /// An unparsable `PORT` falls back to the default port with a warning.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("PORT") {
            match raw.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(err) => warn!("Ignoring invalid PORT {raw:?}: {err}"),
            }
        }

        if let Some(dir) = lookup("PUBLIC_DIR").filter(|d| !d.trim().is_empty()) {
            config.public_dir = PathBuf::from(dir);
        }

        config
    }
}
