//! # adfree-reader
//!
//! Fetches a web page, strips advertising and tracking elements, extracts the
//! readable article and serves it, sanitized, inside a minimal viewer page.
//!
//! ## Quick Start
//!
//! ```rust
//! use adfree_reader::clean_page;
//! use url::Url;
//!
//! let html = r#"<html><body>
//!     <script>track()</script>
//!     <div class="ad-banner">Buy now</div>
//!     <p>Main content here.</p>
//! </body></html>"#;
//!
//! let base = Url::parse("https://example.com/story")?;
//! let page = clean_page(html, &base);
//! assert!(page.contains("Main content here."));
//! assert!(!page.contains("Buy now"));
//! # Ok::<(), url::ParseError>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. **Validate** the target (`^https?://`, absolute, with a host)
//! 2. **Fetch** it with a fixed user agent and a 15 s timeout
//! 3. **Strip** scripts, frames and ad slots, then anything whose `id`/`class`
//!    looks like an ad
//! 4. **Extract** the article with readability, or fall back to the whole body
//!    with absolutized links and images
//! 5. **Sanitize** against a tag/attribute allow-list
//! 6. **Render** the viewer page
//!
//! The server in [`server`] exposes this as `POST /fetch`.

mod config;
mod error;
mod patterns;

/// Ad and tracker removal sweeps.
pub mod clean;

/// Charset detection and decoding of fetched bodies.
pub mod encoding;

/// Readability extraction and the body fallback.
pub mod extract;

/// Upstream HTTP client.
pub mod fetch;

/// Orchestration of the whole pipeline.
pub mod pipeline;

/// Viewer page template.
pub mod render;

/// Allow-list sanitization.
pub mod sanitize;

/// Axum router and handlers.
pub mod server;

/// Target validation and URL resolution.
pub mod url_utils;

// Public API - re-exports
pub use config::Config;
pub use error::{Error, Result};
pub use extract::ExtractedContent;
pub use pipeline::{clean_page, process};
