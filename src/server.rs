//! HTTP surface: `POST /fetch` plus static files from the public directory.

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::fetch::Fetcher;
use crate::pipeline::process;
use crate::{Config, Error, Result};

/// Body of `POST /fetch`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchRequest {
    /// Page to clean. Missing is treated like malformed.
    pub target: Option<String>,
}

/// Shared, read-only state for every request.
#[derive(Clone)]
pub struct AppState {
    /// Pooled upstream client shared by all requests.
    pub fetcher: Arc<Fetcher>,
    /// Configuration the server was started with.
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the upstream client from `config`.
    ///
    /// Fails with [`Error::Internal`] if the client cannot be constructed
    /// (for example an invalid user agent).
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Fetcher::new(&config)?;
        Ok(Self {
            fetcher: Arc::new(fetcher),
            config: Arc::new(config),
        })
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::InvalidInput(_) => warn!("Rejected request: {self}"),
            Error::UpstreamStatus(_) | Error::UpstreamRequest(_) => warn!("Fetch failed: {self}"),
            Error::Internal(_) => error!("Request failed: {self}"),
        }

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// Build the router: the fetch endpoint, with the public directory as fallback.
pub fn create_app(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.public_dir);

    let router = Router::new()
        .route("/fetch", post(fetch_handler))
        .fallback_service(static_files);

    apply_layers(router).with_state(state)
}

/// Wrap a router in panic recovery and request tracing.
///
/// A panic anywhere below these layers becomes the generic 500 JSON body.
pub fn apply_layers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| (*s).to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());

    Error::Internal(format!("handler panicked: {detail}")).into_response()
}

/// POST /fetch - clean the page named by `{"target": "<url>"}`
///
/// # Response
/// - 200 `text/html`: the viewer page
/// - 400 `{"error":"Invalid URL"}`: target missing or not absolute http(s)
/// - 502 `{"error":"Failed to fetch target"}`: upstream status or transport failure
/// - 500 `{"error":"Server error"}`: anything else
async fn fetch_handler(State(state): State<AppState>, body: Bytes) -> Result<Html<String>> {
    // Unparseable bodies carry no target.
    let request: FetchRequest = serde_json::from_slice(&body).unwrap_or_default();

    let page = process(&state.fetcher, request.target.as_deref()).await?;
    Ok(Html(page))
}

/// Bind to `config.port` on all interfaces and serve until the process exits.
pub async fn start_server(config: Config) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let public_dir = config.public_dir.clone();
    let app = create_app(AppState::new(config)?);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Reader listening on {addr}, serving {}", public_dir.display());

    axum::serve(listener, app).await?;

    Ok(())
}
