//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the axum Router with both inbound surfaces
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve the social-image endpoint
//! - Forward page requests to the SPA origin and rewrite their `<head>`
//!
//! # Design Decisions
//! - The image endpoint takes the page path via a `path` query parameter;
//!   the page path cannot be forwarded directly to an image sub-request
//! - Only `text/html` upstream responses are rewritten; everything else
//!   streams through byte-for-byte
//! - Content lookups never fail a request; an unreachable origin is the one
//!   hard failure (502), and response assembly errors surface as 500

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::api::ShareApiClient;
use crate::config::EdgeConfig;
use crate::http::html;
use crate::http::request::RequestIdLayer;
use crate::observability::metrics;
use crate::routing::parse_path;
use crate::social::{resolve_card, resolve_content, svg};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EdgeConfig>,
    pub api: ShareApiClient,
    pub upstream: reqwest::Client,
}

/// Request-level failures the edge turns into HTTP errors.
#[derive(Debug, thiserror::Error)]
enum EdgeError {
    /// The SPA origin could not be reached or broke mid-response.
    #[error("upstream fetch failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Response assembly failed; nothing the client can do about it.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for EdgeError {
    fn into_response(self) -> Response {
        match self {
            EdgeError::Upstream(err) => {
                tracing::error!(error = %err, "Upstream fetch failed");
                (StatusCode::BAD_GATEWAY, "Bad Gateway").into_response()
            }
            EdgeError::Internal(err) => {
                tracing::error!(error = %err, "Request handling failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

/// HTTP server for the edge service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EdgeConfig) -> Result<Self, reqwest::Error> {
        let api = ShareApiClient::new(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
        )?;
        let upstream = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_secs))
            .build()?;

        let config = Arc::new(config);
        let state = AppState {
            config: Arc::clone(&config),
            api,
            upstream,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the axum router with all middleware layers.
    fn build_router(config: &EdgeConfig, state: AppState) -> Router {
        Router::new()
            .route("/social-image", get(social_image))
            .fallback(get(serve_page))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service()).await
    }
}

#[derive(Debug, Deserialize)]
struct ImageParams {
    path: Option<String>,
}

/// `GET /social-image?path=…` — render the preview card for a page path.
async fn social_image(
    State(state): State<AppState>,
    Query(params): Query<ImageParams>,
) -> Response {
    let started = Instant::now();
    let path = params.path.unwrap_or_else(|| "/".to_string());
    let route = parse_path(&path);
    metrics::request("image", route.kind_name());
    tracing::info!(route = %route, kind = route.kind_name(), "Rendering social image");

    let card = resolve_card(&route, &state.api, &state.config.social).await;
    let document = svg::render_card(&card);

    metrics::request_duration("image", started.elapsed());
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        document,
    )
        .into_response()
}

/// Fallback route — fetch the page from the SPA origin and substitute the
/// social head content for the marker the shell ships.
async fn serve_page(State(state): State<AppState>, uri: Uri) -> Result<Response, EdgeError> {
    let started = Instant::now();
    let route = parse_path(uri.path());
    metrics::request("page", route.kind_name());

    let target = format!(
        "{}{}",
        state.config.upstream.origin.trim_end_matches('/'),
        uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/"),
    );
    let upstream_response = state.upstream.get(&target).send().await?;
    let status = upstream_response.status();
    let content_type = upstream_response.headers().get(header::CONTENT_TYPE).cloned();
    let is_html = content_type
        .as_ref()
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("text/html"))
        .unwrap_or(false);

    let response = if is_html {
        let page = upstream_response.text().await?;
        let content = resolve_content(&route, &state.api, &state.config.social).await;
        tracing::debug!(route = %route, title = %content.title, "Rewriting page head");
        let rewritten = html::inject_social_content(&page, &content);

        Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
            .body(Body::from(rewritten))
            .map_err(|e| EdgeError::Internal(e.to_string()))?
    } else {
        // Assets and API passthrough: no marker, nothing to rewrite.
        let bytes = upstream_response.bytes().await?;
        let mut builder = Response::builder().status(status);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder
            .body(Body::from(bytes))
            .map_err(|e| EdgeError::Internal(e.to_string()))?
    };

    metrics::request_duration("page", started.elapsed());
    Ok(response)
}
