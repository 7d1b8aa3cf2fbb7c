//! Feedback HTTP Server.
//!
//! Accepts feedback as JSON on `POST /` and files it through the
//! [`SubmissionRouter`]. Also serves a backend descriptor and a health check.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::errors::FeedbackError;
use crate::domain::models::{AllowedRepos, FeedbackSubmission, RequestContext, ServerConfig};
use crate::services::SubmissionRouter;

/// Configuration for the feedback HTTP server.
#[derive(Debug, Clone)]
pub struct FeedbackHttpConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable CORS.
    pub enable_cors: bool,
}

impl Default for FeedbackHttpConfig {
    fn default() -> Self {
        ServerConfig::default().into()
    }
}

impl From<ServerConfig> for FeedbackHttpConfig {
    fn from(server: ServerConfig) -> Self {
        Self {
            host: server.host,
            port: server.port,
            enable_cors: server.enable_cors,
        }
    }
}

/// Feedback as posted by clients.
///
/// `extra` and `perspective` accept any JSON value; non-strings are kept as
/// their JSON text.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    /// Feedback text; blank is rejected downstream.
    #[serde(default)]
    pub body: String,
    /// Issue title override.
    #[serde(default)]
    pub title: Option<String>,
    /// Free-form key/value details.
    #[serde(default)]
    pub extra: Option<BTreeMap<String, Value>>,
    /// Link embedded as an image.
    #[serde(default, rename = "screenshotURL")]
    pub screenshot_url: Option<String>,
    /// Moderation scores keyed by attribute.
    #[serde(default)]
    pub perspective: Option<BTreeMap<String, Value>>,
}

impl From<SubmitFeedbackRequest> for FeedbackSubmission {
    fn from(req: SubmitFeedbackRequest) -> Self {
        Self {
            body: req.body,
            title: req.title,
            extra: req.extra.map(stringify_values),
            screenshot_url: req.screenshot_url,
            perspective: req.perspective.map(stringify_values),
        }
    }
}

fn stringify_values(map: BTreeMap<String, Value>) -> BTreeMap<String, String> {
    map.into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect()
}

/// Informational response for `GET /`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendDescriptor {
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: String,
    /// Target repository.
    pub repo: String,
    /// Repositories submissions may be routed to.
    pub allowed_repos: AllowedRepos,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable code from [`FeedbackError::code`].
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

impl From<FeedbackError> for ErrorResponse {
    fn from(err: FeedbackError) -> Self {
        Self {
            code: err.code().to_string(),
            error: err.to_string(),
        }
    }
}

fn api_error(err: FeedbackError) -> ApiError {
    let status = StatusCode::from_u16(err.status())
        .ok()
        .filter(|status| status.is_client_error() || status.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(ErrorResponse::from(err)))
}

/// Shared state for the feedback HTTP server.
struct AppState {
    router: SubmissionRouter,
}

/// Feedback HTTP Server.
pub struct FeedbackHttpServer {
    config: FeedbackHttpConfig,
    router: SubmissionRouter,
}

impl FeedbackHttpServer {
    /// Server that hands every submission to `router`.
    pub fn new(router: SubmissionRouter, config: FeedbackHttpConfig) -> Self {
        Self { config, router }
    }

    /// Build the axum application.
    pub fn build_router(&self) -> Router {
        let state = Arc::new(AppState {
            router: self.router.clone(),
        });

        let app = Router::new()
            .route("/", get(describe_backend).post(submit_feedback))
            .route("/health", get(health_check))
            .with_state(state);

        if self.config.enable_cors {
            app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid listen address {addr}: {e}"))
    }

    /// Start the server.
    pub async fn serve(self) -> anyhow::Result<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.socket_addr()?;
        let app = self.build_router();

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind {addr}: {e}"))?;
        tracing::info!(%addr, repo = self.router.repo(), "feedback HTTP server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("feedback HTTP server stopped");
        Ok(())
    }
}

// Handler functions

async fn health_check() -> &'static str {
    "OK"
}

async fn describe_backend(State(state): State<Arc<AppState>>) -> Json<BackendDescriptor> {
    Json(BackendDescriptor {
        name: "github".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        repo: state.router.repo().to_string(),
        allowed_repos: state.router.allowed_repos().clone(),
    })
}

async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<SubmitFeedbackRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        (
            rejection.status(),
            Json(ErrorResponse {
                error: rejection.body_text(),
                code: "INVALID_REQUEST".to_string(),
            }),
        )
    })?;

    let context = RequestContext::from_headers(
        headers
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v.to_string()))),
    );
    let submission = FeedbackSubmission::from(req);

    state
        .router
        .handle(&submission, Some(&context))
        .await
        .map(|payload| (StatusCode::CREATED, Json(payload)))
        .map_err(api_error)
}
