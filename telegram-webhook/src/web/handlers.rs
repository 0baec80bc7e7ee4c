//! Webhook endpoint handlers.
//!
//! The Telegram handler is designed to answer fast so Telegram stops
//! retrying. It only:
//! 1. Gates on the HTTP method
//! 2. Verifies the shared secret (if configured)
//! 3. Parses the body as JSON
//! 4. Logs the update on preview deployments
//!
//! The update itself is never interpreted.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::web::error::{json_reply, Ack, WebhookError};
use crate::web::secret::{extract_provided_secret, verify_secret};
use crate::web::update_log::{TracingUpdateLogger, UpdateLogger};
use crate::Config;

/// Path the Telegram webhook is served on.
pub const WEBHOOK_PATH: &str = "/api/telegram";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub logger: Arc<dyn UpdateLogger>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_logger(config, Arc::new(TracingUpdateLogger))
    }

    pub fn with_logger(config: Config, logger: Arc<dyn UpdateLogger>) -> Self {
        Self {
            config: Arc::new(config),
            logger,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(WEBHOOK_PATH, any(telegram_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Telegram Webhook
// =============================================================================

/// Telegram webhook endpoint.
///
/// Total over its input: every request gets exactly one of 405, 401, 400 or
/// 200 `{"ok":true}`.
pub async fn telegram_webhook(State(state): State<AppState>, request: Request) -> Response {
    match handle(&state, request).await {
        Ok(()) => json_reply(StatusCode::OK, Ack::ok()),
        Err(e) => e.into_response(),
    }
}

async fn handle(state: &AppState, request: Request) -> Result<(), WebhookError> {
    let (parts, body) = request.into_parts();

    if parts.method != Method::POST {
        info!(method = %parts.method, "telegram_method_not_allowed");
        return Err(WebhookError::MethodNotAllowed);
    }

    let provided = extract_provided_secret(&parts.uri, &parts.headers);
    if !verify_secret(state.config.webhook_secret.as_deref(), provided.as_deref()) {
        return Err(WebhookError::Unauthorized);
    }

    let update = read_update(body, state.config.max_body_bytes).await?;

    if state.config.is_preview() {
        // Diagnostics only; a failure here must not change the reply.
        let _ = state.logger.log_update(&update);
    }

    Ok(())
}

/// Read the body and parse it as an opaque JSON value.
async fn read_update(body: Body, limit: usize) -> Result<Value, WebhookError> {
    let bytes = axum::body::to_bytes(body, limit).await.map_err(|e| {
        warn!(error = %e, "telegram_body_read_failed");
        WebhookError::MalformedBody
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(error = %e, body_length = bytes.len(), "telegram_invalid_json");
        WebhookError::MalformedBody
    })
}
