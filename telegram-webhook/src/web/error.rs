//! Rejections produced by the webhook endpoint.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Content type used on every JSON reply.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Ways a webhook request can be turned away.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("unauthorized")]
    Unauthorized,

    #[error("invalid json")]
    MalformedBody,
}

impl WebhookError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebhookError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            WebhookError::Unauthorized => StatusCode::UNAUTHORIZED,
            WebhookError::MalformedBody => StatusCode::BAD_REQUEST,
        }
    }
}

/// JSON acknowledgment body: `{"ok":true}` or `{"ok":false,"error":"..."}`.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl Ack {
    pub fn ok() -> Self {
        Ack { ok: true, error: None }
    }

    pub fn error(message: &'static str) -> Self {
        Ack {
            ok: false,
            error: Some(message),
        }
    }
}

/// Build a JSON reply with the charset-qualified content type.
pub fn json_reply(status: StatusCode, ack: Ack) -> Response {
    let mut response = (status, Json(ack)).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(JSON_CONTENT_TYPE),
    );
    response
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            WebhookError::MethodNotAllowed => (status, "Method Not Allowed").into_response(),
            WebhookError::Unauthorized => json_reply(status, Ack::error("unauthorized")),
            WebhookError::MalformedBody => json_reply(status, Ack::error("invalid json")),
        }
    }
}
