//! Web server module for handling Telegram webhooks.
//!
//! This module provides a thin, fast endpoint that:
//! - Rejects anything but POST
//! - Verifies the optional shared secret
//! - Parses the update as JSON without interpreting it
//! - Acknowledges with `{"ok":true}`

pub mod error;
pub mod handlers;
pub mod secret;
pub mod update_log;

pub use error::{Ack, WebhookError, JSON_CONTENT_TYPE};
pub use handlers::{health, router, telegram_webhook, AppState, HealthResponse, WEBHOOK_PATH};
pub use secret::{extract_provided_secret, verify_secret, SECRET_HEADER, SECRET_QUERY_PARAM};
pub use update_log::{LogError, TracingUpdateLogger, UpdateLogger};
