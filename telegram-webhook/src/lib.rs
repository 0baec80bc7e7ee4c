//! Telegram webhook receiver.
//!
//! Terminates Telegram Bot API webhook deliveries with a fast acknowledgment,
//! gated by an optional shared secret.
//!
//! ## Request flow
//!
//! ```text
//! POST /api/telegram → method gate → secret check → JSON parse → {"ok":true}
//! ```

pub mod config;
pub mod web;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use web::{router, AppState, WebhookError};
