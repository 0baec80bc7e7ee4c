//! Configuration module for environment variable parsing.
//!
//! Everything is read once at process start and handed to the router as an
//! explicit value. Handlers never touch the environment.

use std::env::{self, VarError};

use thiserror::Error;
use tracing::warn;

/// Default upper bound on the request body size (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Configuration that cannot be loaded safely.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is set but is not valid UTF-8")]
    NotUnicode { name: &'static str },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Shared secret expected in `?secret=` or `x-telegram-secret`.
    /// `None` disables the check.
    pub webhook_secret: Option<String>,

    /// Cloudflare Pages preview URL. Presence marks a non-production
    /// deployment, which turns on update logging.
    pub preview_url: Option<String>,

    /// Maximum number of body bytes read before giving up on the request
    pub max_body_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails when a set variable cannot be read as UTF-8, rather than
    /// treating it as unset and silently disabling the secret check.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            port: parse_or("PORT", 8080),

            webhook_secret: non_empty("TELEGRAM_WEBHOOK_SECRET")?,

            preview_url: non_empty("CF_PAGES_URL")?,

            max_body_bytes: parse_or("WEBHOOK_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES),
        })
    }

    /// Whether the shared-secret check is active.
    pub fn secret_required(&self) -> bool {
        self.webhook_secret.is_some()
    }

    /// Whether this is a preview (non-production) deployment.
    pub fn is_preview(&self) -> bool {
        self.preview_url.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            webhook_secret: None,
            preview_url: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Read a variable, treating an empty value the same as an unset one.
fn non_empty(name: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(v) => Ok(Some(v).filter(|v| !v.is_empty())),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { name }),
    }
}

/// Parse a variable, falling back to `default` when unset or unparsable.
fn parse_or<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(VarError::NotPresent) => return default,
        Err(VarError::NotUnicode(_)) => {
            warn!(env_var = name, "Non UTF-8 value, using default");
            return default;
        }
    };

    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }
    }
}
