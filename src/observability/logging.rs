//! # Structured Logging
//!
//! This module wires up the `tracing` subscriber for hosts embedding the gateway.
//! The gateway itself only emits events (notably the two unexpected-failure sites in
//! the session wrapper); initializing a subscriber is the host's choice, and hosts
//! with their own subscriber setup can skip this module entirely.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::error::{AuthError, AuthResult};

/// Output format for log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line records.
    Text,
    /// Structured JSON records.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `auth_gateway=debug`. When absent, the
    /// `RUST_LOG` environment variable is consulted, falling back to `info`.
    pub filter: Option<String>,

    /// Record output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: None,
            format: LogFormat::Text,
        }
    }
}

/// Install the global `tracing` subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> AuthResult<()> {
    let filter = match &config.filter {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Text => registry.with(fmt::layer()).try_init(),
    };
    result.map_err(|e| AuthError::unexpected(format!("failed to install log subscriber: {e}")))
}
