//! Configuration management for the task front end.
//!
//! Configuration can be set via environment variables:
//! - `TASK_API_URL` - Optional. Base URL of the remote task API.
//!   Defaults to `http://localhost:4000`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3100`.
//! - `TASK_API_TIMEOUT_SECS` - Optional. Per-request timeout for the task API.
//!   Defaults to `10`, `0` disables it.
//! - `RENDER_MODE` - Optional. `html` (default) or `json`.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_TASK_API_URL: &str = "http://localhost:4000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// How views are turned into response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Server-rendered HTML page
    #[default]
    Html,
    /// View name and data bag as JSON
    Json,
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" => Ok(RenderMode::Html),
            "json" => Ok(RenderMode::Json),
            other => Err(format!("expected `html` or `json`, got `{}`", other)),
        }
    }
}

/// Front end configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote task API (no trailing slash)
    pub task_api_url: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Timeout for each call to the task API
    pub api_timeout: Option<Duration>,

    pub render_mode: RenderMode,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a numeric or enumerated variable
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let task_api_url = std::env::var("TASK_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_TASK_API_URL.to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3100".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let timeout_secs: u64 = std::env::var("TASK_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("TASK_API_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?;
        let api_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        let render_mode = match std::env::var("RENDER_MODE") {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidValue("RENDER_MODE".to_string(), e))?,
            Err(_) => RenderMode::default(),
        };

        Ok(Self {
            task_api_url,
            host,
            port,
            api_timeout,
            render_mode,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(task_api_url: impl Into<String>) -> Self {
        Self {
            task_api_url: task_api_url.into(),
            host: "127.0.0.1".to_string(),
            port: 3100,
            api_timeout: Some(Duration::from_secs(10)),
            render_mode: RenderMode::Html,
        }
    }
}
