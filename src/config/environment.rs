// ABOUTME: Environment-based configuration for the HTTP server, auth, and trainer chat
// ABOUTME: Parses environment variables with typed defaults and validates them at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

//! Environment-based configuration management
//!
//! | Variable | Default |
//! |---|---|
//! | `HTTP_PORT` | 8081 |
//! | `DATABASE_URL` | `sqlite:./data/ironlog.db` |
//! | `JWT_SECRET` | required in production, generated otherwise |
//! | `JWT_EXPIRY_HOURS` | 24 |
//! | `ENVIRONMENT` | development |
//! | `CORS_ALLOWED_ORIGINS` | `*` |
//! | `REQUEST_TIMEOUT_SECS` | 30 |
//! | `MAX_BODY_BYTES` | 1 MiB |
//! | `TRAINER_RATE_LIMIT_REQUESTS` | 5 |
//! | `TRAINER_RATE_LIMIT_WINDOW_SECS` | 60 |
//! | `LLM_BASE_URL` | `https://api.openai.com/v1` |
//! | `OPENAI_API_KEY` | unset |
//! | `LLM_MODEL` | `gpt-4.1-nano` |
//! | `PROGRESS_DEFAULT_WINDOW` | `all` |

use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use tracing::{info, warn};

use super::types::{Environment, ProgressWindow};
use crate::auth::generate_jwt_secret;
use crate::constants::{limits, ports, trainer};

/// Default on-disk database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/ironlog.db";

/// Token signing configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for HS256 tokens
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .finish()
    }
}

/// Request-bounding and CORS configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Allowed CORS origins; `*` allows any
    pub cors_allowed_origins: Vec<String>,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// Maximum request body size
    pub max_body_bytes: usize,
}

/// Trainer chat configuration
#[derive(Clone)]
pub struct TrainerConfig {
    /// Requests allowed per user per window
    pub rate_limit_requests: u32,
    /// Rate limit window length
    pub rate_limit_window_secs: u64,
    /// Base URL of the OpenAI-compatible API
    pub llm_base_url: String,
    /// API key, when the endpoint requires one
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
}

impl fmt::Debug for TrainerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainerConfig")
            .field("rate_limit_requests", &self.rate_limit_requests)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .field("llm_base_url", &self.llm_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .finish()
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// `SQLx` database URL
    pub database_url: String,
    /// Token signing
    pub auth: AuthConfig,
    /// Request bounding and CORS
    pub http: HttpConfig,
    /// Trainer chat
    pub trainer: TrainerConfig,
    /// Window used by the progress summary when the caller names none
    pub progress_default_window: ProgressWindow,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: ports::DEFAULT_HTTP_PORT,
            environment: Environment::Development,
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            auth: AuthConfig {
                jwt_secret: generate_jwt_secret(),
                jwt_expiry_hours: limits::DEFAULT_JWT_EXPIRY_HOURS,
            },
            http: HttpConfig {
                cors_allowed_origins: vec!["*".to_owned()],
                request_timeout_secs: limits::DEFAULT_REQUEST_TIMEOUT_SECS,
                max_body_bytes: limits::DEFAULT_MAX_BODY_BYTES,
            },
            trainer: TrainerConfig {
                rate_limit_requests: limits::DEFAULT_TRAINER_RATE_LIMIT_REQUESTS,
                rate_limit_window_secs: limits::DEFAULT_TRAINER_RATE_LIMIT_WINDOW_SECS,
                llm_base_url: trainer::DEFAULT_BASE_URL.to_owned(),
                api_key: None,
                model: trainer::DEFAULT_MODEL.to_owned(),
            },
            progress_default_window: ProgressWindow::All,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is malformed, or `JWT_SECRET` is missing in
    /// production, or validation fails
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment = Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment.is_production() => {
                bail!("JWT_SECRET must be set in production")
            }
            _ => {
                warn!("JWT_SECRET not set; generated an ephemeral secret (tokens will not survive a restart)");
                generate_jwt_secret()
            }
        };

        let progress_default_window = match env::var("PROGRESS_DEFAULT_WINDOW") {
            Ok(raw) => ProgressWindow::parse(&raw)
                .ok_or_else(|| anyhow!("Invalid PROGRESS_DEFAULT_WINDOW '{raw}': expected 'all' or 'week'"))?,
            Err(_) => ProgressWindow::All,
        };

        let config = Self {
            http_port: parse_env("HTTP_PORT", ports::DEFAULT_HTTP_PORT)?,
            environment,
            database_url: env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours: parse_env("JWT_EXPIRY_HOURS", limits::DEFAULT_JWT_EXPIRY_HOURS)?,
            },
            http: HttpConfig {
                cors_allowed_origins: parse_list(&env_var_or("CORS_ALLOWED_ORIGINS", "*")),
                request_timeout_secs: parse_env(
                    "REQUEST_TIMEOUT_SECS",
                    limits::DEFAULT_REQUEST_TIMEOUT_SECS,
                )?,
                max_body_bytes: parse_env("MAX_BODY_BYTES", limits::DEFAULT_MAX_BODY_BYTES)?,
            },
            trainer: TrainerConfig {
                rate_limit_requests: parse_env(
                    "TRAINER_RATE_LIMIT_REQUESTS",
                    limits::DEFAULT_TRAINER_RATE_LIMIT_REQUESTS,
                )?,
                rate_limit_window_secs: parse_env(
                    "TRAINER_RATE_LIMIT_WINDOW_SECS",
                    limits::DEFAULT_TRAINER_RATE_LIMIT_WINDOW_SECS,
                )?,
                llm_base_url: env_var_or("LLM_BASE_URL", trainer::DEFAULT_BASE_URL),
                api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
                model: env_var_or("LLM_MODEL", trainer::DEFAULT_MODEL),
            },
            progress_default_window,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_expiry_hours <= 0 {
            bail!("JWT_EXPIRY_HOURS must be positive");
        }
        if self.http.request_timeout_secs == 0 {
            bail!("REQUEST_TIMEOUT_SECS must be positive");
        }
        if self.http.max_body_bytes == 0 {
            bail!("MAX_BODY_BYTES must be positive");
        }
        if self.trainer.rate_limit_requests == 0 || self.trainer.rate_limit_window_secs == 0 {
            bail!("TRAINER_RATE_LIMIT_REQUESTS and TRAINER_RATE_LIMIT_WINDOW_SECS must be positive");
        }
        if self.environment.is_production() && self.auth.jwt_secret.len() < 32 {
            bail!("JWT_SECRET must be at least 32 characters in production");
        }
        if self.trainer.api_key.is_none() {
            warn!("OPENAI_API_KEY not set; trainer requests will fail unless the LLM endpoint needs no key");
        }
        Ok(())
    }

    /// One-line summary safe for logs (no secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Ironlog Server Configuration: environment={}, http_port={}, database={}, \
             cors_origins={}, request_timeout={}s, max_body={}B, trainer_limit={}/{}s, \
             llm_model={}, llm_key={}, progress_window={}",
            self.environment,
            self.http_port,
            self.database_url,
            self.http.cors_allowed_origins.join(","),
            self.http.request_timeout_secs,
            self.http.max_body_bytes,
            self.trainer.rate_limit_requests,
            self.trainer.rate_limit_window_secs,
            self.trainer.model,
            if self.trainer.api_key.is_some() { "set" } else { "unset" },
            self.progress_default_window,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, using `default` when unset
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid {key} value '{raw}': {e}")),
        Err(_) => Ok(default),
    }
}

/// Parse a comma-separated list
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}
