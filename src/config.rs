// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and the typed settings
//! object loaded from them at startup. Configuration is read exactly once;
//! nothing re-reads the environment at request time.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `APP_ENV` | `development` or `production` | `development` |
//! | `JWT_SECRET` | HMAC secret for signing auth tokens | Required in production |
//! | `DATA_DIR` | Root directory for document storage | `data` |
//! | `PUBLIC_BASE_URL` | Origin used when building media URLs | `http://localhost:8080` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::path::PathBuf;

use crate::storage::paths::DATA_ROOT;

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the deployment environment.
///
/// `production` turns on the Secure cookie attribute and makes a missing
/// `JWT_SECRET` a fatal startup error.
pub const ENVIRONMENT_ENV: &str = "APP_ENV";

/// Environment variable name for the token-signing secret.
///
/// Without it the token codec is built unconfigured and every issue/verify
/// operation fails closed. There is no fallback value.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the document storage root.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the externally visible origin.
///
/// Media URLs returned by the upload endpoint are built against this.
pub const PUBLIC_BASE_URL_ENV: &str = "PUBLIC_BASE_URL";

/// Deployment environment the server runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse an `APP_ENV` value. Anything other than `production` is
    /// development.
    pub fn from_env_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Authentication settings handed to the token codec and cookie builder.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for signing and verifying tokens. `None` means the
    /// codec fails closed on every operation.
    pub jwt_secret: Option<String>,
    /// Whether issued cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

/// Fatal configuration problems detected at startup.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set when APP_ENV=production")]
    MissingJwtSecret,
}

/// Typed runtime settings, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub data_dir: PathBuf,
    pub public_base_url: String,
    pub auth: AuthConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            data_dir: PathBuf::from(DATA_ROOT),
            public_base_url: "http://localhost:8080".to_string(),
            auth: AuthConfig {
                jwt_secret: None,
                cookie_secure: false,
            },
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Reading never fails; call [`Config::ensure_auth_configured`] before
    /// serving to enforce the production secret requirement.
    pub fn from_env() -> Self {
        let environment = Environment::from_env_value(&env_or_default(ENVIRONMENT_ENV, "development"));
        let port = env_or_default(PORT_ENV, "8080").parse().unwrap_or(8080);

        Self {
            host: env_or_default(HOST_ENV, "0.0.0.0"),
            port,
            environment,
            data_dir: PathBuf::from(env_or_default(DATA_DIR_ENV, DATA_ROOT)),
            public_base_url: env_or_default(PUBLIC_BASE_URL_ENV, "http://localhost:8080"),
            auth: AuthConfig {
                jwt_secret: env_optional(JWT_SECRET_ENV),
                cookie_secure: environment.is_production(),
            },
        }
    }

    /// Enforce the startup rules for the auth secret.
    ///
    /// Production refuses to start without a secret. Development starts but
    /// logs loudly; the codec then rejects every token until one is set
    /// (fail closed, never a silent default).
    pub fn ensure_auth_configured(&self) -> Result<(), ConfigError> {
        match &self.auth.jwt_secret {
            Some(secret) if !secret.is_empty() => Ok(()),
            _ if self.environment.is_production() => Err(ConfigError::MissingJwtSecret),
            _ => {
                tracing::error!(
                    "JWT_SECRET is not set; every authenticated route will reject until it is configured"
                );
                Ok(())
            }
        }
    }
}

fn env_optional(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
