//! Process settings loaded via OrthoConfig.
//!
//! Values come from `CREDX_*` environment variables (or the matching CLI
//! flags). Session cookie settings are read separately by
//! [`crate::inbound::http::session_config`].

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 10;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Startup configuration for the dashboard server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CREDX")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without it the server runs on fixtures.
    pub database_url: Option<String>,
    /// Production deployment flag; enables widget origin enforcement.
    #[ortho_config(default = false)]
    pub production: bool,
    /// Base URL of the identity provider.
    pub identity_url: Option<String>,
    /// Project key sent to the identity provider.
    pub identity_api_key: Option<String>,
    /// Identity request timeout in seconds.
    pub identity_timeout_secs: Option<u64>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
}

/// Errors raised while interpreting [`AppSettings`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {message}")]
    BindAddr { value: String, message: String },
    #[error("CREDX_IDENTITY_URL is set but CREDX_IDENTITY_API_KEY is missing")]
    MissingIdentityKey,
    #[error("production requires {variable}")]
    ProductionRequires { variable: &'static str },
}

/// Identity provider connection details.
#[derive(Clone)]
pub struct IdentitySettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for IdentitySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentitySettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AppSettings {
    /// Parsed listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Reject production settings that would fall back to fixtures.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ProductionRequires`] naming the first missing
    /// variable when `production` is set without a database or identity
    /// provider.
    pub fn check_production(&self) -> Result<(), SettingsError> {
        if !self.production {
            return Ok(());
        }
        if self.database_url().is_none() {
            return Err(SettingsError::ProductionRequires {
                variable: "CREDX_DATABASE_URL",
            });
        }
        if self.identity()?.is_none() {
            return Err(SettingsError::ProductionRequires {
                variable: "CREDX_IDENTITY_URL",
            });
        }
        Ok(())
    }

    /// Identity provider settings when `identity_url` is configured.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingIdentityKey`] when a URL is given
    /// without the project key.
    pub fn identity(&self) -> Result<Option<IdentitySettings>, SettingsError> {
        let Some(base_url) = self
            .identity_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
        else {
            return Ok(None);
        };
        let api_key = self
            .identity_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(SettingsError::MissingIdentityKey)?;
        let timeout = Duration::from_secs(
            self.identity_timeout_secs
                .unwrap_or(DEFAULT_IDENTITY_TIMEOUT_SECS),
        );
        Ok(Some(IdentitySettings {
            base_url: base_url.to_owned(),
            api_key,
            timeout,
        }))
    }
}
