//! Connection settings for a Foreman server
//!
//! The on-disk form is a small YAML file:
//!
//! ```yaml
//! server_url: https://foreman.example.com
//! username: admin
//! password: changeme
//! validate_certs: true
//! timeout: 60
//! ```

use std::env;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use foreman_core::{ForemanError, Result};
use foreman_messages::{msg, MESSAGES};

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Partially specified connection settings from a single source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Verify the server's TLS certificate (default: true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate_certs: Option<bool>,

    /// Request timeout in seconds (default: 60)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl ConnectionConfig {
    /// Load settings from a YAML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml_ng::from_str(&contents)?;
        Ok(config)
    }

    /// Like [`load_from_path`](Self::load_from_path), but a missing file yields
    /// an empty config
    pub fn load_optional(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No connection config file");
            return Ok(Self::default());
        }
        Self::load_from_path(path)
    }

    /// Read `FOREMAN_*` variables from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read `FOREMAN_*` variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let validate_certs = lookup("FOREMAN_VALIDATE_CERTS")
            .map(|raw| parse_bool(&raw, "FOREMAN_VALIDATE_CERTS"))
            .transpose()?;

        let timeout = lookup("FOREMAN_TIMEOUT")
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|_| {
                    ForemanError::Config(msg!(
                        MESSAGES.config.invalid_timeout,
                        value = &raw,
                        source = "FOREMAN_TIMEOUT"
                    ))
                })
            })
            .transpose()?;

        Ok(Self {
            server_url: lookup("FOREMAN_SERVER_URL"),
            username: lookup("FOREMAN_USERNAME"),
            password: lookup("FOREMAN_PASSWORD"),
            validate_certs,
            timeout,
        })
    }

    /// Layer `overlay` on top of `self`; fields set in `overlay` win
    pub fn merge(self, overlay: ConnectionConfig) -> Self {
        Self {
            server_url: overlay.server_url.or(self.server_url),
            username: overlay.username.or(self.username),
            password: overlay.password.or(self.password),
            validate_certs: overlay.validate_certs.or(self.validate_certs),
            timeout: overlay.timeout.or(self.timeout),
        }
    }

    /// Check that everything needed to connect is present.
    ///
    /// `config_path` is only used to point the user at the file in error text.
    pub fn resolve(self, config_path: &Path) -> Result<Connection> {
        let raw_url = self
            .server_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                ForemanError::Config(msg!(
                    MESSAGES.config.missing_server_url,
                    path = config_path.display().to_string()
                ))
            })?;

        let server_url = Url::parse(raw_url.trim()).map_err(|e| {
            ForemanError::Config(msg!(
                MESSAGES.config.invalid_server_url,
                url = &raw_url,
                error = e.to_string()
            ))
        })?;

        if !matches!(server_url.scheme(), "http" | "https") {
            return Err(ForemanError::Config(msg!(
                MESSAGES.config.invalid_server_url,
                url = &raw_url,
                error = "scheme must be http or https"
            )));
        }

        let (username, password) = match (self.username, self.password) {
            (Some(username), Some(password)) if !username.is_empty() => (username, password),
            _ => {
                return Err(ForemanError::Config(
                    MESSAGES.config.missing_credentials.to_string(),
                ))
            }
        };

        Ok(Connection {
            server_url,
            username,
            password,
            validate_certs: self.validate_certs.unwrap_or(true),
            timeout: Duration::from_secs(self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

/// Fully resolved connection parameters
#[derive(Clone, PartialEq)]
pub struct Connection {
    pub server_url: Url,
    pub username: String,
    pub password: String,
    pub validate_certs: bool,
    pub timeout: Duration,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("server_url", &self.server_url.as_str())
            .field("username", &self.username)
            .field("password", &"********")
            .field("validate_certs", &self.validate_certs)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Accepts the usual spellings of a boolean flag
pub fn parse_bool(raw: &str, source: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ForemanError::Config(msg!(
            MESSAGES.config.invalid_bool,
            value = raw,
            source = source
        ))),
    }
}
