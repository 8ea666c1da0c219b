//! Process configuration loaded via OrthoConfig.
//!
//! Values merge from CLI flags, `CONTACTS_*` environment variables, and
//! configuration files. Everything is resolved once at boot; request handling
//! never reads the environment.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{AuthoritySettings, ParsePhoneValidityPolicyError, PhoneValidityPolicy};
use crate::outbound::api_ninjas::DEFAULT_API_BASE_URL;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_PORT: u16 = 8080;

/// Errors raised while resolving settings into runtime values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// No database connection string was supplied.
    #[error("CONTACTS_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    /// The authority base URL could not be parsed.
    #[error("invalid api_base_url `{value}`: {message}")]
    InvalidBaseUrl { value: String, message: String },
    /// The bind address could not be parsed.
    #[error("invalid bind_addr `{value}`: {message}")]
    InvalidBindAddr { value: String, message: String },
    /// The phone validity policy name was not recognised.
    #[error(transparent)]
    InvalidPolicy(#[from] ParsePhoneValidityPolicyError),
}

/// Configuration values for the contacts service.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTACTS")]
pub struct ContactsSettings {
    /// PostgreSQL connection string. Required.
    pub database_url: Option<String>,
    /// API Ninjas key. Operations needing the authorities fail without it.
    pub api_key: Option<String>,
    /// Override for the authority base URL.
    pub api_base_url: Option<String>,
    /// Outbound request timeout in seconds.
    pub http_timeout_secs: Option<u64>,
    /// `require-valid` or `legacy-inverted`.
    pub phone_validity: Option<String>,
    /// Socket address the HTTP server binds to, e.g. `127.0.0.1:8080`.
    pub bind_addr: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl fmt::Debug for ContactsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactsSettings")
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("phone_validity", &self.phone_validity)
            .field("bind_addr", &self.bind_addr)
            .field("db_max_connections", &self.db_max_connections)
            .finish()
    }
}

impl ContactsSettings {
    /// Return the database URL, failing when it is absent or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Return the authority base URL, falling back to the public endpoint.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        Url::parse(raw).map_err(|err| SettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Return the outbound request timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    /// Return the configured validity policy, defaulting to `require-valid`.
    pub fn phone_validity(&self) -> Result<PhoneValidityPolicy, SettingsError> {
        match self.phone_validity.as_deref() {
            None => Ok(PhoneValidityPolicy::default()),
            Some(raw) => Ok(raw.parse()?),
        }
    }

    /// Return the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let Some(raw) = self.bind_addr.as_deref() else {
            return Ok(SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)));
        };
        raw.trim()
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    /// Build the credential and policy handed to the contact workflow.
    pub fn authority_settings(&self) -> Result<AuthoritySettings, SettingsError> {
        Ok(AuthoritySettings::new(
            self.api_key.as_deref(),
            self.phone_validity()?,
        ))
    }

    /// Build the database pool configuration.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)))
    }
}
