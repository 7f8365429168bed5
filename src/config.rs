// src/config.rs
use chrono::Duration;
use std::env;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    database_max_connections: u32,
    listen_addr: String,
    session_ttl: Duration,
    bootstrap_admin: Option<BootstrapAdmin>,
}

/// First administrator created by the installer on an empty database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite://workshop.db?mode=rwc".into()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

const DEFAULT_MAX_CONNECTIONS: u32 = 8;
const DEFAULT_SESSION_TTL_SECS: i64 = 8 * 60 * 60;

impl AppConfig {
    /// Build configuration from environment variables, with defaults for
    /// everything that is optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] but reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = read("DATABASE_URL").unwrap_or_else(default_database_url);
        let listen_addr = read("LISTEN_ADDR").unwrap_or_else(default_listen_addr);

        let database_max_connections = match read("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "DATABASE_MAX_CONNECTIONS must be a positive integer, got '{raw}'"
                ))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let session_ttl_secs = match read("SESSION_TTL_SECONDS") {
            Some(raw) => raw.parse::<i64>().ok().filter(|n| *n > 0).ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "SESSION_TTL_SECONDS must be a positive integer, got '{raw}'"
                ))
            })?,
            None => DEFAULT_SESSION_TTL_SECS,
        };

        let bootstrap_admin = match (read("BOOTSTRAP_ADMIN_USERNAME"), read("BOOTSTRAP_ADMIN_EMAIL")) {
            (Some(username), email) => Some(BootstrapAdmin { username, email }),
            (None, Some(_)) => return Err(ConfigError::Missing("BOOTSTRAP_ADMIN_USERNAME")),
            (None, None) => None,
        };

        Ok(Self {
            database_url,
            database_max_connections,
            listen_addr,
            session_ttl: Duration::seconds(session_ttl_secs),
            bootstrap_admin,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    pub fn bootstrap_admin(&self) -> Option<&BootstrapAdmin> {
        self.bootstrap_admin.as_ref()
    }
}
