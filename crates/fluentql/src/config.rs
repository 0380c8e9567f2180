//! Connection settings for the bundled executors.

use crate::error::{QbError, QbResult};
use serde::Deserialize;
use std::fmt;

/// Environment variable holding a full connection URL. Takes precedence over the
/// individual `FLUENTQL_*` variables.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

const HOST_ENV: &str = "FLUENTQL_HOST";
const PORT_ENV: &str = "FLUENTQL_PORT";
const USER_ENV: &str = "FLUENTQL_USER";
const PASSWORD_ENV: &str = "FLUENTQL_PASSWORD";
const DATABASE_ENV: &str = "FLUENTQL_DATABASE";
const POOL_SIZE_ENV: &str = "FLUENTQL_POOL_SIZE";

/// Where and how to connect.
///
/// Either `url` is set, or `host`, `user` and `database` are. Deserializable from
/// any serde format; missing fields take their defaults.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Full connection URL; overrides the discrete fields when present.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
    pub application_name: Option<String>,
    /// Maximum number of pooled connections.
    pub pool_size: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: String::new(),
            password: None,
            database: String::new(),
            application_name: None,
            pool_size: 16,
        }
    }
}

// Password stays out of logs.
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .field("application_name", &self.application_name)
            .field("pool_size", &self.pool_size)
            .finish()
    }
}

impl ConnectionConfig {
    /// Discrete connection settings.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: Some(password.into()),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Settings taken from a connection URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Read settings from the process environment.
    pub fn from_env() -> QbResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> QbResult<Self> {
        let mut config = match lookup(DATABASE_URL_ENV) {
            Some(url) => Self::from_url(url),
            None => {
                let mut config = Self::default();
                if let Some(host) = lookup(HOST_ENV) {
                    config.host = host;
                }
                if let Some(port) = lookup(PORT_ENV) {
                    config.port = port
                        .parse()
                        .map_err(|_| QbError::config(format!("{PORT_ENV} is not a port: {port}")))?;
                }
                config.user = lookup(USER_ENV).unwrap_or_default();
                config.password = lookup(PASSWORD_ENV);
                config.database = lookup(DATABASE_ENV).unwrap_or_default();
                config
            }
        };
        if let Some(size) = lookup(POOL_SIZE_ENV) {
            config.pool_size = size.parse().map_err(|_| {
                QbError::config(format!("{POOL_SIZE_ENV} is not a number: {size}"))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn pool_size(mut self, size: usize) -> Self {
        self.pool_size = size;
        self
    }

    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    /// Reject settings that cannot address a database.
    pub fn validate(&self) -> QbResult<()> {
        if self.pool_size == 0 {
            return Err(QbError::config("pool size must be at least 1"));
        }
        match &self.url {
            Some(url) if url.trim().is_empty() => Err(QbError::config("url cannot be empty")),
            Some(_) => Ok(()),
            None => {
                if self.host.trim().is_empty() {
                    return Err(QbError::config("host cannot be empty"));
                }
                if self.user.trim().is_empty() {
                    return Err(QbError::config("user cannot be empty"));
                }
                if self.database.trim().is_empty() {
                    return Err(QbError::config("database cannot be empty"));
                }
                Ok(())
            }
        }
    }

    /// Driver configuration for these settings.
    pub fn to_pg_config(&self) -> QbResult<tokio_postgres::Config> {
        self.validate()?;
        let mut pg = match &self.url {
            Some(url) => url
                .parse::<tokio_postgres::Config>()
                .map_err(|e| QbError::config(format!("invalid url: {e}")))?,
            None => {
                let mut pg = tokio_postgres::Config::new();
                pg.host(&self.host)
                    .port(self.port)
                    .user(&self.user)
                    .dbname(&self.database);
                if let Some(password) = &self.password {
                    pg.password(password);
                }
                pg
            }
        };
        if let Some(name) = &self.application_name {
            pg.application_name(name);
        }
        Ok(pg)
    }
}
