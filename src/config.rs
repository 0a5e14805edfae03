//! Service configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Database coordinates are read as separate `DB_*` keys and
//! combined into connection options here, so the persistence layer only
//! ever sees a ready-to-use [`PgConnectOptions`].

use std::net::SocketAddr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

use crate::domain::clock::DEFAULT_TIME_ZONE;

/// Top-level service configuration.
///
/// Loaded once at startup via [`ServiceConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:80`).
    pub listen_addr: SocketAddr,

    /// Database host name.
    pub db_host: String,

    /// Database port.
    pub db_port: u16,

    /// Database user.
    pub db_user: String,

    /// Database password.
    pub db_password: String,

    /// Database name.
    pub db_name: String,

    /// Full connection string. Takes precedence over the `DB_*` keys.
    pub database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    pub database_max_connections: u32,

    /// Minimum idle connections in the pool.
    pub database_min_connections: u32,

    /// Timeout in seconds for acquiring a database connection.
    pub database_connect_timeout_secs: u64,

    /// Apply the bundled migrations at startup.
    pub run_migrations: bool,

    /// When `false`, records are kept in process memory.
    pub persistence_enabled: bool,

    /// IANA time zone used to render timestamps.
    pub time_zone: String,
}

impl ServiceConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:80".to_string())
            .parse()?;

        Ok(Self {
            listen_addr,
            db_host: env_or("DB_HOST", "localhost"),
            db_port: parse_env("DB_PORT", 5432),
            db_user: env_or("DB_USER", "postgres"),
            db_password: env_or("DB_PASSWORD", ""),
            db_name: env_or("DB_NAME", "time_log"),
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10),
            database_min_connections: parse_env("DATABASE_MIN_CONNECTIONS", 1),
            database_connect_timeout_secs: parse_env("DATABASE_CONNECT_TIMEOUT_SECS", 5),
            run_migrations: parse_env_bool("DATABASE_RUN_MIGRATIONS", true),
            persistence_enabled: parse_env_bool("PERSISTENCE_ENABLED", true),
            time_zone: env_or("TIME_ZONE", DEFAULT_TIME_ZONE),
        })
    }

    /// Builds PostgreSQL connection options.
    ///
    /// Uses `DATABASE_URL` verbatim when present, otherwise combines the
    /// individual `DB_*` settings.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] if `DATABASE_URL` is not a valid
    /// PostgreSQL connection string.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.database_url {
            return url.parse();
        }

        let mut options = PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .database(&self.db_name);
        if !self.db_password.is_empty() {
            options = options.password(&self.db_password);
        }
        Ok(options)
    }

    /// Pool acquire timeout as a [`Duration`].
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.database_connect_timeout_secs)
    }

    /// Database target without credentials, suitable for logs.
    #[must_use]
    pub fn redacted_target(&self) -> String {
        match &self.database_url {
            Some(_) => "DATABASE_URL".to_string(),
            None => format!("{}:{}/{}", self.db_host, self.db_port, self.db_name),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 80)),
            db_host: "localhost".to_string(),
            db_port: 5432,
            db_user: "postgres".to_string(),
            db_password: String::new(),
            db_name: "time_log".to_string(),
            database_url: None,
            database_max_connections: 10,
            database_min_connections: 1,
            database_connect_timeout_secs: 5,
            run_migrations: true,
            persistence_enabled: true,
            time_zone: DEFAULT_TIME_ZONE.to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}
