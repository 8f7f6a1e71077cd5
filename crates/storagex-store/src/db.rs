//! Database connection management
//!
//! `ConnectionFactory` is the seam between repositories and the store: every
//! repository call asks it for one fresh connection and drops it before
//! returning. `DataSource` is the SQLite implementation.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, invalid_config, Result};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;
use storagex_core_types::Sensitive;

pub const ENV_DB_URL: &str = "STORAGEX_DB_URL";
pub const ENV_DB_USER: &str = "STORAGEX_DB_USER";
pub const ENV_DB_PASSWORD: &str = "STORAGEX_DB_PASSWORD";
pub const ENV_BUSY_TIMEOUT_MS: &str = "STORAGEX_BUSY_TIMEOUT_MS";

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Source of ready-to-use connections
pub trait ConnectionFactory: Send + Sync {
    /// Open and configure a new connection
    ///
    /// # Errors
    ///
    /// `StorageAccess` if the store cannot be opened or configured.
    fn connect(&self) -> Result<Connection>;
}

/// Connection settings for a SQLite database
///
/// The URL is a file path, optionally prefixed with `sqlite:` or
/// `sqlite://`. `:memory:` opens a new, empty database per connection.
/// SQLite has no authentication; user and password are kept for callers
/// that log or display the configured identity.
#[derive(Debug, Clone)]
pub struct DataSource {
    url: String,
    user: Option<String>,
    password: Option<Sensitive<String>>,
    busy_timeout: Duration,
}

impl DataSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user: None,
            password: None,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(Sensitive::new(password.into()));
        self
    }

    /// How long a connection waits on a locked database before failing
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Build from `STORAGEX_DB_*` environment variables, loading `.env` first
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the URL is missing or the busy timeout is not a
    /// number of milliseconds.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine; the process environment still applies
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup using the `STORAGEX_DB_*` names
    ///
    /// # Errors
    ///
    /// Same as `from_env`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(ENV_DB_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| invalid_config(format!("{} is not set", ENV_DB_URL)))?;

        let mut source = Self::new(url);
        source.user = lookup(ENV_DB_USER);
        source.password = lookup(ENV_DB_PASSWORD).map(Sensitive::new);

        if let Some(raw) = lookup(ENV_BUSY_TIMEOUT_MS) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                invalid_config(format!(
                    "{} must be a number of milliseconds, got '{}'",
                    ENV_BUSY_TIMEOUT_MS, raw
                ))
            })?;
            source.busy_timeout = Duration::from_millis(millis);
        }

        Ok(source)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn password(&self) -> Option<&Sensitive<String>> {
        self.password.as_ref()
    }

    pub fn busy_timeout(&self) -> Duration {
        self.busy_timeout
    }

    /// Filesystem path (or `:memory:`) the URL points at
    pub fn path(&self) -> &str {
        self.url
            .strip_prefix("sqlite://")
            .or_else(|| self.url.strip_prefix("sqlite:"))
            .unwrap_or(&self.url)
    }
}

impl ConnectionFactory for DataSource {
    fn connect(&self) -> Result<Connection> {
        let conn = open(self.path())?;
        conn.busy_timeout(self.busy_timeout)
            .map_err(from_rusqlite)?;
        configure(&conn)?;
        tracing::trace!(path = self.path(), user = ?self.user, "opened connection");
        Ok(conn)
    }
}

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open a private in-memory database with the same settings as
/// [`DataSource::connect`]
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
    configure(&conn)?;
    Ok(conn)
}

/// Apply per-connection settings
///
/// Foreign keys are off by default in SQLite; enabling them makes deletes
/// of referenced rows fail instead of leaving dangling references.
pub fn configure(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", true)
        .map_err(from_rusqlite)?;
    Ok(())
}
