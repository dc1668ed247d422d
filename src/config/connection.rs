//! Database connection strings.
//!
//! Connection strings are URLs whose scheme selects the backend:
//! - `postgres://` / `postgresql://`: PostgreSQL
//! - `mysql://` / `mariadb://`: MySQL

use url::Url;

use crate::error::{Error, Result};

/// Schema used when the connection does not imply one.
pub const PUBLIC_SCHEMA: &str = "public";

/// Supported database drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    /// PostgreSQL
    Postgres,
    /// MySQL or MariaDB
    MySql,
}

impl Driver {
    /// Parse driver from a URL scheme.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Driver::Postgres),
            "mysql" | "mariadb" => Ok(Driver::MySql),
            other => Err(Error::UnsupportedDriver(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Driver::Postgres => "postgres",
            Driver::MySql => "mysql",
        }
    }

    /// Get the default port for this driver.
    pub fn default_port(&self) -> u16 {
        match self {
            Driver::Postgres => 5432,
            Driver::MySql => 3306,
        }
    }
}

/// Parsed connection string.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Database driver.
    pub driver: Driver,
    /// Server hostname.
    pub host: String,
    /// Port (optional, driver default otherwise).
    pub port: Option<u16>,
    /// Database name from the URL path; empty when absent.
    pub database: String,
    /// Username, if present.
    pub username: Option<String>,
    /// Password, if present.
    pub password: Option<String>,
    url: Url,
}

impl ConnectionConfig {
    /// Parse a connection string.
    pub fn parse(connection_string: &str) -> Result<Self> {
        let url = Url::parse(connection_string)
            .map_err(|e| Error::InvalidConnectionString(e.to_string()))?;

        let driver = Driver::from_str(url.scheme())?;

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| Error::InvalidConnectionString("missing host".to_string()))?
            .to_string();

        let database = url.path().trim_start_matches('/').to_string();

        let username = Some(url.username())
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        Ok(Self {
            driver,
            host,
            port: url.port(),
            database,
            username,
            password: url.password().map(str::to_string),
            url,
        })
    }

    /// Port to connect to, falling back to the driver default.
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.driver.default_port())
    }

    /// Schema implied by the connection target when none is given.
    ///
    /// MySQL schemas are databases, so the database in the URL path is the
    /// schema. PostgreSQL always defaults to `public`.
    pub fn default_schema(&self) -> String {
        match self.driver {
            Driver::MySql if !self.database.is_empty() => self.database.clone(),
            _ => PUBLIC_SCHEMA.to_string(),
        }
    }

    /// The connection string exactly as given to the driver.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// The connection string with any password masked.
    pub fn redacted(&self) -> String {
        let mut url = self.url.clone();
        if url.password().is_some() {
            // set_password only fails for cannot-be-a-base URLs, which parse() rejected
            let _ = url.set_password(Some("****"));
        }
        url.to_string()
    }
}
