//! Platform configuration.
//!
//! Applications usually pick the platform from their connection settings.
//! [`Configuration`] deserializes from any serde format:
//!
//! ```rust
//! use oxide_dbal::config::{Configuration, PlatformKind};
//!
//! let config: Configuration = serde_json::from_str(r#"{"platform": "sqlite"}"#).unwrap();
//! assert_eq!(config.platform, PlatformKind::Sqlite);
//! assert_eq!(config.create_platform().name(), "sqlite");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::platform::{
    GenericPlatform, MySqlPlatform, OraclePlatform, Platform, PostgreSqlPlatform, SqlServerPlatform,
    SqlitePlatform,
};
use crate::query::QueryBuilder;

/// The database platforms queries can be compiled for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// ANSI `LIMIT`/`OFFSET` pagination.
    #[default]
    Generic,
    /// PostgreSQL.
    PostgreSql,
    /// MySQL.
    MySql,
    /// MariaDB (MySQL dialect).
    MariaDb,
    /// SQLite.
    Sqlite,
    /// Microsoft SQL Server 2012+.
    SqlServer,
    /// Oracle.
    Oracle,
}

impl PlatformKind {
    /// Returns the configuration name of the platform.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::PostgreSql => "postgresql",
            Self::MySql => "mysql",
            Self::MariaDb => "mariadb",
            Self::Sqlite => "sqlite",
            Self::SqlServer => "sqlserver",
            Self::Oracle => "oracle",
        }
    }

    /// Creates the platform implementation.
    #[must_use]
    pub fn create_platform(self) -> Arc<dyn Platform> {
        match self {
            Self::Generic => Arc::new(GenericPlatform::new()),
            Self::PostgreSql => Arc::new(PostgreSqlPlatform::new()),
            Self::MySql | Self::MariaDb => Arc::new(MySqlPlatform::new()),
            Self::Sqlite => Arc::new(SqlitePlatform::new()),
            Self::SqlServer => Arc::new(SqlServerPlatform::new()),
            Self::Oracle => Arc::new(OraclePlatform::new()),
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" => Ok(Self::Generic),
            "postgresql" | "postgres" | "pgsql" => Ok(Self::PostgreSql),
            "mysql" => Ok(Self::MySql),
            "mariadb" => Ok(Self::MariaDb),
            "sqlite" => Ok(Self::Sqlite),
            "sqlserver" | "mssql" => Ok(Self::SqlServer),
            "oracle" | "oci" => Ok(Self::Oracle),
            _ => Err(Error::UnknownPlatform(String::from(s))),
        }
    }
}

/// Query building configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// The platform queries are compiled for.
    #[serde(default)]
    pub platform: PlatformKind,
}

impl Configuration {
    /// Creates a configuration for `platform`.
    #[must_use]
    pub const fn new(platform: PlatformKind) -> Self {
        Self { platform }
    }

    /// Creates the configured platform.
    #[must_use]
    pub fn create_platform(&self) -> Arc<dyn Platform> {
        self.platform.create_platform()
    }

    /// Creates a query builder for the configured platform.
    #[must_use]
    pub fn create_query_builder(&self) -> QueryBuilder {
        QueryBuilder::new(self.create_platform())
    }
}
