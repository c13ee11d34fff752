//! Database platform support.
//!
//! Different databases express pagination and row locking differently.
//! The query builder renders everything else itself and defers those two
//! concerns to a [`Platform`].

mod generic;
mod mysql;
mod oracle;
mod postgres;
mod sqlite;
mod sqlserver;

pub use generic::GenericPlatform;
pub use mysql::MySqlPlatform;
pub use oracle::OraclePlatform;
pub use postgres::PostgreSqlPlatform;
pub use sqlite::SqlitePlatform;
pub use sqlserver::SqlServerPlatform;

use std::fmt;

/// Trait for platform-specific SQL generation.
pub trait Platform: fmt::Debug + Send + Sync {
    /// Returns the name of the platform.
    fn name(&self) -> &'static str;

    /// Rewrites a complete SELECT statement so that it returns at most
    /// `max_results` rows, skipping the first `first_result` rows.
    ///
    /// The default appends `LIMIT`/`OFFSET`. The statement is returned
    /// unchanged when no limit is given and the offset is zero.
    fn modify_limit_query(
        &self,
        sql: &str,
        max_results: Option<usize>,
        first_result: usize,
    ) -> String {
        let mut sql = String::from(sql);

        if let Some(n) = max_results {
            sql.push_str(&format!(" LIMIT {n}"));
        }

        if first_result > 0 {
            sql.push_str(&format!(" OFFSET {first_result}"));
        }

        sql
    }

    /// Returns the row locking clause appended to SELECT statements, or
    /// `None` if the platform cannot lock rows this way.
    fn for_update_sql(&self) -> Option<&'static str> {
        Some("FOR UPDATE")
    }

    /// Returns the clause that makes a locking read skip locked rows.
    fn skip_locked_sql(&self) -> Option<&'static str> {
        Some("SKIP LOCKED")
    }
}
