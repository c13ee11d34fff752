//! SQLite platform.
//!
//! SQLite accepts `LIMIT`/`OFFSET` but requires a `LIMIT` whenever an
//! `OFFSET` is present; `LIMIT -1` means "no limit". It has no row-level
//! locking, so `FOR UPDATE` is not available.

use super::Platform;

/// SQLite platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlitePlatform;

impl SqlitePlatform {
    /// Creates a new SQLite platform.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Platform for SqlitePlatform {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn modify_limit_query(
        &self,
        sql: &str,
        max_results: Option<usize>,
        first_result: usize,
    ) -> String {
        match max_results {
            None if first_result > 0 => format!("{sql} LIMIT -1 OFFSET {first_result}"),
            None => String::from(sql),
            Some(n) if first_result > 0 => format!("{sql} LIMIT {n} OFFSET {first_result}"),
            Some(n) => format!("{sql} LIMIT {n}"),
        }
    }

    fn for_update_sql(&self) -> Option<&'static str> {
        None
    }

    fn skip_locked_sql(&self) -> Option<&'static str> {
        None
    }
}
