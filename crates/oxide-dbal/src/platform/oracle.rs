//! Oracle platform.
//!
//! Oracle (before 12c) has no `LIMIT`. Pagination wraps the statement and
//! filters on `ROWNUM`.

use std::sync::LazyLock;

use regex::Regex;

use super::Platform;

static SELECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*SELECT").expect("unable to compile select regex"));

static FROM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\sFROM\s").expect("unable to compile from regex"));

/// Oracle platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct OraclePlatform;

impl OraclePlatform {
    /// Creates a new Oracle platform.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Platform for OraclePlatform {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn modify_limit_query(
        &self,
        sql: &str,
        max_results: Option<usize>,
        first_result: usize,
    ) -> String {
        if (max_results.is_none() && first_result == 0) || !SELECT_RE.is_match(sql) {
            return String::from(sql);
        }

        let mut inner = String::from(sql);
        if !FROM_RE.is_match(&inner) {
            inner.push_str(" FROM dual");
        }

        let columns = if first_result > 0 {
            "a.*, ROWNUM AS oxide_rownum"
        } else {
            "a.*"
        };

        let mut query = format!("SELECT {columns} FROM ({inner}) a");

        if let Some(n) = max_results {
            let last_row = first_result.saturating_add(n);
            query.push_str(&format!(" WHERE ROWNUM <= {last_row}"));
        }

        if first_result > 0 {
            query = format!(
                "SELECT * FROM ({query}) WHERE oxide_rownum >= {}",
                first_result.saturating_add(1)
            );
        }

        query
    }
}
