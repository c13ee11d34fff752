//! Microsoft SQL Server platform.
//!
//! Pagination uses `OFFSET .. ROWS FETCH NEXT .. ROWS ONLY`, which SQL
//! Server only accepts after an `ORDER BY`. Queries without a top-level
//! ordering get a neutral one added.

use std::sync::LazyLock;

use regex::Regex;

use super::Platform;

static ORDER_BY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+order\s+by\s").expect("unable to compile order by regex")
});

static SELECT_DISTINCT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^SELECT\s+DISTINCT").expect("unable to compile select distinct regex")
});

/// SQL Server 2012+ platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlServerPlatform;

impl SqlServerPlatform {
    /// Creates a new SQL Server platform.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Returns true unless the last `ORDER BY` that sits outside any
/// parenthesized subquery belongs to the statement itself.
fn should_add_order_by(sql: &str) -> bool {
    let positions: Vec<usize> = ORDER_BY_RE.find_iter(sql).map(|m| m.start()).collect();

    for &pos in positions.iter().rev() {
        let tail = &sql[pos..];
        let open = tail.matches('(').count();
        let close = tail.matches(')').count();
        if open == close {
            return false;
        }
    }

    true
}

impl Platform for SqlServerPlatform {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn modify_limit_query(
        &self,
        sql: &str,
        max_results: Option<usize>,
        first_result: usize,
    ) -> String {
        if max_results.is_none() && first_result == 0 {
            return String::from(sql);
        }

        let mut sql = String::from(sql);

        if should_add_order_by(&sql) {
            if SELECT_DISTINCT_RE.is_match(&sql) {
                sql.push_str(" ORDER BY 1");
            } else {
                sql.push_str(" ORDER BY (SELECT 0)");
            }
        }

        sql.push_str(&format!(" OFFSET {first_result} ROWS"));

        if let Some(n) = max_results {
            sql.push_str(&format!(" FETCH NEXT {n} ROWS ONLY"));
        }

        sql
    }

    // Row locks are requested with table hints, not a trailing clause.
    fn for_update_sql(&self) -> Option<&'static str> {
        None
    }

    fn skip_locked_sql(&self) -> Option<&'static str> {
        None
    }
}
