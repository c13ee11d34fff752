//! MySQL and MariaDB platform.

use super::Platform;

/// MySQL has no way to express an offset without a limit, so the largest
/// unsigned BIGINT stands in for "all remaining rows".
const MAX_LIMIT: &str = "18446744073709551615";

/// MySQL/MariaDB platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlPlatform;

impl MySqlPlatform {
    /// Creates a new MySQL platform.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Platform for MySqlPlatform {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn modify_limit_query(
        &self,
        sql: &str,
        max_results: Option<usize>,
        first_result: usize,
    ) -> String {
        let mut sql = String::from(sql);

        match max_results {
            Some(n) => sql.push_str(&format!(" LIMIT {n}")),
            None if first_result > 0 => sql.push_str(&format!(" LIMIT {MAX_LIMIT}")),
            None => {}
        }

        if first_result > 0 {
            sql.push_str(&format!(" OFFSET {first_result}"));
        }

        sql
    }
}
