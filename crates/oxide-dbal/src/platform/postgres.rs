//! PostgreSQL platform.

use super::Platform;

/// PostgreSQL platform. Uses the default `LIMIT`/`OFFSET` pagination.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgreSqlPlatform;

impl PostgreSqlPlatform {
    /// Creates a new PostgreSQL platform.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Platform for PostgreSqlPlatform {
    fn name(&self) -> &'static str {
        "postgresql"
    }
}
