//! FROM clause sources.

/// One table reference in the FROM clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromClause {
    table: String,
    alias: Option<String>,
}

impl FromClause {
    /// Creates a FROM source with an optional alias.
    #[must_use]
    pub fn new(table: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            table: table.into(),
            alias,
        }
    }

    /// Returns the table expression.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the alias, if one was given.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns the name joins attach to: the alias, or the table when
    /// there is no alias.
    #[must_use]
    pub fn reference(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.table)
    }

    /// Renders `table` or `table alias`.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self.alias.as_deref() {
            Some(alias) if alias != self.table => format!("{} {alias}", self.table),
            _ => self.table.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_without_alias() {
        let from = FromClause::new("users", None);
        assert_eq!(from.reference(), "users");
        assert_eq!(from.to_sql(), "users");
    }

    #[test]
    fn test_from_with_alias() {
        let from = FromClause::new("users", Some(String::from("u")));
        assert_eq!(from.reference(), "u");
        assert_eq!(from.to_sql(), "users u");
    }

    #[test]
    fn test_alias_equal_to_table_is_not_repeated() {
        let from = FromClause::new("users", Some(String::from("users")));
        assert_eq!(from.to_sql(), "users");
    }
}
