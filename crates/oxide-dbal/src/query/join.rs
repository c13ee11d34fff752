//! JOIN clauses.

/// The kind of a JOIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    /// `INNER JOIN`.
    Inner,
    /// `LEFT JOIN`.
    Left,
    /// `RIGHT JOIN`.
    Right,
}

impl JoinType {
    /// Returns the SQL keyword for this join kind.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
        }
    }
}

/// One joined table. The alias it attaches to is tracked by the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    kind: JoinType,
    table: String,
    alias: String,
    condition: Option<String>,
}

impl Join {
    /// Creates a join.
    #[must_use]
    pub fn new(
        kind: JoinType,
        table: impl Into<String>,
        alias: impl Into<String>,
        condition: Option<String>,
    ) -> Self {
        Self {
            kind,
            table: table.into(),
            alias: alias.into(),
            condition,
        }
    }

    /// Returns the join kind.
    #[must_use]
    pub const fn kind(&self) -> JoinType {
        self.kind
    }

    /// Returns the joined table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the alias of the joined table.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Returns the ON condition.
    #[must_use]
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// Renders the join with a leading space, ready to append.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = format!(" {} {} {}", self.kind.keyword(), self.table, self.alias);
        if let Some(condition) = &self.condition {
            sql.push_str(" ON ");
            sql.push_str(condition);
        }
        sql
    }
}
