//! Helpers for writing predicate text.
//!
//! Every helper returns plain SQL text. Operands are emitted verbatim, so
//! values should be passed as placeholders created on the query builder.

use super::composite::{CompositeExpression, Predicate};

/// Builds predicate fragments for use with the query builder.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpressionBuilder;

#[allow(clippy::unused_self)]
impl ExpressionBuilder {
    /// Creates a new expression builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Creates a conjunction of the given predicates.
    #[must_use]
    pub fn and<P, I>(&self, predicate: P, more: I) -> CompositeExpression
    where
        P: Into<Predicate>,
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        CompositeExpression::and(predicate, more)
    }

    /// Creates a disjunction of the given predicates.
    #[must_use]
    pub fn or<P, I>(&self, predicate: P, more: I) -> CompositeExpression
    where
        P: Into<Predicate>,
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        CompositeExpression::or(predicate, more)
    }

    /// Creates a comparison `x <operator> y`.
    #[must_use]
    pub fn comparison(&self, x: &str, operator: &str, y: &str) -> String {
        format!("{x} {operator} {y}")
    }

    /// Creates an equality comparison.
    #[must_use]
    pub fn eq(&self, x: &str, y: &str) -> String {
        self.comparison(x, "=", y)
    }

    /// Creates an inequality comparison.
    #[must_use]
    pub fn neq(&self, x: &str, y: &str) -> String {
        self.comparison(x, "<>", y)
    }

    /// Creates a less-than comparison.
    #[must_use]
    pub fn lt(&self, x: &str, y: &str) -> String {
        self.comparison(x, "<", y)
    }

    /// Creates a less-than-or-equal comparison.
    #[must_use]
    pub fn lte(&self, x: &str, y: &str) -> String {
        self.comparison(x, "<=", y)
    }

    /// Creates a greater-than comparison.
    #[must_use]
    pub fn gt(&self, x: &str, y: &str) -> String {
        self.comparison(x, ">", y)
    }

    /// Creates a greater-than-or-equal comparison.
    #[must_use]
    pub fn gte(&self, x: &str, y: &str) -> String {
        self.comparison(x, ">=", y)
    }

    /// Creates an IS NULL expression.
    #[must_use]
    pub fn is_null(&self, x: &str) -> String {
        format!("{x} IS NULL")
    }

    /// Creates an IS NOT NULL expression.
    #[must_use]
    pub fn is_not_null(&self, x: &str) -> String {
        format!("{x} IS NOT NULL")
    }

    /// Creates a LIKE expression with an optional ESCAPE character.
    #[must_use]
    pub fn like(&self, x: &str, pattern: &str, escape: Option<&str>) -> String {
        with_escape(self.comparison(x, "LIKE", pattern), escape)
    }

    /// Creates a NOT LIKE expression with an optional ESCAPE character.
    #[must_use]
    pub fn not_like(&self, x: &str, pattern: &str, escape: Option<&str>) -> String {
        with_escape(self.comparison(x, "NOT LIKE", pattern), escape)
    }

    /// Creates an IN expression.
    #[must_use]
    pub fn in_list(&self, x: &str, values: &[&str]) -> String {
        format!("{x} IN ({})", values.join(", "))
    }

    /// Creates a NOT IN expression.
    #[must_use]
    pub fn not_in_list(&self, x: &str, values: &[&str]) -> String {
        format!("{x} NOT IN ({})", values.join(", "))
    }
}

fn with_escape(sql: String, escape: Option<&str>) -> String {
    match escape {
        Some(e) => format!("{sql} ESCAPE {e}"),
        None => sql,
    }
}
