//! Converts named `:name` placeholders into positional `?` markers.
//!
//! Used by drivers whose bind API only accepts positions. A name may
//! appear several times; binding it must fill every position it occupies.

use indexmap::IndexMap;
use tracing::trace;

use crate::error::{Error, Result};

use super::scanner::{named_marker, Scanner};

/// SQL with named placeholders replaced by `?`, plus the zero-based
/// positions each name occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterBindingMap {
    sql: String,
    positions: IndexMap<String, Vec<usize>>,
    count: usize,
}

impl ParameterBindingMap {
    /// Parses `sql`, replacing every `:name` outside quoted literals.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonTerminatedStringLiteral`] if `sql` ends inside
    /// a quoted literal.
    pub fn parse(sql: &str) -> Result<Self> {
        let mut rewritten = String::with_capacity(sql.len());
        let mut positions: IndexMap<String, Vec<usize>> = IndexMap::new();
        let mut count = 0;
        let mut cut = 0;

        for span in Scanner::new(sql, named_marker) {
            let span = span?;
            rewritten.push_str(&sql[cut..span.start]);
            rewritten.push('?');

            let name = &sql[span.start + 1..span.end];
            positions.entry(String::from(name)).or_default().push(count);
            count += 1;

            cut = span.end;
        }

        rewritten.push_str(&sql[cut..]);
        trace!(placeholders = count, names = positions.len(), "Rewrote named placeholders");

        Ok(Self {
            sql: rewritten,
            positions,
            count,
        })
    }

    /// Returns the rewritten SQL.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the positions of every name, in order of first appearance.
    #[must_use]
    pub const fn positions_by_name(&self) -> &IndexMap<String, Vec<usize>> {
        &self.positions
    }

    /// Returns the number of `?` markers in the rewritten SQL.
    #[must_use]
    pub const fn parameter_count(&self) -> usize {
        self.count
    }

    /// Returns the zero-based positions occupied by `name`. A leading
    /// colon is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameterName`] if the SQL never used `name`.
    pub fn positions(&self, name: &str) -> Result<&[usize]> {
        let key = name.strip_prefix(':').unwrap_or(name);
        self.positions
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownParameterName(String::from(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_name() {
        let map = ParameterBindingMap::parse("WHERE a=:x OR b=:x").unwrap();
        assert_eq!(map.sql(), "WHERE a=? OR b=?");
        assert_eq!(map.positions("x").unwrap(), &[0, 1]);
        assert_eq!(map.parameter_count(), 2);
    }

    #[test]
    fn test_positions_count_all_replacements() {
        let map = ParameterBindingMap::parse("a = :a AND b = :b AND c = :a").unwrap();
        assert_eq!(map.sql(), "a = ? AND b = ? AND c = ?");
        assert_eq!(map.positions(":a").unwrap(), &[0, 2]);
        assert_eq!(map.positions("b").unwrap(), &[1]);
        let names: Vec<&str> = map.positions_by_name().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_names_inside_literals_are_untouched() {
        let map = ParameterBindingMap::parse("SELECT ':x', \":y\" FROM t WHERE z = :z").unwrap();
        assert_eq!(map.sql(), "SELECT ':x', \":y\" FROM t WHERE z = ?");
        assert!(map.positions("x").is_err());
    }

    #[test]
    fn test_casts_are_untouched() {
        let map = ParameterBindingMap::parse("SELECT :v::int").unwrap();
        assert_eq!(map.sql(), "SELECT ?::int");
        assert_eq!(map.positions("v").unwrap(), &[0]);
    }

    #[test]
    fn test_unknown_name() {
        let map = ParameterBindingMap::parse("a = :a").unwrap();
        assert_eq!(
            map.positions("missing"),
            Err(Error::UnknownParameterName(String::from("missing")))
        );
    }
}
