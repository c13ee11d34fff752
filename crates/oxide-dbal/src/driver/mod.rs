//! Statement adapters for drivers with limited bind APIs.
//!
//! A driver implements whichever of [`PositionalStatement`] or
//! [`NamedStatement`] its backend supports. The adapters here accept the
//! other placeholder style on top of it:
//!
//! - [`NamedParameterStatement`] accepts `:name` SQL on a positional
//!   backend and fans each bind out to every position the name occupies.
//! - [`PositionalParameterStatement`] accepts `?` SQL on a named backend
//!   and maps each 1-based position to its generated name.

use tracing::trace;

use crate::error::{Error, Result};
use crate::sql::{ParameterBindingMap, PlaceholderRewriter, RewrittenSql};
use crate::value::{ParameterType, SqlValue};

/// A prepared statement that binds parameters by zero-based position.
pub trait PositionalStatement {
    /// Binds `value` at `position`.
    ///
    /// # Errors
    ///
    /// Returns a driver-defined error if the backend rejects the bind.
    fn bind_value(&mut self, position: usize, value: SqlValue, ty: ParameterType) -> Result<()>;
}

/// A prepared statement that binds parameters by placeholder name.
pub trait NamedStatement {
    /// Binds `value` to `name` (including the leading colon).
    ///
    /// # Errors
    ///
    /// Returns a driver-defined error if the backend rejects the bind.
    fn bind_value(&mut self, name: &str, value: SqlValue, ty: ParameterType) -> Result<()>;
}

/// Binds named parameters through a positional backend.
#[derive(Debug)]
pub struct NamedParameterStatement<S> {
    map: ParameterBindingMap,
    inner: S,
}

impl<S: PositionalStatement> NamedParameterStatement<S> {
    /// Parses `sql` and prepares `prepare(rewritten_sql)` on the backend.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonTerminatedStringLiteral`] for malformed SQL, or
    /// whatever `prepare` returns.
    pub fn prepare<F>(sql: &str, prepare: F) -> Result<Self>
    where
        F: FnOnce(&str) -> Result<S>,
    {
        let map = ParameterBindingMap::parse(sql)?;
        let inner = prepare(map.sql())?;
        Ok(Self { map, inner })
    }

    /// Returns the SQL handed to the backend.
    #[must_use]
    pub fn sql(&self) -> &str {
        self.map.sql()
    }

    /// Binds `value` to every position `name` occupies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameterName`] if the SQL never used
    /// `name`, or the backend's bind error.
    pub fn bind_value(&mut self, name: &str, value: &SqlValue, ty: ParameterType) -> Result<()> {
        let positions = self.map.positions(name)?;
        trace!(name, positions = ?positions, "Binding named parameter");
        for &position in positions {
            self.inner.bind_value(position, value.clone(), ty)?;
        }
        Ok(())
    }

    /// Returns the wrapped backend statement.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwraps the backend statement.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

/// Binds positional parameters through a named backend.
#[derive(Debug)]
pub struct PositionalParameterStatement<S> {
    rewritten: RewrittenSql,
    inner: S,
}

impl<S: NamedStatement> PositionalParameterStatement<S> {
    /// Rewrites `sql` and prepares `prepare(rewritten_sql)` on the backend.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonTerminatedStringLiteral`] for malformed SQL, or
    /// whatever `prepare` returns.
    pub fn prepare<F>(sql: &str, prepare: F) -> Result<Self>
    where
        F: FnOnce(&str) -> Result<S>,
    {
        let rewritten = PlaceholderRewriter::rewrite(sql)?;
        let inner = prepare(&rewritten.sql)?;
        Ok(Self { rewritten, inner })
    }

    /// Returns the SQL handed to the backend.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.rewritten.sql
    }

    /// Binds `value` at the 1-based `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameterIndex`] if the SQL has no such
    /// position, or the backend's bind error.
    pub fn bind_value(&mut self, position: usize, value: SqlValue, ty: ParameterType) -> Result<()> {
        let name = self
            .rewritten
            .name_at(position)
            .ok_or(Error::UnknownParameterIndex(position))?;
        self.inner.bind_value(name, value, ty)
    }

    /// Returns the wrapped backend statement.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwraps the backend statement.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        sql: String,
        positional: Vec<(usize, SqlValue, ParameterType)>,
        named: Vec<(String, SqlValue, ParameterType)>,
    }

    impl PositionalStatement for Recorder {
        fn bind_value(&mut self, position: usize, value: SqlValue, ty: ParameterType) -> Result<()> {
            self.positional.push((position, value, ty));
            Ok(())
        }
    }

    impl NamedStatement for Recorder {
        fn bind_value(&mut self, name: &str, value: SqlValue, ty: ParameterType) -> Result<()> {
            self.named.push((String::from(name), value, ty));
            Ok(())
        }
    }

    fn recorder(sql: &str) -> Result<Recorder> {
        Ok(Recorder {
            sql: String::from(sql),
            ..Recorder::default()
        })
    }

    #[test]
    fn test_named_bind_fans_out() {
        let mut stmt =
            NamedParameterStatement::prepare("WHERE a=:x OR b=:x", recorder).unwrap();
        assert_eq!(stmt.inner().sql, "WHERE a=? OR b=?");

        stmt.bind_value("x", &SqlValue::Int(7), ParameterType::Integer)
            .unwrap();

        let recorded = stmt.into_inner().positional;
        assert_eq!(
            recorded,
            vec![
                (0, SqlValue::Int(7), ParameterType::Integer),
                (1, SqlValue::Int(7), ParameterType::Integer),
            ]
        );
    }

    #[test]
    fn test_named_bind_unknown_name() {
        let mut stmt = NamedParameterStatement::prepare("WHERE a=:x", recorder).unwrap();
        assert_eq!(
            stmt.bind_value("y", &SqlValue::Null, ParameterType::Null),
            Err(Error::UnknownParameterName(String::from("y")))
        );
        assert!(stmt.inner().positional.is_empty());
    }

    #[test]
    fn test_positional_bind_maps_to_generated_name() {
        let mut stmt =
            PositionalParameterStatement::prepare("WHERE a = ? AND b = '?'", recorder).unwrap();
        assert_eq!(stmt.sql(), "WHERE a = :param1 AND b = '?'");

        stmt.bind_value(1, SqlValue::Text(String::from("v")), ParameterType::String)
            .unwrap();
        assert_eq!(
            stmt.inner().named,
            vec![(
                String::from(":param1"),
                SqlValue::Text(String::from("v")),
                ParameterType::String
            )]
        );
    }

    #[test]
    fn test_positional_bind_unknown_index() {
        let mut stmt = PositionalParameterStatement::prepare("WHERE a = ?", recorder).unwrap();
        assert_eq!(
            stmt.bind_value(2, SqlValue::Null, ParameterType::Null),
            Err(Error::UnknownParameterIndex(2))
        );
        assert_eq!(
            stmt.bind_value(0, SqlValue::Null, ParameterType::Null),
            Err(Error::UnknownParameterIndex(0))
        );
    }

    #[test]
    fn test_prepare_rejects_unterminated_literal() {
        let result = NamedParameterStatement::prepare("a = ':x", recorder);
        assert!(matches!(
            result,
            Err(Error::NonTerminatedStringLiteral { offset: 4 })
        ));
    }
}
