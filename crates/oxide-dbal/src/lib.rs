//! # oxide-dbal
//!
//! Query construction and placeholder rewriting for database abstraction
//! layers.
//!
//! This crate provides:
//! - A [`QueryBuilder`] that collects SELECT/INSERT/UPDATE/DELETE clauses,
//!   resolves join trees and aliases, and compiles the statement on demand
//! - [`CompositeExpression`] trees rendering AND/OR predicates with the
//!   parentheses operator precedence requires
//! - Platform-specific pagination and row locking through [`Platform`]
//! - Literal-aware placeholder rewriting for drivers that can only bind
//!   named ([`PlaceholderRewriter`]) or positional
//!   ([`ParameterBindingMap`]) parameters
//!
//! Nothing here talks to a database. Compiled SQL and the bound
//! parameters are handed to a driver for execution.
//!
//! ## Building a query
//!
//! ```rust
//! use oxide_dbal::{ParameterKey, QueryBuilder, SqlValue};
//!
//! let mut qb = QueryBuilder::default();
//! let id = qb.create_named_parameter(42, None, None);
//!
//! let mut qb = qb
//!     .select(["u.id", "u.name"])
//!     .from("users", "u")
//!     .left_join("u", "phones", "p", "p.user_id = u.id")
//!     .where_clause(format!("u.id = {id}"))
//!     .set_max_results(Some(10));
//!
//! assert_eq!(
//!     qb.get_sql().unwrap(),
//!     "SELECT u.id, u.name FROM users u LEFT JOIN phones p ON p.user_id = u.id \
//!      WHERE u.id = :dcValue1 LIMIT 10"
//! );
//! assert_eq!(
//!     qb.get_parameter(&ParameterKey::from("dcValue1")),
//!     Some(&SqlValue::Int(42))
//! );
//! ```
//!
//! ## Rewriting placeholders
//!
//! ```rust
//! use oxide_dbal::{ParameterBindingMap, PlaceholderRewriter};
//!
//! let rewritten = PlaceholderRewriter::rewrite("SELECT * FROM t WHERE a = ? AND b = '?'").unwrap();
//! assert_eq!(rewritten.sql, "SELECT * FROM t WHERE a = :param1 AND b = '?'");
//!
//! let map = ParameterBindingMap::parse("WHERE a = :x OR b = :x").unwrap();
//! assert_eq!(map.sql(), "WHERE a = ? OR b = ?");
//! assert_eq!(map.positions("x").unwrap(), &[0, 1]);
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod expression;
pub mod platform;
pub mod query;
pub mod sql;
pub mod value;

pub use config::{Configuration, PlatformKind};
pub use error::{Error, Result};
pub use expression::{CompositeExpression, CompositeType, ExpressionBuilder, Predicate};
pub use platform::Platform;
pub use query::{ConflictResolutionMode, ParameterKey, QueryBuilder, QueryType};
pub use sql::{ParameterBindingMap, PlaceholderRewriter, RewrittenSql};
pub use value::{ParameterType, SqlValue, ToSqlValue};
