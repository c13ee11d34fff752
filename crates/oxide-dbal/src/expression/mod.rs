//! Boolean predicate trees for WHERE and HAVING clauses.
//!
//! # Example
//!
//! ```rust
//! use oxide_dbal::expression::{CompositeExpression, ExpressionBuilder};
//!
//! let expr = ExpressionBuilder::new();
//! let predicate = CompositeExpression::or(
//!     CompositeExpression::and(expr.eq("u.active", "1"), [expr.gt("u.age", "?")]),
//!     [expr.is_null("u.deleted_at")],
//! );
//!
//! assert_eq!(
//!     predicate.to_string(),
//!     "(u.active = 1 AND u.age > ?) OR u.deleted_at IS NULL"
//! );
//! ```

mod builder;
mod composite;

pub use builder::ExpressionBuilder;
pub use composite::{CompositeExpression, CompositeType, Predicate};
