//! Query construction.
//!
//! [`QueryBuilder`] accumulates clauses and compiles them into SQL text.
//! The value objects it stores ([`FromClause`], [`Join`], [`Limit`]) are
//! immutable; every clause change stores a new one, so cloning a builder
//! never shares mutable state with the original.

mod builder;
mod for_update;
mod from;
mod join;
mod limit;
mod parameter;

pub use builder::{QueryBuilder, QueryType};
pub use for_update::{ConflictResolutionMode, ForUpdate};
pub use from::FromClause;
pub use join::{Join, JoinType};
pub use limit::Limit;
pub use parameter::ParameterKey;
