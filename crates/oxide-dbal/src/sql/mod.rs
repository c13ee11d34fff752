//! Placeholder rewriting for drivers with limited bind APIs.
//!
//! Both rewriters scan SQL text without parsing it. They skip over
//! single- and double-quoted literals and rewrite everything else:
//!
//! - [`PlaceholderRewriter`] turns `?` into generated `:paramN` names.
//! - [`ParameterBindingMap`] turns `:name` into `?` and records which
//!   positions each name occupied.

mod named;
mod positional;
mod scanner;
mod span;

pub use named::ParameterBindingMap;
pub use positional::{PlaceholderRewriter, RewrittenSql};
