//! Converts positional `?` placeholders into generated named ones.
//!
//! Used by drivers whose bind API only accepts named parameters.

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::Result;

use super::scanner::{positional_marker, Scanner};

/// SQL with every positional placeholder replaced by a generated name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenSql {
    /// The rewritten statement.
    pub sql: String,
    /// Generated placeholder (with colon) by 1-based position.
    pub parameter_map: BTreeMap<usize, String>,
}

impl RewrittenSql {
    /// Returns the generated placeholder for a 1-based position.
    #[must_use]
    pub fn name_at(&self, position: usize) -> Option<&str> {
        self.parameter_map.get(&position).map(String::as_str)
    }
}

/// Rewrites `?` markers to `:param1`, `:param2`, ... leaving quoted
/// literals untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderRewriter;

impl PlaceholderRewriter {
    /// Rewrites the positional placeholders in `sql`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NonTerminatedStringLiteral`] if `sql` ends
    /// inside a quoted literal.
    pub fn rewrite(sql: &str) -> Result<RewrittenSql> {
        let mut rewritten = String::with_capacity(sql.len());
        let mut parameter_map = BTreeMap::new();
        let mut cut = 0;

        for span in Scanner::new(sql, positional_marker) {
            let span = span?;
            rewritten.push_str(&sql[cut..span.start]);

            let position = parameter_map.len() + 1;
            let name = format!(":param{position}");
            rewritten.push_str(&name);
            parameter_map.insert(position, name);

            cut = span.end;
        }

        rewritten.push_str(&sql[cut..]);
        trace!(placeholders = parameter_map.len(), "Rewrote positional placeholders");

        Ok(RewrittenSql {
            sql: rewritten,
            parameter_map,
        })
    }
}
