//! Error types for query construction and placeholder rewriting.

use thiserror::Error;

/// Errors raised while compiling queries or rewriting SQL text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A SELECT statement was compiled without any select expressions.
    #[error("No SELECT expressions given. Please use select() or add_select().")]
    EmptySelectList,

    /// A join is attached to an alias that no FROM or JOIN declares.
    #[error(
        "The given alias \"{alias}\" is not part of any FROM or JOIN clause table. \
         The currently registered aliases are: {}.",
        .known_aliases.join(", ")
    )]
    UnknownAlias {
        /// The alias the join was attached to.
        alias: String,
        /// Every alias registered when the check ran.
        known_aliases: Vec<String>,
    },

    /// A join declares an alias that is already registered.
    #[error(
        "The given alias \"{alias}\" is not unique in FROM and JOIN clause table. \
         The currently registered aliases are: {}.",
        .known_aliases.join(", ")
    )]
    NonUniqueAlias {
        /// The duplicated alias.
        alias: String,
        /// Aliases registered at the point of failure.
        known_aliases: Vec<String>,
    },

    /// The SQL text ends inside a quoted literal.
    #[error("The statement contains a non-terminated string literal starting at offset {offset}.")]
    NonTerminatedStringLiteral {
        /// Byte offset of the opening quote.
        offset: usize,
    },

    /// A positional bind referenced a position the rewritten SQL does not have.
    #[error("Could not find parameter at position {0}.")]
    UnknownParameterIndex(usize),

    /// A named bind referenced a name the rewritten SQL does not have.
    #[error("Could not find parameter with name \"{0}\".")]
    UnknownParameterName(String),

    /// The platform cannot express the requested clause.
    #[error("Operation \"{0}\" is not supported by the platform.")]
    NotSupported(&'static str),

    /// Configuration named a platform that does not exist.
    #[error("Unknown database platform \"{0}\".")]
    UnknownPlatform(String),
}

/// Result type alias for query builder and rewriter operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_errors_enumerate_known_aliases() {
        let err = Error::NonUniqueAlias {
            alias: String::from("x"),
            known_aliases: vec![String::from("a"), String::from("x")],
        };
        assert_eq!(
            err.to_string(),
            "The given alias \"x\" is not unique in FROM and JOIN clause table. \
             The currently registered aliases are: a, x."
        );

        let err = Error::UnknownAlias {
            alias: String::from("z"),
            known_aliases: vec![String::from("u")],
        };
        assert!(err.to_string().contains("\"z\" is not part of any FROM or JOIN"));
        assert!(err.to_string().ends_with("aliases are: u."));
    }

    #[test]
    fn test_non_terminated_literal_message() {
        let err = Error::NonTerminatedStringLiteral { offset: 4 };
        assert!(err.to_string().contains("offset 4"));
    }
}
