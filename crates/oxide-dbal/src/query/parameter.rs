//! Parameter keys.

use std::fmt;

/// Identifies a bound parameter: a zero-based position for `?`
/// placeholders, or a name (without the leading colon) for `:name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterKey {
    /// Zero-based position of a `?` placeholder.
    Positional(usize),
    /// Name of a `:name` placeholder.
    Named(String),
}

impl From<usize> for ParameterKey {
    fn from(position: usize) -> Self {
        Self::Positional(position)
    }
}

impl From<&str> for ParameterKey {
    fn from(name: &str) -> Self {
        Self::Named(String::from(name))
    }
}

impl From<String> for ParameterKey {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional(position) => write!(f, "{position}"),
            Self::Named(name) => write!(f, ":{name}"),
        }
    }
}
