//! Composite expressions: predicates combined with AND/OR.

use std::fmt;

/// The boolean operator joining the parts of a composite expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeType {
    /// Parts joined with `AND`.
    And,
    /// Parts joined with `OR`.
    Or,
}

impl CompositeType {
    /// Returns the separator placed between rendered parts.
    #[must_use]
    pub const fn separator(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// A single part of a WHERE/HAVING predicate.
///
/// Raw predicates are emitted verbatim. The caller is responsible for
/// parenthesizing any operators inside raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// A predicate written as SQL text, e.g. `u.active = 1`.
    Raw(String),
    /// A nested composite expression.
    Composite(CompositeExpression),
}

impl Predicate {
    /// Combines this predicate with `more` under `kind`.
    ///
    /// A composite of the same type is extended in place of nesting;
    /// anything else becomes the first part of a new composite.
    #[must_use]
    pub fn merge<I>(self, kind: CompositeType, more: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Self>,
    {
        match self {
            Self::Composite(composite) if composite.kind == kind => {
                Self::Composite(composite.with(more))
            }
            other => Self::Composite(CompositeExpression::new(kind, other, more)),
        }
    }

    /// Returns true if rendering this predicate as a part of a `parent`
    /// composite requires surrounding parentheses.
    fn needs_parentheses(&self, parent: CompositeType) -> bool {
        match self {
            Self::Raw(_) => false,
            Self::Composite(composite) => match composite.parts.as_slice() {
                [single] => single.needs_parentheses(parent),
                _ => composite.kind != parent,
            },
        }
    }
}

impl From<&str> for Predicate {
    fn from(sql: &str) -> Self {
        Self::Raw(String::from(sql))
    }
}

impl From<String> for Predicate {
    fn from(sql: String) -> Self {
        Self::Raw(sql)
    }
}

impl From<CompositeExpression> for Predicate {
    fn from(composite: CompositeExpression) -> Self {
        Self::Composite(composite)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(sql) => f.write_str(sql),
            Self::Composite(composite) => fmt::Display::fmt(composite, f),
        }
    }
}

/// An immutable list of predicates joined by the same boolean operator.
///
/// A composite always has at least one part. Adding parts produces a new
/// composite and leaves the original untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeExpression {
    kind: CompositeType,
    parts: Vec<Predicate>,
}

impl CompositeExpression {
    /// Creates a composite from one predicate and any number of others.
    #[must_use]
    pub fn new<P, I>(kind: CompositeType, predicate: P, more: I) -> Self
    where
        P: Into<Predicate>,
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        let mut parts = vec![predicate.into()];
        parts.extend(more.into_iter().map(Into::into));
        Self { kind, parts }
    }

    /// Creates an `AND` composite.
    #[must_use]
    pub fn and<P, I>(predicate: P, more: I) -> Self
    where
        P: Into<Predicate>,
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        Self::new(CompositeType::And, predicate, more)
    }

    /// Creates an `OR` composite.
    #[must_use]
    pub fn or<P, I>(predicate: P, more: I) -> Self
    where
        P: Into<Predicate>,
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        Self::new(CompositeType::Or, predicate, more)
    }

    /// Like [`CompositeExpression::new`], but a lone predicate is returned
    /// as-is rather than wrapped in a one-part composite.
    #[must_use]
    pub fn create<P, I>(kind: CompositeType, predicate: P, more: I) -> Predicate
    where
        P: Into<Predicate>,
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        let predicate = predicate.into();
        let mut more = more.into_iter().map(Into::<Predicate>::into).peekable();
        if more.peek().is_none() {
            return predicate;
        }
        Predicate::Composite(Self::new(kind, predicate, more))
    }

    /// Returns a new composite with `more` appended to this one's parts.
    #[must_use]
    pub fn with<I>(&self, more: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        let mut parts = self.parts.clone();
        parts.extend(more.into_iter().map(Into::into));
        Self {
            kind: self.kind,
            parts,
        }
    }

    /// Returns the boolean operator of this composite.
    #[must_use]
    pub const fn kind(&self) -> CompositeType {
        self.kind
    }

    /// Returns the parts in the order they were added.
    #[must_use]
    pub fn parts(&self) -> &[Predicate] {
        &self.parts
    }

    /// Returns the number of parts.
    #[must_use]
    pub fn count(&self) -> usize {
        self.parts.len()
    }
}

impl fmt::Display for CompositeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [single] = self.parts.as_slice() {
            return fmt::Display::fmt(single, f);
        }

        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(self.kind.separator())?;
            }
            if part.needs_parentheses(self.kind) {
                write!(f, "({part})")?;
            } else {
                write!(f, "{part}")?;
            }
        }

        Ok(())
    }
}
