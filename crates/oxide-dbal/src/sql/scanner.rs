//! Literal-aware placeholder scanning.
//!
//! The scanner alternates between two states. Outside a literal it looks
//! for the next quote or placeholder. Inside a literal it only looks for
//! the quote that opened it, so placeholder-like text in string literals
//! is never reported. A doubled quote (`''`) closes the literal and opens
//! a new one straight away, which leaves nothing in between to report.
//!
//! Comments are not recognized.

use crate::error::{Error, Result};

use super::span::Span;

/// Returns the end offset of a placeholder starting at the given byte
/// offset, or `None` if no placeholder starts there.
pub(crate) type Matcher = fn(&str, usize) -> Option<usize>;

#[derive(Debug, Clone, Copy)]
enum State {
    NotInLiteral,
    InLiteral { delimiter: char, opened_at: usize },
}

enum Hit {
    Placeholder(Span),
    Quote { delimiter: char, at: usize },
}

/// Yields the span of every placeholder outside quoted literals.
pub(crate) struct Scanner<'a> {
    sql: &'a str,
    pos: usize,
    matcher: Matcher,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub(crate) const fn new(sql: &'a str, matcher: Matcher) -> Self {
        Self {
            sql,
            pos: 0,
            matcher,
            done: false,
        }
    }

    /// Finds the next quote or placeholder at or after the current position.
    fn find_next(&self) -> Option<Hit> {
        self.sql[self.pos..].char_indices().find_map(|(offset, c)| {
            let at = self.pos + offset;
            if c == '\'' || c == '"' {
                return Some(Hit::Quote { delimiter: c, at });
            }
            (self.matcher)(self.sql, at).map(|end| Hit::Placeholder(Span::new(at, end)))
        })
    }

    fn next_placeholder(&mut self) -> Result<Option<Span>> {
        let mut state = State::NotInLiteral;

        loop {
            match state {
                State::NotInLiteral => match self.find_next() {
                    None => {
                        self.pos = self.sql.len();
                        return Ok(None);
                    }
                    Some(Hit::Placeholder(span)) => {
                        self.pos = span.end;
                        return Ok(Some(span));
                    }
                    Some(Hit::Quote { delimiter, at }) => {
                        self.pos = at + 1;
                        state = State::InLiteral {
                            delimiter,
                            opened_at: at,
                        };
                    }
                },
                State::InLiteral {
                    delimiter,
                    opened_at,
                } => match self.sql[self.pos..].find(delimiter) {
                    Some(offset) => {
                        self.pos += offset + 1;
                        state = State::NotInLiteral;
                    }
                    None => return Err(Error::NonTerminatedStringLiteral { offset: opened_at }),
                },
            }
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Span>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_placeholder() {
            Ok(Some(span)) => Some(Ok(span)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Matches a positional `?` marker.
pub(crate) fn positional_marker(sql: &str, at: usize) -> Option<usize> {
    (sql.as_bytes()[at] == b'?').then_some(at + 1)
}

/// Matches a `:name` marker. A colon next to another colon (as in a
/// PostgreSQL `::type` cast) never starts a marker.
pub(crate) fn named_marker(sql: &str, at: usize) -> Option<usize> {
    let bytes = sql.as_bytes();

    if bytes[at] != b':' || (at > 0 && bytes[at - 1] == b':') {
        return None;
    }

    let start = at + 1;
    match bytes.get(start) {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => {}
        _ => return None,
    }

    let len = bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();

    Some(start + len)
}
