//! Pagination bounds.

/// The row window of a SELECT: skip `first_result` rows, return at most
/// `max_results`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limit {
    max_results: Option<usize>,
    first_result: usize,
}

impl Limit {
    /// Creates a new limit.
    #[must_use]
    pub const fn new(max_results: Option<usize>, first_result: usize) -> Self {
        Self {
            max_results,
            first_result,
        }
    }

    /// Returns true if the limit restricts the result in any way.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        self.max_results.is_some() || self.first_result > 0
    }

    /// Returns the maximum number of rows.
    #[must_use]
    pub const fn max_results(&self) -> Option<usize> {
        self.max_results
    }

    /// Returns the number of rows skipped.
    #[must_use]
    pub const fn first_result(&self) -> usize {
        self.first_result
    }
}
