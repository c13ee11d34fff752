//! Row locking for SELECT statements.

/// How a locking read treats rows already locked by another transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictResolutionMode {
    /// Wait for the lock.
    #[default]
    Ordinary,
    /// Skip rows that are locked.
    SkipLocked,
}

/// A `FOR UPDATE` request on a SELECT.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForUpdate {
    mode: ConflictResolutionMode,
}

impl ForUpdate {
    /// Creates a lock request.
    #[must_use]
    pub const fn new(mode: ConflictResolutionMode) -> Self {
        Self { mode }
    }

    /// Returns the conflict resolution mode.
    #[must_use]
    pub const fn mode(&self) -> ConflictResolutionMode {
        self.mode
    }
}
