//! Generic SQL platform.

use super::Platform;

/// A generic platform using `LIMIT`/`OFFSET` pagination.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericPlatform;

impl GenericPlatform {
    /// Creates a new generic platform.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Platform for GenericPlatform {
    fn name(&self) -> &'static str {
        "generic"
    }
}
