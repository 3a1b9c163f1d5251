//! Identifier ranges used to number generated resources.

use std::ops::RangeInclusive;

/// A contiguous, ascending, inclusive range of resource identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierRange {
    first: u64,
    last: u64,
}

impl IdentifierRange {
    /// Derives the range from a `--count` / `--id` pair.
    ///
    /// A non-zero `id` selects exactly that identifier and `count` is ignored.
    /// Otherwise resources are numbered from 1 to `count`, and a zero `count`
    /// still yields the single identifier 1.
    #[must_use]
    pub fn from_request(count: u64, id: u64) -> Self {
        if id != 0 {
            Self { first: id, last: id }
        } else {
            Self { first: 1, last: count.max(1) }
        }
    }

    /// First identifier in the range.
    #[must_use]
    pub fn first(&self) -> u64 {
        self.first
    }

    /// Last identifier in the range.
    #[must_use]
    pub fn last(&self) -> u64 {
        self.last
    }

    /// Number of identifiers in the range. Never zero.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.last - self.first + 1
    }
}

impl IntoIterator for IdentifierRange {
    type Item = u64;
    type IntoIter = RangeInclusive<u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.first..=self.last
    }
}
