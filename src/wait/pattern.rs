//! Expansion of URL patterns over an index range.

use crate::error::{Error, Result};

/// Placeholder replaced by the index in a URL pattern.
pub const INDEX_PLACEHOLDER: char = '@';

/// The URLs a waiter watches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlSet {
    /// A plain URL without placeholder.
    Single(String),
    /// A pattern expanded once per index in `start..=end`.
    Pattern {
        /// URL containing [`INDEX_PLACEHOLDER`].
        pattern: String,
        /// First index.
        start: u64,
        /// Last index, inclusive.
        end: u64,
    },
}

impl UrlSet {
    /// Classifies `url`; the range is only used when it holds a placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] for a pattern whose `start` exceeds `end`.
    pub fn new(url: impl Into<String>, start: u64, end: u64) -> Result<Self> {
        let url = url.into();
        if !url.contains(INDEX_PLACEHOLDER) {
            return Ok(UrlSet::Single(url));
        }
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(UrlSet::Pattern { pattern: url, start, end })
    }

    /// Number of URLs in the set. A full `u64` index range holds 2^64 URLs,
    /// hence the wider type.
    #[must_use]
    pub fn count(&self) -> u128 {
        match self {
            UrlSet::Single(_) => 1,
            UrlSet::Pattern { start, end, .. } => u128::from(end - start) + 1,
        }
    }

    /// The URLs in index order.
    pub fn urls(&self) -> impl Iterator<Item = String> + '_ {
        let (start, end) = match self {
            UrlSet::Single(_) => (0, 0),
            UrlSet::Pattern { start, end, .. } => (*start, *end),
        };
        (start..=end).map(move |index| self.expand(index))
    }

    fn expand(&self, index: u64) -> String {
        match self {
            UrlSet::Single(url) => url.clone(),
            UrlSet::Pattern { pattern, .. } => {
                pattern.replace(INDEX_PLACEHOLDER, &index.to_string())
            }
        }
    }
}
