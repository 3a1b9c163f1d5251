//! Lazily renders one document per identifier.

use std::io::Write;

use crate::manifest::{Manifest, Template};
use crate::range::IdentifierRange;

/// Drives a [`Template`] over an [`IdentifierRange`].
#[derive(Debug, Clone)]
pub struct Generator<T> {
    template: T,
    range: IdentifierRange,
}

impl<T: Template> Generator<T> {
    /// Creates a generator for `range`.
    #[must_use]
    pub fn new(template: T, range: IdentifierRange) -> Self {
        Self { template, range }
    }

    /// The identifiers this generator covers.
    #[must_use]
    pub fn range(&self) -> IdentifierRange {
        self.range
    }

    /// Resources in ascending identifier order, built on demand.
    pub fn manifests(&self) -> impl Iterator<Item = T::Output> + '_ {
        self.range.into_iter().map(|id| self.template.build(id))
    }

    /// Rendered documents in ascending identifier order.
    pub fn documents(&self) -> impl Iterator<Item = String> + '_ {
        self.manifests().map(|manifest| manifest.render())
    }

    /// Writes every document to `out`, each followed by a blank line, and
    /// returns how many were written.
    ///
    /// # Errors
    ///
    /// Returns the first write error; documents already written stay written.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<u64> {
        let mut written = 0;
        for document in self.documents() {
            writeln!(out, "{document}")?;
            written += 1;
        }
        out.flush()?;
        Ok(written)
    }
}
