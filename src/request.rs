//! Parsed input of one generator run.

use crate::range::IdentifierRange;

/// What a generator invocation was asked to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Number of resources; see [`IdentifierRange::from_request`].
    pub count: u64,
    /// Explicit identifier, 0 when unset.
    pub id: u64,
    /// Hostname or service the resources point at.
    pub target: String,
    /// Namespace of every resource.
    pub namespace: String,
}

impl GenerationRequest {
    /// Identifiers to generate.
    #[must_use]
    pub fn range(&self) -> IdentifierRange {
        IdentifierRange::from_request(self.count, self.id)
    }
}
