//! `Mapping` resources.

use serde::Deserialize;

use super::{render_header, Manifest, ObjectMeta, Template};

/// A gateway `Mapping` resource routing a URL prefix to a service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    /// Always [`super::API_VERSION`] for generated mappings.
    pub api_version: String,
    /// Always `Mapping`.
    pub kind: String,
    /// Object metadata.
    pub metadata: ObjectMeta,
    /// Mapping specification.
    pub spec: MappingSpec,
}

/// The `spec` block of a [`Mapping`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MappingSpec {
    /// URL prefix, `/<name>/`.
    pub prefix: String,
    /// Backing service.
    pub service: String,
}

impl Mapping {
    /// Kubernetes kind.
    pub const KIND: &'static str = "Mapping";

    /// A generated mapping whose prefix is derived from its name.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, service: &str) -> Self {
        let name = name.into();
        Self {
            api_version: super::API_VERSION.to_owned(),
            kind: Self::KIND.to_owned(),
            spec: MappingSpec { prefix: format!("/{name}/"), service: service.to_owned() },
            metadata: ObjectMeta::generated(name, namespace),
        }
    }
}

impl Manifest for Mapping {
    fn name(&self) -> &str {
        &self.metadata.name
    }

    fn render(&self) -> String {
        let mut out = String::new();
        render_header(&mut out, &self.kind);
        self.metadata.render_into(&mut out);
        out.push_str("spec:\n");
        out.push_str(&format!("  prefix: {}\n", self.spec.prefix));
        out.push_str(&format!("  service: {}\n", self.spec.service));
        out
    }
}

/// Builds `echo-<id>` mappings for one service and namespace.
#[derive(Debug, Clone)]
pub struct MappingTemplate {
    /// Service every mapping routes to.
    pub service: String,
    /// Target namespace.
    pub namespace: String,
}

impl Template for MappingTemplate {
    type Output = Mapping;

    const NAME_PREFIX: &'static str = "echo";

    fn build(&self, id: u64) -> Mapping {
        Mapping::new(Self::name_for(id), self.namespace.clone(), &self.service)
    }
}
