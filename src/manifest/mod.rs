//! Gateway custom resources rendered as YAML documents.
//!
//! Rendering goes through a fixed template per kind rather than a YAML
//! serializer, so the emitted text is stable byte for byte across runs.
//! The types also implement `Deserialize` so emitted documents can be read
//! back and checked.

pub mod host;
pub mod mapping;

use std::collections::BTreeMap;

use serde::Deserialize;

pub use host::{Host, HostTemplate};
pub use mapping::{Mapping, MappingTemplate};

/// API group and version shared by every generated resource.
pub const API_VERSION: &str = "getambassador.io/v2";

/// Label key marking a resource as synthesized for load tests.
pub const GENERATED_LABEL: &str = "generated";

/// A single renderable resource.
pub trait Manifest {
    /// Resource name (`metadata.name`).
    fn name(&self) -> &str;

    /// Renders the resource as one YAML document, starting with `---`.
    fn render(&self) -> String;
}

/// Builds the resource for a given identifier.
pub trait Template {
    /// The resource kind produced by this template.
    type Output: Manifest;

    /// Prefix joined with the identifier to form resource names.
    const NAME_PREFIX: &'static str;

    /// Builds the resource numbered `id`.
    fn build(&self, id: u64) -> Self::Output;

    /// Resource name for identifier `id`.
    fn name_for(id: u64) -> String {
        format!("{}-{id}", Self::NAME_PREFIX)
    }
}

/// Subset of Kubernetes object metadata carried by generated resources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectMeta {
    /// Resource name.
    pub name: String,
    /// Target namespace.
    pub namespace: String,
    /// Resource labels.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Metadata for a generated resource, carrying the `generated` label.
    #[must_use]
    pub fn generated(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        let mut labels = BTreeMap::new();
        labels.insert(GENERATED_LABEL.to_owned(), "true".to_owned());
        Self { name: name.into(), namespace: namespace.into(), labels }
    }

    /// Writes the `metadata:` block at top level indentation.
    fn render_into(&self, out: &mut String) {
        out.push_str("metadata:\n");
        out.push_str(&format!("  name: {}\n", self.name));
        out.push_str(&format!("  namespace: {}\n", self.namespace));
        if !self.labels.is_empty() {
            out.push_str("  labels:\n");
            for (key, value) in &self.labels {
                out.push_str(&format!("    {key}: \"{value}\"\n"));
            }
        }
    }
}

/// Writes the `---` separator and the `apiVersion`/`kind` header.
fn render_header(out: &mut String, kind: &str) {
    out.push_str("---\n");
    out.push_str(&format!("apiVersion: {API_VERSION}\n"));
    out.push_str(&format!("kind: {kind}\n"));
}
