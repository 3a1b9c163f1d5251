//! `Host` resources.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{render_header, Manifest, ObjectMeta, Template};

/// A gateway `Host` resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    /// Always [`super::API_VERSION`] for generated hosts.
    pub api_version: String,
    /// Always `Host`.
    pub kind: String,
    /// Object metadata.
    pub metadata: ObjectMeta,
    /// Host specification.
    pub spec: HostSpec,
}

/// The `spec` block of a [`Host`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostSpec {
    /// ACME configuration; generated hosts never request certificates.
    pub acme_provider: AcmeProvider,
    /// Hostname served by this host.
    pub hostname: String,
    /// Selector matching mappings attached to this host.
    pub selector: Selector,
    /// TLS secret reference, empty for generated hosts.
    pub tls_secret: BTreeMap<String, String>,
}

/// ACME provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AcmeProvider {
    /// Certificate authority, `none` to disable ACME.
    pub authority: String,
}

/// Label selector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selector {
    /// Labels that must match.
    pub match_labels: BTreeMap<String, String>,
}

impl Host {
    /// Kubernetes kind.
    pub const KIND: &'static str = "Host";

    /// A generated host for `hostname`, with ACME disabled and no TLS secret.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, hostname: &str) -> Self {
        let mut match_labels = BTreeMap::new();
        match_labels.insert("hostname".to_owned(), hostname.to_owned());
        Self {
            api_version: super::API_VERSION.to_owned(),
            kind: Self::KIND.to_owned(),
            metadata: ObjectMeta::generated(name, namespace),
            spec: HostSpec {
                acme_provider: AcmeProvider { authority: "none".to_owned() },
                hostname: hostname.to_owned(),
                selector: Selector { match_labels },
                tls_secret: BTreeMap::new(),
            },
        }
    }
}

impl Manifest for Host {
    fn name(&self) -> &str {
        &self.metadata.name
    }

    fn render(&self) -> String {
        let mut out = String::new();
        render_header(&mut out, &self.kind);
        self.metadata.render_into(&mut out);
        out.push_str("spec:\n");
        out.push_str("  acmeProvider:\n");
        out.push_str(&format!("    authority: {}\n", self.spec.acme_provider.authority));
        out.push_str(&format!("  hostname: {}\n", self.spec.hostname));
        out.push_str("  selector:\n");
        out.push_str("    matchLabels:\n");
        for (key, value) in &self.spec.selector.match_labels {
            out.push_str(&format!("      {key}: {value}\n"));
        }
        if self.spec.tls_secret.is_empty() {
            out.push_str("  tlsSecret: {}\n");
        } else {
            out.push_str("  tlsSecret:\n");
            for (key, value) in &self.spec.tls_secret {
                out.push_str(&format!("    {key}: {value}\n"));
            }
        }
        out
    }
}

/// Builds `host-<id>` resources for one hostname and namespace.
#[derive(Debug, Clone)]
pub struct HostTemplate {
    /// Hostname placed in `spec.hostname` and the selector.
    pub hostname: String,
    /// Target namespace.
    pub namespace: String,
}

impl Template for HostTemplate {
    type Output = Host;

    const NAME_PREFIX: &'static str = "host";

    fn build(&self, id: u64) -> Host {
        Host::new(Self::name_for(id), self.namespace.clone(), &self.hostname)
    }
}
