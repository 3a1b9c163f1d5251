//! Probe port for checking a single URL.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Boxed future type alias used by [`Prober`] to keep the trait dyn-compatible.
pub type ProbeFuture<'a> = Pin<Box<dyn Future<Output = ProbeOutcome> + Send + 'a>>;

/// Result of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The endpoint answered with this HTTP status.
    Response {
        /// HTTP status code.
        status: u16,
    },
    /// No response: connection refused, timeout, TLS failure.
    Failed {
        /// Human-readable cause.
        error: String,
    },
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Response { status } => write!(f, "code={status}"),
            ProbeOutcome::Failed { error } => f.write_str(error),
        }
    }
}

/// Checks whether a URL is reachable and what it answers.
pub trait Prober: Send + Sync {
    /// Probes `url` once. Failures are reported in the outcome, never panics.
    fn probe(&self, url: &str) -> ProbeFuture<'_>;
}
