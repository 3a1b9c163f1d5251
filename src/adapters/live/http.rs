//! Live adapter for the `Prober` port issuing HTTP `HEAD` requests.

use std::time::Duration;

use reqwest::Client;

use crate::ports::probe::{ProbeFuture, ProbeOutcome, Prober};

/// Bound on connecting, the TLS handshake and receiving the response head.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Live prober sending one `HEAD` request per probe.
///
/// A fresh client is built for every probe, so connections are never
/// reused between probes. Certificates are not verified.
pub struct HttpProber {
    timeout: Duration,
}

impl HttpProber {
    /// Creates a prober with the default [`PROBE_TIMEOUT`].
    #[must_use]
    pub fn new() -> Self {
        Self { timeout: PROBE_TIMEOUT }
    }

    /// Creates a prober with a custom per-request timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn client(&self) -> reqwest::Result<Client> {
        Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .pool_max_idle_per_host(0)
            .danger_accept_invalid_certs(true)
            .build()
    }
}

impl Default for HttpProber {
    fn default() -> Self {
        Self::new()
    }
}

impl Prober for HttpProber {
    fn probe(&self, url: &str) -> ProbeFuture<'_> {
        let url = url.to_owned();

        Box::pin(async move {
            let client = match self.client() {
                Ok(client) => client,
                Err(e) => return ProbeOutcome::Failed { error: format!("client error: {e}") },
            };

            match client.head(&url).send().await {
                Ok(response) => ProbeOutcome::Response { status: response.status().as_u16() },
                Err(e) => {
                    tracing::debug!(%url, error = %e, "probe failed");
                    ProbeOutcome::Failed { error: e.to_string() }
                }
            }
        })
    }
}
