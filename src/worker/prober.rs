//! Check prober
//!
//! Issues exactly one network request per invocation and folds whatever
//! happens (response, connection failure, or deadline expiry) into a
//! [`ProbeOutcome`]. Probe failures are legitimate outcomes, never errors.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{instrument, trace, warn};

use crate::{Check, HttpMethod, ProbeOutcome};

/// Prober for validated checks
///
/// The reqwest client is reused across probes; the deadline is applied per
/// request from the check's `timeout_seconds`.
pub struct Prober {
    client: reqwest::Client,
}

impl Prober {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Probe one check.
    ///
    /// The request future is raced against the deadline, so exactly one of
    /// the three terminal events resolves the outcome: whichever fires
    /// first wins and the other is dropped. A timeout surfaced by the
    /// transport itself is mapped to the same outcome as deadline expiry.
    #[instrument(skip(self, check), fields(check = %check.id))]
    pub async fn probe(&self, check: &Check) -> ProbeOutcome {
        trace!("probing {}", check.request_url());

        let method = match check.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let deadline = Duration::from_secs(check.timeout_seconds);

        let request = self
            .client
            .request(method, check.request_url())
            .timeout(deadline)
            .send();

        match timeout(deadline, request).await {
            Ok(Ok(response)) => {
                let code = response.status().as_u16();
                trace!("probe answered with status {code}");
                // Status only; the body is irrelevant to classification.
                ProbeOutcome::response(code)
            }
            Ok(Err(err)) if err.is_timeout() => {
                warn!("probe timed out after {}s", check.timeout_seconds);
                ProbeOutcome::timeout()
            }
            Ok(Err(err)) => {
                warn!("probe failed: {err}");
                ProbeOutcome::network_error(err.to_string())
            }
            Err(_elapsed) => {
                warn!("probe timed out after {}s", check.timeout_seconds);
                ProbeOutcome::timeout()
            }
        }
    }
}

impl Default for Prober {
    fn default() -> Self {
        Self::new()
    }
}
