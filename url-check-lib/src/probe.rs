//! Single-URL liveness probe over HTTP.
//!
//! A probe issues exactly one GET request against one URL and returns a
//! boolean verdict. It is fail-closed by contract: any failure during the
//! request — timeout, refused connection, DNS failure, TLS handshake error,
//! malformed target — yields a non-working result instead of an error, so
//! callers never observe an exception for an unreachable endpoint.

use crate::error::UrlCheckError;
use crate::types::{CheckConfig, ProbeResult};
use crate::utils::normalize_url;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use std::time::Instant;
use tracing::debug;

/// Redirect hops followed before the client gives up on a chain.
const MAX_REDIRECTS: usize = 10;

/// Probe client wrapping the shared HTTP connection pool.
///
/// All probes of a run go through one instance, so the pool and the request
/// headers are constant across the whole run. Certificate validation is
/// disabled: the target corpus contains formerly-valid, expired, and
/// self-signed certificates, and an unverifiable certificate must not be
/// mistaken for a dead endpoint.
#[derive(Clone, Debug)]
pub(crate) struct ProbeClient {
    /// HTTP client for making probe requests
    http_client: reqwest::Client,
    /// Status codes classified as working
    alive_statuses: Vec<u16>,
}

impl ProbeClient {
    /// Create a new probe client from checker configuration.
    ///
    /// # Errors
    ///
    /// Returns `UrlCheckError::Setup` if the HTTP client cannot be built or
    /// the configured User-Agent is not a valid header value. This is the
    /// fatal startup error: no probes have run when it occurs.
    pub fn with_config(config: &CheckConfig) -> Result<Self, UrlCheckError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
            UrlCheckError::setup_with_source(
                format!("Invalid User-Agent '{}'", config.user_agent),
                e.to_string(),
            )
        })?;
        headers.insert(USER_AGENT, user_agent);

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .danger_accept_invalid_certs(true)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                UrlCheckError::setup_with_source(
                    "Failed to create probe HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            alive_statuses: config.alive_statuses.clone(),
        })
    }

    /// Probe a single URL and classify it.
    ///
    /// Issues one GET request against the normalized form of `raw_url`.
    /// The final status after redirect following is matched against the
    /// alive-status set; any transport failure classifies as non-working.
    /// This function never returns an error.
    pub async fn probe(&self, raw_url: &str) -> ProbeResult {
        let url = normalize_url(raw_url);
        let start = Instant::now();

        match self.http_client.get(&url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let alive = self.is_alive(status);
                debug!(url = %url, status, alive, "probe completed");
                ProbeResult {
                    url,
                    alive,
                    status: Some(status),
                    check_duration: Some(start.elapsed()),
                }
            }
            Err(e) => {
                debug!(url = %url, error = %e, "probe failed, classifying as non-working");
                ProbeResult {
                    url,
                    alive: false,
                    status: None,
                    check_duration: Some(start.elapsed()),
                }
            }
        }
    }

    /// Apply the status classification policy.
    fn is_alive(&self, status: u16) -> bool {
        self.alive_statuses.contains(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_client_creation() {
        let client = ProbeClient::with_config(&CheckConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_user_agent_is_setup_error() {
        let config = CheckConfig::default().with_user_agent("bad\nagent");
        let err = ProbeClient::with_config(&config).unwrap_err();
        assert!(err.is_setup());
    }

    #[tokio::test]
    async fn test_classification_whitelist() {
        let client = ProbeClient::with_config(&CheckConfig::default()).unwrap();
        for status in [200, 301, 302, 403, 405] {
            assert!(client.is_alive(status), "status {} should be alive", status);
        }
        for status in [204, 206, 304, 400, 401, 404, 410, 500, 502, 503] {
            assert!(!client.is_alive(status), "status {} should be dead", status);
        }
    }

    #[tokio::test]
    async fn test_custom_classification_policy() {
        let config = CheckConfig::default().with_alive_statuses(vec![200, 204]);
        let client = ProbeClient::with_config(&config).unwrap();
        assert!(client.is_alive(204));
        assert!(!client.is_alive(301));
    }
}
