//! Core data types for URL liveness checking.
//!
//! This module defines the main data structures used throughout the library:
//! probe results, progress events, and checker configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default concurrency cap: simultaneous in-flight connections.
pub const DEFAULT_CONCURRENCY: usize = 200;

/// Default per-probe timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default browser-like User-Agent sent on every probe.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// HTTP status codes classified as "working" under the GET whitelist policy.
/// 404 is deliberately absent: a page that answers with Not Found is dead.
pub const DEFAULT_ALIVE_STATUSES: [u16; 5] = [200, 301, 302, 403, 405];

/// Result of a single URL liveness probe.
///
/// Exactly one of these is produced per input URL, whether the probe got a
/// response, timed out, or failed at the transport level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    /// The normalized URL that was probed (scheme prefix applied if the
    /// input had none)
    pub url: String,

    /// Whether the URL is classified as working under the alive-status policy
    pub alive: bool,

    /// Final HTTP status received, if any response arrived at all.
    /// `None` means the request failed before a status was available
    /// (timeout, refused connection, DNS failure, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// How long the probe took to complete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_duration: Option<Duration>,
}

/// Progress notification emitted after each completed probe.
///
/// For a run over N URLs, the emitted sequence of `completed` values is
/// exactly `1, 2, ..., N` regardless of which URL finished at which step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Number of probes completed so far (starts at 1)
    pub completed: usize,

    /// Total number of probes in this run
    pub total: usize,
}

/// Configuration options for URL checking operations.
///
/// This struct allows fine-tuning of probe behavior, including concurrency,
/// timeout, request identity, and the status classification policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Maximum number of concurrent probes
    /// Default: 200, Range: 1-1024
    pub concurrency: usize,

    /// Timeout for each individual probe
    /// Default: 10 seconds
    #[serde(skip)] // Don't serialize Duration directly
    pub timeout: Duration,

    /// User-Agent header sent on every probe
    pub user_agent: String,

    /// HTTP status codes treated as "working".
    /// Applied to the final response status after redirects are followed.
    pub alive_statuses: Vec<u16>,
}

impl Default for CheckConfig {
    /// Create a sensible default configuration.
    ///
    /// The defaults mirror the classic bulk-checker policy: high concurrency,
    /// a generous timeout, and the GET whitelist classification.
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            alive_statuses: DEFAULT_ALIVE_STATUSES.to_vec(),
        }
    }
}

impl CheckConfig {
    /// Create a new configuration with custom concurrency.
    ///
    /// Automatically clamps concurrency to 1-1024 to prevent resource exhaustion.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, 1024);
        self
    }

    /// Set custom per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header sent with every probe.
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replace the set of status codes classified as working.
    pub fn with_alive_statuses(mut self, statuses: Vec<u16>) -> Self {
        self.alive_statuses = statuses;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CheckConfig::default();
        assert_eq!(config.concurrency, 200);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.alive_statuses, vec![200, 301, 302, 403, 405]);
        assert!(!config.alive_statuses.contains(&404));
    }

    #[test]
    fn test_concurrency_is_clamped() {
        let config = CheckConfig::default().with_concurrency(0);
        assert_eq!(config.concurrency, 1);

        let config = CheckConfig::default().with_concurrency(5000);
        assert_eq!(config.concurrency, 1024);
    }

    #[test]
    fn test_builder_methods() {
        let config = CheckConfig::default()
            .with_concurrency(50)
            .with_timeout(Duration::from_secs(3))
            .with_user_agent("url-check-test/1.0")
            .with_alive_statuses(vec![200]);

        assert_eq!(config.concurrency, 50);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "url-check-test/1.0");
        assert_eq!(config.alive_statuses, vec![200]);
    }
}
