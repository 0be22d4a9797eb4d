//! Main URL checker implementation.
//!
//! This module provides the primary `UrlChecker` struct that orchestrates
//! many concurrent probes under a global concurrency cap and surfaces
//! incremental progress as results complete.

use crate::error::UrlCheckError;
use crate::probe::ProbeClient;
use crate::types::{CheckConfig, ProbeResult, ProgressEvent};
use crate::utils::sanitize_urls;
use futures::stream::{self, Stream, StreamExt};
use std::pin::Pin;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Main URL checker that coordinates liveness probing operations.
///
/// The `UrlChecker` handles all aspects of a bulk check:
/// - Concurrent dispatch under the configured cap
/// - Completion-order result collection
/// - Progress emission after every completed probe
///
/// Once constructed, a checker cannot fail: probes swallow their own
/// failures, so every `check_*` method runs to completion and returns
/// exactly one result per (non-empty) input URL. The only fallible step is
/// construction, where the shared HTTP client is built.
///
/// # Example
///
/// ```rust,no_run
/// use url_check_lib::UrlChecker;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let checker = UrlChecker::new()?;
///     let result = checker.check_url("example.com").await;
///     println!("alive: {}", result.alive);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct UrlChecker {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// Shared probe client (HTTP connection pool and classification policy)
    probe_client: ProbeClient,
}

impl UrlChecker {
    /// Create a new URL checker with default configuration.
    ///
    /// Default settings:
    /// - Concurrency: 200
    /// - Timeout: 10 seconds per probe
    /// - Alive statuses: 200, 301, 302, 403, 405
    ///
    /// # Errors
    ///
    /// Returns `UrlCheckError::Setup` if the network layer cannot be
    /// launched at all. This is distinct from any per-URL failure: it means
    /// zero probes ran.
    pub fn new() -> Result<Self, UrlCheckError> {
        Self::with_config(CheckConfig::default())
    }

    /// Create a new URL checker with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use url_check_lib::{CheckConfig, UrlChecker};
    /// use std::time::Duration;
    ///
    /// let config = CheckConfig::default()
    ///     .with_concurrency(50)
    ///     .with_timeout(Duration::from_secs(5));
    ///
    /// let checker = UrlChecker::with_config(config).unwrap();
    /// ```
    pub fn with_config(config: CheckConfig) -> Result<Self, UrlCheckError> {
        let probe_client = ProbeClient::with_config(&config)?;
        Ok(Self {
            config,
            probe_client,
        })
    }

    /// Check liveness of a single URL.
    ///
    /// The URL is normalized (scheme prefix applied if missing), probed
    /// once, and classified. Never fails: unreachable or erroring endpoints
    /// come back as `alive: false`.
    pub async fn check_url(&self, url: &str) -> ProbeResult {
        self.probe_client.probe(url).await
    }

    /// Check liveness of multiple URLs concurrently.
    ///
    /// All URLs are submitted for probing under the concurrency cap and
    /// results are collected as probes complete. The returned vector is in
    /// **completion order**, which depends on network latency, not on the
    /// input order — callers must not rely on positional correspondence.
    ///
    /// Empty and whitespace-only entries are dropped; every surviving input
    /// URL contributes exactly one result.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use url_check_lib::UrlChecker;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let checker = UrlChecker::new()?;
    ///     let urls = vec!["example.com".to_string(), "bad.invalid".to_string()];
    ///     let results = checker.check_urls(&urls).await;
    ///     assert_eq!(results.len(), 2);
    ///     Ok(())
    /// }
    /// ```
    pub async fn check_urls(&self, urls: &[String]) -> Vec<ProbeResult> {
        let targets = sanitize_urls(urls);
        let total = targets.len();
        let mut results = Vec::with_capacity(total);

        let mut stream = self.probe_stream(targets);
        while let Some(result) = stream.next().await {
            results.push(result);
        }
        results
    }

    /// Check multiple URLs, emitting a progress event per completion.
    ///
    /// Behaves like [`check_urls`](Self::check_urls), additionally sending
    /// one `ProgressEvent` on `progress` after each completed probe. The
    /// emitted `completed` values are exactly `1, 2, ..., total` with no
    /// gaps, duplicates, or reordering, regardless of which URL finished at
    /// which step: counting happens in the single collection loop, not in
    /// the probes.
    ///
    /// A dropped receiver does not abort the run; progress is best-effort.
    /// An empty (or all-blank) input list returns an empty result set and
    /// emits no events.
    pub async fn check_urls_with_progress(
        &self,
        urls: &[String],
        progress: &UnboundedSender<ProgressEvent>,
    ) -> Vec<ProbeResult> {
        let targets = sanitize_urls(urls);
        let total = targets.len();
        if total == 0 {
            return Vec::new();
        }

        let mut results = Vec::with_capacity(total);
        let mut completed = 0usize;

        let mut stream = self.probe_stream(targets);
        while let Some(result) = stream.next().await {
            completed += 1;
            let _ = progress.send(ProgressEvent { completed, total });
            results.push(result);
        }
        results
    }

    /// Check URLs and yield results as a stream, in completion order.
    ///
    /// This is the streaming variant for callers that want to render each
    /// result the moment it lands instead of waiting for the full set.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use futures::StreamExt;
    /// use url_check_lib::UrlChecker;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let checker = UrlChecker::new()?;
    ///     let urls = vec!["example.com".to_string(), "test.org".to_string()];
    ///
    ///     let mut stream = checker.check_urls_stream(&urls);
    ///     while let Some(result) = stream.next().await {
    ///         println!("{} - alive: {}", result.url, result.alive);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub fn check_urls_stream<'a>(
        &'a self,
        urls: &[String],
    ) -> Pin<Box<dyn Stream<Item = ProbeResult> + Send + 'a>> {
        self.probe_stream(sanitize_urls(urls))
    }

    /// Build the capped completion-order stream over sanitized targets.
    ///
    /// The cap is enforced here: at most `concurrency` probe futures are in
    /// flight at any moment, across the whole run rather than per batch.
    fn probe_stream(
        &self,
        targets: Vec<String>,
    ) -> Pin<Box<dyn Stream<Item = ProbeResult> + Send + '_>> {
        let cap = self.config.concurrency.max(1);
        debug!(total = targets.len(), cap, "dispatching probes");

        Box::pin(
            stream::iter(targets)
                .map(move |url| async move { self.probe_client.probe(&url).await })
                .buffer_unordered(cap),
        )
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Update the configuration for this checker.
    ///
    /// Recreates the internal probe client with the new settings.
    ///
    /// # Errors
    ///
    /// Returns `UrlCheckError::Setup` if the new client cannot be built;
    /// the existing configuration stays in place in that case.
    pub fn set_config(&mut self, config: CheckConfig) -> Result<(), UrlCheckError> {
        self.probe_client = ProbeClient::with_config(&config)?;
        self.config = config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_checker_creation() {
        let checker = UrlChecker::new();
        assert!(checker.is_ok());
    }

    #[tokio::test]
    async fn test_empty_input_returns_empty_results() {
        let checker = UrlChecker::new().unwrap();
        let results = checker.check_urls(&[]).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_empty_input_emits_no_progress() {
        let checker = UrlChecker::new().unwrap();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        let results = checker.check_urls_with_progress(&[], &tx).await;
        drop(tx);

        assert!(results.is_empty());
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_set_config_replaces_settings() {
        let mut checker = UrlChecker::new().unwrap();
        let config = CheckConfig::default().with_concurrency(5);
        checker.set_config(config).unwrap();
        assert_eq!(checker.config().concurrency, 5);
    }
}
