//! # URL Check Library
//!
//! A fast, fail-closed library for checking liveness of URLs in bulk over HTTP.
//!
//! This library probes each URL exactly once, under a global concurrency cap,
//! and classifies it as working or non-working based on the final HTTP status.
//! Probes never raise: timeouts, refused connections, TLS failures, and
//! malformed targets all surface as a non-working result, so a started run
//! always finishes with exactly one result per input URL.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use url_check_lib::UrlChecker;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let checker = UrlChecker::new()?;
//!     let urls = vec!["example.com".to_string(), "httpstat.us/404".to_string()];
//!     let results = checker.check_urls(&urls).await;
//!
//!     for result in results {
//!         println!("{} - alive: {}", result.url, result.alive);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Bounded Concurrency**: all probes share one connection pool under a
//!   configurable cap (200 by default)
//! - **Completion-Order Results**: results and progress reflect real elapsed
//!   work, not submission order
//! - **Progress Channel**: one event per completed probe, counts strictly
//!   `1..=total`
//! - **Configurable**: timeout, user agent, and alive-status policy

// Re-export main public API types and functions
// This makes them available as url_check_lib::TypeName
pub use checker::UrlChecker;
pub use config::{
    load_env_config, parse_timeout_string, ConfigManager, DefaultsConfig, EnvConfig, FileConfig,
    OutputConfig,
};
pub use error::UrlCheckError;
pub use types::{CheckConfig, ProbeResult, ProgressEvent};
pub use utils::{normalize_url, sanitize_urls};

// Internal modules - these are not part of the public API
mod checker;
mod config;
mod error;
mod probe;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, UrlCheckError>;

// Library version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
