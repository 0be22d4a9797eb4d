//! Error handling for URL checking operations.
//!
//! Per-URL probe failures are not errors: they surface as non-working results
//! and never reach this module. The error type here covers the remaining
//! failure modes — being unable to set up the network layer at all, and
//! configuration or input-file problems.

use std::fmt;

/// Main error type for URL checking operations.
///
/// The `Setup` variant is the fatal startup error: it means zero probes ran,
/// which callers must distinguish from a run where URLs merely came back
/// non-working.
#[derive(Debug, Clone)]
pub enum UrlCheckError {
    /// The shared HTTP client could not be created (resource exhaustion,
    /// invalid TLS setup, malformed default headers)
    Setup {
        message: String,
        source: Option<String>,
    },

    /// Configuration errors (invalid settings, bad TOML, out-of-range values)
    ConfigError { message: String },

    /// File I/O errors when reading URL lists or config files
    FileError { path: String, message: String },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl UrlCheckError {
    /// Create a new setup error.
    pub fn setup<M: Into<String>>(message: M) -> Self {
        Self::Setup {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new setup error with source information.
    pub fn setup_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::Setup {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error is a fatal setup failure (no probes were launched).
    pub fn is_setup(&self) -> bool {
        matches!(self, Self::Setup { .. })
    }
}

impl fmt::Display for UrlCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup { message, source } => {
                if let Some(source) = source {
                    write!(f, "Setup error: {} (source: {})", message, source)
                } else {
                    write!(f, "Setup error: {}", message)
                }
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for UrlCheckError {}

// Implement From conversions for common error types
impl From<std::io::Error> for UrlCheckError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

impl From<serde_json::Error> for UrlCheckError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("JSON serialization failed: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_error_is_distinct() {
        let err = UrlCheckError::setup("cannot create client");
        assert!(err.is_setup());

        let err = UrlCheckError::config("bad concurrency");
        assert!(!err.is_setup());
    }

    #[test]
    fn test_display_includes_source() {
        let err = UrlCheckError::setup_with_source("client build failed", "tls backend missing");
        let msg = err.to_string();
        assert!(msg.contains("client build failed"));
        assert!(msg.contains("tls backend missing"));
    }

    #[test]
    fn test_file_error_display() {
        let err = UrlCheckError::file_error("urls.csv", "missing column");
        assert_eq!(err.to_string(), "File error at 'urls.csv': missing column");
    }
}
