//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and merging
//! configurations with proper precedence rules. File values sit below
//! `UC_*` environment variables, which sit below explicit CLI arguments;
//! the CLI crate performs the final merge.

use crate::error::UrlCheckError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration loaded from TOML files.
///
/// This represents the structure of configuration files that users can
/// create to set default values for checking runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Output formatting preferences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default concurrency level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Default per-probe timeout (as string, e.g., "10s", "2m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Default User-Agent header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Default CSV column to read URLs from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_column: Option<String>,

    /// Default pretty output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,

    /// Status codes classified as working
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alive_statuses: Option<Vec<u16>>,
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Default output format ("text", "json", "csv")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    /// Default directory for the partitioned CSV files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_dir: Option<String>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to emit warnings for config issues
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// The parsed configuration or an error if parsing fails.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, UrlCheckError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(UrlCheckError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            UrlCheckError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| {
            UrlCheckError::config(format!("Failed to parse TOML configuration: {}", e))
        })?;

        // Validate the loaded configuration
        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// Looks for configuration files in standard locations and merges them
    /// according to precedence rules.
    ///
    /// # Returns
    ///
    /// Merged configuration from all discovered files.
    pub fn discover_and_load(&self) -> Result<FileConfig, UrlCheckError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        // 1. Load XDG config (lowest precedence)
        if let Some(xdg_path) = self.get_xdg_config_path() {
            if let Ok(config) = self.load_file(&xdg_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(xdg_path);
            }
        }

        // 2. Load global config
        if let Some(global_path) = self.get_global_config_path() {
            if let Ok(config) = self.load_file(&global_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(global_path);
            }
        }

        // 3. Load local config (highest precedence)
        if let Some(local_path) = self.get_local_config_path() {
            if let Ok(config) = self.load_file(&local_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(local_path);
            }
        }

        if self.verbose && loaded_files.len() > 1 {
            eprintln!("Multiple config files found. Using precedence:");
            for (i, path) in loaded_files.iter().enumerate() {
                let status = if i == loaded_files.len() - 1 {
                    "active"
                } else {
                    "overridden"
                };
                eprintln!("   {} ({})", path.display(), status);
            }
        }

        Ok(merged_config)
    }

    /// Get the local configuration file path.
    ///
    /// Looks for configuration files in the current directory.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./url-check.toml", "./.url-check.toml"];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Some(path.to_path_buf());
            }
        }

        None
    }

    /// Get the global configuration file path.
    ///
    /// Looks for configuration files in the user's home directory.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        if let Some(home) = env::var_os("HOME") {
            let candidates = [".url-check.toml", "url-check.toml"];

            for candidate in &candidates {
                let path = Path::new(&home).join(candidate);
                if path.exists() {
                    return Some(path);
                }
            }
        }

        None
    }

    /// Get the XDG configuration file path.
    ///
    /// Follows the XDG Base Directory Specification.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("url-check").join("config.toml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Merge two configurations with proper precedence.
    ///
    /// Values from `higher` take precedence over values from `lower`.
    fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(mut lower_defaults), Some(higher_defaults)) => {
                    if higher_defaults.concurrency.is_some() {
                        lower_defaults.concurrency = higher_defaults.concurrency;
                    }
                    if higher_defaults.timeout.is_some() {
                        lower_defaults.timeout = higher_defaults.timeout;
                    }
                    if higher_defaults.user_agent.is_some() {
                        lower_defaults.user_agent = higher_defaults.user_agent;
                    }
                    if higher_defaults.url_column.is_some() {
                        lower_defaults.url_column = higher_defaults.url_column;
                    }
                    if higher_defaults.pretty.is_some() {
                        lower_defaults.pretty = higher_defaults.pretty;
                    }
                    if higher_defaults.alive_statuses.is_some() {
                        lower_defaults.alive_statuses = higher_defaults.alive_statuses;
                    }
                    Some(lower_defaults)
                }
                (None, Some(higher_defaults)) => Some(higher_defaults),
                (Some(lower_defaults), None) => Some(lower_defaults),
                (None, None) => None,
            },
            output: higher.output.or(lower.output),
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), UrlCheckError> {
        if let Some(defaults) = &config.defaults {
            // Validate concurrency
            if let Some(concurrency) = defaults.concurrency {
                if concurrency == 0 || concurrency > 1024 {
                    return Err(UrlCheckError::config(
                        "Concurrency must be between 1 and 1024",
                    ));
                }
            }

            // Validate timeout format
            if let Some(timeout_str) = &defaults.timeout {
                if parse_timeout_string(timeout_str).is_none() {
                    return Err(UrlCheckError::config(format!(
                        "Invalid timeout format '{}'. Use format like '5s', '30s', '2m'",
                        timeout_str
                    )));
                }
            }

            // Validate URL column name
            if let Some(column) = &defaults.url_column {
                if column.trim().is_empty() {
                    return Err(UrlCheckError::config("url_column cannot be empty"));
                }
            }

            // Validate status codes
            if let Some(statuses) = &defaults.alive_statuses {
                if statuses.is_empty() {
                    return Err(UrlCheckError::config("alive_statuses cannot be empty"));
                }
                for status in statuses {
                    if !(100..=599).contains(status) {
                        return Err(UrlCheckError::config(format!(
                            "Invalid HTTP status code {} in alive_statuses",
                            status
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Environment variable configuration that mirrors CLI options.
///
/// This represents configuration values that can be set via UC_* environment
/// variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub concurrency: Option<usize>,
    pub timeout: Option<String>,
    pub user_agent: Option<String>,
    pub url_column: Option<String>,
    pub pretty: Option<bool>,
    pub json: Option<bool>,
    pub csv: Option<bool>,
    pub file: Option<String>,
    pub config: Option<String>,
}

impl EnvConfig {
    /// Check if output format conflicts exist (JSON and CSV both set).
    pub fn has_output_format_conflict(&self) -> bool {
        matches!((self.json, self.csv), (Some(true), Some(true)))
    }
}

/// Parse a boolean-like environment value ("true"/"1"/"yes"/"on").
fn parse_env_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Load configuration from environment variables.
///
/// Parses all UC_* environment variables and returns a structured
/// configuration. Invalid values are logged as warnings and ignored.
///
/// # Arguments
///
/// * `verbose` - Whether to log environment variable usage
///
/// # Returns
///
/// Parsed environment configuration with validated values.
pub fn load_env_config(verbose: bool) -> EnvConfig {
    let mut env_config = EnvConfig::default();

    // UC_CONCURRENCY - concurrent probes
    if let Ok(val) = env::var("UC_CONCURRENCY") {
        match val.parse::<usize>() {
            Ok(concurrency) if concurrency > 0 && concurrency <= 1024 => {
                env_config.concurrency = Some(concurrency);
                if verbose {
                    eprintln!("Using UC_CONCURRENCY={}", concurrency);
                }
            }
            _ => {
                if verbose {
                    eprintln!("Invalid UC_CONCURRENCY='{}', must be 1-1024", val);
                }
            }
        }
    }

    // UC_TIMEOUT - per-probe timeout
    if let Ok(timeout_str) = env::var("UC_TIMEOUT") {
        if parse_timeout_string(&timeout_str).is_some() {
            env_config.timeout = Some(timeout_str.clone());
            if verbose {
                eprintln!("Using UC_TIMEOUT={}", timeout_str);
            }
        } else if verbose {
            eprintln!(
                "Invalid UC_TIMEOUT='{}', use format like '5s', '30s', '2m'",
                timeout_str
            );
        }
    }

    // UC_USER_AGENT - User-Agent header
    if let Ok(user_agent) = env::var("UC_USER_AGENT") {
        if !user_agent.trim().is_empty() {
            env_config.user_agent = Some(user_agent.clone());
            if verbose {
                eprintln!("Using UC_USER_AGENT={}", user_agent);
            }
        }
    }

    // UC_URL_COLUMN - CSV column with URLs
    if let Ok(column) = env::var("UC_URL_COLUMN") {
        if !column.trim().is_empty() {
            env_config.url_column = Some(column.clone());
            if verbose {
                eprintln!("Using UC_URL_COLUMN={}", column);
            }
        }
    }

    // UC_PRETTY - enable pretty output
    if let Ok(val) = env::var("UC_PRETTY") {
        match parse_env_bool(&val) {
            Some(pretty) => {
                env_config.pretty = Some(pretty);
                if verbose {
                    eprintln!("Using UC_PRETTY={}", pretty);
                }
            }
            None => {
                if verbose {
                    eprintln!("Invalid UC_PRETTY='{}', use true/false", val);
                }
            }
        }
    }

    // UC_JSON - enable JSON output
    if let Ok(val) = env::var("UC_JSON") {
        match parse_env_bool(&val) {
            Some(json) => {
                env_config.json = Some(json);
                if verbose {
                    eprintln!("Using UC_JSON={}", json);
                }
            }
            None => {
                if verbose {
                    eprintln!("Invalid UC_JSON='{}', use true/false", val);
                }
            }
        }
    }

    // UC_CSV - enable CSV output
    if let Ok(val) = env::var("UC_CSV") {
        match parse_env_bool(&val) {
            Some(csv) => {
                env_config.csv = Some(csv);
                if verbose {
                    eprintln!("Using UC_CSV={}", csv);
                }
            }
            None => {
                if verbose {
                    eprintln!("Invalid UC_CSV='{}', use true/false", val);
                }
            }
        }
    }

    // UC_FILE - default input file
    if let Ok(file_path) = env::var("UC_FILE") {
        if !file_path.trim().is_empty() {
            env_config.file = Some(file_path.clone());
            if verbose {
                eprintln!("Using UC_FILE={}", file_path);
            }
        }
    }

    // UC_CONFIG - default config file
    if let Ok(config_path) = env::var("UC_CONFIG") {
        if !config_path.trim().is_empty() {
            env_config.config = Some(config_path.clone());
            if verbose {
                eprintln!("Using UC_CONFIG={}", config_path);
            }
        }
    }

    env_config
}

/// Parse a timeout string like "5s", "30s", "2m" into seconds.
///
/// # Arguments
///
/// * `timeout_str` - String representation of timeout
///
/// # Returns
///
/// Number of seconds, or None if parsing fails.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    if timeout_str.ends_with('s') {
        timeout_str
            .strip_suffix('s')
            .and_then(|s| s.parse::<u64>().ok())
    } else if timeout_str.ends_with('m') {
        timeout_str
            .strip_suffix('m')
            .and_then(|s| s.parse::<u64>().ok())
            .map(|m| m * 60)
    } else {
        // Assume seconds if no unit
        timeout_str.parse::<u64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_timeout_string() {
        assert_eq!(parse_timeout_string("5s"), Some(5));
        assert_eq!(parse_timeout_string("30s"), Some(30));
        assert_eq!(parse_timeout_string("2m"), Some(120));
        assert_eq!(parse_timeout_string("10"), Some(10));
        assert_eq!(parse_timeout_string("invalid"), None);
        assert_eq!(parse_timeout_string(""), None);
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[defaults]
concurrency = 50
timeout = "5s"
url_column = "link"
pretty = true
alive_statuses = [200, 301, 302]

[output]
default_format = "csv"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let manager = ConfigManager::new(false);
        let config = manager.load_file(temp_file.path()).unwrap();

        let defaults = config.defaults.unwrap();
        assert_eq!(defaults.concurrency, Some(50));
        assert_eq!(defaults.timeout, Some("5s".to_string()));
        assert_eq!(defaults.url_column, Some("link".to_string()));
        assert_eq!(defaults.pretty, Some(true));
        assert_eq!(defaults.alive_statuses, Some(vec![200, 301, 302]));

        let output = config.output.unwrap();
        assert_eq!(output.default_format, Some("csv".to_string()));
    }

    #[test]
    fn test_invalid_concurrency() {
        let config_content = r#"
[defaults]
concurrency = 0
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let manager = ConfigManager::new(false);
        let result = manager.load_file(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_alive_status() {
        let config_content = r#"
[defaults]
alive_statuses = [200, 99]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let manager = ConfigManager::new(false);
        let result = manager.load_file(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let manager = ConfigManager::new(false);
        let result = manager.load_file("/nonexistent/url-check.toml");
        assert!(matches!(result, Err(UrlCheckError::FileError { .. })));
    }

    #[test]
    fn test_merge_configs() {
        let manager = ConfigManager::new(false);

        let lower = FileConfig {
            defaults: Some(DefaultsConfig {
                concurrency: Some(10),
                timeout: Some("5s".to_string()),
                pretty: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        };

        let higher = FileConfig {
            defaults: Some(DefaultsConfig {
                concurrency: Some(25),
                pretty: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = manager.merge_configs(lower, higher);
        let defaults = merged.defaults.unwrap();

        assert_eq!(defaults.concurrency, Some(25)); // Higher wins
        assert_eq!(defaults.timeout, Some("5s".to_string())); // Lower preserved
        assert_eq!(defaults.pretty, Some(true)); // Higher wins
    }

    #[test]
    fn test_parse_env_bool() {
        assert_eq!(parse_env_bool("true"), Some(true));
        assert_eq!(parse_env_bool("1"), Some(true));
        assert_eq!(parse_env_bool("ON"), Some(true));
        assert_eq!(parse_env_bool("false"), Some(false));
        assert_eq!(parse_env_bool("0"), Some(false));
        assert_eq!(parse_env_bool("maybe"), None);
    }
}
