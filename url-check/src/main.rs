//! URL Check CLI Application
//!
//! A command-line interface for bulk URL liveness checking. Loads URLs from
//! arguments, plain text files, or CSV files, probes them concurrently via
//! url-check-lib, and partitions them into working and non-working sets.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use std::path::Path;
use std::process;
use std::time::{Duration, Instant};
use url_check_lib::{
    load_env_config, parse_timeout_string, sanitize_urls, CheckConfig, ConfigManager, FileConfig,
    ProbeResult, UrlChecker,
};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for url-check
#[derive(Parser, Debug)]
#[command(name = "url-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check liveness of URLs in bulk and partition them into working and non-working sets")]
#[command(
    long_about = "Check liveness of URLs in bulk over HTTP.\n\nEach URL is probed exactly once under a global concurrency cap; unreachable or erroring endpoints land in the non-working partition instead of failing the run."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// URLs to check (scheme optional, http:// is assumed)
    #[arg(value_name = "URLS", help_heading = "Input")]
    pub urls: Vec<String>,

    /// Input file with URLs (CSV with a URL column, or one URL per line)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help_heading = "Input"
    )]
    pub file: Option<String>,

    /// CSV column to read URLs from (default: url)
    #[arg(long = "column", value_name = "NAME", help_heading = "Input")]
    pub column: Option<String>,

    /// Preview the parsed URL list without probing
    #[arg(long = "dry-run", help_heading = "Input")]
    pub dry_run: bool,

    /// Max concurrent probes (default: 200, max: 1024)
    #[arg(
        short = 'c',
        long = "concurrency",
        default_value = "200",
        help_heading = "Performance"
    )]
    pub concurrency: usize,

    /// Per-probe timeout like 10s or 2m (default: 10s)
    #[arg(
        short = 't',
        long = "timeout",
        value_name = "DURATION",
        help_heading = "Performance"
    )]
    pub timeout: Option<String>,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Output results in CSV format
    #[arg(long = "csv", help_heading = "Output Format")]
    pub csv: bool,

    /// Enable grouped, structured output with section headers
    #[arg(short = 'p', long = "pretty", help_heading = "Output Format")]
    pub pretty: bool,

    /// Collect all results before displaying
    #[arg(long = "batch", help_heading = "Output Format")]
    pub batch: bool,

    /// Show results as they complete
    #[arg(long = "streaming", help_heading = "Output Format")]
    pub streaming: bool,

    /// Write working_urls.csv and nonworking_urls.csv into DIR
    #[arg(long = "save", value_name = "DIR", help_heading = "Output Format")]
    pub save: Option<String>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Show per-result status codes and durations
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging(args.verbose);

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // Run the URL checking
    if let Err(e) = run_url_check(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Initialize tracing output on stderr.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` raises the default level.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_filter = if verbose {
        "url_check=debug,url_check_lib=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    // Must have either URLs, a file, or UC_FILE
    if args.urls.is_empty() && args.file.is_none() && std::env::var("UC_FILE").is_err() {
        return Err("You must specify URLs or a file with --file".to_string());
    }

    // Can't have conflicting output modes
    if args.batch && args.streaming {
        return Err("Cannot specify both --batch and --streaming modes".to_string());
    }

    // Can't have multiple output formats
    let output_formats = [args.json, args.csv].iter().filter(|&&x| x).count();
    if output_formats > 1 {
        return Err("Cannot specify multiple output formats (--json, --csv)".to_string());
    }

    // Streaming mode doesn't support structured output formats
    if args.streaming && (args.json || args.csv) {
        return Err(
            "Cannot use --streaming with --json or --csv. Use --batch for structured output"
                .to_string(),
        );
    }

    // Validate concurrency
    if args.concurrency == 0 || args.concurrency > 1024 {
        return Err("Concurrency must be between 1 and 1024".to_string());
    }

    Ok(())
}

/// Main URL checking logic
async fn run_url_check(mut args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Build configuration from config files, environment, and CLI args
    let config = build_config(&args)?;

    // Propagate resolved pretty preference back to args for display logic
    if !args.pretty {
        args.pretty = resolve_pretty_default(&args);
    }

    // Determine URLs to check
    let column = resolve_url_column(&args);
    let urls = get_urls_to_check(&args, &column)?;

    // Dry-run: print URLs and exit without checking
    if args.dry_run {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&urls)?);
        } else {
            for url in &urls {
                println!("{}", url);
            }
        }
        eprintln!("{} URLs would be checked", urls.len());
        return Ok(());
    }

    // Create the checker; a failure here is the fatal setup error
    let checker = UrlChecker::with_config(config)?;

    // Decide on processing mode based on URL count and user preferences
    let results = if should_use_streaming(&args, urls.len()) {
        run_streaming_check(&checker, &urls, &args).await
    } else {
        run_batch_check(&checker, &urls, &args).await?
    };

    // Write the partitioned CSV files if requested
    if let Some(dir) = &args.save {
        save_partitions(&results, dir)?;
    }

    Ok(())
}

/// Determine whether to use streaming or batch mode
fn should_use_streaming(args: &Args, url_count: usize) -> bool {
    // Force batch mode if explicitly requested
    if args.batch {
        return false;
    }

    // Force streaming mode if explicitly requested
    if args.streaming {
        return true;
    }

    // Use streaming for multiple URLs unless in JSON/CSV mode
    if url_count > 1 && !args.json && !args.csv {
        return true;
    }

    // Default to batch mode for single URLs or structured output
    false
}

/// Run the check in streaming mode, printing each result as it completes.
async fn run_streaming_check(checker: &UrlChecker, urls: &[String], args: &Args) -> Vec<ProbeResult> {
    use futures::StreamExt;

    if args.pretty {
        ui::print_header(
            urls.len(),
            checker.config().concurrency,
            checker.config().timeout,
        );
    }

    let total = urls.len();
    let mut completed = 0usize;
    let mut results = Vec::with_capacity(total);
    let start_time = Instant::now();

    let mut stream = checker.check_urls_stream(urls);
    while let Some(result) = stream.next().await {
        completed += 1;
        let counter = if total > 1 {
            Some((completed, total))
        } else {
            None
        };
        if args.pretty {
            ui::print_result(&result, args.debug, counter);
        } else {
            ui::print_result_default(&result, args.debug, counter);
        }
        results.push(result);
    }

    if total > 1 {
        let working = results.iter().filter(|r| r.alive).count();
        println!();
        ui::print_summary(
            results.len(),
            working,
            results.len() - working,
            start_time.elapsed(),
        );
    }

    results
}

/// Run the check in batch mode with a progress bar, then display everything.
async fn run_batch_check(
    checker: &UrlChecker,
    urls: &[String],
    args: &Args,
) -> Result<Vec<ProbeResult>, Box<dyn std::error::Error>> {
    let is_structured = args.json || args.csv;

    if args.pretty && !is_structured && urls.len() > 1 {
        ui::print_header(
            urls.len(),
            checker.config().concurrency,
            checker.config().timeout,
        );
    }

    let start_time = Instant::now();

    // Progress bar on stderr while probes run (TTY only, text modes only).
    // Without a bar there is no progress consumer, so the plain API is used.
    let progress = if is_structured {
        None
    } else {
        ui::ProgressBar::start(urls.len())
    };

    let results = match progress {
        Some(bar) => {
            let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
            let render = tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    bar.update(event);
                }
                bar.finish();
            });
            let results = checker.check_urls_with_progress(urls, &tx).await;
            drop(tx);
            let _ = render.await;
            results
        }
        None => checker.check_urls(urls).await,
    };

    let duration = start_time.elapsed();

    // Display results based on format
    display_results(&results, args, duration)?;

    Ok(results)
}

/// Build CheckConfig from CLI arguments with config file integration.
///
/// Precedence order (highest to lowest):
/// 1. CLI arguments (explicit user input)
/// 2. Environment variables (UC_*)
/// 3. Local config file (./url-check.toml or ./.url-check.toml)
/// 4. Global config file (~/.url-check.toml)
/// 5. XDG config file (~/.config/url-check/config.toml)
/// 6. Built-in defaults
fn build_config(args: &Args) -> Result<CheckConfig, Box<dyn std::error::Error>> {
    let mut config = CheckConfig::default();

    // Step 1: Load config files
    if let Some(file_config) = load_file_config(args)? {
        config = merge_file_config_into_check_config(config, file_config);
    }

    // Step 2: Apply environment variables (UC_*)
    config = apply_environment_config(config, args.verbose);

    // Step 3: Apply CLI arguments (highest precedence)
    config = apply_cli_args_to_config(config, args)?;

    Ok(config)
}

/// Load the file config, honoring --config and UC_CONFIG before discovery.
///
/// An explicitly named config file that fails to load is a hard error;
/// discovery failures fall back to defaults silently.
fn load_file_config(args: &Args) -> Result<Option<FileConfig>, Box<dyn std::error::Error>> {
    let config_manager = ConfigManager::new(args.verbose);

    if let Some(explicit_config_path) = &args.config {
        if args.verbose {
            eprintln!(
                "Using explicit config file (CLI --config): {}",
                explicit_config_path
            );
        }
        let file_config = config_manager.load_file(explicit_config_path).map_err(|e| {
            format!(
                "Failed to load config file '{}': {}",
                explicit_config_path, e
            )
        })?;
        return Ok(Some(file_config));
    }

    if let Ok(env_config_path) = std::env::var("UC_CONFIG") {
        if args.verbose {
            eprintln!(
                "Using explicit config file (UC_CONFIG env var): {}",
                env_config_path
            );
        }
        let file_config = config_manager
            .load_file(&env_config_path)
            .map_err(|e| format!("Failed to load config file '{}': {}", env_config_path, e))?;
        return Ok(Some(file_config));
    }

    match config_manager.discover_and_load() {
        Ok(file_config) => Ok(Some(file_config)),
        Err(e) => {
            if args.verbose {
                eprintln!("Config discovery warning: {}", e);
            }
            Ok(None)
        }
    }
}

/// Merge FileConfig into CheckConfig
fn merge_file_config_into_check_config(
    mut config: CheckConfig,
    file_config: FileConfig,
) -> CheckConfig {
    if let Some(defaults) = file_config.defaults {
        if let Some(concurrency) = defaults.concurrency {
            config = config.with_concurrency(concurrency);
        }
        if let Some(timeout_str) = defaults.timeout {
            if let Some(timeout_secs) = parse_timeout_string(&timeout_str) {
                config = config.with_timeout(Duration::from_secs(timeout_secs));
            }
        }
        if let Some(user_agent) = defaults.user_agent {
            config = config.with_user_agent(user_agent);
        }
        if let Some(statuses) = defaults.alive_statuses {
            config = config.with_alive_statuses(statuses);
        }
    }

    config
}

/// Apply environment variables to config with UC_* support.
///
/// Uses the library's load_env_config() for validation and proper handling.
fn apply_environment_config(mut config: CheckConfig, verbose: bool) -> CheckConfig {
    let env_config = load_env_config(verbose);

    if env_config.has_output_format_conflict() && verbose {
        eprintln!("Both UC_JSON and UC_CSV are set to true, CLI args will resolve conflict");
    }

    if let Some(concurrency) = env_config.concurrency {
        config = config.with_concurrency(concurrency);
    }

    if let Some(timeout_str) = &env_config.timeout {
        if let Some(timeout_secs) = parse_timeout_string(timeout_str) {
            config = config.with_timeout(Duration::from_secs(timeout_secs));
        }
    }

    if let Some(user_agent) = env_config.user_agent {
        config = config.with_user_agent(user_agent);
    }

    config
}

/// Apply CLI arguments to config (highest precedence).
///
/// CLI args override both environment variables and config file settings.
fn apply_cli_args_to_config(
    mut config: CheckConfig,
    args: &Args,
) -> Result<CheckConfig, Box<dyn std::error::Error>> {
    // Only override concurrency when it differs from the clap default, so
    // config/env values survive when the flag was not passed
    if args.concurrency != 200 {
        config = config.with_concurrency(args.concurrency);
    }

    if let Some(timeout_str) = &args.timeout {
        let timeout_secs = parse_timeout_string(timeout_str).ok_or_else(|| {
            format!(
                "Invalid timeout '{}'. Use format like '5s', '30s', '2m'",
                timeout_str
            )
        })?;
        config = config.with_timeout(Duration::from_secs(timeout_secs));
    }

    Ok(config)
}

/// Resolve the pretty-output preference: UC_PRETTY, then config file.
fn resolve_pretty_default(args: &Args) -> bool {
    let env_config = load_env_config(false);
    if let Some(pretty) = env_config.pretty {
        return pretty;
    }

    if let Ok(Some(file_config)) = load_file_config(args) {
        if let Some(pretty) = file_config.defaults.and_then(|d| d.pretty) {
            return pretty;
        }
    }

    false
}

/// Resolve the CSV column name: CLI > UC_URL_COLUMN > config file > "url"
fn resolve_url_column(args: &Args) -> String {
    if let Some(column) = &args.column {
        return column.clone();
    }

    let env_config = load_env_config(false);
    if let Some(column) = env_config.url_column {
        return column;
    }

    if let Ok(Some(file_config)) = load_file_config(args) {
        if let Some(column) = file_config.defaults.and_then(|d| d.url_column) {
            return column;
        }
    }

    "url".to_string()
}

/// Get the list of URLs to check from CLI args, environment, or file
fn get_urls_to_check(args: &Args, column: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut urls = Vec::new();

    // Step 1: Collect positional URLs
    urls.extend(args.urls.clone());

    // Step 2: Read from file (CLI --file beats UC_FILE)
    let file_path = args
        .file
        .clone()
        .or_else(|| load_env_config(false).file);

    if let Some(path) = file_path {
        if args.verbose {
            eprintln!("Reading URLs from file: {}", path);
        }
        let file_urls = if is_delimited_file(&path) {
            read_urls_from_delimited(&path, column)?
        } else {
            read_urls_from_lines(&path)?
        };
        urls.extend(file_urls);
    }

    // Step 3: Drop empty entries so the one-result-per-URL invariant is
    // stated over what actually gets probed
    let urls = sanitize_urls(&urls);

    if urls.is_empty() {
        return Err("No URLs found to check".into());
    }

    Ok(urls)
}

/// Check whether a file should be parsed as delimited (CSV/TSV) input.
fn is_delimited_file(path: &str) -> bool {
    let lower = path.to_lowercase();
    lower.ends_with(".csv") || lower.ends_with(".tsv")
}

/// Read URLs from a plain text file, one per line.
///
/// Lines starting with '#' are comments. No inline comment stripping: URLs
/// may legitimately contain '#' fragments.
fn read_urls_from_lines(file_path: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {}", file_path).into());
    }

    let content = std::fs::read_to_string(path)?;
    let urls = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect();

    Ok(urls)
}

/// Read URLs from a CSV/TSV file using the named header column.
///
/// The first row is the header; a missing URL column is a user-facing error.
/// Blank cells are skipped.
fn read_urls_from_delimited(
    file_path: &str,
    column: &str,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {}", file_path).into());
    }

    let delimiter = if file_path.to_lowercase().ends_with(".tsv") {
        '\t'
    } else {
        ','
    };

    let content = std::fs::read_to_string(path)?;
    let mut lines = content.lines();

    let header = lines
        .next()
        .ok_or_else(|| format!("File is empty: {}", file_path))?;
    let header_fields = split_record(header, delimiter);
    let column_index = header_fields
        .iter()
        .position(|field| field.trim().eq_ignore_ascii_case(column))
        .ok_or_else(|| format!("The file must contain a column named '{}'", column))?;

    let mut urls = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(cell) = split_record(line, delimiter).get(column_index) {
            let cell = cell.trim();
            if !cell.is_empty() {
                urls.push(cell.to_string());
            }
        }
    }

    Ok(urls)
}

/// Split one delimited record into fields, honoring double-quote quoting.
fn split_record(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == '"' && field.is_empty() {
            in_quotes = true;
        } else if c == delimiter {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(c);
        }
    }
    fields.push(field);

    fields
}

/// Escape a field for CSV output.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn display_results(
    results: &[ProbeResult],
    args: &Args,
    duration: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.json {
        display_json_results(results)?;
    } else if args.csv {
        display_csv_results(results);
    } else {
        display_text_results(results, args, duration);
    }

    Ok(())
}

/// Display results in JSON format
fn display_json_results(results: &[ProbeResult]) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(results)?;
    println!("{}", json);
    Ok(())
}

/// Display results in CSV format
fn display_csv_results(results: &[ProbeResult]) {
    println!("url,alive,status");

    for result in results {
        let status = result
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{},{},{}", csv_escape(&result.url), result.alive, status);
    }
}

/// Display results in human-readable text format
fn display_text_results(results: &[ProbeResult], args: &Args, duration: Duration) {
    if args.pretty {
        // Pretty mode: grouped layout with section headers
        ui::print_grouped_results(results, args.debug);
    } else {
        // Default mode: colored flat list
        for result in results {
            ui::print_result_default(result, args.debug, None);
        }
    }

    // Shared summary for both modes
    if results.len() > 1 {
        let working = results.iter().filter(|r| r.alive).count();
        println!();
        ui::print_summary(results.len(), working, results.len() - working, duration);
    }
}

/// Write the working/non-working partition files into `dir`.
///
/// Each file is a single-column CSV with a `url` header, ready for re-import.
fn save_partitions(results: &[ProbeResult], dir: &str) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;

    let working: Vec<&str> = results
        .iter()
        .filter(|r| r.alive)
        .map(|r| r.url.as_str())
        .collect();
    let nonworking: Vec<&str> = results
        .iter()
        .filter(|r| !r.alive)
        .map(|r| r.url.as_str())
        .collect();

    let write_partition = |name: &str, urls: &[&str]| -> std::io::Result<std::path::PathBuf> {
        let path = Path::new(dir).join(name);
        let mut content = String::from("url\n");
        for url in urls {
            content.push_str(&csv_escape(url));
            content.push('\n');
        }
        std::fs::write(&path, content)?;
        Ok(path)
    };

    let working_path = write_partition("working_urls.csv", &working)?;
    let nonworking_path = write_partition("nonworking_urls.csv", &nonworking)?;

    eprintln!(
        "Saved {} working URLs to {}",
        working.len(),
        working_path.display()
    );
    eprintln!(
        "Saved {} non-working URLs to {}",
        nonworking.len(),
        nonworking_path.display()
    );

    Ok(())
}

// url-check/src/main.rs tests module

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // Helper function with all required fields
    fn create_test_args() -> Args {
        Args {
            urls: vec!["example.com".to_string()],
            file: None,
            column: None,
            dry_run: false,
            concurrency: 200,
            timeout: None,
            json: false,
            csv: false,
            pretty: false,
            batch: false,
            streaming: false,
            save: None,
            config: None,
            debug: false,
            verbose: false,
        }
    }

    #[test]
    fn test_validate_args_requires_input() {
        let mut args = create_test_args();
        args.urls = vec![];

        // Only valid when UC_FILE happens to be set in the environment
        if std::env::var("UC_FILE").is_err() {
            assert!(validate_args(&args).is_err());
        }
    }

    #[test]
    fn test_validate_args_batch_streaming_conflict() {
        let mut args = create_test_args();
        args.batch = true;
        args.streaming = true;

        let result = validate_args(&args);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("--batch"));
    }

    #[test]
    fn test_validate_args_json_csv_conflict() {
        let mut args = create_test_args();
        args.json = true;
        args.csv = true;

        let result = validate_args(&args);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .contains("multiple output formats"));
    }

    #[test]
    fn test_validate_args_streaming_with_json_rejected() {
        let mut args = create_test_args();
        args.streaming = true;
        args.json = true;

        let result = validate_args(&args);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("--streaming"));
    }

    #[test]
    fn test_validate_args_concurrency_range() {
        let mut args = create_test_args();
        args.concurrency = 0;
        assert!(validate_args(&args).is_err());

        args.concurrency = 2000;
        assert!(validate_args(&args).is_err());

        args.concurrency = 200;
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_should_use_streaming_modes() {
        let mut args = create_test_args();

        // Multiple URLs default to streaming
        assert!(should_use_streaming(&args, 5));

        // Single URL defaults to batch
        assert!(!should_use_streaming(&args, 1));

        // Structured output forces batch
        args.json = true;
        assert!(!should_use_streaming(&args, 5));

        // Explicit flags win
        args.json = false;
        args.batch = true;
        assert!(!should_use_streaming(&args, 5));

        args.batch = false;
        args.streaming = true;
        assert!(should_use_streaming(&args, 1));
    }

    #[test]
    fn test_cli_timeout_overrides_config() {
        let mut args = create_test_args();
        args.timeout = Some("3s".to_string());

        let config = apply_cli_args_to_config(CheckConfig::default(), &args).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_cli_invalid_timeout_is_rejected() {
        let mut args = create_test_args();
        args.timeout = Some("soon".to_string());

        assert!(apply_cli_args_to_config(CheckConfig::default(), &args).is_err());
    }

    #[test]
    fn test_default_concurrency_preserves_config_value() {
        // args.concurrency == 200 is the clap default: a config value of 50
        // must survive
        let args = create_test_args();
        let config = CheckConfig::default().with_concurrency(50);

        let result = apply_cli_args_to_config(config, &args).unwrap();
        assert_eq!(result.concurrency, 50);
    }

    #[test]
    fn test_split_record_plain() {
        assert_eq!(
            split_record("a,b,c", ','),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_split_record_quoted_delimiter() {
        assert_eq!(
            split_record("\"a,b\",c", ','),
            vec!["a,b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_split_record_escaped_quotes() {
        assert_eq!(
            split_record("\"say \"\"hi\"\"\",x", ','),
            vec!["say \"hi\"".to_string(), "x".to_string()]
        );
    }

    #[test]
    fn test_split_record_trailing_empty_field() {
        assert_eq!(
            split_record("a,", ','),
            vec!["a".to_string(), String::new()]
        );
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("has,comma"), "\"has,comma\"");
        assert_eq!(csv_escape("has\"quote"), "\"has\"\"quote\"");
    }

    #[test]
    fn test_read_urls_from_delimited_extracts_column() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "name,url,notes").unwrap();
        writeln!(file, "first,example.com,ok").unwrap();
        writeln!(file, "second,,blank cell").unwrap();
        writeln!(file, "third,test.org,").unwrap();
        file.flush().unwrap();

        let urls = read_urls_from_delimited(file.path().to_str().unwrap(), "url").unwrap();
        assert_eq!(urls, vec!["example.com", "test.org"]);
    }

    #[test]
    fn test_read_urls_from_delimited_missing_column() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "name,link").unwrap();
        writeln!(file, "first,example.com").unwrap();
        file.flush().unwrap();

        let result = read_urls_from_delimited(file.path().to_str().unwrap(), "url");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("column named 'url'"));
    }

    #[test]
    fn test_read_urls_from_lines_skips_comments() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# comment line").unwrap();
        writeln!(file, "example.com").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "test.org/page#fragment").unwrap();
        file.flush().unwrap();

        let urls = read_urls_from_lines(file.path().to_str().unwrap()).unwrap();
        // '#' inside a URL is not a comment
        assert_eq!(urls, vec!["example.com", "test.org/page#fragment"]);
    }

    #[test]
    fn test_is_delimited_file() {
        assert!(is_delimited_file("urls.csv"));
        assert!(is_delimited_file("URLS.CSV"));
        assert!(is_delimited_file("data.tsv"));
        assert!(!is_delimited_file("urls.txt"));
        assert!(!is_delimited_file("urls"));
    }
}
