//! Display logic for the url-check CLI.
//!
//! This module handles all terminal output: the live progress bar driven by
//! the checker's progress events, colored result lines, grouped partition
//! output, headers, and summaries. Uses only the `console` crate.

use console::{pad_str, style, Alignment, Term};
use std::time::Duration;
use url_check_lib::{ProbeResult, ProgressEvent};

// ── Progress bar ─────────────────────────────────────────────────────────────

const BAR_WIDTH: usize = 30;

/// A progress bar on stderr, redrawn on every progress event.
///
/// Writes to stderr so stdout stays clean for structured output.
pub struct ProgressBar {
    term: Term,
}

impl ProgressBar {
    /// Start a progress bar for a run of `total` probes.
    ///
    /// Returns None when stderr isn't a TTY or there is nothing to track.
    pub fn start(total: usize) -> Option<Self> {
        let term = Term::stderr();
        if !term.is_term() || total == 0 {
            return None;
        }
        Some(Self { term })
    }

    /// Redraw the bar for the given event.
    pub fn update(&self, event: ProgressEvent) {
        let bar = render_bar(event.completed, event.total, BAR_WIDTH);
        let _ = self.term.clear_line();
        let _ = self.term.write_str(&format!("  {}", style(bar).cyan()));
    }

    /// Clear the bar line once the run is done.
    pub fn finish(&self) {
        let _ = self.term.clear_line();
    }
}

/// Render the textual bar for completed/total.
fn render_bar(completed: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (completed * width) / total
    };
    let percent = if total == 0 {
        0
    } else {
        (completed * 100) / total
    };
    format!(
        "[{}{}] {}/{} ({}%)",
        "#".repeat(filled),
        "-".repeat(width - filled),
        completed,
        total,
        percent,
    )
}

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header at the start of a pretty run.
pub fn print_header(url_count: usize, concurrency: usize, timeout: Duration) {
    println!(
        "{} {} {}",
        style("url-check").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "— Checking {} URL{}",
            url_count,
            if url_count == 1 { "" } else { "s" }
        ))
        .dim(),
    );
    println!(
        "{}",
        style(format!(
            "Concurrency: {} | Timeout: {}s",
            concurrency,
            timeout.as_secs()
        ))
        .dim()
    );
    println!();
}

// ── Single result line ───────────────────────────────────────────────────────

/// Format and print a single probe result with colors and alignment.
///
/// If `counter` is Some((current, total)), a progress prefix like `[3/8]` is
/// shown.
pub fn print_result(result: &ProbeResult, debug: bool, counter: Option<(usize, usize)>) {
    let url_width = 44;
    let padded_url = pad_str(&result.url, url_width, Alignment::Left, Some(".."));

    let prefix = match counter {
        Some((cur, total)) => format!("{} ", style(format!("[{}/{}]", cur, total)).dim()),
        None => String::new(),
    };

    if result.alive {
        println!(
            "  {}{}  {}",
            prefix,
            style(&padded_url).white(),
            style("WORKING").green().bold(),
        );
    } else {
        println!(
            "  {}{}  {}",
            prefix,
            style(&padded_url).white(),
            style("NON-WORKING").red().bold(),
        );
    }

    if debug {
        print_debug_line(result, "    ");
    }
}

/// Print a single result in the default (non-pretty) flat format.
pub fn print_result_default(result: &ProbeResult, debug: bool, counter: Option<(usize, usize)>) {
    let prefix = match counter {
        Some((cur, total)) => format!("{} ", style(format!("[{}/{}]", cur, total)).dim()),
        None => String::new(),
    };

    let verdict = if result.alive {
        style("WORKING").green()
    } else {
        style("NON-WORKING").red()
    };

    println!("{}{}  {}", prefix, result.url, verdict);

    if debug {
        print_debug_line(result, "  ");
    }
}

/// Print the `└─ HTTP 200 in 123ms` diagnostics line under a result.
fn print_debug_line(result: &ProbeResult, indent: &str) {
    let outcome = format_probe_outcome(result);
    match result.check_duration {
        Some(duration) => println!(
            "{}{} {} in {}ms",
            indent,
            style("└─").dim(),
            outcome,
            duration.as_millis(),
        ),
        None => println!("{}{} {}", indent, style("└─").dim(), outcome),
    }
}

// ── Grouped batch output ─────────────────────────────────────────────────────

/// Print results grouped by verdict: Working, then Non-working.
/// Empty sections are omitted entirely.
pub fn print_grouped_results(results: &[ProbeResult], debug: bool) {
    let working: Vec<&ProbeResult> = results.iter().filter(|r| r.alive).collect();
    let nonworking: Vec<&ProbeResult> = results.iter().filter(|r| !r.alive).collect();

    if !working.is_empty() {
        println!(
            "  {} {}",
            style(format!("── Working ({}) ", working.len()))
                .green()
                .bold(),
            style("─".repeat(40)).green().dim(),
        );
        for r in &working {
            print_grouped_line(r, debug);
        }
        println!();
    }

    if !nonworking.is_empty() {
        println!(
            "  {} {}",
            style(format!("── Non-working ({}) ", nonworking.len()))
                .red()
                .bold(),
            style("─".repeat(36)).red().dim(),
        );
        for r in &nonworking {
            print_grouped_line(r, debug);
        }
        println!();
    }
}

/// Print a single line inside a grouped section.
fn print_grouped_line(result: &ProbeResult, debug: bool) {
    println!("    {}", style(&result.url).white());
    if debug {
        print_debug_line(result, "      ");
    }
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Print the final summary bar with colored counts.
pub fn print_summary(total: usize, working: usize, nonworking: usize, duration: Duration) {
    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  {} URL{} in {:.1}s  {}  {}  {}  {}",
        style(total).bold(),
        if total == 1 { "" } else { "s" },
        duration.as_secs_f64(),
        style("|").dim(),
        style(format!("{} working", working)).green(),
        style("|").dim(),
        style(format!("{} non-working", nonworking)).red(),
    );
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Describe what the probe observed: the final status, or the lack of one.
pub fn format_probe_outcome(result: &ProbeResult) -> String {
    match result.status {
        Some(status) => format!("HTTP {}", status),
        None => "no response".to_string(),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(url: &str, alive: bool, status: Option<u16>) -> ProbeResult {
        ProbeResult {
            url: url.to_string(),
            alive,
            status,
            check_duration: None,
        }
    }

    #[test]
    fn test_render_bar_empty() {
        assert_eq!(render_bar(0, 10, 10), "[----------] 0/10 (0%)");
    }

    #[test]
    fn test_render_bar_half() {
        assert_eq!(render_bar(5, 10, 10), "[#####-----] 5/10 (50%)");
    }

    #[test]
    fn test_render_bar_full() {
        assert_eq!(render_bar(10, 10, 10), "[##########] 10/10 (100%)");
    }

    #[test]
    fn test_render_bar_zero_total() {
        assert_eq!(render_bar(0, 0, 10), "[----------] 0/0 (0%)");
    }

    #[test]
    fn test_format_probe_outcome_with_status() {
        let r = make_result("http://a.com", false, Some(404));
        assert_eq!(format_probe_outcome(&r), "HTTP 404");
    }

    #[test]
    fn test_format_probe_outcome_without_status() {
        let r = make_result("http://a.com", false, None);
        assert_eq!(format_probe_outcome(&r), "no response");
    }
}
