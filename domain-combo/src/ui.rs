//! Pretty-mode display logic for the domain-combo CLI.
//!
//! This module handles `--pretty` output: the header, grouped sections,
//! the summary bar and the spinner shown while lookups run. Uses only the
//! `console` crate.

use console::{pad_str, style, Alignment, Term};
use domain_combo_lib::{CheckConfig, Report, ReportSummary, Separator};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ── Spinner ──────────────────────────────────────────────────────────────────

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An async braille-dot spinner that writes to stderr so stdout stays clean.
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    /// Start a spinner with the given message, e.g. "Checking 8 domains...".
    ///
    /// Returns `None` when stderr is not a terminal.
    pub fn start(message: String) -> Option<Self> {
        if !Term::stderr().is_term() {
            return None;
        }

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let handle = tokio::spawn(async move {
            let term = Term::stderr();
            let mut idx = 0usize;
            while running_clone.load(Ordering::Relaxed) {
                let frame = SPINNER_FRAMES[idx % SPINNER_FRAMES.len()];
                let _ = term.clear_line();
                let _ = term.write_str(&format!("{} {}", style(frame).cyan(), message));
                idx += 1;
                tokio::time::sleep(Duration::from_millis(80)).await;
            }
            let _ = term.clear_line();
        });

        Some(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Stop the spinner and clear the line.
    pub async fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(h) = self.handle.take() {
            let _ = h.await;
        }
    }
}

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header at the start of a pretty run.
pub fn print_header(domain_count: usize, config: &CheckConfig) {
    println!(
        "{} {} {}",
        style("domain-combo").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "· Checking {} domain{}",
            domain_count,
            plural(domain_count)
        ))
        .dim(),
    );

    let mut meta_parts = vec![
        format!("TLDs: {}", config.tlds.join(", ")),
        format!("Workers: {}", config.workers),
    ];
    if config.separator == Separator::Dash {
        meta_parts.push("Dash separator".to_string());
    }
    if let Some(timeout) = config.timeout {
        meta_parts.push(format!("Timeout: {}s", timeout.as_secs()));
    }

    println!("{}", style(meta_parts.join(" | ")).dim());
    println!();
}

// ── Grouped output ───────────────────────────────────────────────────────────

/// Print a report grouped by status: Available, Taken, Errors.
/// Empty sections are omitted entirely.
///
/// With `debug`, each line is followed by its lookup time from `timings`.
pub fn print_grouped_report(
    report: &Report,
    timings: &HashMap<String, Duration>,
    debug: bool,
) {
    if !report.available.is_empty() {
        println!(
            "  {} {}",
            style(format!("── Available ({}) ", report.available.len()))
                .green()
                .bold(),
            style("─".repeat(40)).green().dim(),
        );
        for domain in &report.available {
            println!("    {}", style(padded(domain)).white());
            print_timing(domain, timings, debug);
        }
        println!();
    }

    if !report.taken.is_empty() {
        println!(
            "  {} {}",
            style(format!("── Taken ({}) ", report.taken.len())).red().bold(),
            style("─".repeat(44)).red().dim(),
        );
        for domain in &report.taken {
            println!("    {}", style(padded(domain)).white());
            print_timing(domain, timings, debug);
        }
        println!();
    }

    if !report.failed.is_empty() {
        println!(
            "  {} {}",
            style(format!("── Errors ({}) ", report.failed.len()))
                .yellow()
                .bold(),
            style("─".repeat(43)).yellow().dim(),
        );
        for failed in &report.failed {
            println!(
                "    {}  {}",
                style(padded(&failed.domain)).white(),
                style(brief_error(&failed.error)).dim(),
            );
            if debug {
                println!("      {} {}", style("└─").dim(), style(&failed.error).dim());
            }
            print_timing(&failed.domain, timings, debug);
        }
        println!();
    }
}

fn print_timing(domain: &str, timings: &HashMap<String, Duration>, debug: bool) {
    if !debug {
        return;
    }
    if let Some(duration) = timings.get(domain) {
        println!(
            "      {} Checked in {}ms",
            style("└─").dim(),
            duration.as_millis(),
        );
    }
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Print the final summary bar with colored counts.
pub fn print_summary(summary: &ReportSummary, duration: Duration) {
    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  {} domain{} in {:.1}s  {}  {}  {}  {}  {}  {}",
        style(summary.total).bold(),
        plural(summary.total),
        duration.as_secs_f64(),
        style("|").dim(),
        style(format!("{} available", summary.available)).green(),
        style("|").dim(),
        style(format!("{} taken", summary.taken)).red(),
        style("|").dim(),
        style(format!("{} errors", summary.failed)).yellow(),
    );
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn padded(domain: &str) -> String {
    pad_str(domain, 30, Alignment::Left, Some("..")).into_owned()
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Extract a brief reason from a lookup failure description.
fn brief_error(message: &str) -> &'static str {
    let m = message.to_lowercase();
    if m.contains("timeout") || m.contains("timed out") {
        "(timeout)"
    } else if m.contains("failed to execute") || m.contains("make sure it is installed") {
        "(whois not installed)"
    } else if m.contains("connect") || m.contains("network") || m.contains("refused") {
        "(network error)"
    } else {
        "(error)"
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brief_error_timeout() {
        assert_eq!(
            brief_error("Timeout after 5s during: WHOIS query"),
            "(timeout)"
        );
    }

    #[test]
    fn test_brief_error_missing_command() {
        let msg = "WHOIS error for 'a.com': Failed to execute whois command: No such file or directory (os error 2). Make sure it is installed.";
        assert_eq!(brief_error(msg), "(whois not installed)");
    }

    #[test]
    fn test_brief_error_network() {
        assert_eq!(
            brief_error("WHOIS error for 'a.com': connect: connection refused"),
            "(network error)"
        );
    }

    #[test]
    fn test_brief_error_other() {
        assert_eq!(brief_error("something odd"), "(error)");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(0), "s");
        assert_eq!(plural(1), "");
        assert_eq!(plural(2), "s");
    }

    #[test]
    fn test_padded_truncates_long_names() {
        let long = "averyveryveryverylongdomainnamehere.com";
        let p = padded(long);
        assert!(p.ends_with(".."));
        assert_eq!(console::measure_text_width(&p), 30);
        assert_eq!(padded("a.com").trim_end(), "a.com");
    }
}
