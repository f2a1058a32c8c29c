//! Output formatting for CLI results.

use serde::Serialize;

use yardstick::metrics::{BenchmarkReport, Summary};

/// How results are printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Aligned text for people
    Human,
    /// One JSON document
    Json,
}

impl OutputMode {
    pub fn from_flag(value: Option<&String>) -> Self {
        match value.map(String::as_str) {
            Some("json") => OutputMode::Json,
            _ => OutputMode::Human,
        }
    }
}

/// Format a single report. `quiet` drops failure messages in human mode.
pub fn format_report(report: &BenchmarkReport, mode: OutputMode, quiet: bool) -> String {
    match mode {
        OutputMode::Json => to_json(report),
        OutputMode::Human if quiet => {
            let mut trimmed = report.clone();
            trimmed.failure_messages.clear();
            strip_more_line(&trimmed.to_string())
        }
        OutputMode::Human => report.to_string(),
    }
}

/// Format the reports of a sweep: a table in human mode, an array in JSON.
pub fn format_sweep(reports: &[BenchmarkReport], mode: OutputMode) -> String {
    if mode == OutputMode::Json {
        return to_json(&reports);
    }
    let mut out = format!(
        "{:>11}  {:>10}  {:>12}  {:>10}  {:>10}  {:>10}  {:>8}",
        "concurrency", "time (s)", "ops/s", "mean ms", "p90 ms", "p99 ms", "failures"
    );
    for r in reports {
        let (mean, p90, p99) = match &r.summary.latency {
            Some(l) => (
                format!("{:.3}", l.mean),
                format!("{:.3}", l.p90),
                format!("{:.3}", l.p99),
            ),
            None => ("-".into(), "-".into(), "-".into()),
        };
        out.push_str(&format!(
            "\n{:>11}  {:>10.3}  {:>12.1}  {:>10}  {:>10}  {:>10}  {:>8}",
            r.concurrency,
            r.summary.total_wall_time_secs,
            r.summary.throughput,
            mean,
            p90,
            p99,
            r.failures
        ));
    }
    out
}

/// Format a bare latency summary.
pub fn format_summary(summary: &Summary, mode: OutputMode) -> String {
    if mode == OutputMode::Json {
        return to_json(summary);
    }
    let mut out = format!(
        "samples:     {}\nwall time:   {:.3} s\nthroughput:  {:.1} ops/s",
        summary.samples, summary.total_wall_time_secs, summary.throughput
    );
    match &summary.latency {
        Some(l) => out.push_str(&format!(
            "\nmin:         {:.3} ms\nmean:        {:.3} ms\np50:         {:.3} ms\np90:         {:.3} ms\np99:         {:.3} ms\nmax:         {:.3} ms",
            l.min, l.mean, l.p50, l.p90, l.p99, l.max
        )),
        None => out.push_str("\nlatency:     no data"),
    }
    out
}

/// Format a one-line status message, e.g. "wrote 1000 instructions".
pub fn format_message(message: &str, fields: serde_json::Value, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => fields.to_string(),
        OutputMode::Human => message.to_string(),
    }
}

/// Format an error for stderr.
pub fn format_error(error: &anyhow::Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::json!({ "error": format!("{:#}", error) }).to_string(),
        OutputMode::Human => format!("(error) {:#}", error),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}

fn strip_more_line(text: &str) -> String {
    text.lines()
        .filter(|l| !l.trim_start().starts_with("... and"))
        .collect::<Vec<_>>()
        .join("\n")
}
