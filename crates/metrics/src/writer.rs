//! Result files
//!
//! CSV output has one row per report with the columns
//!
//! ```text
//! numConcurrent, totalTime(s), throughput(tuples/s), avgLatency(ms), minLatency(ms),
//! maxLatency(ms), 90thPercentileLatency(ms), 99thPercentileLatency(ms), failures
//! ```
//!
//! Latency columns are empty for runs without samples. JSON-lines output
//! writes each report as one serialized object per line.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::report::BenchmarkReport;

/// CSV header row.
pub const CSV_HEADER: [&str; 9] = [
    "numConcurrent",
    "totalTime(s)",
    "throughput(tuples/s)",
    "avgLatency(ms)",
    "minLatency(ms)",
    "maxLatency(ms)",
    "90thPercentileLatency(ms)",
    "99thPercentileLatency(ms)",
    "failures",
];

/// Errors writing result files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// File system error
    #[error("cannot write {}: {source}", path.display())]
    Io {
        /// Destination
        path: PathBuf,
        /// Cause
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding error
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultFormat {
    /// Comma-separated, one row per report
    #[default]
    Csv,
    /// One JSON object per line
    JsonLines,
}

impl ResultFormat {
    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            ResultFormat::Csv => "csv",
            ResultFormat::JsonLines => "jsonl",
        }
    }
}

impl fmt::Display for ResultFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResultFormat::Csv => "csv",
            ResultFormat::JsonLines => "json-lines",
        })
    }
}

impl FromStr for ResultFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ResultFormat::Csv),
            "jsonl" | "json-lines" | "json_lines" | "json" => Ok(ResultFormat::JsonLines),
            other => Err(format!("unknown result format: {}", other)),
        }
    }
}

enum Sink {
    Csv(csv::Writer<File>),
    JsonLines(BufWriter<File>),
}

/// Appends reports to a result file.
pub struct ResultWriter {
    path: PathBuf,
    sink: Sink,
    rows: usize,
}

impl ResultWriter {
    /// Create (or truncate) `path`, creating parent directories. CSV files
    /// get their header immediately.
    pub fn create(path: impl AsRef<Path>, format: ResultFormat) -> Result<Self, WriteError> {
        let path = path.as_ref().to_path_buf();
        let io_err = |source| WriteError::Io {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let file = File::create(&path).map_err(io_err)?;

        let sink = match format {
            ResultFormat::Csv => {
                let mut writer = csv::Writer::from_writer(file);
                writer.write_record(CSV_HEADER)?;
                Sink::Csv(writer)
            }
            ResultFormat::JsonLines => Sink::JsonLines(BufWriter::new(file)),
        };
        Ok(Self {
            path,
            sink,
            rows: 0,
        })
    }

    /// Append one report.
    pub fn write(&mut self, report: &BenchmarkReport) -> Result<(), WriteError> {
        match &mut self.sink {
            Sink::Csv(writer) => writer.write_record(csv_row(report))?,
            Sink::JsonLines(writer) => {
                serde_json::to_writer(&mut *writer, report)?;
                writer.write_all(b"\n").map_err(|source| WriteError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }
        self.rows += 1;
        Ok(())
    }

    /// Flush and close. Returns the number of reports written.
    pub fn finish(mut self) -> Result<usize, WriteError> {
        let flushed = match &mut self.sink {
            Sink::Csv(writer) => writer.flush(),
            Sink::JsonLines(writer) => writer.flush(),
        };
        flushed.map_err(|source| WriteError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), rows = self.rows, "wrote results");
        Ok(self.rows)
    }
}

/// Write all reports to `path` in one go.
pub fn write_reports(
    path: impl AsRef<Path>,
    format: ResultFormat,
    reports: &[BenchmarkReport],
) -> Result<usize, WriteError> {
    let mut writer = ResultWriter::create(path, format)?;
    for report in reports {
        writer.write(report)?;
    }
    writer.finish()
}

fn csv_row(report: &BenchmarkReport) -> Vec<String> {
    let summary = &report.summary;
    let latency = |pick: fn(&crate::summary::LatencyStats) -> f64| {
        summary
            .latency
            .as_ref()
            .map(|l| format!("{:.4}", pick(l)))
            .unwrap_or_default()
    };
    vec![
        report.concurrency.to_string(),
        format!("{:.6}", summary.total_wall_time_secs),
        format!("{:.4}", summary.throughput),
        latency(|l| l.mean),
        latency(|l| l.min),
        latency(|l| l.max),
        latency(|l| l.p90),
        latency(|l| l.p99),
        report.failures.to_string(),
    ]
}
