//! Benchmark report for one backend at one concurrency level

use std::fmt;

use serde::{Deserialize, Serialize};

use yardstick_concurrency::RunOutcome;

use crate::summary::{summarize_units, Summary};

/// Failure messages kept verbatim in a report; the rest are only counted.
pub const MAX_FAILURE_MESSAGES: usize = 10;

/// What a run measured, plus what went wrong.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Scenario or workload name
    pub label: String,
    /// Backend name
    pub backend: String,
    /// Concurrency cap used
    pub concurrency: usize,
    /// Units submitted
    pub submitted: usize,
    /// Throughput and latency
    pub summary: Summary,
    /// Units that succeeded
    #[serde(default)]
    pub succeeded: usize,
    /// Units that failed, cancelled ones included
    pub failures: usize,
    /// Units cancelled after a sibling failed; counted, never listed
    #[serde(default)]
    pub cancelled: usize,
    /// Messages of the first failures that were not cancellations, in
    /// completion order
    pub failure_messages: Vec<String>,
}

impl BenchmarkReport {
    /// Build a report from an executor outcome.
    ///
    /// Throughput counts every submitted unit, failed ones included. Failure
    /// messages skip cancellations, so the error that triggered a
    /// cancel-on-first-error run is always listed.
    pub fn from_outcome<E: fmt::Display>(
        label: impl Into<String>,
        backend: impl Into<String>,
        concurrency: usize,
        outcome: &RunOutcome<E>,
    ) -> Self {
        Self {
            label: label.into(),
            backend: backend.into(),
            concurrency,
            submitted: outcome.submitted,
            summary: summarize_units(
                outcome.total_wall_time,
                &outcome.latencies_ms,
                outcome.submitted,
            ),
            succeeded: outcome.succeeded(),
            failures: outcome.failure_count(),
            cancelled: outcome.cancelled_count(),
            failure_messages: outcome
                .failures
                .iter()
                .filter(|f| !f.is_cancelled())
                .take(MAX_FAILURE_MESSAGES)
                .map(|f| f.to_string())
                .collect(),
        }
    }

    /// True when no unit failed.
    pub fn is_clean(&self) -> bool {
        self.failures == 0
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} on {} (concurrency {})",
            self.label, self.backend, self.concurrency
        )?;
        writeln!(f, "  units:       {}", self.submitted)?;
        writeln!(f, "  wall time:   {:.3} s", self.summary.total_wall_time_secs)?;
        writeln!(f, "  throughput:  {:.1} ops/s", self.summary.throughput)?;
        match &self.summary.latency {
            Some(l) => {
                writeln!(
                    f,
                    "  latency ms:  min {:.3}  mean {:.3}  p50 {:.3}  p90 {:.3}  p99 {:.3}  max {:.3}",
                    l.min, l.mean, l.p50, l.p90, l.p99, l.max
                )?;
            }
            None => writeln!(f, "  latency ms:  no data")?,
        }
        writeln!(f, "  succeeded:   {}", self.succeeded)?;
        write!(f, "  failures:    {}", self.failures)?;
        if self.cancelled > 0 {
            write!(f, " ({} cancelled)", self.cancelled)?;
        }
        for message in &self.failure_messages {
            write!(f, "\n    - {}", message)?;
        }
        let listable = self.failures.saturating_sub(self.cancelled);
        if listable > self.failure_messages.len() {
            write!(
                f,
                "\n    ... and {} more",
                listable - self.failure_messages.len()
            )?;
        }
        Ok(())
    }
}
