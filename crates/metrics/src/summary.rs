//! Latency statistics
//!
//! Percentiles use the nearest-rank-below convention on the ascending sort:
//! the p-th percentile of `n` samples is the sample at zero-based index
//! `min(floor(p / 100 * n), n - 1)`. The same rule is applied to every
//! backend, so numbers are comparable across runs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Distribution of latency samples, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Median
    pub p50: f64,
    /// 90th percentile
    pub p90: f64,
    /// 99th percentile
    pub p99: f64,
}

/// Throughput and latency of one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of latency samples
    pub samples: usize,
    /// Wall time in seconds
    pub total_wall_time_secs: f64,
    /// Samples per second; NaN when the wall time is zero
    pub throughput: f64,
    /// `None` when there are no samples
    pub latency: Option<LatencyStats>,
}

impl Summary {
    /// True when there were no samples.
    pub fn is_empty(&self) -> bool {
        self.latency.is_none()
    }
}

/// Summarize a run from its wall time and latency samples.
///
/// Zero samples yield a summary with `latency: None` and zero throughput.
pub fn summarize(total_wall_time: Duration, latencies_ms: &[f64]) -> Summary {
    summarize_units(total_wall_time, latencies_ms, latencies_ms.len())
}

/// Like [`summarize`], but with throughput computed over `units` rather than
/// over the sample count.
///
/// Failed and timed-out units contribute samples like successful ones, so
/// the latency figures describe every unit that ran. The success count is
/// carried next to the summary in [`BenchmarkReport`](crate::BenchmarkReport).
pub fn summarize_units(total_wall_time: Duration, latencies_ms: &[f64], units: usize) -> Summary {
    let secs = total_wall_time.as_secs_f64();
    let throughput = if units == 0 {
        0.0
    } else if secs > 0.0 {
        units as f64 / secs
    } else {
        f64::NAN
    };

    Summary {
        samples: latencies_ms.len(),
        total_wall_time_secs: secs,
        throughput,
        latency: latency_stats(latencies_ms),
    }
}

/// Distribution statistics, or `None` for an empty slice.
pub fn latency_stats(latencies_ms: &[f64]) -> Option<LatencyStats> {
    if latencies_ms.is_empty() {
        return None;
    }
    let mut sorted = latencies_ms.to_vec();
    sorted.sort_by(f64::total_cmp);

    let sum: f64 = sorted.iter().sum();
    Some(LatencyStats {
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        mean: sum / sorted.len() as f64,
        p50: percentile(&sorted, 50.0),
        p90: percentile(&sorted, 90.0),
        p99: percentile(&sorted, 99.0),
    })
}

/// The p-th percentile of an ascending slice. Returns NaN for an empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let n = sorted.len();
    let rank = (p / 100.0 * n as f64).floor();
    let index = if rank.is_sign_negative() || rank.is_nan() {
        0
    } else {
        (rank as usize).min(n - 1)
    };
    sorted[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_is_no_data() {
        let summary = summarize(Duration::from_secs(1), &[]);
        assert!(summary.is_empty());
        assert_eq!(summary.samples, 0);
        assert_eq!(summary.throughput, 0.0);
    }

    #[test]
    fn test_single_sample_is_every_percentile() {
        let stats = latency_stats(&[7.5]).unwrap();
        assert_eq!(
            (stats.min, stats.max, stats.mean, stats.p50, stats.p90, stats.p99),
            (7.5, 7.5, 7.5, 7.5, 7.5, 7.5)
        );
    }

    #[test]
    fn test_index_convention() {
        let samples: Vec<f64> = (1..=10).map(f64::from).collect();
        // floor(0.9 * 10) = 9 -> 10.0; floor(0.5 * 10) = 5 -> 6.0
        assert_eq!(percentile(&samples, 90.0), 10.0);
        assert_eq!(percentile(&samples, 50.0), 6.0);
        assert_eq!(percentile(&samples, 99.0), 10.0);
        assert_eq!(percentile(&samples, 100.0), 10.0);
        assert_eq!(percentile(&samples, 0.0), 1.0);
    }

    #[test]
    fn test_unsorted_input() {
        let stats = latency_stats(&[3.0, 1.0, 2.0, 4.0]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.p50, 3.0);
    }

    #[test]
    fn test_throughput() {
        let summary = summarize(Duration::from_secs(2), &[1.0; 10]);
        assert_eq!(summary.throughput, 5.0);
        let zero = summarize(Duration::ZERO, &[1.0]);
        assert!(zero.throughput.is_nan());
    }

    proptest! {
        #[test]
        fn prop_percentiles_ordered(samples in prop::collection::vec(0.0f64..10_000.0, 1..200)) {
            let s = latency_stats(&samples).unwrap();
            prop_assert!(s.min <= s.p50);
            prop_assert!(s.p50 <= s.p90);
            prop_assert!(s.p90 <= s.p99);
            prop_assert!(s.p99 <= s.max);
            let slack = 1e-9 * s.max.max(1.0);
            prop_assert!(s.min - slack <= s.mean && s.mean <= s.max + slack);
        }
    }
}
