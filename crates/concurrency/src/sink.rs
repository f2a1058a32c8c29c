//! Latency sink shared by all units of a run

use std::time::Duration;

use parking_lot::Mutex;

/// Append-only collection of latency samples in milliseconds.
///
/// Internally synchronized; units append concurrently without any locking of
/// their own. Samples are kept in completion order.
#[derive(Debug, Default)]
pub struct LatencySink {
    samples: Mutex<Vec<f64>>,
}

impl LatencySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty sink with room for `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Append an elapsed duration.
    pub fn record(&self, elapsed: Duration) {
        self.record_ms(elapsed.as_secs_f64() * 1000.0);
    }

    /// Append a sample already in milliseconds.
    pub fn record_ms(&self, ms: f64) {
        self.samples.lock().push(ms);
    }

    /// Number of samples so far.
    pub fn len(&self) -> usize {
        self.samples.lock().len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.lock().is_empty()
    }

    /// Copy of the samples so far.
    pub fn snapshot(&self) -> Vec<f64> {
        self.samples.lock().clone()
    }

    /// Move the samples out, leaving the sink empty.
    pub fn take(&self) -> Vec<f64> {
        std::mem::take(&mut *self.samples.lock())
    }
}
