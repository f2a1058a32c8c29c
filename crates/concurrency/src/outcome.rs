//! Result of one executor run

use std::time::Duration;

use crate::error::UnitError;

/// Timing and failures of a completed batch.
#[derive(Debug, Clone)]
pub struct RunOutcome<E> {
    /// First submission to last completion
    pub total_wall_time: Duration,
    /// One sample per unit that ran, in completion order
    pub latencies_ms: Vec<f64>,
    /// Failed units, in completion order
    pub failures: Vec<UnitError<E>>,
    /// Units submitted
    pub submitted: usize,
}

impl<E> RunOutcome<E> {
    /// Wall time in seconds.
    pub fn total_wall_time_secs(&self) -> f64 {
        self.total_wall_time.as_secs_f64()
    }

    /// Submitted units per second; NaN when the wall time is zero.
    pub fn throughput(&self) -> f64 {
        let secs = self.total_wall_time_secs();
        if secs > 0.0 {
            self.submitted as f64 / secs
        } else {
            f64::NAN
        }
    }

    /// Number of failed units, cancelled ones included.
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Number of cancelled units.
    pub fn cancelled_count(&self) -> usize {
        self.failures.iter().filter(|f| f.is_cancelled()).count()
    }

    /// Units that succeeded.
    pub fn succeeded(&self) -> usize {
        self.submitted.saturating_sub(self.failures.len())
    }

    /// True when no unit failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// First failure to complete, skipping cancellations it caused.
    pub fn first_error(&self) -> Option<&UnitError<E>> {
        self.failures
            .iter()
            .find(|f| !f.is_cancelled())
            .or_else(|| self.failures.first())
    }

    /// The outcome if every unit succeeded, otherwise the first error.
    pub fn into_result(mut self) -> Result<Self, UnitError<E>> {
        if self.failures.is_empty() {
            return Ok(self);
        }
        let index = self
            .failures
            .iter()
            .position(|f| !f.is_cancelled())
            .unwrap_or(0);
        Err(self.failures.swap_remove(index))
    }

    /// Convert the unit error type.
    pub fn map_err<F>(self, mut f: impl FnMut(E) -> F) -> RunOutcome<F> {
        RunOutcome {
            total_wall_time: self.total_wall_time,
            latencies_ms: self.latencies_ms,
            failures: self.failures.into_iter().map(|e| e.map(&mut f)).collect(),
            submitted: self.submitted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(failures: Vec<UnitError<&'static str>>) -> RunOutcome<&'static str> {
        RunOutcome {
            total_wall_time: Duration::from_millis(500),
            latencies_ms: vec![1.0; 10],
            failures,
            submitted: 10,
        }
    }

    #[test]
    fn test_throughput() {
        assert!((outcome(vec![]).throughput() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_wall_time_is_nan() {
        let mut o = outcome(vec![]);
        o.total_wall_time = Duration::ZERO;
        assert!(o.throughput().is_nan());
    }

    #[test]
    fn test_first_error_skips_cancellations() {
        let o = outcome(vec![
            UnitError::Cancelled,
            UnitError::Failed("boom"),
            UnitError::Failed("later"),
        ]);
        assert_eq!(o.first_error(), Some(&UnitError::Failed("boom")));
        assert_eq!(o.cancelled_count(), 1);
        assert_eq!(o.succeeded(), 7);
        assert_eq!(o.into_result().unwrap_err(), UnitError::Failed("boom"));
    }

    #[test]
    fn test_clean_into_result() {
        let o = outcome(vec![]);
        assert!(o.is_clean());
        assert_eq!(o.into_result().unwrap().submitted, 10);
    }
}
