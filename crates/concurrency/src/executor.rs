//! Bounded-concurrency executor
//!
//! ## Run sequence
//!
//! ```text
//! 1. Create a fresh semaphore with max_concurrency permits
//! 2. Spawn every unit on a JoinSet (all submitted up front)
//! 3. Per unit: acquire permit -> start timer -> run -> stop timer
//!    -> record sample -> release permit
//! 4. Join all units, collecting failures in completion order
//! 5. Stop the wall clock
//! ```
//!
//! The permit is an owned RAII guard, so a failing, panicking or timed-out
//! unit releases its slot exactly like a successful one. Time spent waiting
//! for a permit is not part of a unit's latency.

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{ExecutorError, UnitError};
use crate::outcome::RunOutcome;
use crate::sink::LatencySink;

/// What happens to siblings when a unit fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Record the failure and let every other unit run to completion
    #[default]
    FailSoft,
    /// Cancel admitted and waiting units after the first failure
    CancelOnFirstError,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailurePolicy::FailSoft => "fail-soft",
            FailurePolicy::CancelOnFirstError => "cancel-on-first-error",
        })
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "fail-soft" | "failsoft" => Ok(FailurePolicy::FailSoft),
            "cancel-on-first-error" | "cancel" => Ok(FailurePolicy::CancelOnFirstError),
            other => Err(format!("unknown failure policy: {}", other)),
        }
    }
}

/// Executor settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorOptions {
    /// Maximum units in flight at once
    pub max_concurrency: usize,
    /// Per-unit time limit; `None` waits indefinitely
    pub unit_timeout: Option<Duration>,
    /// Reaction to unit failures
    pub failure_policy: FailurePolicy,
}

impl ExecutorOptions {
    /// Fail-soft options with no timeout.
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency,
            unit_timeout: None,
            failure_policy: FailurePolicy::FailSoft,
        }
    }

    /// Set a per-unit timeout.
    pub fn with_unit_timeout(mut self, timeout: Duration) -> Self {
        self.unit_timeout = Some(timeout);
        self
    }

    /// Set the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Check the settings.
    pub fn validate(&self) -> Result<(), ExecutorError> {
        if self.max_concurrency == 0 {
            return Err(ExecutorError::InvalidConcurrency {
                requested: self.max_concurrency,
            });
        }
        if self.unit_timeout == Some(Duration::ZERO) {
            return Err(ExecutorError::InvalidTimeout);
        }
        Ok(())
    }
}

/// Runs batches of async units with a hard cap on simultaneity.
///
/// The executor owns no admission state between runs: every call to
/// [`BoundedExecutor::run`] builds its own semaphore, so concurrent runs with
/// different levels cannot interfere.
#[derive(Debug, Clone)]
pub struct BoundedExecutor {
    options: ExecutorOptions,
}

impl BoundedExecutor {
    /// Fail-soft executor with no timeout.
    pub fn new(max_concurrency: usize) -> Result<Self, ExecutorError> {
        Self::with_options(ExecutorOptions::new(max_concurrency))
    }

    /// Executor with explicit options.
    pub fn with_options(options: ExecutorOptions) -> Result<Self, ExecutorError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The configured options.
    pub fn options(&self) -> &ExecutorOptions {
        &self.options
    }

    /// Configured concurrency cap.
    pub fn max_concurrency(&self) -> usize {
        self.options.max_concurrency
    }

    /// Run every unit and wait for all of them.
    ///
    /// Never aborts early under [`FailurePolicy::FailSoft`]: each unit that
    /// runs contributes one latency sample, failed or not. Under
    /// [`FailurePolicy::CancelOnFirstError`], units cut short by cancellation
    /// contribute no sample and appear as [`UnitError::Cancelled`].
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn run<I, F, E>(&self, units: I) -> RunOutcome<E>
    where
        I: IntoIterator<Item = F>,
        F: Future<Output = Result<(), E>> + Send + 'static,
        E: fmt::Display + Send + 'static,
    {
        let units = units.into_iter();
        let semaphore = Arc::new(Semaphore::new(self.options.max_concurrency));
        let sink = Arc::new(LatencySink::with_capacity(units.size_hint().0));
        let cancel = CancellationToken::new();

        let started = Instant::now();
        let mut set = JoinSet::new();
        let mut submitted = 0usize;
        for unit in units {
            submitted += 1;
            set.spawn(run_unit(
                unit,
                Arc::clone(&semaphore),
                Arc::clone(&sink),
                cancel.clone(),
                self.options.clone(),
            ));
        }
        info!(
            units = submitted,
            max_concurrency = self.options.max_concurrency,
            policy = %self.options.failure_policy,
            "running batch"
        );

        let mut failures = Vec::new();
        while let Some(joined) = set.join_next().await {
            let failure = match joined {
                Ok(Ok(())) => continue,
                Ok(Err(failure)) => failure,
                Err(join_error) => UnitError::Panicked(join_error.to_string()),
            };
            if failure.is_cancelled() {
                debug!("unit cancelled");
            } else {
                warn!(error = %failure, "unit failed");
            }
            failures.push(failure);
        }
        let total_wall_time = started.elapsed();

        let outcome = RunOutcome {
            total_wall_time,
            latencies_ms: sink.take(),
            failures,
            submitted,
        };
        info!(
            units = submitted,
            samples = outcome.latencies_ms.len(),
            failures = outcome.failure_count(),
            wall_time_secs = outcome.total_wall_time_secs(),
            "batch finished"
        );
        outcome
    }
}

enum Completion<E> {
    Finished(std::thread::Result<Result<(), E>>),
    TimedOut(Duration),
}

async fn run_unit<F, E>(
    unit: F,
    semaphore: Arc<Semaphore>,
    sink: Arc<LatencySink>,
    cancel: CancellationToken,
    options: ExecutorOptions,
) -> Result<(), UnitError<E>>
where
    F: Future<Output = Result<(), E>> + Send + 'static,
    E: Send + 'static,
{
    let permit = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(UnitError::Cancelled),
        permit = semaphore.acquire_owned() => permit.map_err(|_| UnitError::Cancelled)?,
    };

    let started = Instant::now();
    let guarded = AssertUnwindSafe(unit).catch_unwind();
    let work = async {
        match options.unit_timeout {
            Some(limit) => match tokio::time::timeout(limit, guarded).await {
                Ok(finished) => Completion::Finished(finished),
                Err(_) => Completion::TimedOut(limit),
            },
            None => Completion::Finished(guarded.await),
        }
    };
    let completion = tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        completion = work => Some(completion),
    };
    let elapsed = started.elapsed();

    let Some(completion) = completion else {
        drop(permit);
        return Err(UnitError::Cancelled);
    };
    sink.record(elapsed);
    drop(permit);

    let result = match completion {
        Completion::Finished(Ok(Ok(()))) => Ok(()),
        Completion::Finished(Ok(Err(e))) => Err(UnitError::Failed(e)),
        Completion::Finished(Err(panic)) => Err(UnitError::Panicked(panic_message(&*panic))),
        Completion::TimedOut(limit) => Err(UnitError::TimedOut(limit)),
    };
    if result.is_err() && options.failure_policy == FailurePolicy::CancelOnFirstError {
        cancel.cancel();
    }
    result
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
