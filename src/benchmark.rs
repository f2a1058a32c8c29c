//! Benchmark driver
//!
//! A [`Benchmark`] owns one instruction sequence and the settings to replay
//! it. Each call to [`Benchmark::run`] binds the sequence to a backend, runs
//! the units through a fresh [`BoundedExecutor`] and summarizes the outcome.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use yardstick_concurrency::{BoundedExecutor, ExecutorOptions, FailurePolicy, RunOutcome, UnitError};
use yardstick_core::{InstructionSequence, ReferenceCorpus};
use yardstick_generator::{generate, load_corpus};
use yardstick_interpreter::{Backend, ExecutionUnit, Interpreter, InterpreterOptions};
use yardstick_metrics::BenchmarkReport;

use crate::error::Result;

/// Default workload seed.
pub const DEFAULT_SEED: u64 = 123;

/// Default number of generated instructions.
pub const DEFAULT_COUNT: usize = 1000;

/// Default label of generated workloads.
pub const DEFAULT_LABEL: &str = "workload";

/// Error type of one execution unit.
pub type UnitFailure = UnitError<yardstick_core::Error>;

/// What one run measured.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Summary, ready to print or write
    pub report: BenchmarkReport,
    /// First submission to last completion
    pub total_wall_time: Duration,
    /// One sample per unit that ran, in completion order
    pub latencies_ms: Vec<f64>,
    /// Every failed unit, in completion order
    pub failures: Vec<UnitFailure>,
}

impl BenchmarkResult {
    /// Summarize an executor outcome.
    pub fn from_outcome(
        label: &str,
        backend: &str,
        concurrency: usize,
        outcome: RunOutcome<yardstick_core::Error>,
    ) -> Self {
        let report = BenchmarkReport::from_outcome(label, backend, concurrency, &outcome);
        Self {
            report,
            total_wall_time: outcome.total_wall_time,
            latencies_ms: outcome.latencies_ms,
            failures: outcome.failures,
        }
    }

    /// Wall time in seconds.
    pub fn total_wall_time_secs(&self) -> f64 {
        self.total_wall_time.as_secs_f64()
    }

    /// Units per second; NaN when the wall time is zero.
    pub fn throughput(&self) -> f64 {
        self.report.summary.throughput
    }

    /// First failure in completion order, skipping the cancellations it
    /// caused. Falls back to a cancellation only when nothing else failed.
    pub fn first_error(&self) -> Option<&UnitFailure> {
        self.failures
            .iter()
            .find(|f| !f.is_cancelled())
            .or_else(|| self.failures.first())
    }

    /// True when every unit succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run `units` against a backend named `backend` and summarize.
pub async fn measure(
    label: &str,
    backend: &str,
    options: ExecutorOptions,
    units: Vec<ExecutionUnit>,
) -> Result<BenchmarkResult> {
    let concurrency = options.max_concurrency;
    let executor = BoundedExecutor::with_options(options)?;
    let outcome = executor.run(units).await;
    let result = BenchmarkResult::from_outcome(label, backend, concurrency, outcome);
    info!(
        label,
        backend,
        concurrency,
        throughput = result.throughput(),
        failures = result.failures.len(),
        "benchmark finished"
    );
    Ok(result)
}

/// A reproducible workload and how to run it.
#[derive(Debug, Clone)]
pub struct Benchmark {
    label: String,
    seed: u64,
    instructions: Arc<InstructionSequence>,
    executor: ExecutorOptions,
    interpreter: Interpreter,
}

impl Benchmark {
    /// Start configuring a benchmark.
    pub fn builder() -> BenchmarkBuilder {
        BenchmarkBuilder::new()
    }

    /// Workload label used in reports.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Seed the workload was generated from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The instruction sequence.
    pub fn instructions(&self) -> &InstructionSequence {
        &self.instructions
    }

    /// Executor settings.
    pub fn executor_options(&self) -> &ExecutorOptions {
        &self.executor
    }

    /// Replay the workload against `backend` at the configured concurrency.
    pub async fn run(&self, backend: Arc<dyn Backend>) -> Result<BenchmarkResult> {
        self.run_with(backend, self.executor.clone()).await
    }

    /// Replay the workload at `concurrency`, overriding the configured level.
    pub async fn run_at(
        &self,
        backend: Arc<dyn Backend>,
        concurrency: usize,
    ) -> Result<BenchmarkResult> {
        let mut options = self.executor.clone();
        options.max_concurrency = concurrency;
        self.run_with(backend, options).await
    }

    /// Replay the workload once per concurrency level, in order.
    ///
    /// Every level replays the full sequence against the same backend, so
    /// writes from earlier levels stay visible to later ones.
    pub async fn sweep(
        &self,
        backend: Arc<dyn Backend>,
        levels: &[usize],
    ) -> Result<Vec<BenchmarkResult>> {
        let mut results = Vec::with_capacity(levels.len());
        for &level in levels {
            results.push(self.run_at(Arc::clone(&backend), level).await?);
        }
        Ok(results)
    }

    async fn run_with(
        &self,
        backend: Arc<dyn Backend>,
        options: ExecutorOptions,
    ) -> Result<BenchmarkResult> {
        options.validate()?;
        info!(
            label = %self.label,
            backend = backend.name(),
            units = self.instructions.len(),
            max_concurrency = options.max_concurrency,
            "starting benchmark"
        );
        let units = self.interpreter.bind_all(&self.instructions, &backend);
        measure(&self.label, backend.name(), options, units).await
    }
}

/// Where the instructions come from.
#[derive(Debug, Clone)]
enum Source {
    Generate {
        count: usize,
        corpus: Option<Arc<ReferenceCorpus>>,
        corpus_dir: Option<PathBuf>,
    },
    Given(InstructionSequence),
}

/// Builder for [`Benchmark`].
///
/// Defaults: seed 123, 1000 generated instructions, empty corpus,
/// concurrency 1, no timeout, fail-soft.
#[derive(Debug, Clone)]
pub struct BenchmarkBuilder {
    label: Option<String>,
    seed: u64,
    source: Source,
    executor: ExecutorOptions,
    interpreter: InterpreterOptions,
}

impl BenchmarkBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            label: None,
            seed: DEFAULT_SEED,
            source: Source::Generate {
                count: DEFAULT_COUNT,
                corpus: None,
                corpus_dir: None,
            },
            executor: ExecutorOptions::new(1),
            interpreter: InterpreterOptions::default(),
        }
    }

    /// Label used in reports.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Generator seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of instructions to generate.
    pub fn count(mut self, n: usize) -> Self {
        if let Source::Generate { count, .. } = &mut self.source {
            *count = n;
        } else {
            self.source = Source::Generate {
                count: n,
                corpus: None,
                corpus_dir: None,
            };
        }
        self
    }

    /// Reference corpus to draw parameters from.
    pub fn corpus(mut self, value: impl Into<Arc<ReferenceCorpus>>) -> Self {
        if let Source::Generate { corpus, .. } = &mut self.source {
            *corpus = Some(value.into());
        }
        self
    }

    /// Load the reference corpus from a sample directory at build time.
    pub fn corpus_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        if let Source::Generate { corpus_dir, .. } = &mut self.source {
            *corpus_dir = Some(dir.into());
        }
        self
    }

    /// Replay these instructions instead of generating.
    pub fn instructions(mut self, instructions: InstructionSequence) -> Self {
        self.source = Source::Given(instructions);
        self
    }

    /// Maximum units in flight.
    pub fn concurrency(mut self, max: usize) -> Self {
        self.executor.max_concurrency = max;
        self
    }

    /// Per-unit time limit.
    pub fn unit_timeout(mut self, timeout: Duration) -> Self {
        self.executor.unit_timeout = Some(timeout);
        self
    }

    /// Reaction to unit failures.
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.executor.failure_policy = policy;
        self
    }

    /// Interpreter settings.
    pub fn interpreter(mut self, options: InterpreterOptions) -> Self {
        self.interpreter = options;
        self
    }

    /// Validate settings and produce the instruction sequence.
    ///
    /// Fails on invalid executor settings or an unreadable corpus directory.
    /// An explicit corpus wins over a corpus directory.
    pub fn build(self) -> Result<Benchmark> {
        self.executor.validate()?;

        let instructions = match self.source {
            Source::Given(instructions) => instructions,
            Source::Generate {
                count,
                corpus,
                corpus_dir,
            } => {
                let corpus = match (corpus, corpus_dir) {
                    (Some(corpus), _) => corpus,
                    (None, Some(dir)) => Arc::new(load_corpus(dir)?),
                    (None, None) => Arc::new(ReferenceCorpus::empty()),
                };
                generate(self.seed, count, &corpus)
            }
        };

        Ok(Benchmark {
            label: self.label.unwrap_or_else(|| DEFAULT_LABEL.to_string()),
            seed: self.seed,
            instructions: Arc::new(instructions),
            executor: self.executor,
            interpreter: Interpreter::with_options(self.interpreter),
        })
    }
}

impl Default for BenchmarkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
