//! Latency and failure injection
//!
//! [`FaultyBackend`] wraps another backend and, before each call, sleeps for
//! a fixed latency plus a seeded jitter, then fails the call with a seeded
//! probability. Draws come from one `ChaCha8Rng`, so a sequential caller sees
//! the same delays and failures for the same seed. Under concurrency the
//! draw order follows call order and is not reproducible.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use yardstick_core::{Criteria, Entity, EntityKind, Error, Result};
use yardstick_interpreter::Backend;

/// Fault injection settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaultConfig {
    /// Added to every call, in milliseconds
    pub latency_ms: u64,
    /// Upper bound of the extra uniform delay, in milliseconds
    pub jitter_ms: u64,
    /// Probability in `[0, 1]` that a call fails
    pub failure_rate: f64,
    /// Seed for jitter and failure draws
    pub seed: u64,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            jitter_ms: 0,
            failure_rate: 0.0,
            seed: 0,
        }
    }
}

impl FaultConfig {
    /// Fixed latency only.
    pub fn latency(latency: Duration) -> Self {
        Self {
            latency_ms: millis(latency),
            ..Self::default()
        }
    }

    /// Set the jitter bound.
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter_ms = millis(jitter);
        self
    }

    /// Set the failure probability.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = rate;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject a failure rate outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(Error::InvalidConfig(format!(
                "failure rate must be within [0, 1], got {}",
                self.failure_rate
            )));
        }
        Ok(())
    }

    /// Total sleep for one call given a jitter draw. Saturates instead of
    /// overflowing on extreme settings.
    fn delay(&self, jitter_ms: u64) -> Duration {
        Duration::from_millis(self.latency_ms.saturating_add(jitter_ms))
    }

    /// True when the wrapper would change nothing.
    pub fn is_noop(&self) -> bool {
        self.latency_ms == 0 && self.jitter_ms == 0 && self.failure_rate == 0.0
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// A backend that delays and fails calls before delegating.
pub struct FaultyBackend<B> {
    inner: B,
    config: FaultConfig,
    name: String,
    rng: Mutex<ChaCha8Rng>,
}

impl<B: Backend> FaultyBackend<B> {
    /// Wrap `inner`. Fails with `InvalidConfig` on a bad failure rate.
    pub fn new(inner: B, config: FaultConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            name: format!("faulty({})", inner.name()),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(config.seed)),
            inner,
            config,
        })
    }

    /// The wrapped backend.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Injection settings.
    pub fn config(&self) -> &FaultConfig {
        &self.config
    }

    async fn inject(&self, operation: impl FnOnce() -> String) -> Result<()> {
        let (delay, fail) = {
            let mut rng = self.rng.lock();
            let jitter = if self.config.jitter_ms > 0 {
                rng.gen_range(0..=self.config.jitter_ms)
            } else {
                0
            };
            let fail = self.config.failure_rate > 0.0 && rng.gen_bool(self.config.failure_rate);
            (self.config.delay(jitter), fail)
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if fail {
            let operation = operation();
            trace!(backend = %self.name, %operation, "injected failure");
            return Err(Error::backend(&self.name, operation, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl<B: Backend> Backend for FaultyBackend<B> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn insert(&self, entity: Entity) -> Result<()> {
        let kind = entity.kind();
        self.inject(|| format!("insert {}", kind)).await?;
        self.inner.insert(entity).await
    }

    async fn get_by_id(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>> {
        self.inject(|| format!("get {}", kind)).await?;
        self.inner.get_by_id(kind, id).await
    }

    async fn search(
        &self,
        kind: EntityKind,
        criteria: &Criteria,
        limit: usize,
    ) -> Result<Vec<Entity>> {
        self.inject(|| format!("search {}", kind)).await?;
        self.inner.search(kind, criteria, limit).await
    }

    async fn get_all(&self, kind: EntityKind) -> Result<Vec<Entity>> {
        self.inject(|| format!("scan {}", kind)).await?;
        self.inner.get_all(kind).await
    }
}
