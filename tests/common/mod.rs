//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use yardstick::model::{BusinessSample, ReferenceCorpus, ReviewSample, UserSample};

/// A small corpus with a few of each sample kind.
pub fn sample_corpus() -> ReferenceCorpus {
    let businesses = (0..8)
        .map(|i| BusinessSample {
            business_id: format!("b{}", i),
            name: format!("Business {}", i),
            city: "Tucson".into(),
            state: "AZ".into(),
            categories: Some(if i % 2 == 0 {
                "Mexican, Tacos".into()
            } else {
                "Coffee & Tea".into()
            }),
        })
        .collect();
    let users = ["Ann", "Bo", "Carmen", "Dmitri", "Eve"]
        .iter()
        .enumerate()
        .map(|(i, name)| UserSample {
            user_id: format!("u{}", i),
            name: (*name).into(),
            review_count: Some(i as u32),
        })
        .collect();
    let reviews = (0..3)
        .map(|i| ReviewSample {
            review_id: format!("r{}", i),
            user_id: format!("u{}", i),
            business_id: format!("b{}", i),
            stars: 4.0,
        })
        .collect();
    ReferenceCorpus::new(businesses, users, reviews)
}

/// Tracks how many units are running and the highest count seen.
#[derive(Debug, Default)]
pub struct Gauge {
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl Gauge {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn enter(&self) {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    pub fn exit(&self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// A unit that sleeps for `delay` while registered on `gauge`.
pub fn gauged_unit(gauge: &Arc<Gauge>, delay: Duration) -> BoxFuture<'static, Result<(), String>> {
    let gauge = Arc::clone(gauge);
    async move {
        gauge.enter();
        tokio::time::sleep(delay).await;
        gauge.exit();
        Ok(())
    }
    .boxed()
}

/// `n` gauged units with delays drawn from `0..=max_ms` milliseconds.
pub fn random_delay_units(
    gauge: &Arc<Gauge>,
    n: usize,
    max_ms: u64,
    seed: u64,
) -> Vec<BoxFuture<'static, Result<(), String>>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| gauged_unit(gauge, Duration::from_millis(rng.gen_range(0..=max_ms))))
        .collect()
}

/// A unit that sleeps for `delay` and then fails or succeeds.
pub fn delayed_unit(delay: Duration, fail: bool) -> BoxFuture<'static, Result<(), String>> {
    async move {
        tokio::time::sleep(delay).await;
        if fail {
            Err("designed to fail".to_string())
        } else {
            Ok(())
        }
    }
    .boxed()
}
