//! In-flight units never exceed the configured limit.

use yardstick::concurrency::BoundedExecutor;

use crate::common::{random_delay_units, Gauge};

async fn peak_for(limit: usize, units: usize, seed: u64) -> usize {
    let gauge = Gauge::new();
    let executor = BoundedExecutor::new(limit).unwrap();
    let outcome = executor
        .run(random_delay_units(&gauge, units, 3, seed))
        .await;
    assert!(outcome.is_clean());
    assert_eq!(outcome.latencies_ms.len(), units);
    gauge.peak()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_limit_one_serializes() {
    for seed in 0..3 {
        assert_eq!(peak_for(1, 500, seed).await, 1, "seed {}", seed);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_limits_hold_under_load() {
    for limit in [2, 8, 64] {
        for seed in 0..4 {
            let peak = peak_for(limit, 500, seed).await;
            assert!(
                peak <= limit,
                "limit {} seed {} saw {} in flight",
                limit,
                seed,
                peak
            );
            assert!(peak >= 1);
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_limit_above_unit_count() {
    let peak = peak_for(1000, 40, 3).await;
    assert!(peak <= 40);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_fresh_permits_each_run() {
    let executor = BoundedExecutor::new(4).unwrap();
    for seed in 0..3 {
        let gauge = Gauge::new();
        let outcome = executor.run(random_delay_units(&gauge, 50, 2, seed)).await;
        assert_eq!(outcome.submitted, 50);
        assert!(gauge.peak() <= 4);
    }
}

#[test]
fn test_zero_is_rejected() {
    assert!(BoundedExecutor::new(0).is_err());
}
