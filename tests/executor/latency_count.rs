//! One latency sample per unit, excluding permit wait.

use std::time::Duration;

use yardstick::concurrency::BoundedExecutor;
use yardstick::metrics::summarize;

use crate::common::{delayed_unit, random_delay_units, Gauge};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sample_count_matches_units() {
    for n in [1, 7, 250] {
        let gauge = Gauge::new();
        let outcome = BoundedExecutor::new(8)
            .unwrap()
            .run(random_delay_units(&gauge, n, 2, n as u64))
            .await;
        assert_eq!(outcome.latencies_ms.len(), n);
        assert!(outcome.latencies_ms.iter().all(|ms| *ms >= 0.0));
    }
}

#[tokio::test]
async fn test_queue_wait_is_excluded() {
    // Serialized: the last unit waits ~4 delays for its permit.
    let delay = Duration::from_millis(30);
    let units = (0..5).map(|_| delayed_unit(delay, false)).collect::<Vec<_>>();
    let outcome = BoundedExecutor::new(1).unwrap().run(units).await;

    let max = outcome.latencies_ms.iter().cloned().fold(0.0, f64::max);
    assert!(max >= 30.0);
    assert!(max < 30.0 * 3.0, "a sample included queue time: {} ms", max);
}

#[tokio::test]
async fn test_samples_feed_summary() {
    let units = (0..10)
        .map(|_| delayed_unit(Duration::from_millis(5), false))
        .collect::<Vec<_>>();
    let outcome = BoundedExecutor::new(5).unwrap().run(units).await;
    let summary = summarize(outcome.total_wall_time, &outcome.latencies_ms);
    let latency = summary.latency.unwrap();
    assert_eq!(summary.samples, 10);
    assert!(latency.min >= 5.0);
    assert!(latency.min <= latency.p50 && latency.p50 <= latency.max);
}
