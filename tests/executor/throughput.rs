//! Wall time and throughput of fixed-delay batches.

use std::time::Duration;

use yardstick::concurrency::BoundedExecutor;

use crate::common::delayed_unit;

const DELAY: Duration = Duration::from_millis(40);

async fn wall_time(n: usize, concurrency: usize) -> Duration {
    let units = (0..n).map(|_| delayed_unit(DELAY, false)).collect::<Vec<_>>();
    let outcome = BoundedExecutor::new(concurrency).unwrap().run(units).await;
    assert!(outcome.throughput() > 0.0);
    outcome.total_wall_time
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_wall_time_tracks_waves() {
    for (n, c) in [(8, 1), (8, 4), (10, 4), (16, 16)] {
        let waves = ((n + c - 1) / c) as u32;
        let expected = DELAY * waves;
        let actual = wall_time(n, c).await;
        assert!(actual >= expected, "n={} c={} took {:?}", n, c, actual);
        assert!(
            actual < expected + Duration::from_millis(400),
            "n={} c={} took {:?}, expected about {:?}",
            n,
            c,
            actual,
            expected
        );
    }
}

#[tokio::test]
async fn test_empty_batch() {
    let outcome = BoundedExecutor::new(8)
        .unwrap()
        .run(Vec::<futures::future::BoxFuture<'static, Result<(), String>>>::new())
        .await;
    assert_eq!(outcome.submitted, 0);
    assert!(outcome.latencies_ms.is_empty());
    assert!(outcome.is_clean());
}
