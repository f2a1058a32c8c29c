//! A failing unit never stops its siblings.

use std::time::Duration;

use futures::FutureExt;
use yardstick::concurrency::{BoundedExecutor, ExecutorOptions, FailurePolicy, UnitError};

use crate::common::delayed_unit;

async fn run_with_failures(n: usize, failing: usize) {
    let units = (0..n)
        .map(|i| delayed_unit(Duration::from_millis(1), i < failing))
        .collect::<Vec<_>>();
    let outcome = BoundedExecutor::new(4).unwrap().run(units).await;

    assert_eq!(outcome.submitted, n);
    assert_eq!(outcome.latencies_ms.len(), n, "every unit yields a sample");
    assert_eq!(outcome.failure_count(), failing);
    assert_eq!(outcome.succeeded(), n - failing);
    assert!(outcome
        .failures
        .iter()
        .all(|f| f.as_failed().map(String::as_str) == Some("designed to fail")));
}

#[tokio::test]
async fn test_no_failures() {
    run_with_failures(20, 0).await;
}

#[tokio::test]
async fn test_one_failure() {
    run_with_failures(20, 1).await;
}

#[tokio::test]
async fn test_every_unit_fails() {
    run_with_failures(20, 20).await;
}

#[tokio::test]
async fn test_panic_is_isolated() {
    let units = vec![
        delayed_unit(Duration::from_millis(1), false),
        async {
            if true {
                panic!("unit blew up");
            }
            Ok::<(), String>(())
        }
        .boxed(),
        delayed_unit(Duration::from_millis(1), false),
    ];
    let outcome = BoundedExecutor::new(2).unwrap().run(units).await;
    assert_eq!(outcome.failure_count(), 1);
    assert!(matches!(&outcome.failures[0], UnitError::Panicked(msg) if msg.contains("blew up")));
    assert_eq!(outcome.latencies_ms.len(), 3);
}

#[tokio::test]
async fn test_timeout_counts_as_failure() {
    let options = ExecutorOptions::new(2).with_unit_timeout(Duration::from_millis(20));
    let units = vec![
        delayed_unit(Duration::from_millis(1), false),
        delayed_unit(Duration::from_secs(5), false),
    ];
    let outcome = BoundedExecutor::with_options(options).unwrap().run(units).await;
    assert_eq!(outcome.failure_count(), 1);
    assert!(matches!(outcome.failures[0], UnitError::TimedOut(_)));
    assert_eq!(outcome.latencies_ms.len(), 2);
    assert!(outcome.total_wall_time < Duration::from_secs(5));
}

#[tokio::test]
async fn test_cancel_on_first_error_stops_waiting_units() {
    let options =
        ExecutorOptions::new(1).with_failure_policy(FailurePolicy::CancelOnFirstError);
    let mut units = vec![delayed_unit(Duration::ZERO, true)];
    units.extend((0..10).map(|_| delayed_unit(Duration::from_millis(50), false)));

    let outcome = BoundedExecutor::with_options(options).unwrap().run(units).await;
    assert_eq!(outcome.submitted, 11);
    assert!(outcome.cancelled_count() > 0);
    assert!(matches!(outcome.first_error(), Some(UnitError::Failed(_))));
    assert!(outcome.total_wall_time < Duration::from_millis(500));
}
