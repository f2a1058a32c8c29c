//! Generate, persist, replay and report, end to end.

#[path = "common/mod.rs"]
mod common;

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use yardstick::metrics::{write_reports, CSV_HEADER};
use yardstick::prelude::*;

use common::sample_corpus;

fn workload_file(dir: &tempfile::TempDir, seed: u64, count: usize) -> std::path::PathBuf {
    let path = dir.path().join("instruction-set.json");
    InstructionStore::save(&generate(seed, count, &sample_corpus()), &path).unwrap();
    path
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_replay_saved_workload() {
    let tmp = tempfile::tempdir().unwrap();
    let path = workload_file(&tmp, 123, 400);

    let benchmark = Benchmark::builder()
        .instructions(InstructionStore::load(&path).unwrap())
        .concurrency(8)
        .build()
        .unwrap();
    let memory = Arc::new(MemoryBackend::new());
    let result = benchmark.run(memory.clone()).await.unwrap();

    assert!(result.is_clean(), "{:?}", result.first_error());
    assert_eq!(result.report.submitted, 400);
    assert_eq!(result.latencies_ms.len(), 400);
    assert_eq!(result.report.backend, "memory");
    assert!(memory.total_len() > 0, "writes reached the backend");
}

#[tokio::test]
async fn test_generated_and_loaded_workloads_match() {
    let tmp = tempfile::tempdir().unwrap();
    let path = workload_file(&tmp, 77, 150);

    let generated = Benchmark::builder()
        .seed(77)
        .count(150)
        .corpus(sample_corpus())
        .build()
        .unwrap();
    assert_eq!(
        generated.instructions(),
        &InstructionStore::load(&path).unwrap()
    );
}

#[tokio::test]
async fn test_every_call_failing_is_still_a_result() {
    let faulty = FaultyBackend::new(
        MemoryBackend::new(),
        FaultConfig::default().with_failure_rate(1.0).with_seed(3),
    )
    .unwrap();
    let benchmark = Benchmark::builder()
        .seed(5)
        .count(60)
        .corpus(sample_corpus())
        .concurrency(4)
        .build()
        .unwrap();

    let result = benchmark.run(Arc::new(faulty)).await.unwrap();
    assert_eq!(result.failures.len(), 60);
    assert_eq!(result.latencies_ms.len(), 60);
    assert_eq!(result.report.backend, "faulty(memory)");
    let err = result.first_error().and_then(|f| f.as_failed()).unwrap();
    assert!(err.is_backend_failure());
    assert!(err.to_string().contains("injected failure"));
}

#[tokio::test]
async fn test_injected_latency_shows_in_samples() {
    let faulty = FaultyBackend::new(
        MemoryBackend::new(),
        FaultConfig::latency(Duration::from_millis(5)),
    )
    .unwrap();
    let benchmark = Benchmark::builder()
        .instructions(vec![
            Instruction::ViewUser {
                user_id: "u0".into(),
            };
            20
        ])
        .concurrency(4)
        .build()
        .unwrap();

    let result = benchmark.run(Arc::new(faulty)).await.unwrap();
    let latency = result.report.summary.latency.as_ref().unwrap();
    assert!(latency.min >= 5.0);
    assert!(result.total_wall_time >= Duration::from_millis(25));
}

#[tokio::test]
async fn test_sweep_written_as_csv() {
    let tmp = tempfile::tempdir().unwrap();
    let benchmark = Benchmark::builder()
        .seed(9)
        .count(100)
        .corpus(sample_corpus())
        .label("mixed")
        .build()
        .unwrap();
    let results = benchmark
        .sweep(Arc::new(MemoryBackend::new()), &[1, 2, 4])
        .await
        .unwrap();
    let reports: Vec<BenchmarkReport> = results.into_iter().map(|r| r.report).collect();

    let path = tmp.path().join("results").join("mixed.csv");
    assert_eq!(write_reports(&path, ResultFormat::Csv, &reports).unwrap(), 3);

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], CSV_HEADER.join(","));
    assert!(lines[1].starts_with("1,"));
    assert!(lines[3].starts_with("4,"));
    assert!(lines.iter().skip(1).all(|l| l.ends_with(",0")));
}

#[tokio::test]
async fn test_raw_workload_with_bad_entry_runs_the_rest() {
    let raws = vec![
        RawInstruction::new("ViewUser").with("user_id", "u1"),
        RawInstruction::new("PostReview")
            .with("user_id", "u1")
            .with("business_id", "b1")
            .with("stars", "11")
            .with("text", "too many stars"),
        RawInstruction::new("CreateUser").with("name", "Zed"),
    ];
    let memory = Arc::new(MemoryBackend::new());
    let backend: Arc<dyn Backend> = memory.clone();
    let interpreter = Interpreter::new();
    let units: Vec<ExecutionUnit> = raws
        .iter()
        .map(|raw| interpreter.bind_raw_deferred(raw, Arc::clone(&backend)))
        .collect();

    let result = measure("raw", backend.name(), ExecutorOptions::new(2), units)
        .await
        .unwrap();
    assert_eq!(result.failures.len(), 1);
    let err = result.failures[0].as_failed().unwrap();
    assert_eq!(err.malformed_field(), Some("stars"));
    assert_eq!(memory.len(EntityKind::User), 1);
}
