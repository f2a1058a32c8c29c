//! Action execution.

use std::fs;
use std::sync::Arc;

use anyhow::{bail, Context};
use serde_json::json;
use tracing::{info, warn};

use yardstick::concurrency::ExecutorOptions;
use yardstick::generator::{generate, load_corpus, SampleDumper};
use yardstick::interpreter::{
    full_scan_units, insert_units, point_read_units, Backend, ExecutionUnit,
    DEFAULT_SEARCH_LIMIT,
};
use yardstick::metrics::{summarize, write_reports, BenchmarkReport};
use yardstick::model::{Business, Entity, EntityKind, ReferenceCorpus, Review, User};
use yardstick::storage::{FaultyBackend, MemoryBackend};
use yardstick::wire::{truncate_ndjson, DatasetDir, InstructionStore};
use yardstick::{measure, Benchmark};

use crate::config::{BackendKind, Scenario};
use crate::format::{format_message, format_report, format_summary, format_sweep, OutputMode};
use crate::parse::{CliAction, RunArgs, WorkloadArgs};

/// Execute one action, printing results to stdout.
pub async fn execute(action: CliAction, mode: OutputMode) -> anyhow::Result<()> {
    match action {
        CliAction::Generate { workload, output } => {
            let corpus = corpus(&workload)?;
            let instructions = generate(workload.seed, workload.count, &corpus);
            InstructionStore::save(&instructions, &output)?;
            println!(
                "{}",
                format_message(
                    &format!(
                        "wrote {} instructions (seed {}) to {}",
                        instructions.len(),
                        workload.seed,
                        output.display()
                    ),
                    json!({
                        "instructions": instructions.len(),
                        "seed": workload.seed,
                        "path": output,
                    }),
                    mode,
                )
            );
        }
        CliAction::Run(args) => {
            let reports = run_levels(&args).await?;
            if let Some(path) = &args.output {
                write_reports(path, args.format, &reports)?;
            }
            for report in &reports {
                println!("{}", format_report(report, mode, args.quiet_failures));
            }
        }
        CliAction::Sweep(args) => {
            let reports = run_levels(&args).await?;
            if let Some(path) = &args.output {
                write_reports(path, args.format, &reports)?;
            }
            println!("{}", format_sweep(&reports, mode));
        }
        CliAction::Summarize { input, wall_time } => {
            let text = fs::read_to_string(&input)
                .with_context(|| format!("cannot read {}", input.display()))?;
            let latencies: Vec<f64> = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a JSON array of numbers", input.display()))?;
            println!("{}", format_summary(&summarize(wall_time, &latencies), mode));
        }
        CliAction::DumpSamples {
            dataset,
            output,
            max,
        } => {
            let dataset = DatasetDir::new(dataset);
            let businesses: Vec<Business> = read_kind(&dataset, EntityKind::Business, max)?
                .into_iter()
                .filter_map(|e| match e {
                    Entity::Business(b) => Some(b),
                    _ => None,
                })
                .collect();
            let users: Vec<User> = read_kind(&dataset, EntityKind::User, max)?
                .into_iter()
                .filter_map(|e| match e {
                    Entity::User(u) => Some(u),
                    _ => None,
                })
                .collect();
            let reviews: Vec<Review> = read_kind(&dataset, EntityKind::Review, max)?
                .into_iter()
                .filter_map(|e| match e {
                    Entity::Review(r) => Some(r),
                    _ => None,
                })
                .collect();

            let dumper = SampleDumper::new(&output).with_max(max);
            let written = (
                dumper.dump_businesses(&businesses)?,
                dumper.dump_users(&users)?,
                dumper.dump_reviews(&reviews)?,
            );
            println!(
                "{}",
                format_message(
                    &format!(
                        "wrote {} business, {} user and {} review samples to {}",
                        written.0,
                        written.1,
                        written.2,
                        output.display()
                    ),
                    json!({
                        "businesses": written.0,
                        "users": written.1,
                        "reviews": written.2,
                        "path": output,
                    }),
                    mode,
                )
            );
        }
        CliAction::Reduce { input, output, max } => {
            let lines = truncate_ndjson(&input, &output, max)?;
            println!(
                "{}",
                format_message(
                    &format!("kept {} lines of {} in {}", lines, input.display(), output.display()),
                    json!({ "lines": lines, "path": output }),
                    mode,
                )
            );
        }
    }
    Ok(())
}

// =========================================================================
// Benchmark runs
// =========================================================================

async fn run_levels(args: &RunArgs) -> anyhow::Result<Vec<BenchmarkReport>> {
    let dataset = match &args.dataset {
        Some(dir) => {
            let batch = DatasetDir::new(dir).read_all(args.dataset_limit)?;
            if batch.skipped > 0 {
                warn!(skipped = batch.skipped, "dataset lines skipped");
            }
            Some(batch.records)
        }
        None => None,
    };

    let memory = match args.backend {
        BackendKind::Memory => MemoryBackend::new(),
    };
    if args.scenario != Scenario::Load {
        if let Some(records) = &dataset {
            let loaded = memory.seed(records.iter().cloned());
            info!(loaded, "preloaded backend");
        }
    }
    let backend: Arc<dyn Backend> = if args.faults.is_noop() {
        Arc::new(memory)
    } else {
        Arc::new(FaultyBackend::new(memory, args.faults)?)
    };

    if args.scenario == Scenario::Workload {
        return run_workload(args, backend).await;
    }

    let corpus = match args.scenario {
        Scenario::PointReads => corpus(&args.workload)?,
        _ => ReferenceCorpus::empty(),
    };
    let records = match (args.scenario, dataset) {
        (Scenario::Load, Some(records)) => records,
        (Scenario::Load, None) => bail!("the load scenario needs --dataset"),
        _ => Vec::new(),
    };

    let mut reports = Vec::with_capacity(args.levels.len());
    for &level in &args.levels {
        let units: Vec<ExecutionUnit> = match args.scenario {
            Scenario::Load => insert_units(records.clone(), &backend),
            Scenario::PointReads => point_read_units(&corpus, &backend, DEFAULT_SEARCH_LIMIT),
            Scenario::FullScan => full_scan_units(&backend),
            Scenario::Workload => Vec::new(),
        };
        let options = ExecutorOptions {
            max_concurrency: level,
            unit_timeout: args.unit_timeout,
            failure_policy: args.failure_policy,
        };
        let result = measure(args.scenario.as_str(), backend.name(), options, units).await?;
        reports.push(result.report);
    }
    Ok(reports)
}

async fn run_workload(
    args: &RunArgs,
    backend: Arc<dyn Backend>,
) -> anyhow::Result<Vec<BenchmarkReport>> {
    let mut builder = Benchmark::builder()
        .label(Scenario::Workload.as_str())
        .seed(args.workload.seed)
        .failure_policy(args.failure_policy);
    if let Some(timeout) = args.unit_timeout {
        builder = builder.unit_timeout(timeout);
    }
    builder = match &args.instructions {
        Some(path) => builder.instructions(InstructionStore::load(path)?),
        None => builder
            .count(args.workload.count)
            .corpus(corpus(&args.workload)?),
    };

    let benchmark = builder.build()?;
    let results = benchmark.sweep(backend, &args.levels).await?;
    Ok(results.into_iter().map(|r| r.report).collect())
}

// =========================================================================
// Helpers
// =========================================================================

/// Load the corpus, or fall back to an empty one when the default directory
/// does not exist.
fn corpus(workload: &WorkloadArgs) -> anyhow::Result<ReferenceCorpus> {
    if !workload.corpus_required && !workload.corpus_dir.exists() {
        warn!(
            dir = %workload.corpus_dir.display(),
            "corpus directory not found, generating from fallbacks"
        );
        return Ok(ReferenceCorpus::empty());
    }
    Ok(load_corpus(&workload.corpus_dir)?)
}

fn read_kind(dataset: &DatasetDir, kind: EntityKind, max: usize) -> anyhow::Result<Vec<Entity>> {
    if dataset.file(kind).is_none() {
        warn!(dir = %dataset.path().display(), %kind, "no dataset file, writing empty samples");
        return Ok(Vec::new());
    }
    Ok(dataset.read(kind, Some(max))?.records)
}
