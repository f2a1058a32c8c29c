//! ArgMatches + Config → CliAction conversion.
//!
//! Flags win over config values; config values win over built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use clap::ArgMatches;

use yardstick::concurrency::FailurePolicy;
use yardstick::generator::DEFAULT_SAMPLE_MAX;
use yardstick::metrics::ResultFormat;
use yardstick::model::Error;
use yardstick::storage::FaultConfig;

use crate::config::{BackendKind, Config, Scenario};

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    Generate {
        workload: WorkloadArgs,
        output: PathBuf,
    },
    Run(RunArgs),
    Sweep(RunArgs),
    Summarize {
        input: PathBuf,
        wall_time: Duration,
    },
    DumpSamples {
        dataset: PathBuf,
        output: PathBuf,
        max: usize,
    },
    Reduce {
        input: PathBuf,
        output: PathBuf,
        max: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadArgs {
    pub seed: u64,
    pub count: usize,
    pub corpus_dir: PathBuf,
    /// Set when `--corpus` was given; a missing directory is then an error
    pub corpus_required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunArgs {
    pub workload: WorkloadArgs,
    /// Replay this file instead of generating
    pub instructions: Option<PathBuf>,
    pub scenario: Scenario,
    pub backend: BackendKind,
    pub levels: Vec<usize>,
    pub unit_timeout: Option<Duration>,
    pub failure_policy: FailurePolicy,
    pub faults: FaultConfig,
    pub dataset: Option<PathBuf>,
    pub dataset_limit: Option<usize>,
    pub output: Option<PathBuf>,
    pub format: ResultFormat,
    pub quiet_failures: bool,
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches, config: &Config) -> Result<CliAction, Error> {
    let (sub_name, m) = matches
        .subcommand()
        .ok_or_else(|| Error::InvalidConfig("no command provided".into()))?;

    match sub_name {
        "generate" => Ok(CliAction::Generate {
            workload: workload(m, config),
            output: path(m, "output").unwrap_or_else(|| config.workload.instructions.clone()),
        }),
        "run" => {
            let mut args = run_args(m, config)?;
            args.levels = vec![m
                .get_one::<usize>("concurrency")
                .copied()
                .or_else(|| config.run.concurrency.first().copied())
                .unwrap_or(1)];
            validate_levels(&args.levels)?;
            Ok(CliAction::Run(args))
        }
        "sweep" => {
            let mut args = run_args(m, config)?;
            if let Some(levels) = m.get_many::<usize>("levels") {
                args.levels = levels.copied().collect();
            }
            validate_levels(&args.levels)?;
            if args.output.is_none() {
                args.output = Some(config.output.results_dir.join(format!(
                    "{}.{}",
                    args.scenario.as_str(),
                    args.format.extension()
                )));
            }
            Ok(CliAction::Sweep(args))
        }
        "summarize" => {
            let wall = m.get_one::<f64>("wall-time").copied().unwrap_or(0.0);
            let wall_time = Duration::try_from_secs_f64(wall).map_err(|_| {
                Error::InvalidConfig(format!("invalid wall time: {}", wall))
            })?;
            Ok(CliAction::Summarize {
                input: required_path(m, "input")?,
                wall_time,
            })
        }
        "dump-samples" => Ok(CliAction::DumpSamples {
            dataset: path(m, "dataset")
                .or_else(|| config.backend.dataset_dir.clone())
                .ok_or_else(|| Error::InvalidConfig("--dataset is required".into()))?,
            output: path(m, "output").unwrap_or_else(|| config.workload.corpus_dir.clone()),
            max: m.get_one::<usize>("max").copied().unwrap_or(DEFAULT_SAMPLE_MAX),
        }),
        "reduce" => Ok(CliAction::Reduce {
            input: required_path(m, "input")?,
            output: required_path(m, "output")?,
            max: m.get_one::<usize>("max").copied().unwrap_or(10_000),
        }),
        other => Err(Error::InvalidConfig(format!("unknown command: {}", other))),
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn path(m: &ArgMatches, id: &str) -> Option<PathBuf> {
    m.get_one::<String>(id).map(PathBuf::from)
}

fn required_path(m: &ArgMatches, id: &str) -> Result<PathBuf, Error> {
    path(m, id).ok_or_else(|| Error::InvalidConfig(format!("missing <{}>", id)))
}

fn workload(m: &ArgMatches, config: &Config) -> WorkloadArgs {
    WorkloadArgs {
        seed: m
            .get_one::<u64>("seed")
            .copied()
            .unwrap_or(config.workload.seed),
        count: m
            .get_one::<usize>("count")
            .copied()
            .unwrap_or(config.workload.count),
        corpus_dir: path(m, "corpus").unwrap_or_else(|| config.workload.corpus_dir.clone()),
        corpus_required: m.contains_id("corpus"),
    }
}

fn run_args(m: &ArgMatches, config: &Config) -> Result<RunArgs, Error> {
    let scenario = match m.get_one::<String>("scenario") {
        Some(s) => Scenario::parse(s)?,
        None => config.run.scenario,
    };
    let failure_policy = match m.get_one::<String>("policy") {
        Some(s) => s.parse::<FailurePolicy>().map_err(Error::InvalidConfig)?,
        None => config.run.failure_policy,
    };
    let timeout_ms = m
        .get_one::<u64>("timeout-ms")
        .copied()
        .unwrap_or(config.run.unit_timeout_ms);

    let mut faults = config.backend.faults();
    if let Some(&v) = m.get_one::<u64>("latency-ms") {
        faults.latency_ms = v;
    }
    if let Some(&v) = m.get_one::<u64>("jitter-ms") {
        faults.jitter_ms = v;
    }
    if let Some(&v) = m.get_one::<f64>("failure-rate") {
        faults.failure_rate = v;
    }
    if let Some(&v) = m.get_one::<u64>("fault-seed") {
        faults.seed = v;
    }
    faults.validate()?;

    Ok(RunArgs {
        workload: workload(m, config),
        instructions: path(m, "instructions"),
        scenario,
        backend: config.backend.kind,
        levels: config.run.concurrency.clone(),
        unit_timeout: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
        failure_policy,
        faults,
        dataset: path(m, "dataset").or_else(|| config.backend.dataset_dir.clone()),
        dataset_limit: m
            .get_one::<usize>("dataset-limit")
            .copied()
            .or(config.backend.dataset_limit),
        output: path(m, "output"),
        format: config.output.format,
        quiet_failures: m.get_flag("quiet-failures"),
    })
}

fn validate_levels(levels: &[usize]) -> Result<(), Error> {
    if levels.is_empty() {
        return Err(Error::InvalidConfig("no concurrency levels given".into()));
    }
    if levels.contains(&0) {
        return Err(Error::InvalidConfig(
            "concurrency levels must be at least 1".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::build_cli;

    fn parse(args: &[&str]) -> Result<CliAction, Error> {
        let matches = build_cli().try_get_matches_from(args).unwrap();
        matches_to_action(&matches, &Config::default())
    }

    #[test]
    fn test_generate_defaults() {
        match parse(&["yardstick", "generate", "--seed", "5"]).unwrap() {
            CliAction::Generate { workload, output } => {
                assert_eq!(workload.seed, 5);
                assert_eq!(workload.count, yardstick::DEFAULT_COUNT);
                assert_eq!(output, PathBuf::from("instruction-set.json"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_run_flags_override_config() {
        let action = parse(&[
            "yardstick",
            "run",
            "--concurrency",
            "12",
            "--policy",
            "cancel",
            "--timeout-ms",
            "250",
            "--failure-rate",
            "0.1",
        ])
        .unwrap();
        match action {
            CliAction::Run(args) => {
                assert_eq!(args.levels, vec![12]);
                assert_eq!(args.failure_policy, FailurePolicy::CancelOnFirstError);
                assert_eq!(args.unit_timeout, Some(Duration::from_millis(250)));
                assert_eq!(args.faults.failure_rate, 0.1);
                assert_eq!(args.scenario, Scenario::Workload);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_sweep_default_output() {
        match parse(&["yardstick", "sweep", "--scenario", "full-scan"]).unwrap() {
            CliAction::Sweep(args) => {
                assert_eq!(args.levels, vec![1, 2, 4, 8, 16, 32, 64]);
                assert_eq!(args.output, Some(PathBuf::from("results/full-scan.csv")));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        assert!(matches!(
            parse(&["yardstick", "run", "--concurrency", "0"]),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            parse(&["yardstick", "run", "--policy", "retry"]),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            parse(&["yardstick", "run", "--failure-rate", "3"]),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            parse(&["yardstick", "dump-samples"]),
            Err(Error::InvalidConfig(_))
        ));
    }
}
