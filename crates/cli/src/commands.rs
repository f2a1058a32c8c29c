//! Clap command tree for the `yardstick` binary.

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the full command tree.
pub fn build_cli() -> Command {
    Command::new("yardstick")
        .about("Reproducible workload generation and bounded-concurrency database benchmarks")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_name("PATH")
                .help("TOML config file (default: yardstick.toml if present)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .global(true)
                .value_parser(["human", "json"])
                .default_value("human")
                .help("Output format"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Log line format (logs go to stderr)"),
        )
        .subcommand(generate_cmd())
        .subcommand(run_cmd())
        .subcommand(sweep_cmd())
        .subcommand(summarize_cmd())
        .subcommand(dump_samples_cmd())
        .subcommand(reduce_cmd())
}

// =========================================================================
// Subcommands
// =========================================================================

fn generate_cmd() -> Command {
    Command::new("generate")
        .about("Generate a workload and save it as a JSON instruction file")
        .args(workload_args())
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("PATH")
                .help("Destination file (default: [workload] instructions or instruction-set.json)"),
        )
}

fn run_cmd() -> Command {
    Command::new("run")
        .about("Run one scenario at one concurrency level and print the report")
        .args(workload_args())
        .args(execution_args())
        .arg(
            Arg::new("concurrency")
                .long("concurrency")
                .short('n')
                .env("YARDSTICK_CONCURRENCY")
                .value_parser(value_parser!(usize))
                .help("Maximum operations in flight"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("PATH")
                .help("Also append the report to this results file"),
        )
}

fn sweep_cmd() -> Command {
    Command::new("sweep")
        .about("Run one scenario at several concurrency levels and write a results file")
        .args(workload_args())
        .args(execution_args())
        .arg(
            Arg::new("levels")
                .long("levels")
                .short('l')
                .env("YARDSTICK_LEVELS")
                .value_delimiter(',')
                .num_args(1..)
                .value_parser(value_parser!(usize))
                .help("Concurrency levels, comma separated"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("PATH")
                .help("Results file (default: <results_dir>/<scenario>.<ext>)"),
        )
}

fn summarize_cmd() -> Command {
    Command::new("summarize")
        .about("Print statistics for a JSON array of latencies in milliseconds")
        .arg(Arg::new("input").required(true).value_name("PATH"))
        .arg(
            Arg::new("wall-time")
                .long("wall-time")
                .value_name("SECONDS")
                .value_parser(value_parser!(f64))
                .default_value("0")
                .help("Total wall time, for throughput"),
        )
}

fn dump_samples_cmd() -> Command {
    Command::new("dump-samples")
        .about("Extract a reference corpus from a dataset directory")
        .arg(
            Arg::new("dataset")
                .long("dataset")
                .short('d')
                .value_name("DIR")
                .help("Directory of NDJSON dataset files"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("DIR")
                .help("Sample directory (default: [workload] corpus_dir)"),
        )
        .arg(
            Arg::new("max")
                .long("max")
                .value_parser(value_parser!(usize))
                .help("Samples kept per kind"),
        )
}

fn reduce_cmd() -> Command {
    Command::new("reduce")
        .about("Keep the first lines of an NDJSON file")
        .arg(Arg::new("input").required(true).value_name("PATH"))
        .arg(Arg::new("output").required(true).value_name("PATH"))
        .arg(
            Arg::new("max")
                .long("max")
                .value_parser(value_parser!(usize))
                .default_value("10000")
                .help("Lines to keep"),
        )
}

// =========================================================================
// Shared argument groups
// =========================================================================

fn workload_args() -> Vec<Arg> {
    vec![
        Arg::new("seed")
            .long("seed")
            .short('s')
            .env("YARDSTICK_SEED")
            .value_parser(value_parser!(u64))
            .help("Generator seed"),
        Arg::new("count")
            .long("count")
            .value_parser(value_parser!(usize))
            .help("Number of instructions to generate"),
        Arg::new("corpus")
            .long("corpus")
            .value_name("DIR")
            .help("Reference corpus sample directory"),
    ]
}

fn execution_args() -> Vec<Arg> {
    vec![
        Arg::new("instructions")
            .long("instructions")
            .short('i')
            .value_name("PATH")
            .help("Replay this instruction file instead of generating"),
        Arg::new("scenario")
            .long("scenario")
            .value_parser(["workload", "load", "point-reads", "full-scan"])
            .help("What to measure"),
        Arg::new("dataset")
            .long("dataset")
            .short('d')
            .value_name("DIR")
            .help("Dataset directory to preload (or to insert, for the load scenario)"),
        Arg::new("dataset-limit")
            .long("dataset-limit")
            .value_parser(value_parser!(usize))
            .help("Records read per dataset file"),
        Arg::new("timeout-ms")
            .long("timeout-ms")
            .value_parser(value_parser!(u64))
            .help("Per-operation timeout in milliseconds (0 disables)"),
        Arg::new("policy")
            .long("policy")
            .value_name("POLICY")
            .help("fail-soft or cancel-on-first-error"),
        Arg::new("latency-ms")
            .long("latency-ms")
            .value_parser(value_parser!(u64))
            .help("Simulated backend latency"),
        Arg::new("jitter-ms")
            .long("jitter-ms")
            .value_parser(value_parser!(u64))
            .help("Simulated backend jitter bound"),
        Arg::new("failure-rate")
            .long("failure-rate")
            .value_parser(value_parser!(f64))
            .help("Simulated backend failure probability"),
        Arg::new("fault-seed")
            .long("fault-seed")
            .value_parser(value_parser!(u64))
            .help("Seed for simulated jitter and failures"),
        Arg::new("quiet-failures")
            .long("quiet-failures")
            .action(ArgAction::SetTrue)
            .help("Print only the failure count, not the messages"),
    ]
}
