//! Yardstick CLI: generate workloads and benchmark backends.
//!
//! - `yardstick generate`: seed + corpus to an instruction file
//! - `yardstick run` / `yardstick sweep`: measure one or several concurrency levels
//! - `yardstick summarize`: statistics for a saved latency list
//! - `yardstick dump-samples` / `yardstick reduce`: dataset preparation
//!
//! Exit code 1 means the benchmark could not run at all. A run in which some
//! operations failed still exits 0 and reports the failure count.

mod commands;
mod config;
mod format;
mod parse;
mod run;

use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use commands::build_cli;
use config::Config;
use format::{format_error, OutputMode};
use parse::matches_to_action;

fn main() {
    let matches = build_cli().get_matches();
    let mode = OutputMode::from_flag(matches.get_one::<String>("format"));
    init_logging(matches.get_one::<String>("log-format").map(String::as_str));

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let exit_code = match try_main(&matches, config_path) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            1
        }
    };
    process::exit(exit_code);
}

fn try_main(matches: &clap::ArgMatches, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = Config::load(config_path.as_deref())?;
    let action = matches_to_action(matches, &config)?;
    let mode = OutputMode::from_flag(matches.get_one::<String>("format"));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run::execute(action, mode))
}

fn init_logging(format: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if format == Some("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}
