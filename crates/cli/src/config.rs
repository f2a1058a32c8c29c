//! TOML configuration
//!
//! ```toml
//! [workload]
//! seed = 123
//! count = 100000
//! instructions = "instruction-set.json"
//! corpus_dir = "samples"
//!
//! [run]
//! concurrency = [1, 2, 4, 8, 16, 32, 64]
//! unit_timeout_ms = 0
//! failure_policy = "fail-soft"
//! scenario = "workload"
//!
//! [backend]
//! kind = "memory"
//! latency_ms = 0
//! jitter_ms = 0
//! failure_rate = 0.0
//! fault_seed = 0
//!
//! [output]
//! results_dir = "results"
//! format = "csv"
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use yardstick::concurrency::FailurePolicy;
use yardstick::metrics::ResultFormat;
use yardstick::model::Error;
use yardstick::storage::FaultConfig;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "yardstick.toml";

/// Whole config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub workload: WorkloadConfig,
    pub run: RunConfig,
    pub backend: BackendConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkloadConfig {
    pub seed: u64,
    pub count: usize,
    pub instructions: PathBuf,
    pub corpus_dir: PathBuf,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            seed: yardstick::DEFAULT_SEED,
            count: yardstick::DEFAULT_COUNT,
            instructions: PathBuf::from("instruction-set.json"),
            corpus_dir: PathBuf::from("samples"),
        }
    }
}

/// What a run measures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// Replay the instruction workload
    #[default]
    Workload,
    /// Insert every dataset record
    Load,
    /// By-id reads of the corpus samples
    PointReads,
    /// One full scan per entity kind
    FullScan,
}

impl Scenario {
    pub fn as_str(self) -> &'static str {
        match self {
            Scenario::Workload => "workload",
            Scenario::Load => "load",
            Scenario::PointReads => "point-reads",
            Scenario::FullScan => "full-scan",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "workload" => Ok(Scenario::Workload),
            "load" => Ok(Scenario::Load),
            "point-reads" => Ok(Scenario::PointReads),
            "full-scan" => Ok(Scenario::FullScan),
            other => Err(Error::InvalidConfig(format!("unknown scenario: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub concurrency: Vec<usize>,
    /// 0 disables the timeout
    pub unit_timeout_ms: u64,
    pub failure_policy: FailurePolicy,
    pub scenario: Scenario,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            concurrency: vec![1, 2, 4, 8, 16, 32, 64],
            unit_timeout_ms: 0,
            failure_policy: FailurePolicy::FailSoft,
            scenario: Scenario::Workload,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub latency_ms: u64,
    pub jitter_ms: u64,
    pub failure_rate: f64,
    pub fault_seed: u64,
    pub dataset_dir: Option<PathBuf>,
    pub dataset_limit: Option<usize>,
}

impl BackendConfig {
    pub fn faults(&self) -> FaultConfig {
        FaultConfig {
            latency_ms: self.latency_ms,
            jitter_ms: self.jitter_ms,
            failure_rate: self.failure_rate,
            seed: self.fault_seed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub results_dir: PathBuf,
    pub format: ResultFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            format: ResultFormat::Csv,
        }
    }
}

impl Config {
    /// Load `explicit` if given (it must exist), otherwise the default file
    /// if present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, Error> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = fs::read_to_string(&path).map_err(|e| {
            Error::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&text)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))
    }

    /// Parse config text.
    pub fn parse(text: &str) -> Result<Self, String> {
        let config: Config = toml::from_str(text).map_err(|e| e.to_string())?;
        config.backend.faults().validate().map_err(|e| e.to_string())?;
        if config.run.concurrency.contains(&0) {
            return Err("concurrency levels must be at least 1".into());
        }
        Ok(config)
    }
}
