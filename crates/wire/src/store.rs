//! Instruction store
//!
//! A workload file is one JSON array of `{ "type": ..., "parameters": {...} }`
//! objects, pretty-printed for inspection. Saving goes through a sibling temp
//! file and a rename, so readers never observe a half-written workload.
//!
//! Loading is strict: a missing, unreadable or syntactically invalid file is
//! [`Error::StoreUnavailable`], never an empty sequence.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{error, info};

use yardstick_core::{Error, Instruction, InstructionSequence, RawInstruction, Result};

/// Reads and writes instruction sequence files.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstructionStore;

impl InstructionStore {
    /// Write `instructions` to `path`, creating parent directories.
    pub fn save(instructions: &[Instruction], path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let raw: Vec<RawInstruction> = instructions.iter().map(RawInstruction::from).collect();
        Self::save_raw(&raw, path)?;
        info!(path = %path.display(), instructions = instructions.len(), "saved workload");
        Ok(())
    }

    /// Write raw instructions to `path` without validating them.
    pub fn save_raw(instructions: &[RawInstruction], path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let unavailable = |reason: String| Error::StoreUnavailable {
            path: path.to_path_buf(),
            reason,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| unavailable(e.to_string()))?;
        }

        let tmp = temp_path(path);
        let file = File::create(&tmp).map_err(|e| unavailable(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, instructions)
            .map_err(|e| unavailable(e.to_string()))?;
        writer.write_all(b"\n").map_err(|e| unavailable(e.to_string()))?;
        let file = writer
            .into_inner()
            .map_err(|e| unavailable(e.error().to_string()))?;
        file.sync_all().map_err(|e| unavailable(e.to_string()))?;
        drop(file);

        fs::rename(&tmp, path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            unavailable(e.to_string())
        })
    }

    /// Read and validate every instruction in `path`.
    ///
    /// The first element that fails validation aborts the load; malformed
    /// errors carry the element index in their reason.
    pub fn load(path: impl AsRef<Path>) -> Result<InstructionSequence> {
        let path = path.as_ref();
        let raw = Self::load_raw(path)?;
        let count = raw.len();

        let instructions = raw
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                Instruction::try_from(raw).map_err(|e| {
                    error!(path = %path.display(), index, error = %e, "invalid instruction in workload");
                    with_index(e, index)
                })
            })
            .collect::<Result<InstructionSequence>>()?;

        info!(path = %path.display(), instructions = count, "loaded workload");
        Ok(instructions)
    }

    /// Read `path` as raw instructions, checking structure only.
    pub fn load_raw(path: impl AsRef<Path>) -> Result<Vec<RawInstruction>> {
        let path = path.as_ref();
        let unavailable = |reason: String| Error::StoreUnavailable {
            path: path.to_path_buf(),
            reason,
        };
        let file = File::open(path).map_err(|e| unavailable(e.to_string()))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| unavailable(e.to_string()))
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "instructions".into());
    name.push(".tmp");
    path.with_file_name(name)
}

fn with_index(err: Error, index: usize) -> Error {
    match err {
        Error::MalformedInstruction {
            kind,
            field,
            reason,
        } => Error::MalformedInstruction {
            kind,
            field,
            reason: format!("{} (instruction #{})", reason, index),
        },
        other => other,
    }
}
