//! Newline-delimited JSON dataset files
//!
//! Dataset dumps hold one JSON document per line. Readers skip blank lines and
//! skip (but count and log) lines that fail to parse, so one damaged record
//! does not discard a multi-gigabyte file.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use yardstick_core::{Error, Result};

/// Records parsed from an NDJSON file.
#[derive(Debug, Clone, PartialEq)]
pub struct NdjsonBatch<T> {
    /// Successfully parsed records, in file order
    pub records: Vec<T>,
    /// Non-blank lines that failed to parse
    pub skipped: usize,
}

/// Parse every line of `path` as `T`.
pub fn read_ndjson<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<NdjsonBatch<T>> {
    read_ndjson_limit(path, None)
}

/// Parse lines of `path` as `T`, stopping after `limit` records if given.
pub fn read_ndjson_limit<T: DeserializeOwned>(
    path: impl AsRef<Path>,
    limit: Option<usize>,
) -> Result<NdjsonBatch<T>> {
    let path = path.as_ref();
    let unavailable = |reason: String| Error::CorpusUnavailable {
        path: path.to_path_buf(),
        reason,
    };
    let file = File::open(path).map_err(|e| unavailable(e.to_string()))?;

    let mut batch = NdjsonBatch {
        records: Vec::new(),
        skipped: 0,
    };
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        if limit.map_or(false, |max| batch.records.len() >= max) {
            break;
        }
        let line = line.map_err(|e| unavailable(e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(&line) {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                warn!(path = %path.display(), line = line_no + 1, error = %e, "skipping malformed line");
                batch.skipped += 1;
            }
        }
    }

    info!(
        path = %path.display(),
        records = batch.records.len(),
        skipped = batch.skipped,
        "read ndjson"
    );
    Ok(batch)
}

/// Copy the first `max` lines of `input` to `output`. Returns lines written.
pub fn truncate_ndjson(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    max: usize,
) -> Result<usize> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let read_err = |e: std::io::Error| Error::CorpusUnavailable {
        path: input.to_path_buf(),
        reason: e.to_string(),
    };
    let write_err = |e: std::io::Error| Error::CorpusUnavailable {
        path: output.to_path_buf(),
        reason: e.to_string(),
    };

    let reader = BufReader::new(File::open(input).map_err(read_err)?);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let mut writer = BufWriter::new(File::create(output).map_err(write_err)?);

    let mut written = 0;
    for line in reader.lines().take(max) {
        let line = line.map_err(read_err)?;
        writeln!(writer, "{}", line).map_err(write_err)?;
        written += 1;
    }
    writer.flush().map_err(write_err)?;

    info!(input = %input.display(), output = %output.display(), lines = written, "truncated ndjson");
    Ok(written)
}
