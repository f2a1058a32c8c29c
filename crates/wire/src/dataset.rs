//! Review dataset directories
//!
//! A dataset directory holds one NDJSON file per entity kind. Reduced files
//! (`business_reduced.json`) take precedence over full dumps
//! (`yelp_academic_dataset_business.json`).

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use yardstick_core::{
    Business, Checkin, Entity, EntityKind, Error, Photo, Result, Review, Tip, User,
};

use crate::ndjson::{read_ndjson_limit, NdjsonBatch};

/// File name prefix of full dataset dumps.
pub const DATASET_PREFIX: &str = "yelp_academic_dataset_";

/// File name suffix of reduced dataset files.
pub const REDUCED_SUFFIX: &str = "_reduced.json";

/// A directory of per-kind NDJSON files.
#[derive(Debug, Clone)]
pub struct DatasetDir {
    dir: PathBuf,
}

impl DatasetDir {
    /// Point at `dir`. Nothing is read until a `read*` call.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Candidate file names for `kind`, in lookup order.
    pub fn candidates(&self, kind: EntityKind) -> [PathBuf; 2] {
        [
            self.dir.join(format!("{}{}", kind, REDUCED_SUFFIX)),
            self.dir.join(format!("{}{}.json", DATASET_PREFIX, kind)),
        ]
    }

    /// First existing file for `kind`.
    pub fn file(&self, kind: EntityKind) -> Option<PathBuf> {
        self.candidates(kind).into_iter().find(|p| p.is_file())
    }

    /// Read up to `limit` records of `kind`. Fails if the directory or the
    /// kind's file is missing.
    pub fn read(&self, kind: EntityKind, limit: Option<usize>) -> Result<NdjsonBatch<Entity>> {
        self.ensure_dir()?;
        let path = self.file(kind).ok_or_else(|| Error::CorpusUnavailable {
            path: self.dir.clone(),
            reason: format!("no {} file", kind),
        })?;
        match kind {
            EntityKind::User => read_as::<User>(&path, limit),
            EntityKind::Business => read_as::<Business>(&path, limit),
            EntityKind::Review => read_as::<Review>(&path, limit),
            EntityKind::Tip => read_as::<Tip>(&path, limit),
            EntityKind::Checkin => read_as::<Checkin>(&path, limit),
            EntityKind::Photo => read_as::<Photo>(&path, limit),
        }
    }

    /// Read every kind that has a file, up to `limit` records each.
    pub fn read_all(&self, limit: Option<usize>) -> Result<NdjsonBatch<Entity>> {
        self.ensure_dir()?;
        let mut all = NdjsonBatch {
            records: Vec::new(),
            skipped: 0,
        };
        for kind in EntityKind::ALL {
            if self.file(kind).is_none() {
                debug!(dir = %self.dir.display(), %kind, "no dataset file");
                continue;
            }
            let batch = self.read(kind, limit)?;
            all.records.extend(batch.records);
            all.skipped += batch.skipped;
        }
        Ok(all)
    }

    fn ensure_dir(&self) -> Result<()> {
        if self.dir.is_dir() {
            Ok(())
        } else {
            Err(Error::CorpusUnavailable {
                path: self.dir.clone(),
                reason: "dataset directory does not exist".into(),
            })
        }
    }
}

fn read_as<T>(path: &Path, limit: Option<usize>) -> Result<NdjsonBatch<Entity>>
where
    T: DeserializeOwned + Into<Entity>,
{
    let batch = read_ndjson_limit::<T>(path, limit)?;
    Ok(NdjsonBatch {
        records: batch.records.into_iter().map(Into::into).collect(),
        skipped: batch.skipped,
    })
}
