//! Reference corpus files
//!
//! A sample directory holds three JSON arrays:
//! `businesses_sample.json`, `users_sample.json` and `reviews_sample.json`.
//! [`SampleDumper`] writes them from full dataset records; [`SampleLoader`]
//! reads them back into a [`ReferenceCorpus`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use yardstick_core::{
    Business, BusinessSample, Error, ReferenceCorpus, Result, Review, ReviewSample, User,
    UserSample,
};

/// Business sample file name.
pub const BUSINESS_SAMPLE_FILE: &str = "businesses_sample.json";
/// User sample file name.
pub const USER_SAMPLE_FILE: &str = "users_sample.json";
/// Review sample file name.
pub const REVIEW_SAMPLE_FILE: &str = "reviews_sample.json";
/// Default cap on samples written per file.
pub const DEFAULT_SAMPLE_MAX: usize = 10_000;

/// Load a corpus from a sample directory.
pub fn load_corpus(dir: impl AsRef<Path>) -> Result<ReferenceCorpus> {
    SampleLoader::new(dir.as_ref()).load()
}

// =============================================================================
// Loader
// =============================================================================

/// Reads sample files from a directory.
#[derive(Debug, Clone)]
pub struct SampleLoader {
    dir: PathBuf,
}

impl SampleLoader {
    /// Loader for `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load all three sample sets.
    ///
    /// The directory must exist. A missing file yields an empty set; an
    /// unreadable or corrupt file fails with [`Error::CorpusUnavailable`].
    pub fn load(&self) -> Result<ReferenceCorpus> {
        if !self.dir.is_dir() {
            return Err(Error::CorpusUnavailable {
                path: self.dir.clone(),
                reason: "not a directory".into(),
            });
        }

        let corpus = ReferenceCorpus::new(
            self.load_set::<BusinessSample>(BUSINESS_SAMPLE_FILE)?,
            self.load_set::<UserSample>(USER_SAMPLE_FILE)?,
            self.load_set::<ReviewSample>(REVIEW_SAMPLE_FILE)?,
        );
        info!(
            dir = %self.dir.display(),
            businesses = corpus.businesses.len(),
            users = corpus.users.len(),
            reviews = corpus.reviews.len(),
            "loaded reference corpus"
        );
        Ok(corpus)
    }

    fn load_set<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.dir.join(file);
        if !path.exists() {
            debug!(path = %path.display(), "sample file absent, using empty set");
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&path).map_err(|e| Error::CorpusUnavailable {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| Error::CorpusUnavailable {
            path,
            reason: e.to_string(),
        })
    }
}

// =============================================================================
// Dumper
// =============================================================================

/// Writes trimmed sample files from full dataset records.
#[derive(Debug, Clone)]
pub struct SampleDumper {
    dir: PathBuf,
    max: usize,
}

impl SampleDumper {
    /// Dumper writing into `dir` with the default cap.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            max: DEFAULT_SAMPLE_MAX,
        }
    }

    /// Override the per-file cap.
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }

    /// Write up to `max` business samples. Returns the number written.
    pub fn dump_businesses<'b>(
        &self,
        businesses: impl IntoIterator<Item = &'b Business>,
    ) -> Result<usize> {
        let samples: Vec<BusinessSample> = businesses
            .into_iter()
            .take(self.max)
            .map(BusinessSample::from)
            .collect();
        self.write(BUSINESS_SAMPLE_FILE, &samples)
    }

    /// Write up to `max` user samples. Returns the number written.
    pub fn dump_users<'u>(&self, users: impl IntoIterator<Item = &'u User>) -> Result<usize> {
        let samples: Vec<UserSample> = users
            .into_iter()
            .take(self.max)
            .map(UserSample::from)
            .collect();
        self.write(USER_SAMPLE_FILE, &samples)
    }

    /// Write up to `max` review samples. Returns the number written.
    pub fn dump_reviews<'r>(&self, reviews: impl IntoIterator<Item = &'r Review>) -> Result<usize> {
        let samples: Vec<ReviewSample> = reviews
            .into_iter()
            .take(self.max)
            .map(ReviewSample::from)
            .collect();
        self.write(REVIEW_SAMPLE_FILE, &samples)
    }

    fn write<T: Serialize>(&self, file: &str, samples: &[T]) -> Result<usize> {
        let path = self.dir.join(file);
        let unavailable = |reason: String| Error::CorpusUnavailable {
            path: path.clone(),
            reason,
        };
        fs::create_dir_all(&self.dir).map_err(|e| unavailable(e.to_string()))?;
        let json = serde_json::to_string_pretty(samples).map_err(|e| unavailable(e.to_string()))?;
        fs::write(&path, json).map_err(|e| unavailable(e.to_string()))?;
        info!(path = %path.display(), samples = samples.len(), "wrote sample file");
        Ok(samples.len())
    }
}
