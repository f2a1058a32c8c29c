//! Seeded instruction generator
//!
//! A [`Generator`] owns one `ChaCha8Rng`, seeded exactly once in
//! [`Generator::new`]. Every instruction consumes random numbers from that
//! single stream in a fixed per-kind order:
//!
//! | Kind | Draws, in order |
//! |------|-----------------|
//! | CreateUser | name number |
//! | SearchBusiness | category, city |
//! | ViewBusiness | business |
//! | PostReview | user, business, stars |
//! | PostTip | user, business |
//! | ViewUser | user |
//! | ViewPhotos | business |
//! | Checkin | business, offset seconds |
//! | SearchByNamePrefix | user sample |
//! | SubmitReviewFlow | name number, category, city, stars |
//!
//! Each row is preceded by the kind draw. A user or business draw against an
//! empty sample set consumes nothing and yields the fallback literal.
//!
//! Indices are drawn as `u32` so the stream does not depend on the target's
//! pointer width.

use chrono::{DateTime, TimeZone, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use yardstick_core::{Instruction, InstructionKind, InstructionSequence, ReferenceCorpus};

use crate::catalog::{
    CATEGORIES, CHECKIN_EPOCH_SECS, CHECKIN_WINDOW_SECS, CITIES, FALLBACK_BUSINESS_ID,
    FALLBACK_CATEGORY, FALLBACK_USER_ID, NAME_PREFIX_LEN, NAME_PREFIX_LIMIT, REVIEW_TEXT,
    STAR_RANGE, TIP_TEXT, USER_NAME_SPACE,
};

/// Generate `count` instructions from a fresh generator.
///
/// Equal `(seed, count, corpus)` always produce equal sequences.
pub fn generate(seed: u64, count: usize, corpus: &ReferenceCorpus) -> InstructionSequence {
    Generator::new(seed, corpus).generate(count)
}

/// Deterministic instruction source over a borrowed corpus.
pub struct Generator<'a> {
    seed: u64,
    rng: ChaCha8Rng,
    corpus: &'a ReferenceCorpus,
    produced: u64,
}

impl<'a> Generator<'a> {
    /// Create a generator. The seed is applied here and never again.
    pub fn new(seed: u64, corpus: &'a ReferenceCorpus) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            corpus,
            produced: 0,
        }
    }

    /// Seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Instructions produced so far.
    pub fn produced(&self) -> u64 {
        self.produced
    }

    /// Produce the next `count` instructions, continuing the stream.
    pub fn generate(&mut self, count: usize) -> InstructionSequence {
        let sequence: InstructionSequence = self.by_ref().take(count).collect();
        debug!(
            seed = self.seed,
            count,
            produced = self.produced,
            "generated instructions"
        );
        sequence
    }

    /// Draw a kind, then the instruction's parameters.
    pub fn next_instruction(&mut self) -> Instruction {
        let kind = InstructionKind::ALL[self.index(InstructionKind::ALL.len())];
        self.instruction_of(kind)
    }

    /// Produce an instruction of a given kind, skipping the kind draw.
    pub fn instruction_of(&mut self, kind: InstructionKind) -> Instruction {
        self.produced += 1;
        match kind {
            InstructionKind::CreateUser => Instruction::CreateUser {
                name: self.user_name(),
            },
            InstructionKind::SearchBusiness => {
                let category = self.category();
                let city = self.city();
                Instruction::SearchBusiness { category, city }
            }
            InstructionKind::ViewBusiness => Instruction::ViewBusiness {
                business_id: self.business_id(),
            },
            InstructionKind::PostReview => {
                let user_id = self.user_id();
                let business_id = self.business_id();
                let stars = self.stars();
                Instruction::PostReview {
                    user_id,
                    business_id,
                    stars,
                    text: REVIEW_TEXT.to_string(),
                }
            }
            InstructionKind::PostTip => {
                let user_id = self.user_id();
                let business_id = self.business_id();
                Instruction::PostTip {
                    user_id,
                    business_id,
                    text: TIP_TEXT.to_string(),
                }
            }
            InstructionKind::ViewUser => Instruction::ViewUser {
                user_id: self.user_id(),
            },
            InstructionKind::ViewPhotos => Instruction::ViewPhotos {
                business_id: self.business_id(),
            },
            InstructionKind::Checkin => {
                let business_id = self.business_id();
                let timestamp = self.checkin_time();
                Instruction::Checkin {
                    business_id,
                    timestamp,
                }
            }
            InstructionKind::SearchByNamePrefix => Instruction::SearchByNamePrefix {
                prefix: self.name_prefix(),
                limit: NAME_PREFIX_LIMIT,
            },
            InstructionKind::SubmitReviewFlow => {
                let name = self.user_name();
                let category = self.category();
                let city = self.city();
                let stars = self.stars();
                Instruction::SubmitReviewFlow {
                    name,
                    category,
                    city,
                    stars,
                    text: REVIEW_TEXT.to_string(),
                }
            }
        }
    }

    // =========================================================================
    // Draws
    // =========================================================================

    fn corpus(&self) -> &'a ReferenceCorpus {
        self.corpus
    }

    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0 && len <= u32::MAX as usize);
        self.rng.gen_range(0..len as u32) as usize
    }

    fn user_name(&mut self) -> String {
        format!("user_{}", self.rng.gen_range(0..USER_NAME_SPACE))
    }

    fn user_id(&mut self) -> String {
        let users = &self.corpus().users;
        if users.is_empty() {
            return FALLBACK_USER_ID.to_string();
        }
        users[self.index(users.len())].user_id.clone()
    }

    fn business_id(&mut self) -> String {
        let businesses = &self.corpus().businesses;
        if businesses.is_empty() {
            return FALLBACK_BUSINESS_ID.to_string();
        }
        businesses[self.index(businesses.len())].business_id.clone()
    }

    fn category(&mut self) -> String {
        let businesses = &self.corpus().businesses;
        if businesses.is_empty() {
            return CATEGORIES[self.index(CATEGORIES.len())].to_string();
        }
        businesses[self.index(businesses.len())]
            .primary_category()
            .unwrap_or(FALLBACK_CATEGORY)
            .to_string()
    }

    fn city(&mut self) -> String {
        CITIES[self.index(CITIES.len())].to_string()
    }

    fn stars(&mut self) -> f64 {
        f64::from(self.rng.gen_range(STAR_RANGE))
    }

    fn checkin_time(&mut self) -> DateTime<Utc> {
        let offset = self.rng.gen_range(0..CHECKIN_WINDOW_SECS);
        Utc.timestamp_opt(CHECKIN_EPOCH_SECS + offset, 0)
            .single()
            .unwrap_or_default()
    }

    fn name_prefix(&mut self) -> String {
        let users = &self.corpus().users;
        let name = if users.is_empty() {
            FALLBACK_USER_ID
        } else {
            let sample = &users[self.index(users.len())];
            if sample.name.trim().is_empty() {
                sample.user_id.as_str()
            } else {
                sample.name.as_str()
            }
        };
        let prefix: String = name.trim().chars().take(NAME_PREFIX_LEN).collect();
        if prefix.is_empty() {
            FALLBACK_USER_ID.chars().take(NAME_PREFIX_LEN).collect()
        } else {
            prefix
        }
    }
}

impl Iterator for Generator<'_> {
    type Item = Instruction;

    /// The stream never ends.
    fn next(&mut self) -> Option<Instruction> {
        Some(self.next_instruction())
    }
}
