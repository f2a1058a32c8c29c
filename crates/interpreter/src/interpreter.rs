//! Instruction interpreter
//!
//! Maps each instruction onto the backend calls that implement it:
//!
//! | Kind | Backend calls |
//! |------|---------------|
//! | CreateUser | insert user |
//! | SearchBusiness | search business (city equals, categories contains) |
//! | ViewBusiness | get business by id |
//! | PostReview | insert review |
//! | PostTip | insert tip |
//! | ViewUser | get user by id |
//! | ViewPhotos | search photo (business id equals) |
//! | Checkin | insert checkin |
//! | SearchByNamePrefix | search user (name prefix) |
//! | SubmitReviewFlow | insert user, search business, insert review |
//!
//! The interpreter holds only options. The backend is chosen per call, so one
//! interpreter serves any number of backends.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use yardstick_core::{Instruction, RawInstruction, Result};

use crate::backend::Backend;
use crate::handlers::{flow, read, write};

/// One instruction bound to one backend, ready to run.
pub type ExecutionUnit = BoxFuture<'static, Result<()>>;

/// Default result cap for business and photo searches.
pub const DEFAULT_SEARCH_LIMIT: usize = 100;

/// Interpreter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterOptions {
    /// Result cap for business searches
    pub search_limit: usize,
    /// Result cap for photo listings
    pub photo_limit: usize,
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        Self {
            search_limit: DEFAULT_SEARCH_LIMIT,
            photo_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

/// Turns instructions into execution units.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interpreter {
    options: InterpreterOptions,
}

impl Interpreter {
    /// Interpreter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpreter with explicit options.
    pub fn with_options(options: InterpreterOptions) -> Self {
        Self { options }
    }

    /// The configured options.
    pub fn options(&self) -> &InterpreterOptions {
        &self.options
    }

    /// Bind a typed instruction to a backend.
    pub fn bind(&self, instruction: &Instruction, backend: Arc<dyn Backend>) -> ExecutionUnit {
        let instruction = instruction.clone();
        let interpreter = *self;
        async move { interpreter.execute(&instruction, backend.as_ref()).await }.boxed()
    }

    /// Validate a raw instruction, then bind it.
    ///
    /// Fails with `MalformedInstruction` or `UnsupportedInstructionKind`
    /// before any backend call is made.
    pub fn bind_raw(&self, raw: &RawInstruction, backend: Arc<dyn Backend>) -> Result<ExecutionUnit> {
        let instruction = Instruction::try_from(raw.clone())?;
        Ok(self.bind(&instruction, backend))
    }

    /// Bind a raw instruction, deferring any validation error to the unit.
    ///
    /// An invalid instruction becomes a unit that fails immediately, so it is
    /// reported alongside backend failures instead of aborting the batch.
    pub fn bind_raw_deferred(&self, raw: &RawInstruction, backend: Arc<dyn Backend>) -> ExecutionUnit {
        match self.bind_raw(raw, backend) {
            Ok(unit) => unit,
            Err(e) => futures::future::ready(Err(e)).boxed(),
        }
    }

    /// Bind every instruction in order.
    pub fn bind_all(
        &self,
        instructions: &[Instruction],
        backend: &Arc<dyn Backend>,
    ) -> Vec<ExecutionUnit> {
        instructions
            .iter()
            .map(|i| self.bind(i, Arc::clone(backend)))
            .collect()
    }

    /// Run one instruction to completion against `backend`.
    pub async fn execute(&self, instruction: &Instruction, backend: &dyn Backend) -> Result<()> {
        match instruction {
            Instruction::CreateUser { name } => {
                write::create_user(backend, name).await?;
            }
            Instruction::SearchBusiness { category, city } => {
                read::search_business(backend, category, city, self.options.search_limit).await?;
            }
            Instruction::ViewBusiness { business_id } => {
                read::view_business(backend, business_id).await?;
            }
            Instruction::PostReview {
                user_id,
                business_id,
                stars,
                text,
            } => {
                write::post_review(backend, user_id, business_id, *stars, text).await?;
            }
            Instruction::PostTip {
                user_id,
                business_id,
                text,
            } => {
                write::post_tip(backend, user_id, business_id, text).await?;
            }
            Instruction::ViewUser { user_id } => {
                read::view_user(backend, user_id).await?;
            }
            Instruction::ViewPhotos { business_id } => {
                read::view_photos(backend, business_id, self.options.photo_limit).await?;
            }
            Instruction::Checkin {
                business_id,
                timestamp,
            } => {
                write::checkin(backend, business_id, timestamp).await?;
            }
            Instruction::SearchByNamePrefix { prefix, limit } => {
                read::search_by_name_prefix(backend, prefix, *limit).await?;
            }
            Instruction::SubmitReviewFlow {
                name,
                category,
                city,
                stars,
                text,
            } => {
                flow::submit_review_flow(backend, name, category, city, *stars, text).await?;
            }
        }
        Ok(())
    }
}
