//! The backend boundary
//!
//! A backend is any store that can insert, fetch, filter and scan the six
//! entity kinds. Everything the interpreter does is expressed through this
//! trait, so the same workload can be replayed against any implementation.

use std::sync::Arc;

use async_trait::async_trait;

use yardstick_core::{Criteria, Entity, EntityKind, Result};

/// Storage operations a benchmarked backend must provide.
///
/// Failures are reported as `Error::BackendOperationFailed`. A missing record
/// is not a failure: `get_by_id` returns `Ok(None)`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Short name used in reports and error messages.
    fn name(&self) -> &str;

    /// Store one entity.
    async fn insert(&self, entity: Entity) -> Result<()>;

    /// Fetch one entity by id.
    async fn get_by_id(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>>;

    /// Entities of `kind` matching `criteria`, at most `limit` of them.
    async fn search(
        &self,
        kind: EntityKind,
        criteria: &Criteria,
        limit: usize,
    ) -> Result<Vec<Entity>>;

    /// Every entity of `kind`.
    async fn get_all(&self, kind: EntityKind) -> Result<Vec<Entity>>;

    /// Store several entities; stops at the first failure.
    async fn insert_many(&self, entities: Vec<Entity>) -> Result<usize> {
        let mut inserted = 0;
        for entity in entities {
            self.insert(entity).await?;
            inserted += 1;
        }
        Ok(inserted)
    }
}

/// A backend shared between units.
pub type SharedBackend = Arc<dyn Backend>;
