//! In-memory reference backend
//!
//! One `DashMap` per entity kind, keyed by entity id. Reads only lock the
//! shard holding the key; writes to different kinds never contend.
//!
//! Searches are filtered scans. With no secondary indices the cost of a
//! search grows with the collection, which is the baseline other backends
//! are compared against.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use yardstick_core::{Criteria, Entity, EntityKind, Error, Result};
use yardstick_interpreter::Backend;

const NAME: &str = "memory";

/// Concurrent in-memory store for all six entity kinds.
#[derive(Debug)]
pub struct MemoryBackend {
    tables: [DashMap<String, Entity>; 6],
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self {
            tables: std::array::from_fn(|_| DashMap::new()),
        }
    }

    /// Bulk load entities. Records without an id get a fresh UUID; records
    /// with an existing id replace the stored one. Returns the count loaded.
    pub fn seed(&self, entities: impl IntoIterator<Item = Entity>) -> usize {
        let mut loaded = 0;
        for mut entity in entities {
            entity.ensure_id(|| uuid::Uuid::new_v4().to_string());
            self.table(entity.kind())
                .insert(entity.id().to_string(), entity);
            loaded += 1;
        }
        debug!(loaded, "seeded memory backend");
        loaded
    }

    /// Number of stored entities of `kind`.
    pub fn len(&self, kind: EntityKind) -> usize {
        self.table(kind).len()
    }

    /// Number of stored entities across all kinds.
    pub fn total_len(&self) -> usize {
        self.tables.iter().map(DashMap::len).sum()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(DashMap::is_empty)
    }

    /// Drop every stored entity.
    pub fn clear(&self) {
        for table in &self.tables {
            table.clear();
        }
    }

    fn table(&self, kind: EntityKind) -> &DashMap<String, Entity> {
        let slot = match kind {
            EntityKind::User => 0,
            EntityKind::Business => 1,
            EntityKind::Review => 2,
            EntityKind::Tip => 3,
            EntityKind::Checkin => 4,
            EntityKind::Photo => 5,
        };
        &self.tables[slot]
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    fn name(&self) -> &str {
        NAME
    }

    /// Upserts by id. An empty id is rejected.
    async fn insert(&self, entity: Entity) -> Result<()> {
        let kind = entity.kind();
        if entity.id().is_empty() {
            return Err(Error::backend(
                NAME,
                format!("insert {}", kind),
                format!("missing {}", kind.id_field()),
            ));
        }
        self.table(kind).insert(entity.id().to_string(), entity);
        Ok(())
    }

    async fn get_by_id(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>> {
        Ok(self.table(kind).get(id).map(|e| e.value().clone()))
    }

    async fn search(
        &self,
        kind: EntityKind,
        criteria: &Criteria,
        limit: usize,
    ) -> Result<Vec<Entity>> {
        Ok(self
            .table(kind)
            .iter()
            .filter(|e| criteria.matches(e.value()))
            .take(limit)
            .map(|e| e.value().clone())
            .collect())
    }

    async fn get_all(&self, kind: EntityKind) -> Result<Vec<Entity>> {
        Ok(self
            .table(kind)
            .iter()
            .map(|e| e.value().clone())
            .collect())
    }
}
