//! Fixed benchmark scenarios
//!
//! Besides replaying generated workloads, a backend is usually measured on
//! three plain scenarios:
//!
//! - bulk load: one insert per dataset record
//! - point reads: by-id lookups driven by the reference corpus
//! - full scans: one `get_all` per entity kind

use std::sync::Arc;

use futures::FutureExt;

use yardstick_core::{Criteria, Entity, EntityKind, ReferenceCorpus};

use crate::backend::Backend;
use crate::handlers::fresh_id;
use crate::interpreter::ExecutionUnit;

/// One insert unit per entity. Records without an id get a fresh one.
pub fn insert_units(entities: Vec<Entity>, backend: &Arc<dyn Backend>) -> Vec<ExecutionUnit> {
    entities
        .into_iter()
        .map(|mut entity| {
            entity.ensure_id(fresh_id);
            let backend = Arc::clone(backend);
            async move { backend.insert(entity).await }.boxed()
        })
        .collect()
}

/// By-id and by-business reads over the corpus.
///
/// Per business sample: the business itself, its checkins and its tips.
/// Per user sample: the user. Per review sample: the review.
pub fn point_read_units(
    corpus: &ReferenceCorpus,
    backend: &Arc<dyn Backend>,
    limit: usize,
) -> Vec<ExecutionUnit> {
    let mut units = Vec::with_capacity(
        corpus.businesses.len() * 3 + corpus.users.len() + corpus.reviews.len(),
    );

    for business in &corpus.businesses {
        units.push(get_by_id(backend, EntityKind::Business, &business.business_id));
        for kind in [EntityKind::Checkin, EntityKind::Tip] {
            let backend = Arc::clone(backend);
            let criteria = Criteria::new().equals("business_id", business.business_id.as_str());
            units.push(
                async move { backend.search(kind, &criteria, limit).await.map(|_| ()) }.boxed(),
            );
        }
    }
    for user in &corpus.users {
        units.push(get_by_id(backend, EntityKind::User, &user.user_id));
    }
    for review in &corpus.reviews {
        units.push(get_by_id(backend, EntityKind::Review, &review.review_id));
    }
    units
}

/// One full scan per entity kind.
pub fn full_scan_units(backend: &Arc<dyn Backend>) -> Vec<ExecutionUnit> {
    EntityKind::ALL
        .into_iter()
        .map(|kind| {
            let backend = Arc::clone(backend);
            async move { backend.get_all(kind).await.map(|_| ()) }.boxed()
        })
        .collect()
}

fn get_by_id(backend: &Arc<dyn Backend>, kind: EntityKind, id: &str) -> ExecutionUnit {
    let backend = Arc::clone(backend);
    let id = id.to_string();
    async move { backend.get_by_id(kind, &id).await.map(|_| ()) }.boxed()
}
