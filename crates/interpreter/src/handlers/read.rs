//! Handlers that only read

use tracing::trace;

use yardstick_core::{Criteria, Entity, EntityKind, Result};

use crate::backend::Backend;

/// Businesses in `city` whose categories mention `category`.
pub fn business_criteria(category: &str, city: &str) -> Criteria {
    Criteria::new()
        .equals("city", city)
        .contains("categories", category)
}

/// Search businesses by category and city.
pub async fn search_business(
    backend: &dyn Backend,
    category: &str,
    city: &str,
    limit: usize,
) -> Result<Vec<Entity>> {
    let hits = backend
        .search(EntityKind::Business, &business_criteria(category, city), limit)
        .await?;
    trace!(category, city, hits = hits.len(), "business search");
    Ok(hits)
}

/// Fetch a business. A missing business is not an error.
pub async fn view_business(backend: &dyn Backend, business_id: &str) -> Result<Option<Entity>> {
    backend.get_by_id(EntityKind::Business, business_id).await
}

/// Fetch a user. A missing user is not an error.
pub async fn view_user(backend: &dyn Backend, user_id: &str) -> Result<Option<Entity>> {
    backend.get_by_id(EntityKind::User, user_id).await
}

/// Photos of a business.
pub async fn view_photos(
    backend: &dyn Backend,
    business_id: &str,
    limit: usize,
) -> Result<Vec<Entity>> {
    backend
        .search(
            EntityKind::Photo,
            &Criteria::new().equals("business_id", business_id),
            limit,
        )
        .await
}

/// Users whose name starts with `prefix`.
pub async fn search_by_name_prefix(
    backend: &dyn Backend,
    prefix: &str,
    limit: usize,
) -> Result<Vec<Entity>> {
    backend
        .search(EntityKind::User, &Criteria::new().prefix("name", prefix), limit)
        .await
}
