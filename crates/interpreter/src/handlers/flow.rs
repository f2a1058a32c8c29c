//! Composite instruction handlers
//!
//! A composite performs several backend calls in order inside one execution
//! unit, so its latency covers every step.

use tracing::debug;

use yardstick_core::Result;

use super::{read, write};
use crate::backend::Backend;

/// Create a user, find a matching business, and review it as that user.
///
/// When no business matches, the flow ends after the search and still
/// succeeds.
pub async fn submit_review_flow(
    backend: &dyn Backend,
    name: &str,
    category: &str,
    city: &str,
    stars: f64,
    text: &str,
) -> Result<()> {
    let user_id = write::create_user(backend, name).await?;

    let hits = read::search_business(backend, category, city, 1).await?;
    let Some(business) = hits.first() else {
        debug!(category, city, "review flow found no business");
        return Ok(());
    };

    write::post_review(backend, &user_id, business.id(), stars, text).await
}
